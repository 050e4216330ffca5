use shiptrack_core::{CaptchaVerifier, ShipmentSource};
use shiptrack_store::app_config::Config;
use std::sync::Arc;

use crate::middleware::{OriginPolicy, PublicKey};

#[derive(Clone, Debug)]
pub struct AccessConfig {
    pub public_key: PublicKey,
    pub notify_require_key: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub shipments: Arc<dyn ShipmentSource>,
    pub captcha: Arc<dyn CaptchaVerifier>,
    pub access: AccessConfig,
    pub origins: OriginPolicy,
}

impl AppState {
    pub fn new(
        config: &Config,
        shipments: Arc<dyn ShipmentSource>,
        captcha: Arc<dyn CaptchaVerifier>,
    ) -> Self {
        Self {
            shipments,
            captcha,
            access: AccessConfig {
                public_key: PublicKey::new(config.public_key.clone()),
                notify_require_key: config.notify_require_key,
            },
            origins: OriginPolicy::parse(&config.allowed_origins),
        }
    }
}
