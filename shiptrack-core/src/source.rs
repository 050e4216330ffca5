use async_trait::async_trait;
use serde_json::Value;

use crate::model::ProviderSnapshot;
use crate::CoreResult;

/// The spreadsheet-backed data provider.
#[async_trait]
pub trait ShipmentSource: Send + Sync {
    /// Fetch every order and log row the provider returns for a reference.
    async fn fetch_snapshot(&self, reference: &str) -> CoreResult<ProviderSnapshot>;

    /// Forward a notification payload as-is and hand back the provider's reply.
    async fn relay_notification(&self, payload: &Value) -> CoreResult<Value>;
}

/// Third-party CAPTCHA verification.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> CoreResult<Verification>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub success: bool,
    /// Raw provider reply, echoed to the client when verification fails.
    pub payload: Value,
}

impl Verification {
    pub fn from_payload(payload: Value) -> Self {
        let success = payload
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Self { success, payload }
    }
}
