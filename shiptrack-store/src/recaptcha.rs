use async_trait::async_trait;
use reqwest::Client;
use shiptrack_core::{CaptchaVerifier, CoreResult, Verification};
use std::time::Duration;

use crate::app_config::Config;
use crate::upstream::{http_client, read_json, transport_error};

/// reCAPTCHA `siteverify` client.
#[derive(Clone)]
pub struct RecaptchaClient {
    client: Client,
    verify_url: String,
    secret: String,
}

impl RecaptchaClient {
    pub fn new(verify_url: &str, secret: &str, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            verify_url: verify_url.to_string(),
            secret: secret.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Self::new(
            &config.recaptcha_verify_url,
            &config.recaptcha_secret,
            config.upstream_timeout(),
        )
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaClient {
    async fn verify(&self, token: &str) -> CoreResult<Verification> {
        let response = self
            .client
            .post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await
            .map_err(transport_error)?;

        Ok(Verification::from_payload(read_json(response).await?))
    }
}
