use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shiptrack_core::{CoreResult, ProviderSnapshot, ShipmentSource};
use std::time::Duration;
use tracing::{debug, warn};

use crate::app_config::Config;
use crate::upstream::{http_client, read_json, transport_error};

/// Client for the spreadsheet web app that backs orders and logs.
#[derive(Clone)]
pub struct SheetClient {
    client: Client,
    endpoint: String,
    secret: String,
}

impl SheetClient {
    pub fn new(endpoint: &str, secret: &str, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            endpoint: endpoint.to_string(),
            secret: secret.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Self::new(&config.rgs_endpoint, &config.rgs_secret, config.upstream_timeout())
    }
}

#[async_trait]
impl ShipmentSource for SheetClient {
    async fn fetch_snapshot(&self, reference: &str) -> CoreResult<ProviderSnapshot> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("secret", self.secret.as_str()), ("ref", reference)])
            .send()
            .await
            .map_err(transport_error)?;

        let snapshot = ProviderSnapshot::from_value(read_json(response).await?)?;
        if let Some(err) = &snapshot.error {
            warn!("Sheet provider reported an error for ref {}: {}", reference, err);
        }
        debug!(
            "Sheet returned {} orders and {} logs for ref {}",
            snapshot.orders.len(),
            snapshot.logs.len(),
            reference
        );
        Ok(snapshot)
    }

    async fn relay_notification(&self, payload: &Value) -> CoreResult<Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        let reply = read_json(response).await?;
        debug!("Sheet notify response: {}", reply);
        Ok(reply)
    }
}
