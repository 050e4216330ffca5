use reqwest::{Client, Response};
use serde_json::Value;
use shiptrack_core::{CoreError, CoreResult};
use std::time::Duration;

pub(crate) fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

pub(crate) fn transport_error(err: reqwest::Error) -> CoreError {
    if err.is_timeout() {
        CoreError::UpstreamTransport(format!("timed out: {err}"))
    } else {
        CoreError::UpstreamTransport(err.to_string())
    }
}

/// Rejects non-success statuses, then decodes the body as JSON.
pub(crate) async fn read_json(response: Response) -> CoreResult<Value> {
    let status = response.status();
    if !status.is_success() {
        return Err(CoreError::UpstreamStatus(status.as_u16()));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| CoreError::UpstreamContract(format!("body is not JSON: {e}")))
}
