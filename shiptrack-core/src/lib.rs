pub mod lookup;
pub mod model;
pub mod source;

pub use lookup::{lookup_shipment, MatchTier, ShipmentMatch};
pub use model::{LogEntry, LogSheet, Order, ProviderSnapshot, ShipmentView};
pub use source::{CaptchaVerifier, ShipmentSource, Verification};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Upstream request failed: {0}")]
    UpstreamTransport(String),
    #[error("Upstream responded with status {0}")]
    UpstreamStatus(u16),
    #[error("Upstream payload violates contract: {0}")]
    UpstreamContract(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
