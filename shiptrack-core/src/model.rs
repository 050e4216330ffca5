use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{CoreError, CoreResult};

// ============================================================================
// Provider field names
// ============================================================================

pub const REF_ID: &str = "Ref ID";
pub const CONSIGNMENT_ID: &str = "ConsignmentID";
pub const CONTAINER_TRIP_ID: &str = "ContainerTripID";
pub const ENTITY_ID: &str = "Entity ID";
pub const SHEET: &str = "Sheet";

/// Reads an identifier cell as text.
///
/// Strings are taken as-is and numbers in their decimal form. Empty strings
/// and every other JSON type count as a missing identifier.
pub fn identifier(value: Option<&Value>) -> Option<Cow<'_, str>> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

// ============================================================================
// Records
// ============================================================================

/// A row of the provider's orders sheet. Every column is kept so the client
/// receives the record exactly as the provider sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Order(Map<String, Value>);

impl Order {
    pub fn ref_id(&self) -> Option<Cow<'_, str>> {
        identifier(self.0.get(REF_ID))
    }

    pub fn consignment_id(&self) -> Option<Cow<'_, str>> {
        identifier(self.0.get(CONSIGNMENT_ID))
    }

    pub fn container_trip_id(&self) -> Option<Cow<'_, str>> {
        identifier(self.0.get(CONTAINER_TRIP_ID))
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Order {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Which entity sheet a log entry was written from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSheet {
    Orders,
    Containers,
    Consignments,
}

impl LogSheet {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Orders" => Some(Self::Orders),
            "Containers" => Some(Self::Containers),
            "Consignments" => Some(Self::Consignments),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEntry(Map<String, Value>);

impl LogEntry {
    pub fn entity_id(&self) -> Option<Cow<'_, str>> {
        identifier(self.0.get(ENTITY_ID))
    }

    /// `None` when the sheet is missing, empty or not one of the known sheets.
    pub fn sheet(&self) -> Option<LogSheet> {
        self.0.get(SHEET).and_then(Value::as_str).and_then(LogSheet::parse)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for LogEntry {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

// ============================================================================
// Provider contract
// ============================================================================

/// Decoded body of the provider's lookup response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSnapshot {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub orders: Vec<Order>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub logs: Vec<LogEntry>,
    /// Set by the provider when it refuses the request (bad secret etc).
    #[serde(default)]
    pub error: Option<Value>,
}

impl ProviderSnapshot {
    pub fn from_value(value: Value) -> CoreResult<Self> {
        if !value.is_object() {
            return Err(CoreError::UpstreamContract(
                "expected a JSON object with `orders` and `logs`".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| CoreError::UpstreamContract(e.to_string()))
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body returned to the client by the shipment lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentView {
    pub orders: Vec<Order>,
    pub logs: Vec<LogEntry>,
}
