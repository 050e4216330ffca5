use std::fmt;

use crate::error::AppError;

// ============================================================================
// Public Key Gate
// ============================================================================

/// Key the frontend sends with shipment lookups and notifications.
///
/// This is a plain equality check against a static string. The key ships in
/// the frontend bundle and cannot be rotated per session, so it only keeps
/// casual callers away from the provider. It does not authenticate anyone.
#[derive(Clone)]
pub struct PublicKey(String);

impl PublicKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn admits(&self, presented: Option<&str>) -> bool {
        matches!(presented, Some(key) if !key.is_empty() && key == self.0)
    }

    pub fn check(&self, presented: Option<&str>, message: &str) -> Result<(), AppError> {
        if self.admits(presented) {
            Ok(())
        } else {
            Err(AppError::AuthorizationError(message.to_string()))
        }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PublicKey(***)")
    }
}
