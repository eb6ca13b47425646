use serde::{Deserialize, Serialize};
use std::fmt;

/// OAuth access token obtained outside this crate
///
/// Immutable once constructed. The `Debug` output never contains the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    access_token: String,
}

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            access_token: value.into(),
        }
    }

    /// Returns the raw token value
    pub fn as_str(&self) -> &str {
        &self.access_token
    }

    /// Returns true if the token holds a non-blank value
    pub fn is_valid(&self) -> bool {
        !self.access_token.trim().is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .finish()
    }
}
