use chrono::{DateTime, Utc};
use serde::Serialize;

/// A scanned check-in token as stored in the token store.
///
/// Tokens are issued elsewhere (the rotating QR generator); this engine
/// only reads them. A token stays valid for every member until its
/// expiry instant; replay protection lives in the attendance UNIQUE
/// constraint, not here.
#[derive(Debug, Clone, Serialize)]
pub struct Token {
    pub token: String,
    pub category: String,
    pub expires_at: DateTime<Utc>,
}

impl Token {
    /// Strict expiry: the token is usable only while `now` is before
    /// `expires_at`. An exactly-at-expiry scan is already stale.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    pub fn authorizes(&self, category: &str) -> bool {
        self.category == category
    }
}
