//! Token validation against the token store.
//!
//! Read-only: a token is never consumed or mutated here. The same
//! displayed QR code is scanned by many members inside its validity
//! window; duplicate-scan protection belongs to the recorder.

use crate::db::queries::load_token;
use crate::errors::{AppError, AppResult};
use crate::models::token::Token;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

pub struct TokenValidator;

impl TokenValidator {
    /// Resolve and check a presented token for the requested category.
    ///
    /// Unknown token, expired token, and a token issued for a different
    /// category all fail with the same `InvalidOrExpiredToken` kind: to
    /// the member every one of them means "scan the current code again".
    pub fn validate(
        conn: &Connection,
        presented: &str,
        category: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Token> {
        let tok = load_token(conn, presented)?.ok_or_else(|| {
            AppError::InvalidOrExpiredToken("token not recognized".to_string())
        })?;

        if !tok.is_valid_at(now) {
            return Err(AppError::InvalidOrExpiredToken(format!(
                "token expired at {}",
                tok.expires_at.to_rfc3339()
            )));
        }

        if !tok.authorizes(category) {
            return Err(AppError::InvalidOrExpiredToken(format!(
                "token does not authorize category '{}'",
                category
            )));
        }

        Ok(tok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use crate::db::queries::upsert_token;
    use chrono::TimeZone;

    fn conn_with_token(expires_at: DateTime<Utc>) -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        upsert_token(
            &conn,
            &Token {
                token: "qr-123".into(),
                category: "general".into(),
                expires_at,
            },
        )
        .unwrap();
        conn
    }

    #[test]
    fn valid_token_resolves_to_its_category() {
        let now = Utc.with_ymd_and_hms(2025, 6, 22, 1, 0, 0).unwrap();
        let conn = conn_with_token(now + chrono::Duration::minutes(5));

        let tok = TokenValidator::validate(&conn, "qr-123", "general", now).unwrap();
        assert_eq!(tok.category, "general");
    }

    #[test]
    fn expired_token_is_rejected_regardless_of_category() {
        let now = Utc.with_ymd_and_hms(2025, 6, 22, 1, 0, 0).unwrap();
        let conn = conn_with_token(now - chrono::Duration::seconds(1));

        let err = TokenValidator::validate(&conn, "qr-123", "general", now).unwrap_err();
        assert_eq!(err.kind(), "invalid_or_expired_token");
    }

    #[test]
    fn expiry_instant_itself_is_already_stale() {
        let now = Utc.with_ymd_and_hms(2025, 6, 22, 1, 0, 0).unwrap();
        let conn = conn_with_token(now);

        assert!(TokenValidator::validate(&conn, "qr-123", "general", now).is_err());
    }

    #[test]
    fn unknown_token_and_wrong_category_share_the_kind() {
        let now = Utc.with_ymd_and_hms(2025, 6, 22, 1, 0, 0).unwrap();
        let conn = conn_with_token(now + chrono::Duration::minutes(5));

        let unknown = TokenValidator::validate(&conn, "nope", "general", now).unwrap_err();
        assert_eq!(unknown.kind(), "invalid_or_expired_token");

        let wrong = TokenValidator::validate(&conn, "qr-123", "officers", now).unwrap_err();
        assert_eq!(wrong.kind(), "invalid_or_expired_token");
    }

    #[test]
    fn validation_does_not_consume_the_token() {
        let now = Utc.with_ymd_and_hms(2025, 6, 22, 1, 0, 0).unwrap();
        let conn = conn_with_token(now + chrono::Duration::minutes(5));

        for _ in 0..3 {
            TokenValidator::validate(&conn, "qr-123", "general", now).unwrap();
        }
    }
}
