//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid timestamp: {0}")]
    InvalidInstant(String),

    #[error("Invalid UTC offset: {0}")]
    InvalidOffset(String),

    // ---------------------------
    // Check-in taxonomy
    // ---------------------------
    #[error("Invalid or expired token: {0}")]
    InvalidOrExpiredToken(String),

    #[error("Leadership role required: {0}")]
    LeadershipRequired(String),

    #[error("Recording failed: {0}")]
    RecordingFailed(String),

    #[error("Unknown attendance category: {0}")]
    InvalidCategory(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Stable machine-readable kind, used by `checkin --json` so callers
    /// can branch on the failure without parsing the human message.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Io(_) => "io",
            AppError::Db(_) => "db",
            AppError::InvalidDate(_) => "invalid_date",
            AppError::InvalidTime(_) => "invalid_time",
            AppError::InvalidInstant(_) => "invalid_instant",
            AppError::InvalidOffset(_) => "invalid_offset",
            AppError::InvalidOrExpiredToken(_) => "invalid_or_expired_token",
            AppError::LeadershipRequired(_) => "leadership_required",
            AppError::RecordingFailed(_) => "recording_failed",
            AppError::InvalidCategory(_) => "invalid_category",
            AppError::Other(_) => "internal",
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Other(format!("JSON serialization failed: {}", e))
    }
}

pub type AppResult<T> = Result<T, AppError>;
