//! Idempotent recorder: the single writer of attendance records.
//!
//! Duplicate check-ins are a SUCCESS, not an error. The UNIQUE key in
//! the attendance table decides the winner under concurrency; the
//! losing request reads back the stored record and reports
//! `already_recorded` with the winner's payload.

use crate::db::queries::{insert_attendance_if_absent, load_attendance};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub enum RecordOutcome {
    Created(AttendanceRecord),
    AlreadyRecorded(AttendanceRecord),
}

impl RecordOutcome {
    pub fn record(&self) -> &AttendanceRecord {
        match self {
            RecordOutcome::Created(r) | RecordOutcome::AlreadyRecorded(r) => r,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, RecordOutcome::Created(_))
    }

    /// Stable outcome string for the JSON receipt.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordOutcome::Created(_) => "created",
            RecordOutcome::AlreadyRecorded(_) => "already_recorded",
        }
    }
}

pub struct Recorder;

impl Recorder {
    /// Insert-if-absent, then read back whatever the store holds.
    ///
    /// When the insert lost the uniqueness race the candidate's freshly
    /// computed tier is discarded; the stored record is returned
    /// unchanged. Every storage fault maps to `RecordingFailed`, so the
    /// caller can retry the whole check-in and converge.
    pub fn record(conn: &Connection, candidate: &AttendanceRecord) -> AppResult<RecordOutcome> {
        let created = insert_attendance_if_absent(conn, candidate)
            .map_err(|e| AppError::RecordingFailed(e.to_string()))?;

        let stored = load_attendance(
            conn,
            &candidate.member_id,
            &candidate.category,
            &candidate.cycle_date,
        )
        .map_err(|e| AppError::RecordingFailed(e.to_string()))?
        .ok_or_else(|| {
            AppError::RecordingFailed(
                "attendance row missing after insert-if-absent".to_string(),
            )
        })?;

        if created {
            Ok(RecordOutcome::Created(stored))
        } else {
            Ok(RecordOutcome::AlreadyRecorded(stored))
        }
    }
}
