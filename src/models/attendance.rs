use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Outcome status of a weekly check-in, stored verbatim in the
/// `attendance` table.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Late,
    UnexcusedAbsence,
}

impl AttendanceStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Late => "late",
            AttendanceStatus::UnexcusedAbsence => "unexcused_absence",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "present" => Some(AttendanceStatus::Present),
            "late" => Some(AttendanceStatus::Late),
            "unexcused_absence" => Some(AttendanceStatus::UnexcusedAbsence),
            _ => None,
        }
    }

}

/// One durable check-in outcome.
///
/// At most one row exists per (member_id, category, cycle_date); the
/// UNIQUE constraint in the schema enforces it, not application logic.
/// Rows are created once and never updated or deleted by this engine.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub member_id: String,   // ⇔ attendance.member_id (TEXT)
    pub category: String,    // ⇔ attendance.category (TEXT)
    pub cycle_date: NaiveDate, // ⇔ attendance.cycle_date (TEXT "YYYY-MM-DD")
    pub status: AttendanceStatus, // ⇔ attendance.status
    pub late_fee: i64,       // ⇔ attendance.late_fee (INT, smallest currency unit)
    pub report_required: bool, // ⇔ attendance.report_required (INT 0/1)
    pub checked_in_at: DateTime<Utc>, // ⇔ attendance.checked_in_at (TEXT, RFC3339)
}

impl AttendanceRecord {
    pub fn cycle_date_str(&self) -> String {
        self.cycle_date.format("%Y-%m-%d").to_string()
    }
}
