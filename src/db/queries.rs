use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::models::token::Token;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::HashSet;

pub fn map_attendance_row(row: &Row) -> Result<AttendanceRecord> {
    let cycle_str: String = row.get("cycle_date")?;
    let cycle_date = NaiveDate::parse_from_str(&cycle_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(cycle_str.clone())),
        )
    })?;

    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid status: {}", status_str))),
        )
    })?;

    let checked_str: String = row.get("checked_in_at")?;
    let checked_in_at = DateTime::parse_from_rfc3339(&checked_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidInstant(checked_str.clone())),
            )
        })?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        member_id: row.get("member_id")?,
        category: row.get("category")?,
        cycle_date,
        status,
        late_fee: row.get("late_fee")?,
        report_required: row.get::<_, i64>("report_required")? == 1,
        checked_in_at,
    })
}

/// Insert-if-absent on the (member_id, category, cycle_date) key.
///
/// Returns true when this call created the row, false when the UNIQUE
/// constraint swallowed the insert because a record already exists.
/// The losing write is discarded on purpose: first write wins.
pub fn insert_attendance_if_absent(conn: &Connection, rec: &AttendanceRecord) -> AppResult<bool> {
    let changed = conn.execute(
        "INSERT INTO attendance
            (member_id, category, cycle_date, status, late_fee, report_required, checked_in_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(member_id, category, cycle_date) DO NOTHING",
        params![
            rec.member_id,
            rec.category,
            rec.cycle_date.format("%Y-%m-%d").to_string(),
            rec.status.to_db_str(),
            rec.late_fee,
            if rec.report_required { 1 } else { 0 },
            rec.checked_in_at.to_rfc3339(),
        ],
    )?;
    Ok(changed > 0)
}

pub fn load_attendance(
    conn: &Connection,
    member_id: &str,
    category: &str,
    cycle_date: &NaiveDate,
) -> AppResult<Option<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance
         WHERE member_id = ?1 AND category = ?2 AND cycle_date = ?3",
    )?;

    let rec = stmt
        .query_row(
            params![
                member_id,
                category,
                cycle_date.format("%Y-%m-%d").to_string()
            ],
            map_attendance_row,
        )
        .optional()?;

    Ok(rec)
}

/// Attendance rows for the `list` command, newest cycle first.
pub fn load_attendance_filtered(
    conn: &Connection,
    cycle_date: Option<&NaiveDate>,
    category: Option<&str>,
) -> AppResult<Vec<AttendanceRecord>> {
    let mut sql = String::from("SELECT * FROM attendance WHERE 1=1");
    let mut args: Vec<String> = Vec::new();

    if let Some(d) = cycle_date {
        sql.push_str(&format!(" AND cycle_date = ?{}", args.len() + 1));
        args.push(d.format("%Y-%m-%d").to_string());
    }
    if let Some(c) = category {
        sql.push_str(&format!(" AND category = ?{}", args.len() + 1));
        args.push(c.to_string());
    }
    sql.push_str(" ORDER BY cycle_date DESC, category ASC, member_id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = args.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
    let rows = stmt.query_map(rusqlite::params_from_iter(params), map_attendance_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Token store (read-only during check-in)
// ---------------------------

pub fn load_token(conn: &Connection, token: &str) -> AppResult<Option<Token>> {
    let mut stmt =
        conn.prepare_cached("SELECT token, category, expires_at FROM tokens WHERE token = ?1")?;

    let row = stmt
        .query_row([token], |row| {
            let expires_str: String = row.get(2)?;
            let expires_at = DateTime::parse_from_rfc3339(&expires_str)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| {
                    rusqlite::Error::FromSqlConversionFailure(
                        2,
                        rusqlite::types::Type::Text,
                        Box::new(AppError::InvalidInstant(expires_str.clone())),
                    )
                })?;

            Ok(Token {
                token: row.get(0)?,
                category: row.get(1)?,
                expires_at,
            })
        })
        .optional()?;

    Ok(row)
}

/// Seed or refresh a token. Re-adding an existing token just moves its
/// expiry; the rotating generator reuses identifiers across windows.
pub fn upsert_token(conn: &Connection, token: &Token) -> AppResult<()> {
    conn.execute(
        "INSERT INTO tokens (token, category, expires_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(token) DO UPDATE SET category = ?2, expires_at = ?3",
        params![token.token, token.category, token.expires_at.to_rfc3339()],
    )?;
    Ok(())
}

pub fn list_tokens(conn: &Connection) -> AppResult<Vec<Token>> {
    let mut stmt =
        conn.prepare("SELECT token, category, expires_at FROM tokens ORDER BY expires_at DESC")?;

    let rows = stmt.query_map([], |row| {
        let expires_str: String = row.get(2)?;
        let expires_at = DateTime::parse_from_rfc3339(&expires_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| {
                rusqlite::Error::FromSqlConversionFailure(
                    2,
                    rusqlite::types::Type::Text,
                    Box::new(AppError::InvalidInstant(expires_str.clone())),
                )
            })?;
        Ok(Token {
            token: row.get(0)?,
            category: row.get(1)?,
            expires_at,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Role directory (read-only during check-in)
// ---------------------------

pub fn load_member_roles(conn: &Connection, member_id: &str) -> AppResult<HashSet<String>> {
    let mut stmt =
        conn.prepare_cached("SELECT role FROM member_roles WHERE member_id = ?1")?;

    let rows = stmt.query_map([member_id], |row| row.get::<_, String>(0))?;

    let mut out = HashSet::new();
    for r in rows {
        out.insert(r?);
    }
    Ok(out)
}

pub fn grant_role(conn: &Connection, member_id: &str, role: &str) -> AppResult<bool> {
    let changed = conn.execute(
        "INSERT INTO member_roles (member_id, role) VALUES (?1, ?2)
         ON CONFLICT(member_id, role) DO NOTHING",
        params![member_id, role],
    )?;
    Ok(changed > 0)
}
