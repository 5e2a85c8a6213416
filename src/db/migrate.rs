use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `attendance` table.
///
/// The UNIQUE(member_id, category, cycle_date) constraint IS the
/// concurrency control: concurrent duplicate check-ins race to this
/// index and exactly one insert wins.
fn create_attendance_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            member_id       TEXT NOT NULL,
            category        TEXT NOT NULL,
            cycle_date      TEXT NOT NULL,
            status          TEXT NOT NULL CHECK(status IN ('present','late','unexcused_absence')),
            late_fee        INTEGER NOT NULL DEFAULT 0 CHECK(late_fee >= 0),
            report_required INTEGER NOT NULL DEFAULT 0,
            checked_in_at   TEXT NOT NULL,
            UNIQUE(member_id, category, cycle_date)
        );
        "#,
    )?;
    Ok(())
}

/// Create the read-only collaborator tables: the token store and the
/// role directory. The engine never updates either one during check-in.
fn create_collaborator_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS tokens (
            token      TEXT PRIMARY KEY,
            category   TEXT NOT NULL,
            expires_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS member_roles (
            member_id TEXT NOT NULL,
            role      TEXT NOT NULL,
            UNIQUE(member_id, role)
        );
        "#,
    )?;
    Ok(())
}

/// Versioned migration: reporting index over attendance, added after the
/// initial schema shipped. Marked in the `log` table so it runs once.
fn migrate_add_cycle_index(conn: &Connection) -> Result<()> {
    let version = "20250622_0020_add_attendance_cycle_index";

    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(()); // already applied
    }

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_attendance_cycle
         ON attendance(cycle_date, category);",
    )?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added cycle/category index to attendance')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added cycle index to attendance table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Base schema
    let fresh = !table_exists(conn, "attendance")?;
    create_attendance_table(conn)?;
    create_collaborator_tables(conn)?;

    if fresh {
        success("Created attendance schema (attendance, tokens, member_roles).");
    }

    // 3) Versioned migrations
    migrate_add_cycle_index(conn)?;

    Ok(())
}
