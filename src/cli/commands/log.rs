use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, MAGENTA, RESET, YELLOW};

fn color_for_operation(op: &str) -> &'static str {
    match op {
        "checkin" => GREEN,
        "token_add" => CYAN,
        "role_grant" => YELLOW,
        "migration_applied" => MAGENTA,
        _ => RESET,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::new(&cfg.database)?;

        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        if entries.is_empty() {
            println!("Internal log is empty.");
            return Ok(());
        }

        println!("📜 Internal log:\n");

        for (id, date, operation, target, message) in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(date);

            let color = color_for_operation(&operation);
            let op_target = if target.is_empty() {
                operation.clone()
            } else {
                format!("{} ({})", operation, target)
            };

            println!(
                "{:>4}: {} | {}{:<40}{} => {}",
                id, date, color, op_target, RESET, message
            );
        }
    }

    Ok(())
}
