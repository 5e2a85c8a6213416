use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) TOTALS
    //
    let records: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM attendance", [], |row| row.get(0))?;
    let tokens: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM tokens", [], |row| row.get(0))?;
    let roles: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM member_roles", [], |row| row.get(0))?;

    println!(
        "{}• Attendance records:{} {}{}{}",
        CYAN, RESET, GREEN, records, RESET
    );
    println!("{}• Tokens:{} {}", CYAN, RESET, tokens);
    println!("{}• Role grants:{} {}", CYAN, RESET, roles);

    //
    // 3) CYCLE RANGE
    //
    let first_cycle: Option<String> = pool
        .conn
        .query_row(
            "SELECT cycle_date FROM attendance ORDER BY cycle_date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_cycle: Option<String> = pool
        .conn
        .query_row(
            "SELECT cycle_date FROM attendance ORDER BY cycle_date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_cycle.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_cycle.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Cycle range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) OUTSTANDING FEES
    //
    let fees: i64 = pool.conn.query_row(
        "SELECT COALESCE(SUM(late_fee), 0) FROM attendance",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Accumulated late fees:{} {}", CYAN, RESET, fees);

    println!();
    Ok(())
}
