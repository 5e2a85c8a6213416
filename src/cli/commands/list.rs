use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::load_attendance_filtered;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::date;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { cycle, category } = cmd {
        let cycle_date = match cycle {
            Some(s) => {
                Some(date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))?)
            }
            None => None,
        };

        let pool = DbPool::new(&cfg.database)?;
        let records =
            load_attendance_filtered(&pool.conn, cycle_date.as_ref(), category.as_deref())?;

        if records.is_empty() {
            println!("No attendance records found.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("cycle", 10),
            Column::new("category", 10),
            Column::new("member", 12),
            Column::new("status", 18),
            Column::new("fee", 6),
            Column::new("report", 6),
        ]);

        let (mut present, mut late, mut absent) = (0u32, 0u32, 0u32);

        for rec in &records {
            match rec.status.to_db_str() {
                "present" => present += 1,
                "late" => late += 1,
                _ => absent += 1,
            }

            table.add_row(vec![
                rec.cycle_date_str(),
                rec.category.clone(),
                rec.member_id.clone(),
                rec.status.to_db_str().to_string(),
                rec.late_fee.to_string(),
                if rec.report_required { "yes" } else { "" }.to_string(),
            ]);
        }

        println!("{}", table.render());
        println!(
            "{}{} present{}, {}{} late{}, {}{} unexcused{}",
            color_for_status("present"),
            present,
            RESET,
            color_for_status("late"),
            late,
            RESET,
            color_for_status("unexcused_absence"),
            absent,
            RESET
        );
    }

    Ok(())
}
