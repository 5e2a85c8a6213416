use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::checkin::{CheckinLogic, CheckinReceipt};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use chrono::{DateTime, Utc};

/// Handle the `checkin` command: the single inbound operation of the
/// check-in engine.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin {
        token,
        category,
        member,
        at,
        json,
    } = cmd
    {
        //
        // 1. Resolve the check-in instant once, at the edge.
        //    --at is a hidden testing override; production uses the
        //    server clock. Everything below receives the instant as a
        //    plain parameter.
        //
        let now: DateTime<Utc> = match at {
            Some(s) => DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| AppError::InvalidInstant(s.to_string()))?,
            None => Utc::now(),
        };

        //
        // 2. Open DB
        //
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // 3. Run the orchestrated check-in
        //
        let result = CheckinLogic::apply(&mut pool, cfg, token, category, member, now);

        match result {
            Ok(outcome) => {
                let rec = outcome.record();

                // Audit trail; failure to log never fails the check-in.
                let _ = ttlog(
                    &pool.conn,
                    "checkin",
                    member,
                    &format!(
                        "{} {} {} → {} (fee {})",
                        outcome.as_str(),
                        category,
                        rec.cycle_date_str(),
                        rec.status.to_db_str(),
                        rec.late_fee
                    ),
                );

                if *json {
                    let receipt = CheckinReceipt::from(&outcome);
                    println!("{}", serde_json::to_string_pretty(&receipt)?);
                    return Ok(());
                }

                let summary = format!(
                    "{} / {} on {}: {} (fee {}{})",
                    member,
                    category,
                    rec.cycle_date_str(),
                    rec.status.to_db_str(),
                    rec.late_fee,
                    if rec.report_required {
                        ", report required"
                    } else {
                        ""
                    }
                );

                if outcome.was_created() {
                    success(format!("Checked in: {}", summary));
                } else {
                    info(format!("Already recorded: {}", summary));
                }

                Ok(())
            }
            Err(e) => {
                if *json {
                    println!(
                        "{}",
                        serde_json::json!({
                            "error": { "kind": e.kind(), "message": e.to_string() }
                        })
                    );
                }
                Err(e)
            }
        }
    } else {
        Ok(())
    }
}
