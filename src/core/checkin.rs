//! Check-in orchestrator: validate → authorize → classify → record.
//!
//! Strictly sequential, no internal retries. The first failing step
//! short-circuits and its error kind reaches the caller verbatim; the
//! UI branches on the kind (fresh scan vs. role upgrade vs. plain
//! retry), so nothing may be re-wrapped into a generic error.

use crate::config::Config;
use crate::core::classifier::classify;
use crate::core::clock::CycleClock;
use crate::core::recorder::{RecordOutcome, Recorder};
use crate::core::roles::RoleGate;
use crate::core::token::TokenValidator;
use crate::db::pool::DbPool;
use crate::db::queries::load_member_roles;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Wire-shaped success payload for `checkin --json`.
#[derive(Debug, Serialize)]
pub struct CheckinReceipt {
    pub status: &'static str,
    pub record: ReceiptRecord,
}

#[derive(Debug, Serialize)]
pub struct ReceiptRecord {
    pub status: AttendanceStatus,
    pub late_fee: i64,
    pub report_required: bool,
    pub cycle_date: String,
}

impl From<&RecordOutcome> for CheckinReceipt {
    fn from(outcome: &RecordOutcome) -> Self {
        let rec = outcome.record();
        CheckinReceipt {
            status: outcome.as_str(),
            record: ReceiptRecord {
                status: rec.status,
                late_fee: rec.late_fee,
                report_required: rec.report_required,
                cycle_date: rec.cycle_date_str(),
            },
        }
    }
}

/// High-level business logic for the `checkin` command.
pub struct CheckinLogic;

impl CheckinLogic {
    /// Run one complete check-in. `now` is always supplied by the caller
    /// (the CLI edge takes it from the server clock once); the engine
    /// itself never reads a global clock.
    pub fn apply(
        pool: &mut DbPool,
        cfg: &Config,
        token: &str,
        category: &str,
        member_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<RecordOutcome> {
        //
        // 0. Category must be one of the configured set
        //
        if cfg.category(category).is_none() {
            return Err(AppError::InvalidCategory(category.to_string()));
        }

        let gate = RoleGate::from_config(cfg);
        let clock = CycleClock::from_config(cfg)?;

        //
        // 1. Validate the presented token (read-only)
        //
        TokenValidator::validate(&pool.conn, token, category, now)?;

        //
        // 2. Role gate, before anything touches the attendance store
        //
        if gate.is_gated(category) {
            let held = load_member_roles(&pool.conn, member_id)?;
            gate.authorize(member_id, category, &held)?;
        }

        //
        // 3. Classify elapsed time in the organizational timezone
        //
        let point = clock.evaluate(now);
        let tier = classify(point.elapsed_secs);

        //
        // 4. Record exactly once per (member, category, cycle)
        //
        let candidate = AttendanceRecord {
            id: 0,
            member_id: member_id.to_string(),
            category: category.to_string(),
            cycle_date: point.cycle_date,
            status: tier.status,
            late_fee: tier.late_fee,
            report_required: tier.report_required,
            checked_in_at: now,
        };

        Recorder::record(&pool.conn, &candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::{grant_role, upsert_token};
    use crate::models::token::Token;
    use chrono::{Duration, TimeZone};

    // 10:00 KST on 2025-06-22 (a Sunday) in UTC.
    fn scheduled_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 22, 1, 0, 0).unwrap()
    }

    fn test_pool() -> DbPool {
        let pool = DbPool::open_in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    fn seed_token(pool: &DbPool, token: &str, category: &str, expires_at: DateTime<Utc>) {
        upsert_token(
            &pool.conn,
            &Token {
                token: token.into(),
                category: category.into(),
                expires_at,
            },
        )
        .unwrap();
    }

    #[test]
    fn on_time_checkin_creates_a_present_record() {
        let mut pool = test_pool();
        let cfg = Config::default();
        let now = scheduled_start() + Duration::minutes(35);
        seed_token(&pool, "qr-1", "general", now + Duration::minutes(5));

        let out =
            CheckinLogic::apply(&mut pool, &cfg, "qr-1", "general", "m-001", now).unwrap();
        assert!(out.was_created());
        assert_eq!(out.record().status, AttendanceStatus::Present);
        assert_eq!(out.record().late_fee, 0);
        assert_eq!(out.record().cycle_date_str(), "2025-06-22");
    }

    #[test]
    fn repeating_the_same_request_is_already_recorded_with_equal_payload() {
        let mut pool = test_pool();
        let cfg = Config::default();
        let now = scheduled_start() + Duration::minutes(35);
        seed_token(&pool, "qr-1", "general", now + Duration::minutes(5));

        let first =
            CheckinLogic::apply(&mut pool, &cfg, "qr-1", "general", "m-001", now).unwrap();
        let second =
            CheckinLogic::apply(&mut pool, &cfg, "qr-1", "general", "m-001", now).unwrap();

        assert!(first.was_created());
        assert!(!second.was_created());
        assert_eq!(first.record().status, second.record().status);
        assert_eq!(first.record().late_fee, second.record().late_fee);
        assert_eq!(first.record().checked_in_at, second.record().checked_in_at);
    }

    #[test]
    fn a_different_week_creates_a_fresh_record_with_its_own_tier() {
        let mut pool = test_pool();
        let cfg = Config::default();

        let week1 = scheduled_start() + Duration::minutes(35);
        seed_token(&pool, "qr-1", "general", week1 + Duration::minutes(5));
        CheckinLogic::apply(&mut pool, &cfg, "qr-1", "general", "m-001", week1).unwrap();

        // 75 minutes after start the following Sunday.
        let week2 = scheduled_start() + Duration::days(7) + Duration::minutes(75);
        seed_token(&pool, "qr-2", "general", week2 + Duration::minutes(5));
        let out =
            CheckinLogic::apply(&mut pool, &cfg, "qr-2", "general", "m-001", week2).unwrap();

        assert!(out.was_created());
        assert_eq!(out.record().status, AttendanceStatus::Late);
        assert_eq!(out.record().late_fee, 4000);
        assert!(out.record().report_required);
        assert_eq!(out.record().cycle_date_str(), "2025-06-29");
    }

    #[test]
    fn gated_category_rejects_before_any_write() {
        let mut pool = test_pool();
        let cfg = Config::default();
        let now = scheduled_start() + Duration::minutes(10);
        seed_token(&pool, "qr-off", "officers", now + Duration::minutes(5));

        let err = CheckinLogic::apply(&mut pool, &cfg, "qr-off", "officers", "m-002", now)
            .unwrap_err();
        assert_eq!(err.kind(), "leadership_required");

        // No partial record on authorization failure.
        let count: i64 = pool
            .conn
            .query_row("SELECT COUNT(*) FROM attendance", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn gated_category_passes_with_any_listed_role() {
        let mut pool = test_pool();
        let cfg = Config::default();
        let now = scheduled_start() + Duration::minutes(10);
        seed_token(&pool, "qr-off", "officers", now + Duration::minutes(5));
        grant_role(&pool.conn, "m-002", "treasurer").unwrap();

        let out = CheckinLogic::apply(&mut pool, &cfg, "qr-off", "officers", "m-002", now)
            .unwrap();
        assert!(out.was_created());
    }

    #[test]
    fn expired_token_short_circuits_with_its_own_kind() {
        let mut pool = test_pool();
        let cfg = Config::default();
        let now = scheduled_start() + Duration::minutes(35);
        seed_token(&pool, "qr-old", "general", now - Duration::seconds(1));

        let err = CheckinLogic::apply(&mut pool, &cfg, "qr-old", "general", "m-001", now)
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_or_expired_token");
    }

    #[test]
    fn malformed_config_offset_is_an_error_not_a_panic() {
        let mut pool = test_pool();
        let cfg = Config {
            utc_offset: "+a\u{00a2}x".to_string(),
            ..Config::default()
        };
        let now = scheduled_start();
        seed_token(&pool, "qr-1", "general", now + Duration::minutes(5));

        let err = CheckinLogic::apply(&mut pool, &cfg, "qr-1", "general", "m-001", now)
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_offset");
    }

    #[test]
    fn unknown_category_is_rejected_up_front() {
        let mut pool = test_pool();
        let cfg = Config::default();
        let now = scheduled_start();

        let err = CheckinLogic::apply(&mut pool, &cfg, "qr-1", "bowling", "m-001", now)
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_category");
    }

    #[test]
    fn receipt_serializes_the_wire_shape() {
        let mut pool = test_pool();
        let cfg = Config::default();
        let now = scheduled_start() + Duration::minutes(45);
        seed_token(&pool, "qr-1", "general", now + Duration::minutes(5));

        let out =
            CheckinLogic::apply(&mut pool, &cfg, "qr-1", "general", "m-001", now).unwrap();
        let receipt = CheckinReceipt::from(&out);
        let json = serde_json::to_value(&receipt).unwrap();

        assert_eq!(json["status"], "created");
        assert_eq!(json["record"]["status"], "late");
        assert_eq!(json["record"]["late_fee"], 1000);
        assert_eq!(json["record"]["report_required"], false);
        assert_eq!(json["record"]["cycle_date"], "2025-06-22");
    }
}
