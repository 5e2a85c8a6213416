//! Library-level tests of the exactly-one-record guarantee under
//! concurrent duplicate requests: all coordination goes through the
//! attendance UNIQUE constraint, so racing writers must converge on a
//! single stored row.

use chrono::{DateTime, TimeZone, Utc};
use rollcall::config::Config;
use rollcall::core::checkin::CheckinLogic;
use rollcall::db::initialize::init_db;
use rollcall::db::pool::DbPool;
use rollcall::db::queries::upsert_token;
use rollcall::models::token::Token;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::thread;

fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rollcall.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

fn seed(db_path: &str, now: DateTime<Utc>) {
    let pool = DbPool::new(db_path).unwrap();
    init_db(&pool.conn).unwrap();
    upsert_token(
        &pool.conn,
        &Token {
            token: "qr-race".into(),
            category: "general".into(),
            expires_at: now + chrono::Duration::minutes(10),
        },
    )
    .unwrap();
}

#[test]
fn concurrent_duplicate_checkins_store_exactly_one_record() {
    let db_path = setup_test_db("race_duplicates");
    let now = Utc.with_ymd_and_hms(2025, 6, 22, 1, 35, 0).unwrap(); // 10:35 KST
    seed(&db_path, now);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let db_path = db_path.clone();
            thread::spawn(move || {
                let mut pool = DbPool::new(&db_path).unwrap();
                let cfg = Config {
                    database: db_path.clone(),
                    ..Config::default()
                };
                CheckinLogic::apply(&mut pool, &cfg, "qr-race", "general", "m-001", now)
            })
        })
        .collect();

    let outcomes: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();

    // Exactly one winner; everyone else observed the winner's record.
    let created = outcomes.iter().filter(|o| o.was_created()).count();
    assert_eq!(created, 1);

    let winner = outcomes
        .iter()
        .find(|o| o.was_created())
        .unwrap()
        .record()
        .clone();
    for o in &outcomes {
        assert_eq!(o.record().late_fee, winner.late_fee);
        assert_eq!(o.record().checked_in_at, winner.checked_in_at);
    }

    let pool = DbPool::new(&db_path).unwrap();
    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM attendance", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn concurrent_distinct_members_all_get_their_own_record() {
    let db_path = setup_test_db("race_distinct");
    let now = Utc.with_ymd_and_hms(2025, 6, 22, 1, 35, 0).unwrap();
    seed(&db_path, now);

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let db_path = db_path.clone();
            thread::spawn(move || {
                let mut pool = DbPool::new(&db_path).unwrap();
                let cfg = Config {
                    database: db_path.clone(),
                    ..Config::default()
                };
                let member = format!("m-{:03}", i);
                CheckinLogic::apply(&mut pool, &cfg, "qr-race", "general", &member, now)
            })
        })
        .collect();

    for h in handles {
        let outcome = h.join().unwrap().unwrap();
        assert!(outcome.was_created());
    }

    let pool = DbPool::new(&db_path).unwrap();
    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM attendance", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 6);
}
