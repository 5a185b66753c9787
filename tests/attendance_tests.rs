use predicates::str::contains;

mod common;
use common::{add_event, att, init_db, outbox_count, setup_test_db};

const START: &str = "2026-03-05T09:00:00+08:00";

fn timein_at(db: &str, at: &str, event: &str, user: &str) -> assert_cmd::assert::Assert {
    att()
        .args(["--db", db, "--test", "--at", at, "timein", event, user])
        .assert()
}

fn timeout_at(db: &str, at: &str, event: &str, user: &str) -> assert_cmd::assert::Assert {
    att()
        .args(["--db", db, "--test", "--at", at, "timeout", event, user])
        .assert()
}

#[test]
fn test_duplicate_scan_is_idempotent() {
    let db = setup_test_db("duplicate_scan");
    init_db(&db);
    add_event(&db, "Seminar", START, "1:00:00");

    // First scan: created, certificate dispatched once
    timein_at(&db, "2026-03-05T09:10:00+08:00", "1", "u42")
        .success()
        .stdout(contains("Timed in user u42"));
    assert_eq!(outbox_count(&db, 1, "u42"), 1);

    // Second scan a minute later: informational no-op, no second dispatch
    timein_at(&db, "2026-03-05T09:11:00+08:00", "1", "u42")
        .success()
        .stdout(contains("already timed in"));
    assert_eq!(outbox_count(&db, 1, "u42"), 1);
}

#[test]
fn test_distinct_users_each_get_dispatch() {
    let db = setup_test_db("distinct_users");
    init_db(&db);
    add_event(&db, "Seminar", START, "1:00:00");

    timein_at(&db, "2026-03-05T09:10:00+08:00", "1", "alice").success();
    timein_at(&db, "2026-03-05T09:12:00+08:00", "1", "bob").success();

    assert_eq!(outbox_count(&db, 1, "alice"), 1);
    assert_eq!(outbox_count(&db, 1, "bob"), 1);
}

#[test]
fn test_timeout_without_timein_rejected() {
    let db = setup_test_db("timeout_no_timein");
    init_db(&db);
    add_event(&db, "Seminar", START, "1:00:00");

    // 17:30 is past the daily end, so the admission gate passes and the
    // ledger rejects on the missing time-in.
    timeout_at(&db, "2026-03-05T17:30:00+08:00", "1", "u7")
        .success()
        .stdout(contains("time-out rejected"));
}

#[test]
fn test_full_attendance_flow() {
    let db = setup_test_db("full_flow");
    init_db(&db);
    add_event(&db, "Seminar", START, "1:00:00");

    timein_at(&db, "2026-03-05T09:10:00+08:00", "1", "u7")
        .success()
        .stdout(contains("Timed in user u7"));

    timeout_at(&db, "2026-03-05T17:05:00+08:00", "1", "u7")
        .success()
        .stdout(contains("Timed out user u7"));

    // A second time-out has no open time-in left to close
    timeout_at(&db, "2026-03-05T17:06:00+08:00", "1", "u7")
        .success()
        .stdout(contains("time-out rejected"));

    att()
        .args(["--db", &db, "--test", "attendees", "1"])
        .assert()
        .success()
        .stdout(contains("u7"))
        .stdout(contains("yes"));
}

#[test]
fn test_timein_unknown_event_fails() {
    let db = setup_test_db("timein_unknown_event");
    init_db(&db);

    timein_at(&db, "2026-03-05T09:10:00+08:00", "99", "u1")
        .failure()
        .stderr(contains("Event not found: 99"));
}

#[test]
fn test_manual_timein_provenance() {
    let db = setup_test_db("manual_provenance");
    init_db(&db);
    add_event(&db, "Seminar", START, "1:00:00");

    att()
        .args([
            "--db",
            &db,
            "--test",
            "--at",
            "2026-03-05T09:10:00+08:00",
            "timein",
            "1",
            "u9",
            "--manual",
            "--actor",
            "admin1",
        ])
        .assert()
        .success();

    att()
        .args(["--db", &db, "--test", "attendees", "1"])
        .assert()
        .success()
        .stdout(contains("Manual"));
}

#[test]
fn test_attendance_survives_cancellation() {
    let db = setup_test_db("attend_cancelled");
    init_db(&db);
    add_event(&db, "Seminar", START, "1:00:00");

    timein_at(&db, "2026-03-05T09:10:00+08:00", "1", "u1").success();

    att()
        .args(["--db", &db, "--test", "cancel", "1"])
        .assert()
        .success();

    // Cancellation never deletes ledger entries; the audit record stands.
    att()
        .args(["--db", &db, "--test", "attendees", "1"])
        .assert()
        .success()
        .stdout(contains("u1"));
}
