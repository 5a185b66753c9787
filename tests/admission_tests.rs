use predicates::str::contains;

mod common;
use common::{add_event, att, init_db, setup_test_db};

// Seeded window: daily 07:00–17:00, late threshold 08:30, break 12:00–13:00
// (all in the fixed +08:00 institution timezone).

const START: &str = "2026-03-05T07:00:00+08:00";

fn timein_at(db: &str, at: &str, user: &str) -> assert_cmd::assert::Assert {
    att()
        .args(["--db", db, "--test", "--at", at, "timein", "1", user])
        .assert()
}

#[test]
fn test_timein_inside_break_denied() {
    let db = setup_test_db("break_denied");
    init_db(&db);
    add_event(&db, "AllDay", START, "10:00:00");

    timein_at(&db, "2026-03-05T12:30:00+08:00", "u1")
        .success()
        .stdout(contains("inside the configured break window"));
}

#[test]
fn test_timein_break_boundaries() {
    let db = setup_test_db("break_boundaries");
    init_db(&db);
    add_event(&db, "AllDay", START, "10:00:00");

    // break_start is inclusive
    timein_at(&db, "2026-03-05T12:00:00+08:00", "u1")
        .success()
        .stdout(contains("denied"));

    // break_end is exclusive
    timein_at(&db, "2026-03-05T13:00:00+08:00", "u2")
        .success()
        .stdout(contains("Timed in user u2"));
}

#[test]
fn test_timein_before_daily_start_denied() {
    let db = setup_test_db("too_early");
    init_db(&db);
    add_event(&db, "AllDay", START, "10:00:00");

    timein_at(&db, "2026-03-05T06:30:00+08:00", "u1")
        .success()
        .stdout(contains("too early"));
}

#[test]
fn test_timein_early_morning_admitted() {
    let db = setup_test_db("early_ok");
    init_db(&db);
    add_event(&db, "AllDay", START, "10:00:00");

    timein_at(&db, "2026-03-05T07:05:00+08:00", "u1")
        .success()
        .stdout(contains("Timed in user u1"));
}

#[test]
fn test_timein_after_daily_end_still_admitted() {
    let db = setup_test_db("late_arrival");
    init_db(&db);
    add_event(&db, "AllDay", START, "12:00:00");

    // Late arrivals remain permitted past daily_end — business rule.
    timein_at(&db, "2026-03-05T17:10:00+08:00", "u1")
        .success()
        .stdout(contains("late arrival"));
}

#[test]
fn test_timeout_before_daily_end_denied() {
    let db = setup_test_db("timeout_gate");
    init_db(&db);
    add_event(&db, "AllDay", START, "10:00:00");

    timein_at(&db, "2026-03-05T09:00:00+08:00", "u1").success();

    att()
        .args([
            "--db",
            &db,
            "--test",
            "--at",
            "2026-03-05T16:00:00+08:00",
            "timeout",
            "1",
            "u1",
        ])
        .assert()
        .success()
        .stdout(contains("too early to time out"));
}

#[test]
fn test_policy_update_is_live() {
    let db = setup_test_db("live_policy");
    init_db(&db);
    add_event(&db, "AllDay", START, "10:00:00");

    // Move the break window; the next check reads the new value.
    att()
        .args([
            "--db",
            &db,
            "--test",
            "policy",
            "--break-start",
            "14:00",
            "--break-end",
            "15:00",
        ])
        .assert()
        .success()
        .stdout(contains("Admission window updated"));

    timein_at(&db, "2026-03-05T12:30:00+08:00", "u1")
        .success()
        .stdout(contains("Timed in user u1"));

    timein_at(&db, "2026-03-05T14:30:00+08:00", "u2")
        .success()
        .stdout(contains("inside the configured break window"));
}

#[test]
fn test_policy_show() {
    let db = setup_test_db("policy_show");
    init_db(&db);

    att()
        .args(["--db", &db, "--test", "policy", "--show"])
        .assert()
        .success()
        .stdout(contains("Daily start"))
        .stdout(contains("07:00"))
        .stdout(contains("17:00"));
}

#[test]
fn test_policy_rejects_malformed_time() {
    let db = setup_test_db("policy_bad_time");
    init_db(&db);

    att()
        .args(["--db", &db, "--test", "policy", "--daily-start", "7am"])
        .assert()
        .failure()
        .stderr(contains("Invalid time-of-day"));
}
