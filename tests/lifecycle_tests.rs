use predicates::str::contains;

mod common;
use common::{add_event, att, init_db, setup_test_db};

/// Event at 09:00 local (+08:00), duration 1:00:00.
const START: &str = "2026-03-05T09:00:00+08:00";

fn tick_at(db: &str, at: &str) {
    att()
        .args(["--db", db, "--test", "--at", at, "tick"])
        .assert()
        .success();
}

fn assert_status(db: &str, status: &str, name: &str) {
    att()
        .args(["--db", db, "--test", "list", "--status", status])
        .assert()
        .success()
        .stdout(contains(name));
}

#[test]
fn test_event_starts_upcoming() {
    let db = setup_test_db("starts_upcoming");
    init_db(&db);
    add_event(&db, "Orientation", START, "1:00:00");

    assert_status(&db, "upcoming", "Orientation");
}

#[test]
fn test_normal_lifecycle() {
    let db = setup_test_db("normal_lifecycle");
    init_db(&db);
    add_event(&db, "Seminar", START, "1:00:00");

    // 08:59 — still upcoming, tick applies nothing
    att()
        .args([
            "--db",
            &db,
            "--test",
            "--at",
            "2026-03-05T08:59:00+08:00",
            "tick",
        ])
        .assert()
        .success()
        .stdout(contains("0 transition(s)"));
    assert_status(&db, "upcoming", "Seminar");

    // 09:30 — ongoing
    tick_at(&db, "2026-03-05T09:30:00+08:00");
    assert_status(&db, "ongoing", "Seminar");

    // 10:01 — ended (window end 10:00 is inclusive, 10:01 is past it)
    tick_at(&db, "2026-03-05T10:01:00+08:00");
    assert_status(&db, "ended", "Seminar");
}

#[test]
fn test_zero_duration_window_boundaries() {
    let db = setup_test_db("zero_duration");
    init_db(&db);
    add_event(&db, "Flash", START, "0:00:00");

    tick_at(&db, "2026-03-05T08:59:59+08:00");
    assert_status(&db, "upcoming", "Flash");

    // The window collapses to the single start instant
    tick_at(&db, "2026-03-05T09:00:00+08:00");
    assert_status(&db, "ongoing", "Flash");

    tick_at(&db, "2026-03-05T09:00:01+08:00");
    assert_status(&db, "ended", "Flash");
}

#[test]
fn test_cancellation_freezes_status() {
    let db = setup_test_db("cancel_freeze");
    init_db(&db);
    add_event(&db, "Workshop", START, "1:00:00");

    tick_at(&db, "2026-03-05T09:30:00+08:00");
    assert_status(&db, "ongoing", "Workshop");

    att()
        .args(["--db", &db, "--test", "cancel", "1"])
        .assert()
        .success()
        .stdout(contains("Cancelled"));
    assert_status(&db, "cancelled", "Workshop");

    // Past the window end the event stays cancelled: it left the active
    // set permanently and the tick never reconsiders it.
    att()
        .args([
            "--db",
            &db,
            "--test",
            "--at",
            "2026-03-05T10:01:00+08:00",
            "tick",
        ])
        .assert()
        .success()
        .stdout(contains("0 transition(s)"));
    assert_status(&db, "cancelled", "Workshop");
}

#[test]
fn test_cancel_unknown_event_fails() {
    let db = setup_test_db("cancel_unknown");
    init_db(&db);

    att()
        .args(["--db", &db, "--test", "cancel", "99"])
        .assert()
        .failure()
        .stderr(contains("Event not found: 99"));
}

#[test]
fn test_tick_is_idempotent() {
    let db = setup_test_db("tick_idempotent");
    init_db(&db);
    add_event(&db, "Repeat", START, "1:00:00");

    tick_at(&db, "2026-03-05T09:30:00+08:00");

    // Same instant again: no-op writes are suppressed
    att()
        .args([
            "--db",
            &db,
            "--test",
            "--at",
            "2026-03-05T09:30:00+08:00",
            "tick",
        ])
        .assert()
        .success()
        .stdout(contains("0 transition(s)"));
}

#[test]
fn test_invalid_duration_rejected() {
    let db = setup_test_db("bad_duration");
    init_db(&db);

    att()
        .args([
            "--db",
            &db,
            "--test",
            "add",
            "Broken",
            "--start",
            START,
            "--duration",
            "90 minutes",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid duration"));
}
