use predicates::str::contains;
use std::fs;

mod common;
use common::{add_event, att, init_db, setup_test_db, temp_out};

const START: &str = "2026-03-05T09:00:00+08:00";

fn seed_attendance(db: &str) {
    add_event(db, "Seminar", START, "1:00:00");

    // u1 in at 09:10 (late: threshold 08:30), out at 17:05
    att()
        .args([
            "--db", db, "--test", "--at", "2026-03-05T09:10:00+08:00", "timein", "1", "u1",
        ])
        .assert()
        .success();
    att()
        .args([
            "--db", db, "--test", "--at", "2026-03-05T17:05:00+08:00", "timeout", "1", "u1",
        ])
        .assert()
        .success();

    // u2 in at 07:30 (on time), never out
    att()
        .args([
            "--db", db, "--test", "--at", "2026-03-05T07:30:00+08:00", "timein", "1", "u2",
        ])
        .assert()
        .success();
}

#[test]
fn test_export_csv() {
    let db = setup_test_db("export_csv");
    init_db(&db);
    seed_attendance(&db);

    let out = temp_out("export_csv", "csv");
    att()
        .args([
            "--db", &db, "--test", "export", "--event", "1", "--format", "csv", "--file", &out,
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    assert!(content.starts_with("event_id,user_id,time_in,time_out,has_timed_out,provenance,late"));
    assert!(content.contains("u1"));
    assert!(content.contains("u2"));
    // u1 timed in past the late threshold, u2 before it
    let u1_row = content.lines().find(|l| l.contains("u1")).unwrap();
    let u2_row = content.lines().find(|l| l.contains("u2")).unwrap();
    assert!(u1_row.ends_with("true"));
    assert!(u2_row.ends_with("false"));
}

#[test]
fn test_export_json() {
    let db = setup_test_db("export_json");
    init_db(&db);
    seed_attendance(&db);

    let out = temp_out("export_json", "json");
    att()
        .args([
            "--db", &db, "--test", "export", "--event", "1", "--format", "json", "--file", &out,
        ])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let content = fs::read_to_string(&out).expect("read json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["user_id"], "u1");
    assert_eq!(rows[0]["has_timed_out"], true);
    assert_eq!(rows[0]["provenance"], "qr");
    assert_eq!(rows[1]["user_id"], "u2");
    assert_eq!(rows[1]["has_timed_out"], false);
}

#[test]
fn test_export_unknown_event_fails() {
    let db = setup_test_db("export_unknown");
    init_db(&db);

    let out = temp_out("export_unknown", "csv");
    att()
        .args([
            "--db", &db, "--test", "export", "--event", "42", "--format", "csv", "--file", &out,
        ])
        .assert()
        .failure()
        .stderr(contains("Event not found: 42"));
}
