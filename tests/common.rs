#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn att() -> Command {
    cargo_bin_cmd!("attlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_attlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize schema + seeded admission window (test mode: config untouched)
pub fn init_db(db_path: &str) {
    att()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Schedule an event and return nothing; ids are assigned 1, 2, ... in order
pub fn add_event(db_path: &str, name: &str, start: &str, duration: &str) {
    att()
        .args([
            "--db", db_path, "--test", "add", name, "--start", start, "--duration", duration,
        ])
        .assert()
        .success();
}

/// Count rows in the certificate outbox for a given (event, user) pair
pub fn outbox_count(db_path: &str, event_id: i64, user_id: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row(
        "SELECT COUNT(*) FROM certificate_outbox WHERE event_id = ?1 AND user_id = ?2",
        rusqlite::params![event_id, user_id],
        |row| row.get(0),
    )
    .expect("count outbox")
}
