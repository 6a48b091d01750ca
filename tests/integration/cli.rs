//! The non-interactive subcommands against a temporary data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::common::fixtures::TEST_INSTANT;
use worldtimez::data::{Database, TimezoneStore};

fn worldtimez(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("worldtimez").expect("binary builds");
    cmd.arg("--data-dir")
        .arg(data_dir.path())
        .env("TZ", "Asia/Dhaka")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_first_list_seeds_local_zone() {
    let dir = TempDir::new().unwrap();
    worldtimez(&dir)
        .args(["list", "--at", TEST_INSTANT])
        .assert()
        .success()
        .stdout(predicate::str::contains("Asia/Dhaka"))
        .stdout(predicate::str::contains("6:00 PM"))
        .stdout(predicate::str::contains("(UTC+06:00)"));

    assert!(dir.path().join("worldtimez.db").exists());
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_add_move_remove() {
    let dir = TempDir::new().unwrap();

    worldtimez(&dir)
        .args(["add", "europe_london", "--country", "United Kingdom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tracking United Kingdom/London"));

    worldtimez(&dir)
        .args(["add", "Europe/London", "--country", "United Kingdom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already tracking"));

    worldtimez(&dir).args(["move", "2", "1"]).assert().success();

    let listed = worldtimez(&dir)
        .args(["list", "--at", TEST_INSTANT])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let listed = String::from_utf8(listed).unwrap();
    let lines: Vec<&str> = listed.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Europe/London"));
    assert!(lines[0].contains("1:00 PM"));
    assert!(lines[1].contains("Asia/Dhaka"));

    worldtimez(&dir)
        .args(["remove", "Europe/London"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed United Kingdom/London"));
}

#[test]
fn test_removing_last_location_tracks_local_zone_again() {
    let dir = TempDir::new().unwrap();
    worldtimez(&dir)
        .args(["remove", "Asia/Dhaka"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Asia/Dhaka"));

    // The reseeded list is what got saved, not an empty one
    let db = Database::open(dir.path().join("worldtimez.db")).unwrap();
    let stored = TimezoneStore::new(db.store()).load();
    let zones: Vec<&str> = stored.iter().map(|e| e.zone_id.as_str()).collect();
    assert_eq!(zones, vec!["Asia/Dhaka"]);
}

#[test]
fn test_move_out_of_range_fails() {
    let dir = TempDir::new().unwrap();
    worldtimez(&dir)
        .args(["move", "1", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Positions must be between 1 and 1"));
}

#[test]
fn test_unknown_zone_is_rejected() {
    let dir = TempDir::new().unwrap();
    worldtimez(&dir)
        .args(["add", "Mars/Olympus_Mons"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown timezone"));
}

#[test]
fn test_slots_mark_the_reference() {
    let dir = TempDir::new().unwrap();
    worldtimez(&dir)
        .args(["slots", "Asia/Kolkata", "--at", TEST_INSTANT])
        .assert()
        .success()
        .stdout(predicate::str::contains(">  5:30 PM  +0"))
        .stdout(predicate::str::contains("(UTC+05:30)"));
}

#[test]
fn test_search_lists_matches() {
    let dir = TempDir::new().unwrap();
    worldtimez(&dir)
        .args(["search", "tokyo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Asia/Tokyo"))
        .stdout(predicate::str::contains("UTC+09:00"));
}

#[test]
fn test_ephemeral_leaves_no_database() {
    let dir = TempDir::new().unwrap();
    worldtimez(&dir)
        .args(["--ephemeral", "add", "Asia/Tokyo"])
        .assert()
        .success();
    assert!(!dir.path().join("worldtimez.db").exists());
    assert!(!dir.path().join("config.toml").exists());
}
