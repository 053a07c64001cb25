//! Common helpers for CLI integration tests.

use assert_cmd::cargo::cargo_bin;
use std::process::Command;
use tempfile::TempDir;

/// A command for the innkeep binary pointed at a temp data directory.
pub fn innkeep_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("innkeep"));
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd
}

/// Creates a data directory with an initialized database.
pub fn init_property() -> TempDir {
    let dir = TempDir::new().unwrap();
    let status = innkeep_cmd(&dir).arg("init").status().unwrap();
    assert!(status.success(), "init must succeed");
    dir
}

/// Adds a double room, returning its id.
#[allow(dead_code)]
pub fn add_room(dir: &TempDir, number: &str) -> String {
    let output = innkeep_cmd(dir)
        .args([
            "room", "add", "--number", number, "--capacity", "2", "--rate", "100.00",
        ])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "room add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Adds a guest, returning their id.
#[allow(dead_code)]
pub fn add_guest(dir: &TempDir, name: &str) -> String {
    let output = innkeep_cmd(dir)
        .args(["guest", "add", "--name", name])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "guest add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Books a room over a window, returning the reservation id.
#[allow(dead_code)]
pub fn book(dir: &TempDir, room: &str, guest: &str, from: &str, to: &str) -> String {
    let output = innkeep_cmd(dir)
        .args([
            "book", "--room", room, "--guest", guest, "--from", from, "--to", to, "--total",
            "300.00",
        ])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "book failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
