//! CLI integration tests.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// A scratch home for one test: config file and database in a temp dir.
struct Sandbox {
    dir: tempfile::TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("wagerbook");
        cmd.env_remove("WAGERBOOK_DATABASE")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.dir.path().join("config.toml"))
            .arg("--db")
            .arg(self.dir.path().join("wagerbook.db"));
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self.cmd().arg("--json").args(args).output().expect("run wagerbook");
        assert!(
            output.status.success(),
            "command {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
        let line = stdout.lines().last().expect("one json line");
        serde_json::from_str(line).expect("valid json")
    }

    fn create_poll(&self) -> String {
        let created = self.json(&["poll", "create", "--creator", "carol", "Rain?", "Yes", "No"]);
        created["poll"]["id"]
            .as_str()
            .expect("poll id")
            .to_string()
    }
}

#[test]
fn help_lists_commands() {
    cargo_bin_cmd!("wagerbook")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("balance"))
        .stdout(predicate::str::contains("poll"))
        .stdout(predicate::str::contains("resolve"));
}

#[test]
fn version_prints_name() {
    cargo_bin_cmd!("wagerbook")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wagerbook"));
}

#[test]
fn new_user_starts_with_default_balance() {
    let sandbox = Sandbox::new();
    let balance = sandbox.json(&["balance", "alice"]);
    assert_eq!(balance["command"], "balance");
    assert_eq!(balance["points"], 500);
}

#[test]
fn full_round_trip_through_the_binary() {
    let sandbox = Sandbox::new();
    let poll = sandbox.create_poll();

    sandbox.json(&["bet", "user1", &poll, "100", "a"]);
    sandbox.json(&["bet", "user2", &poll, "100", "B"]);
    let last = sandbox.json(&["bet", "user3", &poll, "50", "a"]);
    assert_eq!(last["balance"], 450);

    let preview = sandbox.json(&["preview", &poll, "a"]);
    assert_eq!(preview["payout"]["distributed"], 249);

    let resolved = sandbox.json(&["resolve", "carol", &poll, "a"]);
    assert_eq!(resolved["poll"]["status"], "RESOLVED_A");
    assert_eq!(resolved["payout"]["credits"]["user1"], 166);
    assert_eq!(resolved["payout"]["credits"]["user3"], 83);
    assert_eq!(resolved["payout"]["dust"], 1);

    assert_eq!(sandbox.json(&["balance", "user1"])["points"], 566);
    assert_eq!(sandbox.json(&["balance", "user2"])["points"], 400);
    assert_eq!(sandbox.json(&["balance", "user3"])["points"], 533);

    let bets = sandbox.json(&["bets", "--poll", &poll]);
    assert_eq!(bets["bets"].as_array().map(Vec::len), Some(3));

    let audit = sandbox.json(&["audit"]);
    assert_eq!(audit["drift"].as_array().map(Vec::len), Some(0));
}

#[test]
fn overdraft_exits_nonzero_with_message() {
    let sandbox = Sandbox::new();
    let poll = sandbox.create_poll();

    sandbox
        .cmd()
        .args(["bet", "alice", &poll, "501", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("insufficient"));

    assert_eq!(sandbox.json(&["balance", "alice"])["points"], 500);
}

#[test]
fn resolving_twice_fails() {
    let sandbox = Sandbox::new();
    let poll = sandbox.create_poll();
    sandbox.json(&["resolve", "carol", &poll, "b"]);

    sandbox
        .cmd()
        .args(["resolve", "carol", &poll, "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already resolved"));
}

#[test]
fn only_creator_may_resolve() {
    let sandbox = Sandbox::new();
    let poll = sandbox.create_poll();

    sandbox
        .cmd()
        .args(["resolve", "mallory", &poll, "a"])
        .assert()
        .failure();

    let shown = sandbox.json(&["poll", "show", &poll]);
    assert_eq!(shown["poll"]["status"], "ACTIVE");
}

#[test]
fn unknown_poll_is_reported() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["poll", "show", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn poll_list_renders_a_table() {
    let sandbox = Sandbox::new();
    sandbox.create_poll();

    sandbox
        .cmd()
        .args(["--color", "never", "poll", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rain?"))
        .stdout(predicate::str::contains("ACTIVE"));
}

#[test]
fn config_validate_rejects_bad_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[ledger]\nstarting_points = -1\n").unwrap();

    cargo_bin_cmd!("wagerbook")
        .env_remove("WAGERBOOK_DATABASE")
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("starting_points"));
}

#[test]
fn config_show_reports_starting_points_from_file() {
    let sandbox = Sandbox::new();
    std::fs::write(
        sandbox.dir.path().join("config.toml"),
        "[ledger]\nstarting_points = 1000\n",
    )
    .unwrap();

    let shown = sandbox.json(&["config", "show"]);
    assert_eq!(shown["config"]["ledger"]["starting_points"], 1000);
    assert_eq!(shown["exists"], true);

    assert_eq!(sandbox.json(&["balance", "bob"])["points"], 1000);
}

#[test]
fn database_env_override_is_used_without_db_flag() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("from-env.db");

    cargo_bin_cmd!("wagerbook")
        .env("WAGERBOOK_DATABASE", &db)
        .args(["--json", "--config"])
        .arg(dir.path().join("absent.toml"))
        .args(["balance", "erin"])
        .assert()
        .success();

    assert!(db.exists());
}
