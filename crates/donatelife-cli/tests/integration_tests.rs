//! Integration tests for donatelife-cli.

use assert_cmd::Command;
use chrono::{Duration, Utc};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const ANA: &str = "add --first Ana --last Silva --blood O+ --phone 1234567890 --city Porto";

fn donatelife() -> Command {
    let mut cmd = Command::cargo_bin("donatelife").unwrap();
    cmd.env_remove("RUST_LOG").arg("--no-color");
    cmd
}

fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn test_short_help_flag() {
    donatelife()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Blood donor registry"))
        .stdout(predicate::str::contains("shell"));
}

#[test]
fn test_help_flag() {
    donatelife()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("DonateLife keeps a registry of blood donors"))
        .stdout(predicate::str::contains("shell"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_version_flag() {
    donatelife()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_shell_add_then_list() {
    donatelife()
        .arg("shell")
        .write_stdin(format!("{ANA}\nlist\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Donor added: Ana Silva"))
        .stdout(predicate::str::contains("Blood Type"))
        .stdout(predicate::str::contains("1 donor"));
}

#[test]
fn test_shell_search_finds_only_eligible_matches() {
    let script = format!(
        "{ANA}\n\
         add --first Bea --last Costa --blood o+ --phone 123 --city Porto\n\
         add --first Bia --last Costa --blood o+ --phone 0987654321 --city Porto --last-donation {}\n\
         add --first Caio --last Lima --blood A- --phone 1112223334 --city Porto\n\
         search --blood O+ --eligible --format csv\n",
        days_ago(10)
    );

    let assert = donatelife()
        .args(["-q", "shell"])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation Errors"))
        .stdout(predicate::str::contains("Enter a valid 10-digit phone number"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let rows: Vec<&str> = stdout
        .lines()
        .skip_while(|l| !l.starts_with("id,first_name"))
        .skip(1)
        .collect();
    assert_eq!(rows.len(), 1, "unexpected rows: {rows:?}");
    assert!(rows[0].contains(",Ana,Silva,O+,"));
}

#[test]
fn test_shell_ineligible_search_and_stats() {
    let script = format!(
        "{ANA} --last-donation {}\n\
         add --first Bia --last Costa --blood B- --phone 0987654321 --city Braga --inactive\n\
         search --ineligible\n\
         stats\n",
        days_ago(30)
    );

    donatelife()
        .arg("shell")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 donors"))
        .stdout(predicate::str::contains("Total donors: 2"))
        .stdout(predicate::str::contains("Active:       1"))
        .stdout(predicate::str::contains("Eligible:     0"));
}

#[test]
fn test_shell_list_json_is_parseable() {
    let assert = donatelife()
        .args(["-q", "shell"])
        .write_stdin(format!("{ANA} --email ana@example.pt\nlist --format json\n"))
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let donors: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(donors[0]["first_name"], "Ana");
    assert_eq!(donors[0]["email"], "ana@example.pt");
    assert_eq!(donors[0]["active"], true);
    assert_eq!(donors[0]["eligible"], true);
}

#[test]
fn test_shell_rejects_bad_dates() {
    donatelife()
        .arg("shell")
        .write_stdin(format!("{ANA} --last-donation 01/02/2026\nlist\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid date format. Use YYYY-MM-DD."))
        .stdout(predicate::str::contains("No donors found."));
}

#[test]
fn test_shell_unknown_donor_and_command() {
    donatelife()
        .arg("shell")
        .write_stdin("donate ffff 2026-01-01\nteleport\nhelp\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No donor matches 'ffff'"))
        .stdout(predicate::str::contains("teleport"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_shell_exit_stops_reading() {
    donatelife()
        .arg("shell")
        .write_stdin(format!("exit\n{ANA}\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Donor added").not());
}

#[test]
fn test_validate_valid_donor() {
    donatelife()
        .args([
            "validate", "--first", "Ana", "--last", "Silva", "--blood", "ab-", "--phone",
            "1234567890", "--city", "Porto",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Donor details are valid"))
        .stdout(predicate::str::contains("Eligible to donate today: yes"));
}

#[test]
fn test_validate_json_report() {
    let assert = donatelife()
        .args([
            "--output-format",
            "json",
            "validate",
            "--first",
            "Ana",
            "--blood",
            "Z+",
            "--phone",
            "1234567890",
            "--city",
            "Porto",
        ])
        .assert()
        .code(2);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["violations"][0]["field"], "last_name");
    assert_eq!(report["violations"][1]["field"], "blood_type");
}

#[test]
fn test_config_file_and_env_layers() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("donatelife.toml");
    fs::write(&path, "[shell]\nprompt = \"file> \"\ndate_format = \"%d.%m.%Y\"\n").unwrap();

    donatelife()
        .args(["config", "get", "shell.prompt", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("file> "));

    donatelife()
        .args(["config", "get", "shell.prompt", "--config"])
        .arg(&path)
        .env("DONATELIFE__SHELL__PROMPT", "env> ")
        .assert()
        .success()
        .stdout(predicate::str::contains("env> "));

    donatelife()
        .args(["config", "get", "shell.date_format", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("%d.%m.%Y"));
}

#[test]
fn test_config_path_follows_flag() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.toml");
    fs::write(&path, "").unwrap();

    donatelife()
        .args(["config", "path", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_init_writes_then_refuses_without_force() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");

    donatelife()
        .args(["init", "--config"])
        .arg(&path)
        .assert()
        .success();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("[shell]"));
    assert!(written.contains("prompt"));

    donatelife()
        .args(["init", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    // the written file is a valid configuration
    donatelife()
        .args(["config", "list", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("date_format"));
}

#[test]
fn test_completions_bash() {
    donatelife()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("donatelife"));
}
