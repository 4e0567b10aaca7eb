//! End-to-end tests for the sitekit binary.
//!
//! These exercise argument parsing, config loading, and exit-code mapping.
//! Nothing here touches a real database or site directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn sitekit() -> Command {
    Command::cargo_bin("sitekit").unwrap()
}

const SITES_TOML: &str = r#"
www_root = "/srv/www"

[sites.mysite]
hosts = ["mysite.test"]

[sites.plain]

[sites.plain.custom]
wp = false
"#;

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("sites.toml");
    fs::write(&path, SITES_TOML).unwrap();
    path
}

#[test]
fn help_lists_subcommands() {
    sitekit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("provision"))
        .stdout(predicate::str::contains("sites"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag() {
    sitekit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_arguments_is_a_usage_error() {
    sitekit().assert().failure().code(2);
}

#[test]
fn quiet_and_verbose_conflict() {
    sitekit()
        .args(["--quiet", "--verbose", "sites"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn missing_explicit_config_exits_4() {
    let temp = TempDir::new().unwrap();
    sitekit()
        .current_dir(temp.path())
        .args(["sites", "-c", "/definitely/not/here.toml"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn malformed_config_exits_4() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    fs::write(&path, "[sites.mysite\n").unwrap();

    sitekit()
        .args(["sites", "-c"])
        .arg(&path)
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn unknown_site_exits_3() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    sitekit()
        .args(["provision", "nosuch", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("not configured"))
        .stderr(predicate::str::contains("sitekit sites"));
}

#[test]
fn sites_lists_configured_names() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    sitekit()
        .args(["sites", "--names-only", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("mysite"))
        .stdout(predicate::str::contains("plain"));
}

#[test]
fn sites_table_shows_resolved_hosts() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    sitekit()
        .args(["sites", "--no-color", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("mysite.test"))
        // No hosts declared for "plain": the default is synthesized.
        .stdout(predicate::str::contains("plain.local"))
        .stdout(predicate::str::contains("static"));
}

#[test]
fn sites_without_config_warns() {
    let temp = TempDir::new().unwrap();
    sitekit()
        .current_dir(temp.path())
        .env_remove("XDG_CONFIG_HOME")
        .env("HOME", temp.path())
        .args(["sites", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sites configured"));
}

#[test]
fn completions_bash_mentions_binary() {
    sitekit()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sitekit"));
}
