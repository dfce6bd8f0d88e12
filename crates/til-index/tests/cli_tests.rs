// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! CLI tests for til-index flags
//!
//! These tests verify flag parsing, environment fallbacks, logging level
//! selection, and configuration validation.

mod test_utils;

use std::path::PathBuf;

use clap::Parser;
use til_index::config::{Config, ConfigError, DEFAULT_REMOTE};
use test_utils::{EnvGuard, TempTestDir};
use tracing::Level;

// ============================================================================
// Source and target flags
// ============================================================================

#[test]
fn test_all_location_flags() {
    let config = Config::try_parse_from([
        "til-index",
        "-r",
        "https://github.com/me/til.git",
        "-c",
        "/tmp/til-clone",
        "--readme",
        "/tmp/README.md",
        "-b",
        "main",
    ])
    .expect("parse should succeed");

    assert_eq!(
        config.remote.as_deref(),
        Some("https://github.com/me/til.git")
    );
    assert_eq!(config.clone_dir_path(), PathBuf::from("/tmp/til-clone"));
    assert_eq!(config.readme_path(), PathBuf::from("/tmp/README.md"));
    assert_eq!(config.branch_name(), "main");
}

#[test]
fn test_no_flags_uses_defaults() {
    let config = Config::try_parse_from(["til-index"]).expect("parse should succeed");
    assert_eq!(config.clone_dir_path(), PathBuf::from("tmp"));
    assert_eq!(config.readme_path(), PathBuf::from("README.md"));
    assert_eq!(config.remote_url(), Some(DEFAULT_REMOTE));
    assert_eq!(
        config.url_template().url_for("css/grid.md"),
        "https://github.com/santiagoballadares/til/blob/master/css/grid.md"
    );
    assert!(!config.dry_run);
    assert!(!config.stats_json);
}

#[test]
fn test_offline_flag_skips_clone() {
    let config = Config::try_parse_from(["til-index", "--offline", "-c", "/tmp/til"])
        .expect("parse should succeed");
    assert!(config.offline);
    assert_eq!(config.remote_url(), None);
}

#[test]
fn test_remote_missing_value_fails() {
    let result = Config::try_parse_from(["til-index", "--remote"]);
    assert!(result.is_err());
}

#[test]
fn test_branch_env_fallback() {
    let _guard = EnvGuard::set("TIL_INDEX_BRANCH", "trunk");
    let config = Config::try_parse_from(["til-index"]).expect("parse should succeed");
    assert_eq!(config.branch_name(), "trunk");
}

#[test]
fn test_output_mode_flags() {
    let config = Config::try_parse_from(["til-index", "--dry-run", "--stats-json"])
        .expect("parse should succeed");
    assert!(config.dry_run);
    assert!(config.stats_json);
}

// ============================================================================
// Logging flags
// ============================================================================

#[test]
fn test_verbose_short_flag_v() {
    let config = Config::try_parse_from(["til-index", "-v"]).expect("parse should succeed");
    assert!(config.verbose);
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_quiet_long_flag() {
    let config = Config::try_parse_from(["til-index", "--quiet"]).expect("parse should succeed");
    assert!(config.quiet);
    assert_eq!(config.log_level(), Level::WARN);
}

#[test]
fn test_verbose_and_quiet_verbose_wins() {
    let config =
        Config::try_parse_from(["til-index", "-q", "-v"]).expect("parse should succeed");
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_boolean_flag_value_syntax_not_supported() {
    let result = Config::try_parse_from(["til-index", "--dry-run=true"]);
    assert!(result.is_err(), "Boolean flags don't support =value syntax");
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_validate_accepts_existing_readme() {
    let temp = TempTestDir::new("cli_validate_ok");
    let readme = temp.create_file("README.md", "# TIL\n");
    let config = Config {
        readme: Some(readme),
        clone_dir: Some(temp.join("clone")),
        remote: Some("https://github.com/me/til".to_string()),
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_file_as_clone_dir() {
    let temp = TempTestDir::new("cli_validate_clone");
    let readme = temp.create_file("README.md", "# TIL\n");
    let not_a_dir = temp.create_file("clone", "oops");
    let config = Config {
        readme: Some(readme),
        clone_dir: Some(not_a_dir),
        base_url: Some("https://github.com/me/til".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::CloneDirNotDirectory(_))
    ));
}

#[test]
fn test_validate_rejects_dry_run_with_stats_json() {
    let temp = TempTestDir::new("cli_validate_stdout");
    let readme = temp.create_file("README.md", "# TIL\n");
    let mut config = Config::try_parse_from(["til-index", "--dry-run", "--stats-json"])
        .expect("parse should succeed");
    config.readme = Some(readme);

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ConflictingOutput)
    ));

    config.stats_json = false;
    assert!(config.validate().is_ok());
}
