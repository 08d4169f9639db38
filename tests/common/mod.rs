//! Common test utilities for minish integration tests

pub use minish::{lex, parse_pipeline, run_pipeline, Config, Control, Shell};

use assert_cmd::Command;
use std::path::Path;

/// The minish binary with a clean environment: no rc file, no history,
/// no log noise, HOME pointed at `home`
#[allow(dead_code)]
pub fn minish(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("minish").unwrap();
    cmd.env("HOME", home)
        .env("MINISH_LOG", "off")
        .env_remove("MINISH_PROMPT")
        .env_remove("MINISH_MAX_LINE")
        .env_remove("MINISH_LOG_FILE")
        .arg("--norc");
    cmd
}

/// A library shell that never touches the user's home directory
#[allow(dead_code)]
pub fn shell() -> Shell {
    Shell::new(Config {
        rc_file: None,
        history_file: None,
        ..Config::default()
    })
}
