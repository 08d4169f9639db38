//! Interpreter configuration
//!
//! Defaults, overridden by `MINISH_*` environment variables, then by
//! command-line flags in the binary.

use log::LevelFilter;
use std::env;
use std::path::PathBuf;

/// Longest input line the interpreter accepts before truncating
pub const MAX_LINE_LEN: usize = 255;

pub const DEFAULT_PROMPT: &str = "shell $ ";

pub const RC_FILE_NAME: &str = ".minishrc";

pub const HISTORY_FILE_NAME: &str = ".minish_history";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Printed before each interactive read
    pub prompt: String,
    /// Lines longer than this many characters are truncated
    pub max_line_len: usize,
    /// Sourced before the first prompt, if present
    pub rc_file: Option<PathBuf>,
    /// Interactive line history
    pub history_file: Option<PathBuf>,
    pub log_level: LevelFilter,
    /// Log to this file instead of stderr
    pub log_file: Option<PathBuf>,
    /// Print the welcome banner on interactive start
    pub banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            max_line_len: MAX_LINE_LEN,
            rc_file: home_dir().map(|h| h.join(RC_FILE_NAME)),
            history_file: home_dir().map(|h| h.join(HISTORY_FILE_NAME)),
            log_level: LevelFilter::Warn,
            log_file: None,
            banner: true,
        }
    }
}

impl Config {
    /// Defaults with `MINISH_*` environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_vars(|key| env::var(key).ok())
    }

    /// Apply overrides from a variable lookup. Unparseable values are
    /// ignored with a warning.
    pub fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(prompt) = lookup("MINISH_PROMPT") {
            self.prompt = prompt;
        }
        if let Some(raw) = lookup("MINISH_MAX_LINE") {
            match raw.parse::<usize>() {
                Ok(n) if n > 0 => self.max_line_len = n,
                _ => log::warn!("MINISH_MAX_LINE: invalid value {:?}", raw),
            }
        }
        if let Some(raw) = lookup("MINISH_LOG") {
            match raw.parse::<LevelFilter>() {
                Ok(level) => self.log_level = level,
                Err(_) => log::warn!("MINISH_LOG: invalid level {:?}", raw),
            }
        }
        if let Some(path) = lookup("MINISH_LOG_FILE") {
            self.log_file = Some(PathBuf::from(path));
        }
        if lookup("MINISH_NO_BANNER").is_some() {
            self.banner = false;
        }
        self
    }
}

/// Home directory from `$HOME`
pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}
