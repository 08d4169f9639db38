//! Logger setup. Diagnostics meant for the user are printed directly;
//! the log carries tracing detail (tokens, wiring, pids, exit statuses).

use crate::config::Config;
use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode, WriteLogger};
use std::fs::OpenOptions;

/// Install the global logger. Best-effort: a logger that cannot be set up
/// is reported once and otherwise ignored.
pub fn init(config: &Config) {
    if config.log_level == LevelFilter::Off {
        return;
    }
    let log_config = simplelog::ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();

    let result = match &config.log_file {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => WriteLogger::init(config.log_level, log_config, file),
            Err(e) => {
                eprintln!("minish: log file {}: {}", path.display(), e);
                return;
            }
        },
        None => TermLogger::init(
            config.log_level,
            log_config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
    };

    if let Err(e) = result {
        eprintln!("minish: logger: {}", e);
    }
}
