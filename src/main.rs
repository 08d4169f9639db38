//! minish - a mini shell
//!
//! Usage:
//!   minish              Start interactive shell
//!   minish -c "cmd"     Execute a single line
//!   minish script.txt   Execute a script file

mod cli;
mod rcfile;
mod repl;

use minish::Config;
use std::env;
use std::process::ExitCode;

use cli::{execute_command, execute_script, parse_args, print_help, print_version};
use repl::run_repl;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args);

    if cli.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if cli.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    let mut config = Config::from_env();
    cli.apply(&mut config);
    minish::logging::init(&config);
    // every mode runs pipelines, so Ctrl-C must spare the interpreter
    minish::signals::setup_signal_handlers();

    if let Some(cmd) = cli.command {
        return execute_command(config, &cmd);
    }

    if let Some(script) = cli.script {
        return execute_script(config, &script);
    }

    match run_repl(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("minish: {}", e);
            ExitCode::FAILURE
        }
    }
}
