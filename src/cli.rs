use minish::{Config, Control, Shell};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::rcfile::load_rc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq)]
pub(crate) struct CliArgs {
    pub(crate) command: Option<String>,
    pub(crate) script: Option<String>,
    pub(crate) help: bool,
    pub(crate) version: bool,
    pub(crate) trace: bool,
    pub(crate) norc: bool,
    pub(crate) log_file: Option<String>,
}

impl CliArgs {
    /// Layer the flags over a config built from the environment
    pub(crate) fn apply(&self, config: &mut Config) {
        if self.trace {
            config.log_level = log::LevelFilter::Trace;
        }
        if self.norc {
            config.rc_file = None;
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(PathBuf::from(path));
        }
    }
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "--trace" => {
                cli.trace = true;
            }
            "--norc" => {
                cli.norc = true;
            }
            "--log-file" => {
                if i + 1 < args.len() {
                    cli.log_file = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "-c" => {
                // Everything after -c is the command
                if i + 1 < args.len() {
                    cli.command = Some(args[i + 1..].join(" "));
                    break;
                }
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            path => {
                // Assume it's a script file if not a flag
                if !path.starts_with('-') {
                    cli.script = Some(path.to_string());
                }
            }
        }
        i += 1;
    }

    cli
}

pub(crate) fn print_help() {
    println!(
        r#"minish {} - a mini shell with pipes and redirection

USAGE:
    minish                  Start interactive shell
    minish -c <command>     Execute a single line
    minish <script>         Execute every line of a script file
    minish --help           Show this help message
    minish --version        Show version

OPTIONS:
    --norc                  Do not source ~/.minishrc
    --trace                 Log everything (to stderr or --log-file)
    --log-file <path>       Append log output to <path>

ENVIRONMENT:
    MINISH_PROMPT           Prompt string (default "shell $ ")
    MINISH_MAX_LINE         Maximum line length (default 255)
    MINISH_LOG              Log level: off, error, warn, info, debug, trace
    MINISH_LOG_FILE         Same as --log-file
    MINISH_NO_BANNER        Skip the welcome banner

Type 'help' inside the shell for built-ins and operators."#,
        VERSION
    );
}

pub(crate) fn print_version() {
    println!("minish {}", VERSION);
}

fn farewell() -> ExitCode {
    println!("{}", minish::shell::FAREWELL);
    ExitCode::SUCCESS
}

/// Execute a single line, after the rc file
pub(crate) fn execute_command(config: Config, cmd: &str) -> ExitCode {
    let mut shell = Shell::new(config);
    if load_rc(&mut shell) == Control::Continue {
        shell.execute_line(cmd);
    }
    // running out of input ends the session the same way `exit` does
    farewell()
}

/// Execute a script file through the same driver as `source`
pub(crate) fn execute_script(config: Config, path: &str) -> ExitCode {
    let mut shell = Shell::new(config);
    if load_rc(&mut shell) == Control::Exit {
        return farewell();
    }
    match shell.source_file(Path::new(path)) {
        Ok(_) => farewell(),
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("minish")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn no_arguments_means_repl() {
        assert_eq!(parse_args(&args(&[])), CliArgs::default());
    }

    #[test]
    fn dash_c_takes_the_rest() {
        let cli = parse_args(&args(&["--norc", "-c", "echo", "a", "|", "wc"]));
        assert!(cli.norc);
        assert_eq!(cli.command.as_deref(), Some("echo a | wc"));
    }

    #[test]
    fn script_and_flags() {
        let cli = parse_args(&args(&["--trace", "--log-file", "/tmp/l", "run.txt"]));
        assert!(cli.trace);
        assert_eq!(cli.log_file.as_deref(), Some("/tmp/l"));
        assert_eq!(cli.script.as_deref(), Some("run.txt"));
    }

    #[test]
    fn flags_override_config() {
        let cli = parse_args(&args(&["--trace", "--norc"]));
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.log_level, log::LevelFilter::Trace);
        assert_eq!(config.rc_file, None);
    }
}
