//! The session: the central coordinator for minish
//!
//! A [`Shell`] owns the previous-command cache and the configuration and
//! drives each line through the core:
//! 1. Truncate to the configured maximum length
//! 2. Tokenize (lexer)
//! 3. Split into command groups at `;`
//! 4. Per group: replay `prev`, record the cache, dispatch built-ins
//! 5. Otherwise split at `|`, resolve redirects, run the pipeline

use crate::builtins::{self, Builtin};
use crate::config::Config;
use crate::executor::{self, ExecError};
use crate::input::{truncate_line, LineSource, ReaderSource};
use crate::lexer::{lex, render, Token};
use crate::parser::{command_groups, parse_pipeline};
use crate::signals;
use crate::state::ShellState;

use rustyline::error::ReadlineError;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const WELCOME: &str = "Welcome to mini-shell.";
pub const FAREWELL: &str = "Bye bye.";

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("readline: {0}")]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Exec(#[from] ExecError),
    #[error("no previous command")]
    NoPreviousCommand,
    #[error("source: missing filename argument")]
    MissingSourceArgument,
    #[error("failed to execute script: {}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What the caller should do after a line or command group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

pub struct Shell {
    state: ShellState,
    config: Config,
}

impl Shell {
    pub fn new(config: Config) -> Self {
        Self {
            state: ShellState::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Execute one raw input line. Errors are printed, never returned:
    /// only `exit` stops the caller.
    pub fn execute_line(&mut self, line: &str) -> Control {
        let line = truncate_line(line, self.config.max_line_len);
        let tokens = lex(line);
        log::debug!("tokens: {:?}", tokens);

        for group in command_groups(tokens) {
            if group.is_empty() {
                continue;
            }
            match self.execute_group(group.tokens) {
                Ok(Control::Exit) => return Control::Exit,
                Ok(Control::Continue) => {}
                Err(e) => eprintln!("{}", e),
            }
        }
        Control::Continue
    }

    /// Execute one command group (no `;` inside)
    pub fn execute_group(&mut self, tokens: Vec<Token>) -> Result<Control, ShellError> {
        let mut tokens = tokens;
        if first_builtin(&tokens) == Some(Builtin::Prev) {
            tokens = self.state.recall().ok_or(ShellError::NoPreviousCommand)?;
            log::debug!("prev: {}", render(&tokens));
        }
        self.state.record(&tokens);

        let builtin = first_builtin(&tokens);
        if let Some(b) = builtin {
            log::debug!("builtin: {}", b.name());
        }
        match builtin {
            Some(Builtin::Exit) => Ok(Control::Exit),
            Some(Builtin::Help) => {
                builtins::help(&mut io::stdout())?;
                Ok(Control::Continue)
            }
            Some(Builtin::Cd) => {
                let dir = tokens.get(1).map(Token::text);
                builtins::cd(dir.as_deref());
                Ok(Control::Continue)
            }
            Some(Builtin::Source) => {
                let path = tokens
                    .get(1)
                    .map(Token::text)
                    .ok_or(ShellError::MissingSourceArgument)?;
                self.source_file(Path::new(&path))
            }
            // the cache never holds `prev` itself
            Some(Builtin::Prev) => Ok(Control::Continue),
            None => self.run_pipeline(tokens),
        }
    }

    fn run_pipeline(&mut self, tokens: Vec<Token>) -> Result<Control, ShellError> {
        let pipeline = parse_pipeline(tokens);
        // keep our own buffered output ahead of the children's
        io::stdout().flush()?;

        let states = executor::run_pipeline(&pipeline)?;
        for (i, state) in states.iter().enumerate() {
            if let Some(status) = state.exit_status() {
                log::trace!("stage {}: {}", i, status);
            }
        }
        if signals::take_interrupt() {
            println!();
        }
        Ok(Control::Continue)
    }

    /// Run every line of a file through the same core
    pub fn source_file(&mut self, path: &Path) -> Result<Control, ShellError> {
        let file = File::open(path).map_err(|source| ShellError::Source {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("sourcing {}", path.display());
        let mut lines = ReaderSource::new(BufReader::new(file));
        self.run_source(&mut lines)
    }

    /// Drive a line source until end of input or `exit`
    pub fn run_source(&mut self, source: &mut dyn LineSource) -> Result<Control, ShellError> {
        while let Some(line) = source.next_line()? {
            if self.execute_line(&line) == Control::Exit {
                return Ok(Control::Exit);
            }
        }
        Ok(Control::Continue)
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn first_builtin(tokens: &[Token]) -> Option<Builtin> {
    tokens
        .first()
        .filter(|t| t.is_text())
        .and_then(|t| Builtin::recognize(&t.text()))
}
