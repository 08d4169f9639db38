//! minish - a mini shell
//!
//! # Overview
//!
//! minish reads a line, splits it into tokens, groups the tokens into
//! commands separated by `;`, splits each command into pipeline stages at
//! `|`, resolves one `<` or `>` redirection per stage and runs the stages
//! as connected processes, waiting for all of them before the next prompt.
//!
//! ```text
//! echo a | wc -w            # two processes, prints 1
//! sort < in.txt > out.txt   # redirect stdin and stdout
//! cd /tmp ; ls              # run one after the other
//! echo "a | b"              # quotes make one argument
//! prev                      # run the previous command again
//! source script.txt         # run every line of a file
//! ```
//!
//! Built-ins: `cd`, `exit`, `help`, `source`, `prev`.
//!
//! # Example
//!
//! ```rust,no_run
//! use minish::{Config, Control, Shell};
//!
//! let mut shell = Shell::new(Config::default());
//! assert_eq!(shell.execute_line("echo hello"), Control::Continue);
//! ```

pub mod builtins;
pub mod config;
pub mod executor;
pub mod input;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod redirect;
pub mod shell;
pub mod signals;
pub mod state;

// Re-export commonly used items
pub use config::Config;
pub use executor::{run_pipeline, ExecError, StageError, StageState};
pub use input::{EditorSource, LineSource, ReaderSource};
pub use lexer::{lex, Operator, Token};
pub use parser::{parse_pipeline, split, Pipeline, Segment};
pub use redirect::{resolve, Redirect, RedirectKind, Stage};
pub use shell::{Control, Shell, ShellError};
pub use state::ShellState;
