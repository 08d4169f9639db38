//! Built-in commands, run inside the interpreter instead of a child process.
//!
//! Only the first token of a command group is matched. `source` and `prev`
//! need the session, so [`Shell`](crate::shell::Shell) carries them out;
//! this module covers recognition and the self-contained built-ins.

use std::env;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Exit,
    Help,
    Source,
    Prev,
}

impl Builtin {
    /// Exact, case-sensitive match on a command name
    pub fn recognize(name: &str) -> Option<Builtin> {
        match name {
            "cd" => Some(Builtin::Cd),
            "exit" => Some(Builtin::Exit),
            "help" => Some(Builtin::Help),
            "source" => Some(Builtin::Source),
            "prev" => Some(Builtin::Prev),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Cd => "cd",
            Builtin::Exit => "exit",
            Builtin::Help => "help",
            Builtin::Source => "source",
            Builtin::Prev => "prev",
        }
    }
}

pub const HELP_TEXT: &str = r#"Mini-shell Help Page

Built-in Commands:
  cd <directory>      : Changes the current working directory to the specified <directory>.
  source <filename>   : Executes a script file. Reads and processes each line in <filename> as a command.
  prev                : Re-executes the previous command.
  help                : Shows this help page.
  exit or Ctrl+D      : Exits the shell.

Special Operators:
  ;                   : Command separator, allows multiple commands to be executed in sequence.
  > <file>            : Redirects the standard output to <file>.
  < <file>            : Redirects the standard input from <file>.
  |                   : Pipes the output of one command into the input of another.

Shell Behavior:
  * Supports commands up to 255 characters; longer lines are truncated.
  * Strings enclosed in double quotes (" ") are treated as a single argument, even with spaces or special characters.
  * Each command runs in the foreground until it completes.
  * If a command is not recognized, '[command]: command not found' is printed.
"#;

/// `help` - print the static help page
pub fn help(out: &mut dyn Write) -> io::Result<()> {
    out.write_all(HELP_TEXT.as_bytes())?;
    out.flush()
}

/// `cd <dir>` - change the working directory. Failure is not reported.
pub fn cd(dir: Option<&str>) {
    let Some(dir) = dir else {
        log::debug!("cd: no directory given");
        return;
    };
    if let Err(e) = env::set_current_dir(Path::new(dir)) {
        log::debug!("cd: {}: {}", dir, e);
    }
}
