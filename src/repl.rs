use minish::shell::{FAREWELL, WELCOME};
use minish::{Config, Control, EditorSource, ReaderSource, Shell, ShellError};
use std::io::{self, IsTerminal};

use crate::rcfile::load_rc;

/// Run the read-eval loop until `exit` or end of input.
///
/// A terminal gets line editing, history, the banner and a prompt; piped
/// input is read line by line without either.
pub(crate) fn run_repl(config: Config) -> Result<(), ShellError> {
    let interactive = io::stdin().is_terminal();
    let banner = interactive && config.banner;
    let history = config.history_file.clone();
    let prompt = config.prompt.clone();

    let mut shell = Shell::new(config);
    if banner {
        println!("{}", WELCOME);
    }

    if load_rc(&mut shell) == Control::Continue {
        if interactive {
            let mut editor = EditorSource::new(prompt)?;
            if let Some(path) = &history {
                editor.load_history(path);
            }
            let result = shell.run_source(&mut editor);
            if let Some(path) = &history {
                editor.save_history(path);
            }
            result?;
        } else {
            let mut lines = ReaderSource::new(io::stdin().lock());
            shell.run_source(&mut lines)?;
        }
    }

    // end of input and `exit` say goodbye the same way
    println!("{}", FAREWELL);
    Ok(())
}
