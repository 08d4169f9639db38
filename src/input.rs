//! Line sources: where the interpreter reads its next line from

use crate::shell::ShellError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::BufRead;
use std::path::Path;

pub trait LineSource {
    /// The next line without its line terminator, or None at end of input
    fn next_line(&mut self) -> Result<Option<String>, ShellError>;
}

/// Lines from any buffered reader: a sourced file or non-terminal stdin
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, ShellError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Interactive terminal input with line editing and history
pub struct EditorSource {
    editor: DefaultEditor,
    prompt: String,
}

impl EditorSource {
    pub fn new(prompt: impl Into<String>) -> Result<Self, ShellError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            prompt: prompt.into(),
        })
    }

    pub fn load_history(&mut self, path: &Path) {
        if let Err(e) = self.editor.load_history(path) {
            log::debug!("no history loaded from {}: {}", path.display(), e);
        }
    }

    pub fn save_history(&mut self, path: &Path) {
        if let Err(e) = self.editor.save_history(path) {
            log::warn!("could not save history to {}: {}", path.display(), e);
        }
    }
}

impl LineSource for EditorSource {
    fn next_line(&mut self) -> Result<Option<String>, ShellError> {
        loop {
            match self.editor.readline(&self.prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                            log::debug!("history entry not added: {}", e);
                        }
                    }
                    return Ok(Some(line));
                }
                // Ctrl-C discards the current line
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Clip a line to at most `max_chars` characters, on a char boundary
pub fn truncate_line(line: &str, max_chars: usize) -> &str {
    match line.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            log::warn!(
                "input line longer than {} characters, truncated",
                max_chars
            );
            &line[..cut]
        }
        None => line,
    }
}
