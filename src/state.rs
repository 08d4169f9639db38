//! Session state that persists between command groups
//!
//! Holds the previous-command cache read by `prev`. The cache keeps its own
//! copy of the tokens, so it outlives the line they came from.

use crate::lexer::Token;

#[derive(Debug, Clone, Default)]
pub struct ShellState {
    previous: Option<Vec<Token>>,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a command group as the one `prev` will replay.
    /// Empty groups are ignored.
    pub fn record(&mut self, tokens: &[Token]) {
        if tokens.is_empty() {
            return;
        }
        self.previous = Some(tokens.to_vec());
    }

    /// A fresh copy of the cached command group, if any
    pub fn recall(&self) -> Option<Vec<Token>> {
        self.previous.clone()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}
