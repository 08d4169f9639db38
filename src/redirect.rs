//! Redirection resolution for a single pipeline stage

use crate::lexer::{render, Operator, Token};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// `< file` replaces stdin
    Input,
    /// `> file` replaces stdout
    Output,
}

/// A (direction, filename) pair extracted from a stage's tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub kind: RedirectKind,
    pub path: PathBuf,
}

/// One program invocation: argument vector plus at most one redirection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub argv: Vec<String>,
    pub redirect: Option<Redirect>,
}

impl Stage {
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }
}

fn redirect_kind(token: &Token) -> Option<RedirectKind> {
    match token {
        Token::Operator(Operator::Read) => Some(RedirectKind::Input),
        Token::Operator(Operator::Write) => Some(RedirectKind::Output),
        _ => None,
    }
}

/// Extract the redirection directive from a stage's tokens.
///
/// The first token that follows a run of redirect operators becomes the
/// filename, and the last operator of that run decides the direction. The
/// argument vector ends where the run starts; anything after the filename
/// is discarded. A run with no filename after it records nothing and is
/// dropped from the argument vector.
pub fn resolve(tokens: Vec<Token>) -> Stage {
    let mut run_start: Option<usize> = None;
    let mut pending: Option<RedirectKind> = None;
    let mut bound: Option<(usize, Redirect)> = None;

    for (i, token) in tokens.iter().enumerate() {
        if let Some(kind) = redirect_kind(token) {
            run_start.get_or_insert(i);
            pending = Some(kind);
        } else if let Some(kind) = pending {
            bound = Some((
                i,
                Redirect {
                    kind,
                    path: PathBuf::from(token.text()),
                },
            ));
            break;
        }
    }

    let end = run_start.unwrap_or(tokens.len());
    let redirect = match bound {
        Some((filename_at, redirect)) => {
            if filename_at + 1 < tokens.len() {
                log::debug!(
                    "dropping tokens after redirect target: {}",
                    render(&tokens[filename_at + 1..])
                );
            }
            Some(redirect)
        }
        None => {
            if run_start.is_some() {
                log::debug!("redirect operator without a filename in: {}", render(&tokens));
            }
            None
        }
    };

    let argv = tokens[..end].iter().map(Token::text).collect();
    Stage { argv, redirect }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    #[test]
    fn no_redirect_is_a_noop() {
        let tokens = lex("grep -n \"two words\" file.txt");
        let expected: Vec<String> = tokens.iter().map(Token::text).collect();
        let stage = resolve(tokens);
        assert_eq!(stage.argv, expected);
        assert_eq!(stage.redirect, None);
    }

    #[test]
    fn output_redirect_is_extracted() {
        let stage = resolve(lex("echo hello > /tmp/out.txt"));
        assert_eq!(stage.argv, vec!["echo", "hello"]);
        assert_eq!(
            stage.redirect,
            Some(Redirect {
                kind: RedirectKind::Output,
                path: PathBuf::from("/tmp/out.txt"),
            })
        );
    }

    #[test]
    fn input_redirect_is_extracted() {
        let stage = resolve(lex("wc -l < data"));
        assert_eq!(stage.argv, vec!["wc", "-l"]);
        assert_eq!(stage.redirect.unwrap().kind, RedirectKind::Input);
    }

    #[test]
    fn quoted_filename_keeps_spaces() {
        let stage = resolve(lex("cat < \"my file.txt\""));
        assert_eq!(stage.redirect.unwrap().path, PathBuf::from("my file.txt"));
    }

    #[test]
    fn tokens_after_filename_are_dropped() {
        let stage = resolve(lex("sort < in.txt -r"));
        assert_eq!(stage.argv, vec!["sort"]);
        assert_eq!(stage.redirect.unwrap().path, PathBuf::from("in.txt"));
    }

    #[test]
    fn last_operator_before_filename_wins() {
        let stage = resolve(lex("cat > < in.txt"));
        assert_eq!(stage.argv, vec!["cat"]);
        let redirect = stage.redirect.unwrap();
        assert_eq!(redirect.kind, RedirectKind::Input);
        assert_eq!(redirect.path, PathBuf::from("in.txt"));
    }

    #[test]
    fn only_first_binding_is_honored() {
        let stage = resolve(lex("cat < a > b"));
        assert_eq!(stage.argv, vec!["cat"]);
        let redirect = stage.redirect.unwrap();
        assert_eq!(redirect.kind, RedirectKind::Input);
        assert_eq!(redirect.path, PathBuf::from("a"));
    }

    #[test]
    fn dangling_operator_records_nothing() {
        let stage = resolve(lex("echo hi >"));
        assert_eq!(stage.argv, vec!["echo", "hi"]);
        assert_eq!(stage.redirect, None);
    }

    #[test]
    fn quoted_operator_stays_an_argument() {
        let stage = resolve(lex("echo \">\" x"));
        assert_eq!(stage.argv, vec!["echo", ">", "x"]);
        assert_eq!(stage.redirect, None);
    }

    #[test]
    fn parens_are_literal_arguments() {
        let stage = resolve(lex("echo ( x )"));
        assert_eq!(stage.argv, vec!["echo", "(", "x", ")"]);
    }

    #[test]
    fn redirect_only_stage_has_empty_argv() {
        let stage = resolve(lex("> out.txt"));
        assert!(stage.argv.is_empty());
        assert!(stage.program().is_none());
        assert!(stage.redirect.is_some());
    }
}
