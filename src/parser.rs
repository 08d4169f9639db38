//! Structural decomposition: token sequence -> command groups -> pipeline stages
//!
//! The same splitting primitive serves both layers: [`split`] on
//! [`Operator::Sequence`] yields command groups, and on [`Operator::Pipe`]
//! yields the stages of one group.

use crate::lexer::{Operator, Token};
use crate::redirect::{resolve, Stage};

/// A maximal run of tokens between separators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub tokens: Vec<Token>,
    /// The separator that ended this segment, or None if the input ran out
    pub terminator: Option<Operator>,
}

impl Segment {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Split tokens at every `separator` operator.
///
/// Separators are not part of any segment. An empty input produces no
/// segments; a trailing separator produces a final empty segment.
pub fn split(tokens: Vec<Token>, separator: Operator) -> Vec<Segment> {
    let mut segments = Vec::new();
    if tokens.is_empty() {
        return segments;
    }

    let mut current = Vec::new();
    for token in tokens {
        if token.is_operator(separator) {
            segments.push(Segment {
                tokens: std::mem::take(&mut current),
                terminator: Some(separator),
            });
        } else {
            current.push(token);
        }
    }
    segments.push(Segment {
        tokens: current,
        terminator: None,
    });
    segments
}

/// Inverse of [`split`]: re-insert each segment's terminator
pub fn join(segments: &[Segment]) -> Vec<Token> {
    let mut tokens = Vec::new();
    for segment in segments {
        tokens.extend(segment.tokens.iter().cloned());
        if let Some(op) = segment.terminator {
            tokens.push(Token::Operator(op));
        }
    }
    tokens
}

/// Split a line's tokens into command groups
pub fn command_groups(tokens: Vec<Token>) -> Vec<Segment> {
    split(tokens, Operator::Sequence)
}

/// An ordered chain of stages connected stdout-to-stdin.
///
/// A `None` slot is an empty stage (e.g. `a | | b`, or a trailing `|`);
/// the executor refuses to spawn it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub stages: Vec<Option<Stage>>,
}

impl Pipeline {
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Build a pipeline from one command group's tokens
pub fn parse_pipeline(group: Vec<Token>) -> Pipeline {
    let stages = split(group, Operator::Pipe)
        .into_iter()
        .map(|segment| {
            if segment.is_empty() {
                None
            } else {
                Some(resolve(segment.tokens))
            }
        })
        .collect();
    Pipeline { stages }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::redirect::{Redirect, RedirectKind};

    fn words(segment: &Segment) -> Vec<String> {
        segment.tokens.iter().map(|t| t.text()).collect()
    }

    #[test]
    fn split_without_separator_is_one_segment() {
        let segments = split(lex("ls -la"), Operator::Sequence);
        assert_eq!(segments.len(), 1);
        assert_eq!(words(&segments[0]), vec!["ls", "-la"]);
        assert_eq!(segments[0].terminator, None);
    }

    #[test]
    fn split_empty_input_has_no_segments() {
        assert!(split(Vec::new(), Operator::Sequence).is_empty());
    }

    #[test]
    fn split_records_terminators() {
        let segments = split(lex("a ; b c ; d"), Operator::Sequence);
        assert_eq!(segments.len(), 3);
        assert_eq!(words(&segments[1]), vec!["b", "c"]);
        assert_eq!(segments[0].terminator, Some(Operator::Sequence));
        assert_eq!(segments[1].terminator, Some(Operator::Sequence));
        assert_eq!(segments[2].terminator, None);
    }

    #[test]
    fn split_double_separator_yields_empty_group() {
        let segments = split(lex("a ;; b"), Operator::Sequence);
        assert_eq!(segments.len(), 3);
        assert!(segments[1].is_empty());
    }

    #[test]
    fn split_trailing_separator_yields_empty_last_group() {
        let segments = split(lex("a ;"), Operator::Sequence);
        assert_eq!(segments.len(), 2);
        assert!(segments[1].is_empty());
        assert_eq!(segments[1].terminator, None);
    }

    #[test]
    fn split_leaves_other_operators_in_place() {
        let segments = split(lex("a | b ; c"), Operator::Sequence);
        assert_eq!(words(&segments[0]), vec!["a", "|", "b"]);
    }

    #[test]
    fn split_then_join_round_trips() {
        let line = "echo \"x ; y\" a | grep a ; ls -l | wc ;; pwd";
        let tokens = lex(line);
        let groups = command_groups(tokens.clone());
        let rebuilt: Vec<Segment> = groups
            .iter()
            .map(|g| Segment {
                tokens: join(&split(g.tokens.clone(), Operator::Pipe)),
                terminator: g.terminator,
            })
            .collect();
        assert_eq!(join(&rebuilt), tokens);
    }

    #[test]
    fn pipeline_without_pipe_has_one_stage() {
        let pipeline = parse_pipeline(lex("echo hi"));
        assert_eq!(pipeline.len(), 1);
        let stage = pipeline.stages[0].as_ref().unwrap();
        assert_eq!(stage.argv, vec!["echo", "hi"]);
    }

    #[test]
    fn pipeline_stages_resolve_redirects_individually() {
        let pipeline = parse_pipeline(lex("sort < in.txt | uniq > out.txt"));
        assert_eq!(pipeline.len(), 2);
        let first = pipeline.stages[0].as_ref().unwrap();
        let second = pipeline.stages[1].as_ref().unwrap();
        assert_eq!(first.argv, vec!["sort"]);
        assert_eq!(
            first.redirect,
            Some(Redirect {
                kind: RedirectKind::Input,
                path: "in.txt".into()
            })
        );
        assert_eq!(second.argv, vec!["uniq"]);
        assert_eq!(second.redirect.as_ref().unwrap().kind, RedirectKind::Output);
    }

    #[test]
    fn pipeline_trailing_pipe_leaves_empty_stage() {
        let pipeline = parse_pipeline(lex("ls |"));
        assert_eq!(pipeline.len(), 2);
        assert!(pipeline.stages[0].is_some());
        assert!(pipeline.stages[1].is_none());
    }

    #[test]
    fn pipeline_leading_pipe_leaves_empty_stage() {
        let pipeline = parse_pipeline(lex("| wc"));
        assert!(pipeline.stages[0].is_none());
        assert!(pipeline.stages[1].is_some());
    }
}
