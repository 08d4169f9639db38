//! Tokenization for minish
//!
//! Turns one raw input line into owned tokens: words, double-quoted
//! strings and single-character operators. The lexer knows nothing about
//! shell semantics and never fails.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, one_of},
    combinator::{map, opt},
    multi::many0,
    sequence::{delimited, preceded, terminated},
    IResult,
};
use std::fmt;

/// Characters that are always lexed as one-character operator tokens
pub const OPERATOR_CHARS: &str = "()<>;|";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Sequence,   // ;
    Pipe,       // |
    Write,      // >
    Read,       // <
    OpenParen,  // (
    CloseParen, // )
}

impl Operator {
    pub fn as_char(self) -> char {
        match self {
            Operator::Sequence => ';',
            Operator::Pipe => '|',
            Operator::Write => '>',
            Operator::Read => '<',
            Operator::OpenParen => '(',
            Operator::CloseParen => ')',
        }
    }

    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            ';' => Some(Operator::Sequence),
            '|' => Some(Operator::Pipe),
            '>' => Some(Operator::Write),
            '<' => Some(Operator::Read),
            '(' => Some(Operator::OpenParen),
            ')' => Some(Operator::CloseParen),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare word (command name, argument, flag)
    Word(String),
    /// Content between double quotes, quotes excluded
    Quoted(String),
    /// A single-character operator
    Operator(Operator),
}

impl Token {
    /// Literal text of the token as it would appear in an argument vector
    pub fn text(&self) -> String {
        match self {
            Token::Word(s) | Token::Quoted(s) => s.clone(),
            Token::Operator(op) => op.as_char().to_string(),
        }
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        matches!(self, Token::Operator(o) if *o == op)
    }

    /// True for tokens that can name a program, argument or file
    pub fn is_text(&self) -> bool {
        !matches!(self, Token::Operator(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(s) => write!(f, "{}", s),
            Token::Quoted(s) => write!(f, "\"{}\"", s),
            Token::Operator(op) => write!(f, "{}", op.as_char()),
        }
    }
}

/// Re-join tokens with single spaces, for diagnostics and logs
pub fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_word_char(c: char) -> bool {
    !is_space(c) && c != '"' && !OPERATOR_CHARS.contains(c)
}

/// Parse a double-quoted string. A missing closing quote runs to end of input.
fn quoted(input: &str) -> IResult<&str, Token> {
    map(
        delimited(char('"'), take_while(|c| c != '"'), opt(char('"'))),
        |s: &str| Token::Quoted(s.to_string()),
    )(input)
}

/// Parse one operator character
fn operator(input: &str) -> IResult<&str, Token> {
    map(one_of(OPERATOR_CHARS), |c| {
        // one_of only yields members of OPERATOR_CHARS
        Token::Operator(Operator::from_char(c).unwrap_or(Operator::Sequence))
    })(input)
}

/// Parse a maximal run of ordinary characters
fn word(input: &str) -> IResult<&str, Token> {
    map(take_while1(is_word_char), |s: &str| Token::Word(s.to_string()))(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    preceded(take_while(is_space), alt((quoted, operator, word)))(input)
}

/// Tokenize one input line
pub fn lex(input: &str) -> Vec<Token> {
    match terminated(many0(token), take_while(is_space))(input) {
        Ok((rest, tokens)) => {
            if !rest.is_empty() {
                log::warn!("lexer stopped early, ignoring {:?}", rest);
            }
            tokens
        }
        Err(e) => {
            log::warn!("lexer failed on {:?}: {}", input, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Token {
        Token::Word(s.to_string())
    }

    #[test]
    fn tokenize_empty_line() {
        assert!(lex("").is_empty());
        assert!(lex("   \t ").is_empty());
    }

    #[test]
    fn tokenize_plain_words_like_whitespace_split() {
        let line = "ls   -la\t/tmp  ";
        let expected: Vec<Token> = line.split_whitespace().map(word).collect();
        assert_eq!(lex(line), expected);
    }

    #[test]
    fn tokenize_operators_are_never_glued() {
        assert_eq!(
            lex("a|b>c<d;e(f)"),
            vec![
                word("a"),
                Token::Operator(Operator::Pipe),
                word("b"),
                Token::Operator(Operator::Write),
                word("c"),
                Token::Operator(Operator::Read),
                word("d"),
                Token::Operator(Operator::Sequence),
                word("e"),
                Token::Operator(Operator::OpenParen),
                word("f"),
                Token::Operator(Operator::CloseParen),
            ]
        );
    }

    #[test]
    fn tokenize_quoted_keeps_spaces_and_operators() {
        assert_eq!(
            lex("echo \"a | b ; c > d\" e"),
            vec![
                word("echo"),
                Token::Quoted("a | b ; c > d".to_string()),
                word("e"),
            ]
        );
    }

    #[test]
    fn tokenize_quote_splits_adjacent_word() {
        assert_eq!(
            lex("ab\"c d\"ef"),
            vec![word("ab"), Token::Quoted("c d".to_string()), word("ef")]
        );
    }

    #[test]
    fn tokenize_unterminated_quote_runs_to_end() {
        assert_eq!(
            lex("echo \"hello world"),
            vec![word("echo"), Token::Quoted("hello world".to_string())]
        );
    }

    #[test]
    fn tokenize_empty_quotes() {
        assert_eq!(lex("\"\""), vec![Token::Quoted(String::new())]);
    }

    #[test]
    fn quoted_operator_is_not_an_operator() {
        let tokens = lex("echo \"<\"");
        assert_eq!(tokens[1], Token::Quoted("<".to_string()));
        assert!(tokens[1].is_text());
        assert_eq!(tokens[1].text(), "<");
    }

    #[test]
    fn render_round_trips_display() {
        let tokens = lex("echo \"a b\" | wc -w");
        assert_eq!(render(&tokens), "echo \"a b\" | wc -w");
    }
}
