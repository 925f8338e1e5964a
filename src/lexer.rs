//! Tokenization for plush.
//!
//! A line breaks into words and the operators `;` `&` `|` `<` `>` `>>`.
//! A word is any maximal run of characters that is neither whitespace
//! nor an operator; there is no quoting or escaping layer.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, value},
    multi::many0,
    sequence::preceded,
    IResult,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Semi,       // ;
    Background, // &
    Pipe,       // |
    Read,       // <
    Write,      // >
    Append,     // >>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A word (command name, argument, redirect target)
    Word(String),
    /// An operator
    Operator(Operator),
}

#[derive(Error, Debug)]
pub enum LexError {
    #[error("unexpected character: {0}")]
    UnexpectedChar(char),
    #[error("tokenizer error: {0}")]
    ParseError(String),
}

/// Parse ; operator
fn semi_op(input: &str) -> IResult<&str, Token> {
    value(Token::Operator(Operator::Semi), char(';'))(input)
}

/// Parse & operator
fn background_op(input: &str) -> IResult<&str, Token> {
    value(Token::Operator(Operator::Background), char('&'))(input)
}

/// Parse | operator
fn pipe_op(input: &str) -> IResult<&str, Token> {
    value(Token::Operator(Operator::Pipe), char('|'))(input)
}

/// Parse < operator
fn read_op(input: &str) -> IResult<&str, Token> {
    value(Token::Operator(Operator::Read), char('<'))(input)
}

/// Parse >> operator (must come before >)
fn append_op(input: &str) -> IResult<&str, Token> {
    value(Token::Operator(Operator::Append), tag(">>"))(input)
}

/// Parse > operator
fn write_op(input: &str) -> IResult<&str, Token> {
    value(Token::Operator(Operator::Write), char('>'))(input)
}

/// Parse a word (command name, argument, or redirect target)
fn word(input: &str) -> IResult<&str, Token> {
    map(
        take_while1(|c: char| {
            !c.is_whitespace()
                && c != ';'
                && c != '&'
                && c != '|'
                && c != '<'
                && c != '>'
        }),
        |s: &str| Token::Word(s.to_string()),
    )(input)
}

/// Parse any single token
fn token(input: &str) -> IResult<&str, Token> {
    preceded(
        multispace0,
        alt((
            // Multi-char operators first
            append_op,
            // Single-char operators
            write_op,
            read_op,
            pipe_op,
            semi_op,
            background_op,
            // Words last
            word,
        )),
    )(input)
}

/// Tokenize a complete input line
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    let (remaining, tokens) =
        many0(token)(input).map_err(|e| LexError::ParseError(format!("{:?}", e)))?;

    // Check for any remaining unparsed content
    let remaining = remaining.trim();
    if !remaining.is_empty() {
        return Err(LexError::UnexpectedChar(
            remaining.chars().next().unwrap(),
        ));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Token {
        Token::Word(s.to_string())
    }

    fn op(o: Operator) -> Token {
        Token::Operator(o)
    }

    #[test]
    fn tokenize_simple_word() {
        let tokens = lex("ls").unwrap();
        assert_eq!(tokens, vec![word("ls")]);
    }

    #[test]
    fn tokenize_multiple_words() {
        let tokens = lex("echo hello world").unwrap();
        assert_eq!(tokens, vec![word("echo"), word("hello"), word("world")]);
    }

    #[test]
    fn tokenize_flags() {
        let tokens = lex("ls -la /tmp").unwrap();
        assert_eq!(tokens, vec![word("ls"), word("-la"), word("/tmp")]);
    }

    #[test]
    fn tokenize_pipe() {
        let tokens = lex("ls | wc -l").unwrap();
        assert_eq!(
            tokens,
            vec![word("ls"), op(Operator::Pipe), word("wc"), word("-l")]
        );
    }

    #[test]
    fn tokenize_sequence_operators() {
        let tokens = lex("a ; b & c").unwrap();
        assert_eq!(
            tokens,
            vec![
                word("a"),
                op(Operator::Semi),
                word("b"),
                op(Operator::Background),
                word("c"),
            ]
        );
    }

    #[test]
    fn tokenize_redirects() {
        let tokens = lex("sort < in > out").unwrap();
        assert_eq!(
            tokens,
            vec![
                word("sort"),
                op(Operator::Read),
                word("in"),
                op(Operator::Write),
                word("out"),
            ]
        );
    }

    #[test]
    fn tokenize_append_before_write() {
        let tokens = lex("echo hi >> log").unwrap();
        assert_eq!(
            tokens,
            vec![word("echo"), word("hi"), op(Operator::Append), word("log")]
        );
    }

    #[test]
    fn tokenize_spaced_writes_stay_separate() {
        let tokens = lex("> >").unwrap();
        assert_eq!(tokens, vec![op(Operator::Write), op(Operator::Write)]);
    }

    #[test]
    fn tokenize_operators_without_spaces() {
        let tokens = lex("echo>f|cat;x&").unwrap();
        assert_eq!(
            tokens,
            vec![
                word("echo"),
                op(Operator::Write),
                word("f"),
                op(Operator::Pipe),
                word("cat"),
                op(Operator::Semi),
                word("x"),
                op(Operator::Background),
            ]
        );
    }

    #[test]
    fn tokenize_empty_input() {
        assert_eq!(lex("").unwrap(), vec![]);
        assert_eq!(lex("   \t\n").unwrap(), vec![]);
    }

    #[test]
    fn tokenize_trailing_newline() {
        let tokens = lex("echo hi\n").unwrap();
        assert_eq!(tokens, vec![word("echo"), word("hi")]);
    }
}
