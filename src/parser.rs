//! Parser for plush.
//!
//! Groups the token stream into `;`/`&`-separated sequence units, splits
//! each unit into `|`-separated stages, and sorts each stage's tokens
//! into an argument vector plus structured redirects. The grammar is
//! total: every token stream maps to a list of pipelines, so `parse`
//! returns plain data. Anything that can actually fail - a missing
//! redirect target, an oversized argument vector, an unknown program -
//! is caught at execution time, where one bad stage cannot take down
//! the rest of the line.

use crate::ast::{Pipeline, Redirect, RedirectKind, SeqOp, Stage};
use crate::lexer::{Operator, Token};

/// Parser state
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// Peek at the current token without consuming it
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Consume and return the current token
    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Parse the whole line into its sequence units.
    fn parse(&mut self) -> Vec<Pipeline> {
        let mut pipelines = Vec::new();

        while !self.is_at_end() {
            let pipeline = self.parse_pipeline();
            // Empty units (`;;`, a lone `&`, a blank line) are skipped.
            if !(pipeline.stages.len() == 1 && pipeline.stages[0].is_empty()) {
                pipelines.push(pipeline);
            }
        }

        pipelines
    }

    /// Parse one sequence unit: stages joined by `|`, terminated by `;`,
    /// `&`, or end-of-line. The terminator decides foreground versus
    /// background for the whole unit.
    fn parse_pipeline(&mut self) -> Pipeline {
        let mut stages = vec![self.parse_stage()];
        let mut op = SeqOp::Foreground;

        loop {
            match self.advance() {
                Some(Token::Operator(Operator::Pipe)) => stages.push(self.parse_stage()),
                Some(Token::Operator(Operator::Background)) => {
                    op = SeqOp::Background;
                    break;
                }
                // parse_stage stops only at `|`, `;`, `&`, or end-of-line
                _ => break,
            }
        }

        Pipeline { stages, op }
    }

    /// Parse one stage: words join the argument vector, redirect
    /// operators (with their target word, when present) join the
    /// redirect list. Stops before `|`, `;`, and `&`.
    fn parse_stage(&mut self) -> Stage {
        let mut stage = Stage::default();

        while let Some(token) = self.peek().cloned() {
            match token {
                Token::Word(word) => {
                    self.advance();
                    stage.argv.push(word);
                }
                Token::Operator(Operator::Read) => {
                    self.advance();
                    stage.redirects.push(self.redirect(RedirectKind::Input));
                }
                Token::Operator(Operator::Write) => {
                    self.advance();
                    stage.redirects.push(self.redirect(RedirectKind::Output));
                }
                Token::Operator(Operator::Append) => {
                    self.advance();
                    stage.redirects.push(self.redirect(RedirectKind::Append));
                }
                Token::Operator(_) => break,
            }
        }

        stage
    }

    /// The word after a redirect operator is its target. A missing word
    /// records an empty target for the executor to reject.
    fn redirect(&mut self, kind: RedirectKind) -> Redirect {
        let mut target = String::new();
        if let Some(Token::Word(_)) = self.peek() {
            if let Some(Token::Word(word)) = self.advance() {
                target = word;
            }
        }
        Redirect { kind, target }
    }
}

/// Parse tokens into the line's sequence units.
pub fn parse(tokens: Vec<Token>) -> Vec<Pipeline> {
    Parser::new(tokens).parse()
}
