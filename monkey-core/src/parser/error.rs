use thiserror::Error;

use crate::{lexer::prelude::TokenKind, utils::prelude::SrcSpan};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseErrorType {
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken {
        expected: TokenKind,
        got: TokenKind,
    },
    #[error("no prefix parse function for {kind}")]
    NoPrefixParseFn { kind: TokenKind },
    #[error("illegal token `{literal}`")]
    IllegalToken { literal: String },
    #[error("could not parse {literal} as integer")]
    InvalidInteger { literal: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{error}")]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan,
}

impl ParseError {
    /// Short label for the offending span plus extra lines of help text.
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::UnexpectedToken { expected, got } => {
                let found = match got {
                    TokenKind::Eof => "the end of input".to_string(),
                    TokenKind::Int => "an integer".to_string(),
                    TokenKind::String => "a string".to_string(),
                    TokenKind::Ident => "an identifier".to_string(),
                    _ if got.is_reserved_word() => format!("the keyword `{}`", got.as_literal().to_lowercase()),
                    _ => format!("`{got}`"),
                };

                ("Not expected this", vec![format!("Found {found}, expected `{expected}`")])
            },
            ParseErrorType::NoPrefixParseFn { kind } => (
                "Cannot start an expression",
                vec![format!("`{kind}` cannot begin an expression")]
            ),
            ParseErrorType::IllegalToken { .. } => ("Unrecognized character", vec![]),
            ParseErrorType::InvalidInteger { .. } => (
                "Integer literal out of range",
                vec![format!("Integers must fit between {} and {}", i64::MIN, i64::MAX)]
            ),
        }
    }
}
