use crate::{
    lexer::prelude::{Lexer, Spanned, Token, TokenKind},
    utils::prelude::SrcSpan,
};
use super::error::{ParseError, ParseErrorType};
use super::ast::Program;

pub trait Parse<T: Iterator<Item = Spanned>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

/// Pratt parser over a spanned token stream.
///
/// `current_token` is the token being looked at and `next_token` the single
/// token of lookahead. Node parsers leave `current_token` on the last token
/// they consumed.
pub struct Parser<T: Iterator<Item = Spanned>> {
    pub current_token: Spanned,
    pub next_token: Spanned,

    tokens: T,
}

impl<T: Iterator<Item = Spanned>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: (0, Token::eof(), 0),
            next_token: (0, Token::eof(), 0),

            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let next = match self.tokens.next() {
            Some(token) => token,
            None => {
                let end = self.next_token.2;
                (end, Token::eof(), end)
            }
        };

        self.current_token = std::mem::replace(&mut self.next_token, next);
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let program = Program::parse(self, None)?;

        tracing::debug!(statements = program.statements.len(), "parsed program");

        Ok(program)
    }

    pub fn current(&self) -> &Token {
        &self.current_token.1
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current_token.1.kind
    }

    pub fn current_span(&self) -> SrcSpan {
        SrcSpan::from(self.current_token.0, self.current_token.2)
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.next_token.1.kind
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub fn current_precedence(&self) -> Precedence {
        Precedence::from(self.current_kind())
    }

    pub fn peek_precedence(&self) -> Precedence {
        Precedence::from(self.peek_kind())
    }

    /// Advances only when the lookahead token has the expected kind.
    pub fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_is(kind) {
            self.step();
            return Ok(());
        }

        let (start, token, end) = &self.next_token;

        parse_error(
            ParseErrorType::UnexpectedToken {
                expected: kind,
                got: token.kind,
            },
            SrcSpan::from(*start, *end)
        )
    }

    /// Consumes an optional trailing `;`.
    pub fn skip_semicolon(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.step();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

impl From<TokenKind> for Precedence {
    fn from(value: TokenKind) -> Self {
        match value {
            TokenKind::Eq | TokenKind::NotEq => Self::Equals,
            TokenKind::Lt | TokenKind::Gt => Self::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Self::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Self::Product,
            TokenKind::LParen => Self::Call,
            TokenKind::LBracket => Self::Index,
            _ => Self::Lowest,
        }
    }
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn parse(src: &str) -> Result<Program, ParseError> {
    let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::new(lexer);

    parser.parse_program()
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_from_stream(stream: impl Iterator<Item = char>) -> Result<Program, ParseError> {
    let lexer = Lexer::new(stream
        .scan(0, |pos, c| {
            *pos += c.len_utf8() as u32;
            Some((*pos - c.len_utf8() as u32, c))
        })
    );
    let mut parser = Parser::new(lexer);

    parser.parse_program()
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
