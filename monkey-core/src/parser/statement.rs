use crate::lexer::prelude::{Spanned, TokenKind};
use super::{
    ast::{BlockStatement, Expression, Identifier, Program, Statement},
    error::{ParseError, ParseErrorType},
    parser::{parse_error, Parse, Parser, Precedence},
};

impl<T: Iterator<Item = Spanned>> Parse<T> for Program {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let mut statements = vec![];

        while !parser.current_is(TokenKind::Eof) {
            statements.push(Statement::parse(parser, None)?);
            parser.step();
        }

        Ok(Program { statements })
    }
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Statement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        match parser.current_kind() {
            TokenKind::Let => parse_let(parser),
            TokenKind::Return => parse_return(parser),
            _ => {
                let expression = Expression::parse(parser, None)?;
                parser.skip_semicolon();

                Ok(Statement::Expression { expression })
            }
        }
    }
}

fn parse_let<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Statement, ParseError> {
    parser.expect_peek(TokenKind::Ident)?;
    let name = Identifier::new(parser.current().literal.clone());

    parser.expect_peek(TokenKind::Assign)?;
    parser.step();

    let value = Expression::parse(parser, None)?;
    parser.skip_semicolon();

    Ok(Statement::Let { name, value })
}

fn parse_return<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Statement, ParseError> {
    parser.step();

    let value = Expression::parse(parser, None)?;
    parser.skip_semicolon();

    Ok(Statement::Return { value })
}

// Starts on `{` and stops on the matching `}`.
impl<T: Iterator<Item = Spanned>> Parse<T> for BlockStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let mut statements = vec![];
        parser.step();

        while !parser.current_is(TokenKind::RBrace) {
            if parser.current_is(TokenKind::Eof) {
                return parse_error(
                    ParseErrorType::UnexpectedToken {
                        expected: TokenKind::RBrace,
                        got: TokenKind::Eof,
                    },
                    parser.current_span()
                );
            }

            statements.push(Statement::parse(parser, None)?);
            parser.step();
        }

        Ok(BlockStatement { statements })
    }
}
