use crate::{
    lexer::prelude::{Spanned, TokenKind},
    utils::prelude::ensure_sufficient_stack,
};
use super::{
    ast::{BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator},
    error::{ParseError, ParseErrorType},
    parser::{parse_error, Parse, Parser, Precedence},
};

type PrefixParseFn<T> = fn(&mut Parser<T>) -> Result<Expression, ParseError>;
type InfixParseFn<T> = fn(&mut Parser<T>, Expression) -> Result<Expression, ParseError>;

impl<T: Iterator<Item = Spanned>> Parse<T> for Expression {
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = precedence.unwrap_or(Precedence::Lowest);

        ensure_sufficient_stack(|| {
            let prefix = match prefix_parse_fn(parser.current_kind()) {
                Some(prefix) => prefix,
                None => return no_prefix_parse_fn(parser),
            };

            let mut left = prefix(parser)?;

            while !parser.peek_is(TokenKind::Semicolon) && precedence < parser.peek_precedence() {
                let infix = match infix_parse_fn(parser.peek_kind()) {
                    Some(infix) => infix,
                    None => return Ok(left),
                };

                parser.step();
                left = infix(parser, left)?;
            }

            Ok(left)
        })
    }
}

fn prefix_parse_fn<T: Iterator<Item = Spanned>>(kind: TokenKind) -> Option<PrefixParseFn<T>> {
    let prefix: PrefixParseFn<T> = match kind {
        TokenKind::Ident => parse_identifier,
        TokenKind::Int => parse_integer,
        TokenKind::String => parse_string,
        TokenKind::True | TokenKind::False => parse_boolean,
        TokenKind::Bang | TokenKind::Minus => parse_prefix,
        TokenKind::LParen => parse_grouped,
        TokenKind::If => parse_if,
        TokenKind::Function => parse_function,
        TokenKind::LBracket => parse_array,
        TokenKind::LBrace => parse_hash,
        _ => return None,
    };

    Some(prefix)
}

fn infix_parse_fn<T: Iterator<Item = Spanned>>(kind: TokenKind) -> Option<InfixParseFn<T>> {
    let infix: InfixParseFn<T> = match kind {
        TokenKind::LParen => parse_call,
        TokenKind::LBracket => parse_index,
        _ if infix_operator(kind).is_some() => parse_infix,
        _ => return None,
    };

    Some(infix)
}

fn prefix_operator(kind: TokenKind) -> Option<PrefixOperator> {
    match kind {
        TokenKind::Bang => Some(PrefixOperator::Bang),
        TokenKind::Minus => Some(PrefixOperator::Minus),
        _ => None,
    }
}

fn infix_operator(kind: TokenKind) -> Option<InfixOperator> {
    Some(match kind {
        TokenKind::Plus => InfixOperator::Plus,
        TokenKind::Minus => InfixOperator::Minus,
        TokenKind::Asterisk => InfixOperator::Asterisk,
        TokenKind::Slash => InfixOperator::Slash,
        TokenKind::Lt => InfixOperator::Lt,
        TokenKind::Gt => InfixOperator::Gt,
        TokenKind::Eq => InfixOperator::Eq,
        TokenKind::NotEq => InfixOperator::NotEq,
        _ => return None,
    })
}

fn no_prefix_parse_fn<T: Iterator<Item = Spanned>>(parser: &Parser<T>) -> Result<Expression, ParseError> {
    let token = parser.current();

    let error = match token.kind {
        TokenKind::Illegal => ParseErrorType::IllegalToken { literal: token.literal.clone() },
        kind => ParseErrorType::NoPrefixParseFn { kind },
    };

    parse_error(error, parser.current_span())
}

fn parse_identifier<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Expression, ParseError> {
    Ok(Expression::Identifier(Identifier::new(parser.current().literal.clone())))
}

fn parse_integer<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Expression, ParseError> {
    let literal = &parser.current().literal;

    match literal.parse::<i64>() {
        Ok(value) => Ok(Expression::Integer { value }),
        Err(_) => parse_error(
            ParseErrorType::InvalidInteger { literal: literal.clone() },
            parser.current_span()
        ),
    }
}

fn parse_string<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Expression, ParseError> {
    Ok(Expression::String { value: parser.current().literal.clone() })
}

fn parse_boolean<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Expression, ParseError> {
    Ok(Expression::Bool { value: parser.current_is(TokenKind::True) })
}

fn parse_prefix<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Expression, ParseError> {
    let operator = match prefix_operator(parser.current_kind()) {
        Some(operator) => operator,
        None => return no_prefix_parse_fn(parser),
    };

    parser.step();
    let right = Expression::parse(parser, Some(Precedence::Prefix))?;

    Ok(Expression::Prefix { operator, right: Box::new(right) })
}

fn parse_grouped<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Expression, ParseError> {
    parser.step();

    let expression = Expression::parse(parser, None)?;
    parser.expect_peek(TokenKind::RParen)?;

    Ok(expression)
}

// if (<condition>) { <consequence> } [else { <alternative> }]
fn parse_if<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Expression, ParseError> {
    parser.expect_peek(TokenKind::LParen)?;
    parser.step();

    let condition = Expression::parse(parser, None)?;

    parser.expect_peek(TokenKind::RParen)?;
    parser.expect_peek(TokenKind::LBrace)?;

    let consequence = BlockStatement::parse(parser, None)?;

    let alternative = if parser.peek_is(TokenKind::Else) {
        parser.step();
        parser.expect_peek(TokenKind::LBrace)?;

        Some(BlockStatement::parse(parser, None)?)
    } else {
        None
    };

    Ok(Expression::If {
        condition: Box::new(condition),
        consequence,
        alternative,
    })
}

// fn(<ident>, ...) { <body> }
fn parse_function<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Expression, ParseError> {
    parser.expect_peek(TokenKind::LParen)?;

    let parameters = parse_parameters(parser)?;

    parser.expect_peek(TokenKind::LBrace)?;

    let body = BlockStatement::parse(parser, None)?;

    Ok(Expression::Function { parameters, body })
}

fn parse_parameters<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Vec<Identifier>, ParseError> {
    let mut parameters = vec![];

    if parser.peek_is(TokenKind::RParen) {
        parser.step();
        return Ok(parameters);
    }

    parser.expect_peek(TokenKind::Ident)?;
    parameters.push(Identifier::new(parser.current().literal.clone()));

    while parser.peek_is(TokenKind::Comma) {
        parser.step();
        parser.expect_peek(TokenKind::Ident)?;
        parameters.push(Identifier::new(parser.current().literal.clone()));
    }

    parser.expect_peek(TokenKind::RParen)?;

    Ok(parameters)
}

fn parse_array<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Expression, ParseError> {
    let elements = parse_expression_list(parser, TokenKind::RBracket)?;

    Ok(Expression::Array { elements })
}

// {<key>: <value>, ...}
fn parse_hash<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Expression, ParseError> {
    let mut pairs = vec![];

    while !parser.peek_is(TokenKind::RBrace) {
        parser.step();
        let key = Expression::parse(parser, None)?;

        parser.expect_peek(TokenKind::Colon)?;
        parser.step();
        let value = Expression::parse(parser, None)?;

        pairs.push((key, value));

        if !parser.peek_is(TokenKind::RBrace) {
            parser.expect_peek(TokenKind::Comma)?;
        }
    }

    parser.expect_peek(TokenKind::RBrace)?;

    Ok(Expression::Hash { pairs })
}

fn parse_infix<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>, left: Expression) -> Result<Expression, ParseError> {
    let operator = match infix_operator(parser.current_kind()) {
        Some(operator) => operator,
        None => return no_prefix_parse_fn(parser),
    };
    let precedence = parser.current_precedence();

    parser.step();
    let right = Expression::parse(parser, Some(precedence))?;

    Ok(Expression::Infix {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    })
}

fn parse_call<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>, function: Expression) -> Result<Expression, ParseError> {
    let arguments = parse_expression_list(parser, TokenKind::RParen)?;

    Ok(Expression::Call {
        function: Box::new(function),
        arguments,
    })
}

fn parse_index<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>, left: Expression) -> Result<Expression, ParseError> {
    parser.step();

    let index = Expression::parse(parser, None)?;
    parser.expect_peek(TokenKind::RBracket)?;

    Ok(Expression::Index {
        left: Box::new(left),
        index: Box::new(index),
    })
}

// Comma separated expressions up to and including `end`.
fn parse_expression_list<T: Iterator<Item = Spanned>>(
    parser: &mut Parser<T>,
    end: TokenKind
) -> Result<Vec<Expression>, ParseError> {
    let mut list = vec![];

    if parser.peek_is(end) {
        parser.step();
        return Ok(list);
    }

    parser.step();
    list.push(Expression::parse(parser, None)?);

    while parser.peek_is(TokenKind::Comma) {
        parser.step();
        parser.step();
        list.push(Expression::parse(parser, None)?);
    }

    parser.expect_peek(end)?;

    Ok(list)
}
