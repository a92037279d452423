//! Canonical text rendering of syntax trees.
//!
//! Infix, prefix and index expressions are fully parenthesized and every
//! statement inside a block sits on its own line, indented two spaces per
//! nesting level. The output always parses back to an equivalent tree.

use std::fmt::{Display, Result, Write};

use crate::utils::prelude::ensure_sufficient_stack;
use super::ast::{BlockStatement, Expression, Identifier, Node, Program, Statement};

const INDENT: &str = "  ";

pub fn print<'a>(node: impl Into<Node<'a>>) -> String {
    node.into().to_string()
}

fn pad<W: Write>(f: &mut W, indent: usize) -> Result {
    for _ in 0..indent {
        f.write_str(INDENT)?;
    }

    Ok(())
}

fn write_statements<W: Write>(f: &mut W, statements: &[Statement], indent: usize) -> Result {
    for (idx, statement) in statements.iter().enumerate() {
        if idx > 0 {
            f.write_char('\n')?;
        }
        pad(f, indent)?;
        write_statement(f, statement, indent)?;
    }

    Ok(())
}

fn write_block<W: Write>(f: &mut W, block: &BlockStatement, indent: usize) -> Result {
    f.write_str("{\n")?;

    if !block.statements.is_empty() {
        write_statements(f, &block.statements, indent + 1)?;
        f.write_char('\n')?;
    }

    pad(f, indent)?;
    f.write_char('}')
}

fn write_statement<W: Write>(f: &mut W, statement: &Statement, indent: usize) -> Result {
    ensure_sufficient_stack(|| write_statement_inner(f, statement, indent))
}

fn write_statement_inner<W: Write>(f: &mut W, statement: &Statement, indent: usize) -> Result {
    match statement {
        Statement::Let { name, value } => {
            write!(f, "let {} = ", name.value)?;
            write_expression(f, value, indent)?;
        },
        Statement::Return { value } => {
            f.write_str("return ")?;
            write_expression(f, value, indent)?;
        },
        Statement::Expression { expression } => write_expression(f, expression, indent)?,
    }

    f.write_char(';')
}

fn write_list<W: Write>(f: &mut W, expressions: &[Expression], indent: usize) -> Result {
    for (idx, expression) in expressions.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write_expression(f, expression, indent)?;
    }

    Ok(())
}

fn write_expression<W: Write>(f: &mut W, expression: &Expression, indent: usize) -> Result {
    ensure_sufficient_stack(|| write_expression_inner(f, expression, indent))
}

fn write_expression_inner<W: Write>(f: &mut W, expression: &Expression, indent: usize) -> Result {
    match expression {
        Expression::Identifier(ident) => f.write_str(&ident.value),
        Expression::Integer { value } => write!(f, "{value}"),
        Expression::String { value } => write!(f, "\"{value}\""),
        Expression::Bool { value } => write!(f, "{value}"),
        Expression::Prefix { operator, right } => {
            write!(f, "({operator}")?;
            write_expression(f, right, indent)?;
            f.write_char(')')
        },
        Expression::Infix { operator, left, right } => {
            f.write_char('(')?;
            write_expression(f, left, indent)?;
            write!(f, " {operator} ")?;
            write_expression(f, right, indent)?;
            f.write_char(')')
        },
        Expression::If { condition, consequence, alternative } => {
            f.write_str("if (")?;
            write_expression(f, condition, indent)?;
            f.write_str(") ")?;
            write_block(f, consequence, indent)?;

            if let Some(alternative) = alternative {
                f.write_str(" else ")?;
                write_block(f, alternative, indent)?;
            }

            Ok(())
        },
        Expression::Function { parameters, body } => {
            let parameters = parameters.iter()
                .map(|param| param.value.as_str())
                .collect::<Vec<&str>>()
                .join(", ");

            write!(f, "fn({parameters}) ")?;
            write_block(f, body, indent)
        },
        Expression::Call { function, arguments } => {
            write_expression(f, function, indent)?;
            f.write_char('(')?;
            write_list(f, arguments, indent)?;
            f.write_char(')')
        },
        Expression::Array { elements } => {
            f.write_char('[')?;
            write_list(f, elements, indent)?;
            f.write_char(']')
        },
        Expression::Index { left, index } => {
            f.write_char('(')?;
            write_expression(f, left, indent)?;
            f.write_char('[')?;
            write_expression(f, index, indent)?;
            f.write_str("])")
        },
        Expression::Hash { pairs } => {
            f.write_char('{')?;

            for (idx, (key, value)) in pairs.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write_expression(f, key, indent)?;
                f.write_str(": ")?;
                write_expression(f, value, indent)?;
            }

            f.write_char('}')
        },
    }
}

impl Display for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result {
        match self {
            Node::Program(program) => write_statements(f, &program.statements, 0),
            Node::Block(block) => write_statements(f, &block.statements, 0),
            Node::Statement(statement) => write_statement(f, statement, 0),
            Node::Expression(expression) => write_expression(f, expression, 0),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result {
        Node::Program(self).fmt(f)
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result {
        Node::Block(self).fmt(f)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result {
        Node::Statement(self).fmt(f)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result {
        Node::Expression(self).fmt(f)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result {
        f.write_str(&self.value)
    }
}
