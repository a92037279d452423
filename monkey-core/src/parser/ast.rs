use std::fmt::Display;

use serde::Serialize;

// program -> { <statement> }
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub value: String,
}

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Statement {
    // let <ident> = <expression> [;]
    Let {
        name: Identifier,
        value: Expression,
    },
    // return <expression> [;]
    Return {
        value: Expression,
    },
    // <expression> [;]
    Expression {
        expression: Expression,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Expression {
    Identifier(Identifier),
    Integer {
        value: i64,
    },
    String {
        value: String,
    },
    Bool {
        value: bool,
    },
    Prefix {
        operator: PrefixOperator,
        right: Box<Expression>,
    },
    Infix {
        operator: InfixOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    Function {
        parameters: Vec<Identifier>,
        body: BlockStatement,
    },
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Array {
        elements: Vec<Expression>,
    },
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
    Hash {
        pairs: Vec<(Expression, Expression)>,
    },
}

// Deeply nested trees would otherwise be torn down recursively on the native
// stack. Children are moved onto a heap worklist and dropped one by one.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);

        while let Some(mut expression) = pending.pop() {
            expression.take_children(&mut pending);
        }
    }
}

impl Expression {
    // Leaves `self` childless so its own drop is shallow.
    fn take_children(&mut self, pending: &mut Vec<Expression>) {
        let mut take = |boxed: &mut Box<Expression>| {
            pending.push(std::mem::replace(boxed.as_mut(), Expression::Bool { value: false }));
        };

        match self {
            Expression::Identifier(_)
            | Expression::Integer { .. }
            | Expression::String { .. }
            | Expression::Bool { .. } => {},
            Expression::Prefix { right, .. } => take(right),
            Expression::Infix { left, right, .. } | Expression::Index { left, index: right } => {
                take(left);
                take(right);
            },
            Expression::If { condition, consequence, alternative } => {
                take(condition);
                take_block(consequence, pending);
                if let Some(alternative) = alternative {
                    take_block(alternative, pending);
                }
            },
            Expression::Function { body, .. } => take_block(body, pending),
            Expression::Call { function, arguments } => {
                take(function);
                pending.append(arguments);
            },
            Expression::Array { elements } => pending.append(elements),
            Expression::Hash { pairs } => {
                for (key, value) in pairs.drain(..) {
                    pending.push(key);
                    pending.push(value);
                }
            },
        }
    }
}

fn take_block(block: &mut BlockStatement, pending: &mut Vec<Expression>) {
    for statement in block.statements.drain(..) {
        match statement {
            Statement::Let { value, .. } | Statement::Return { value } => pending.push(value),
            Statement::Expression { expression } => pending.push(expression),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrefixOperator {
    #[serde(rename = "!")]
    Bang,
    #[serde(rename = "-")]
    Minus,
}

impl PrefixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bang => "!",
            Self::Minus => "-",
        }
    }
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InfixOperator {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "*")]
    Asterisk,
    #[serde(rename = "/")]
    Slash,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
}

impl InfixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Eq => "==",
            Self::NotEq => "!=",
        }
    }
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Borrowed view over any kind of syntax node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Block(&'a BlockStatement),
    Expression(&'a Expression),
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(value: &'a Program) -> Self {
        Node::Program(value)
    }
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(value: &'a Statement) -> Self {
        Node::Statement(value)
    }
}

impl<'a> From<&'a BlockStatement> for Node<'a> {
    fn from(value: &'a BlockStatement) -> Self {
        Node::Block(value)
    }
}

impl<'a> From<&'a Expression> for Node<'a> {
    fn from(value: &'a Expression) -> Self {
        Node::Expression(value)
    }
}
