use std::{collections::BTreeMap, fmt::Display, rc::Rc};

use crate::parser::prelude::{BlockStatement, Identifier};
use super::{builtins::Builtin, environment::Env};

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

/// Runtime value produced by evaluation.
///
/// Compound values sit behind `Rc`, so cloning an object never copies an
/// array, hash or closure. Arrays and hashes are never mutated in place.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Str(Rc<str>),
    Array(Rc<Vec<Object>>),
    Hash(Rc<BTreeMap<HashKey, Object>>),
    Function(Rc<Function>),
    Builtin(Builtin),
    Error(String),
    /// Only travels between a `return` and the enclosing call or program.
    ReturnValue(Box<Object>),
    Null,
}

impl Object {
    pub fn from_bool(value: bool) -> Self {
        if value { TRUE } else { FALSE }
    }

    pub fn string(value: impl Into<Rc<str>>) -> Self {
        Object::Str(value.into())
    }

    pub fn array(elements: Vec<Object>) -> Self {
        Object::Array(Rc::new(elements))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Object::Error(message.into())
    }

    /// `false` and `null` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey::Integer(*value)),
            Object::Boolean(value) => Some(HashKey::Boolean(*value)),
            Object::Str(value) => Some(HashKey::Str(value.clone())),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Str(_) => "STRING",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Error(_) => "ERROR",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Null => "NULL",
        }
    }

    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{value}"),
            Object::Boolean(value) => write!(f, "{value}"),
            Object::Str(value) => write!(f, "\"{value}\""),
            Object::Array(elements) => {
                let elements = elements.iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");

                write!(f, "[{elements}]")
            },
            Object::Hash(pairs) => {
                let pairs = pairs.iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect::<Vec<String>>()
                    .join(", ");

                write!(f, "{{{pairs}}}")
            },
            Object::Function(function) => write!(f, "{function}"),
            Object::Builtin(builtin) => write!(f, "builtin function {}", builtin.name),
            Object::Error(message) => write!(f, "Error: {message}"),
            Object::ReturnValue(value) => write!(f, "{value}"),
            Object::Null => write!(f, "null"),
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Str(a), Object::Str(b)) => a == b,
            (Object::Array(a), Object::Array(b)) => a == b,
            (Object::Hash(a), Object::Hash(b)) => a == b,
            (Object::Function(a), Object::Function(b)) => Rc::ptr_eq(a, b),
            (Object::Builtin(a), Object::Builtin(b)) => a.name == b.name,
            (Object::Error(a), Object::Error(b)) => a == b,
            (Object::ReturnValue(a), Object::ReturnValue(b)) => a == b,
            (Object::Null, Object::Null) => true,
            _ => false,
        }
    }
}

/// The subset of objects usable as hash keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    Str(Rc<str>),
}

impl Display for HashKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashKey::Integer(value) => write!(f, "{value}"),
            HashKey::Boolean(value) => write!(f, "{value}"),
            HashKey::Str(value) => write!(f, "\"{value}\""),
        }
    }
}

/// User defined function together with the scope it closes over.
///
/// `name` is set when the literal is bound by `let`. Each call binds it in the
/// fresh call scope, which is how a function reaches itself.
pub struct Function {
    pub name: Option<String>,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Env,
}

impl std::fmt::Debug for Function {
    // Captured scopes can be large, so only the code is shown.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self.parameters.iter()
            .map(|param| param.value.as_str())
            .collect::<Vec<&str>>()
            .join(", ");

        write!(f, "fn({parameters}) {{ ... }}")
    }
}
