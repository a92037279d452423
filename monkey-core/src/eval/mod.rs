mod error;
#[cfg(test)]
mod tests;

pub use error::EvalError;

use std::{collections::BTreeMap, rc::Rc};

use crate::{
    environment::prelude::{lookup_builtin, Env, Environment, Function, Object, NULL},
    parser::prelude::{BlockStatement, Expression, Identifier, InfixOperator, Node, PrefixOperator, Program, Statement},
    utils::prelude::ensure_sufficient_stack,
};

pub const DEFAULT_MAX_DEPTH: usize = 2048;

// Hands an `Object::Error` straight back to the caller.
macro_rules! propagate {
    ($result:expr) => {
        match $result? {
            error @ Object::Error(_) => return Ok(error),
            value => value,
        }
    };
}

/// Evaluates `program` in `env` with the default call depth limit.
pub fn eval(program: &Program, env: &Env) -> Result<Object, EvalError> {
    Evaluator::new().eval_program(program, env)
}

/// Tree walking evaluator.
///
/// Language level failures come back as `Ok(Object::Error(..))`; only the
/// faults in [`EvalError`] surface as `Err`.
#[derive(Debug, Clone)]
pub struct Evaluator {
    max_depth: usize,
    depth: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth, depth: 0 }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn eval<'a>(&mut self, node: impl Into<Node<'a>>, env: &Env) -> Result<Object, EvalError> {
        match node.into() {
            Node::Program(program) => self.eval_program(program, env),
            Node::Block(block) => self.eval_block(block, env),
            Node::Statement(statement) => self.eval_statement(statement, env),
            Node::Expression(expression) => self.eval_expression(expression, env),
        }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn eval_program(&mut self, program: &Program, env: &Env) -> Result<Object, EvalError> {
        let mut result = NULL;

        for statement in &program.statements {
            result = self.eval_statement(statement, env)
                .inspect_err(|err| tracing::debug!(%err, "evaluation aborted"))?;

            match result {
                Object::ReturnValue(value) => return Ok(*value),
                Object::Error(_) => return Ok(result),
                _ => {}
            }
        }

        Ok(result)
    }

    // Unlike a program, a block hands `return` markers on unchanged.
    fn eval_block(&mut self, block: &BlockStatement, env: &Env) -> Result<Object, EvalError> {
        let mut result = NULL;

        for statement in &block.statements {
            result = self.eval_statement(statement, env)?;

            if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
                return Ok(result);
            }
        }

        Ok(result)
    }

    fn eval_statement(&mut self, statement: &Statement, env: &Env) -> Result<Object, EvalError> {
        match statement {
            Statement::Let { name, value } => {
                let evaluated = match value {
                    Expression::Function { parameters, body } => {
                        function_literal(Some(name), parameters, body, env)
                    },
                    _ => propagate!(self.eval_expression(value, env)),
                };

                env.borrow_mut().set(name.value.clone(), evaluated);

                Ok(NULL)
            },
            Statement::Return { value } => {
                let evaluated = propagate!(self.eval_expression(value, env));

                Ok(Object::ReturnValue(Box::new(evaluated)))
            },
            Statement::Expression { expression } => self.eval_expression(expression, env),
        }
    }

    fn eval_expression(&mut self, expression: &Expression, env: &Env) -> Result<Object, EvalError> {
        ensure_sufficient_stack(|| match expression {
            Expression::Identifier(ident) => Ok(eval_identifier(ident, env)),
            Expression::Integer { value } => Ok(Object::Integer(*value)),
            Expression::String { value } => Ok(Object::string(value.as_str())),
            Expression::Bool { value } => Ok(Object::from_bool(*value)),
            Expression::Prefix { operator, right } => {
                let right = propagate!(self.eval_expression(right, env));

                Ok(eval_prefix(*operator, right))
            },
            Expression::Infix { operator, left, right } => {
                let left = propagate!(self.eval_expression(left, env));
                let right = propagate!(self.eval_expression(right, env));

                eval_infix(*operator, left, right)
            },
            Expression::If { condition, consequence, alternative } => {
                let condition = propagate!(self.eval_expression(condition, env));

                if condition.is_truthy() {
                    self.eval_block(consequence, env)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, env)
                } else {
                    Ok(NULL)
                }
            },
            Expression::Function { parameters, body } => Ok(function_literal(None, parameters, body, env)),
            Expression::Call { function, arguments } => {
                let function = propagate!(self.eval_expression(function, env));

                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(propagate!(self.eval_expression(argument, env)));
                }

                self.apply_function(function, args)
            },
            Expression::Array { elements } => {
                let mut evaluated = Vec::with_capacity(elements.len());
                for element in elements {
                    evaluated.push(propagate!(self.eval_expression(element, env)));
                }

                Ok(Object::array(evaluated))
            },
            Expression::Index { left, index } => {
                let left = propagate!(self.eval_expression(left, env));
                let index = propagate!(self.eval_expression(index, env));

                Ok(eval_index(left, index))
            },
            Expression::Hash { pairs } => {
                let mut hash = BTreeMap::new();

                for (key, value) in pairs {
                    let key = propagate!(self.eval_expression(key, env));
                    let hash_key = match key.hash_key() {
                        Some(hash_key) => hash_key,
                        None => return Ok(Object::error(format!("unusable as hash key: {key}"))),
                    };

                    let value = propagate!(self.eval_expression(value, env));
                    hash.insert(hash_key, value);
                }

                Ok(Object::Hash(Rc::new(hash)))
            },
        })
    }

    fn apply_function(&mut self, function: Object, args: Vec<Object>) -> Result<Object, EvalError> {
        let function = match function {
            Object::Function(function) => function,
            Object::Builtin(builtin) => return Ok(builtin.call(&args)),
            other => return Ok(Object::error(format!("not a function: {other}"))),
        };

        if args.len() != function.parameters.len() {
            return Ok(Object::error(format!(
                "wrong number of arguments. expected {}, got {}",
                function.parameters.len(),
                args.len()
            )));
        }

        if self.depth >= self.max_depth {
            tracing::debug!(limit = self.max_depth, "call depth exceeded");
            return Err(EvalError::CallDepthExceeded { limit: self.max_depth });
        }

        // Parameters live in a fresh scope on top of the captured one, not the caller's.
        let mut scope = Environment::new_enclosed(function.env.clone());
        if let Some(name) = &function.name {
            scope.set(name.clone(), Object::Function(function.clone()));
        }
        for (param, arg) in function.parameters.iter().zip(args) {
            scope.set(param.value.clone(), arg);
        }
        let scope = scope.shared();

        self.depth += 1;
        tracing::trace!(depth = self.depth, "applying function");

        let result = self.eval_block(&function.body, &scope);

        self.depth -= 1;

        match result? {
            Object::ReturnValue(value) => Ok(*value),
            value => Ok(value),
        }
    }
}

// Captures a snapshot of `env`, so later `let`s in the defining scope stay invisible.
fn function_literal(
    name: Option<&Identifier>,
    parameters: &[Identifier],
    body: &BlockStatement,
    env: &Env,
) -> Object {
    Object::Function(Rc::new(Function {
        name: name.map(|name| name.value.clone()),
        parameters: parameters.to_vec(),
        body: body.clone(),
        env: env.borrow().snapshot().shared(),
    }))
}

fn eval_identifier(ident: &Identifier, env: &Env) -> Object {
    if let Some(value) = env.borrow().get(&ident.value) {
        return value;
    }

    match lookup_builtin(&ident.value) {
        Some(builtin) => Object::Builtin(builtin),
        None => Object::error(format!("identifier not found: {}", ident.value)),
    }
}

fn eval_prefix(operator: PrefixOperator, right: Object) -> Object {
    match operator {
        PrefixOperator::Bang => Object::from_bool(!right.is_truthy()),
        PrefixOperator::Minus => match right {
            Object::Integer(value) => Object::Integer(value.wrapping_neg()),
            other => Object::error(format!("unknown operator: -{other}")),
        },
    }
}

fn eval_infix(operator: InfixOperator, left: Object, right: Object) -> Result<Object, EvalError> {
    let result = match (&left, &right) {
        (Object::Integer(a), Object::Integer(b)) => return eval_integer_infix(operator, *a, *b),
        (Object::Boolean(a), Object::Boolean(b)) => match operator {
            InfixOperator::Eq => Object::from_bool(a == b),
            InfixOperator::NotEq => Object::from_bool(a != b),
            _ => unknown_operator(operator, &left, &right),
        },
        (Object::Str(a), Object::Str(b)) => match operator {
            InfixOperator::Plus => Object::string(format!("{a}{b}")),
            _ => unknown_operator(operator, &left, &right),
        },
        _ if left.type_name() == right.type_name() => unknown_operator(operator, &left, &right),
        _ => Object::error(format!("type mismatch: {left} {operator} {right}")),
    };

    Ok(result)
}

fn unknown_operator(operator: InfixOperator, left: &Object, right: &Object) -> Object {
    Object::error(format!("unknown operator: {left} {operator} {right}"))
}

fn eval_integer_infix(operator: InfixOperator, a: i64, b: i64) -> Result<Object, EvalError> {
    Ok(match operator {
        InfixOperator::Plus => Object::Integer(a.wrapping_add(b)),
        InfixOperator::Minus => Object::Integer(a.wrapping_sub(b)),
        InfixOperator::Asterisk => Object::Integer(a.wrapping_mul(b)),
        InfixOperator::Slash => {
            if b == 0 {
                tracing::debug!(dividend = a, "division by zero");
                return Err(EvalError::DivisionByZero);
            }

            Object::Integer(floor_div(a, b))
        },
        InfixOperator::Lt => Object::from_bool(a < b),
        InfixOperator::Gt => Object::from_bool(a > b),
        InfixOperator::Eq => Object::from_bool(a == b),
        InfixOperator::NotEq => Object::from_bool(a != b),
    })
}

// Rounds toward negative infinity, so `-7 / 2` is `-4`.
fn floor_div(a: i64, b: i64) -> i64 {
    let quotient = a.wrapping_div(b);

    if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
        quotient - 1
    } else {
        quotient
    }
}

fn eval_index(left: Object, index: Object) -> Object {
    match (&left, &index) {
        (Object::Array(elements), Object::Integer(idx)) => usize::try_from(*idx)
            .ok()
            .and_then(|idx| elements.get(idx))
            .cloned()
            .unwrap_or(NULL),
        (Object::Hash(pairs), _) => match index.hash_key() {
            Some(key) => pairs.get(&key).cloned().unwrap_or(NULL),
            None => Object::error(format!("unusable as hash key: {index}")),
        },
        _ => Object::error(format!("index operator not supported: {left}[{index}]")),
    }
}
