use thiserror::Error;

/// Faults that abort evaluation outright. Recoverable failures are
/// `Object::Error` values instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("evaluation error: cannot divide by zero")]
    DivisionByZero,
    #[error("evaluation error: maximum call depth of {limit} exceeded")]
    CallDepthExceeded { limit: usize },
}
