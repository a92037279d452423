pub mod error;
pub mod parser;
pub mod ast;
pub mod printer;
mod statement;
mod expression;

pub mod prelude {
    pub use super::{
        error::*,
        parser::*,
        ast::*,
        printer::*
    };
}
