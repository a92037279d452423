pub mod environment;
pub mod object;
pub mod builtins;

pub mod prelude {
    pub use super::{
        environment::*,
        object::*,
        builtins::*
    };
}

#[cfg(test)]
mod tests;
