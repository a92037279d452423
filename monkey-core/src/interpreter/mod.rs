pub mod interpreter;

pub mod prelude {
    pub use super::interpreter::*;
}
