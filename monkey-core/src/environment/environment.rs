use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::object::Object;

pub type Env = Rc<RefCell<Environment>>;

/// One lexical scope. Lookups fall through to `outer`; bindings only ever land
/// in the receiving scope.
#[derive(Default, Debug, Clone)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_enclosed(outer: Env) -> Self {
        Self {
            store: HashMap::new(),
            outer: Some(outer),
        }
    }

    pub fn shared(self) -> Env {
        Rc::new(RefCell::new(self))
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref()?.borrow().get(name),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: Object) {
        self.store.insert(name.into(), value);
    }

    /// Copy of this scope's own bindings, sharing the enclosing chain.
    /// Later `let`s in this scope do not show up in the copy.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}
