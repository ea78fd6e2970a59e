//! Lexical scope chain: a name-to-value map linked to an optional enclosing
//! scope.  Lookup and assignment walk outward, local scope first; definition
//! never walks and is therefore the shadowing mechanism.

use crate::error::{Result, SpartieError};
use crate::value::Value;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// A root scope with no enclosing chain (the globals).
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    /// A child scope chained to `enclosing`.  The child holds a shared
    /// reference; the parent outlives it for as long as the child exists.
    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Insert or overwrite `name` in this scope only.  Never recurses, so a
    /// nested define of an outer name shadows it instead of mutating it.
    pub fn define(&mut self, name: &str, value: Value) {
        debug!("Defining '{}' = {}", name, value);

        self.values.insert(name.to_string(), value);
    }

    /// Look up `name` in the nearest enclosing scope, local first.  A name
    /// bound nowhere in the chain is an undefined-variable error.
    pub fn get(&self, name: &str, line: usize) -> Result<Value> {
        if let Some(value) = self.values.get(name) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name, line)
        } else {
            Err(SpartieError::undefined_variable(line, name))
        }
    }

    /// Overwrite the binding for `name` in the nearest scope that already
    /// contains it, searching strictly outward and stopping at first match.
    /// Never creates a binding; an exhausted chain is an undefined-variable
    /// error.
    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> Result<()> {
        if self.values.contains_key(name) {
            debug!("Assigning '{}' = {}", name, value);

            self.values.insert(name.to_string(), value);
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value, line)
        } else {
            Err(SpartieError::undefined_variable(line, name))
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
