use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One lexical scope: bindings plus a shared link to the enclosing scope.
///
/// Scopes are reference counted.  A scope outlives the block or call that
/// created it for as long as some closure still holds it.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Wrap in the shared handle used everywhere else.
    pub fn into_shared(self) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(self))
    }

    /// Bind `name` in this scope.  Redefinition overwrites.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Is `name` bound in this scope itself?
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Look `name` up here and then through the enclosing chain.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    /// Overwrite an existing binding here or in the nearest enclosing scope
    /// that has it.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }

    /// Read `name` from exactly `distance` hops up the chain.
    pub fn get_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &Token) -> Result<Value> {
        let scope = Self::ancestor(env, distance, name)?;
        let value = scope.borrow().values.get(&name.lexeme).cloned();

        value.ok_or_else(|| undefined(name))
    }

    /// Write `name` exactly `distance` hops up the chain.
    pub fn assign_at(
        env: &Rc<RefCell<Environment>>,
        distance: usize,
        name: &Token,
        value: Value,
    ) -> Result<()> {
        let scope = Self::ancestor(env, distance, name)?;
        let mut scope = scope.borrow_mut();

        match scope.values.get_mut(&name.lexeme) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(undefined(name)),
        }
    }

    fn ancestor(
        env: &Rc<RefCell<Environment>>,
        distance: usize,
        name: &Token,
    ) -> Result<Rc<RefCell<Environment>>> {
        let mut scope: Rc<RefCell<Environment>> = Rc::clone(env);

        for _ in 0..distance {
            let parent = scope.borrow().enclosing.clone();

            scope = match parent {
                Some(parent) => parent,
                None => {
                    debug!("Scope chain shorter than {} for '{}'", distance, name.lexeme);
                    return Err(undefined(name));
                }
            };
        }

        Ok(scope)
    }
}

fn undefined(name: &Token) -> LoxError {
    LoxError::runtime(name, format!("Undefined variable '{}'.", name.lexeme))
}
