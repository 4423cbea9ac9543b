//! Input bindings: raw key code → control command.
//!
//! The table keeps the bindings in registration order (for the startup
//! listing) and a lookup map built from them.  Registering a code twice
//! overwrites the mapping, so the last registration wins; the earlier
//! binding stays in the ordered list but can no longer be reached.

use std::collections::HashMap;

use crate::control::Command;

/// A raw input code bound to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub code: u16,
    pub command: Command,
}

impl Binding {
    pub fn new(code: u16, command: Command) -> Self {
        Self { code, command }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    bindings: Vec<Binding>,
    by_code: HashMap<u16, Command>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register each binding in order.
    pub fn from_bindings(bindings: &[Binding]) -> Self {
        let mut table = Self::new();
        for binding in bindings {
            table.register(binding.code, binding.command.clone());
        }
        table
    }

    pub fn register(&mut self, code: u16, command: Command) {
        self.by_code.insert(code, command.clone());
        self.bindings.push(Binding { code, command });
    }

    pub fn resolve(&self, code: u16) -> Option<&Command> {
        self.by_code.get(&code)
    }

    /// All registered bindings, in registration order, duplicates included.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
