//! Lexical scopes.

use rustc_hash::FxHashMap;

use crate::symbols::SymbolId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    Universe,
    Package,
    /// Holds the imports of one file. Its parent is the package scope.
    File,
    Function,
    Block,
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    table: FxHashMap<String, SymbolId>,
}

impl Scope {
    pub fn new(kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Scope {
            kind,
            parent,
            table: FxHashMap::default(),
        }
    }

    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.table.get(name).copied()
    }

    pub fn set(&mut self, name: String, id: SymbolId) {
        self.table.insert(name, id);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
