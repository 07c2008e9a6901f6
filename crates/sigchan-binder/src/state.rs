//! Binder state: scope stack, symbol table and identifier resolutions.

use rustc_hash::FxHashMap;
use sigchan_parser::{NodeArena, NodeIndex};
use tracing::{debug, trace};

use crate::scopes::{Scope, ScopeId, ScopeKind};
use crate::symbols::{Symbol, SymbolArena, SymbolId, SymbolKind};
use crate::universe;

pub struct BinderState {
    pub symbols: SymbolArena,
    pub(crate) scopes: Vec<Scope>,
    pub(crate) universe: ScopeId,
    pub(crate) package_scope: ScopeId,
    pub(crate) current_scope: ScopeId,
    /// Identifier node -> symbol, for both declaring and using occurrences.
    pub(crate) node_symbols: FxHashMap<u32, SymbolId>,
    /// Identifiers whose name was not found in any enclosing scope.
    pub(crate) unresolved: usize,
}

impl Default for BinderState {
    fn default() -> Self {
        Self::new()
    }
}

impl BinderState {
    pub fn new() -> Self {
        let mut state = BinderState {
            symbols: SymbolArena::new(),
            scopes: Vec::new(),
            universe: ScopeId(0),
            package_scope: ScopeId(0),
            current_scope: ScopeId(0),
            node_symbols: FxHashMap::default(),
            unresolved: 0,
        };
        state.universe = state.push_scope(ScopeKind::Universe);
        for (name, kind) in universe::predeclared() {
            state.declare_symbol(name, kind, NodeIndex::NONE, NodeIndex::NONE);
        }
        state.package_scope = state.push_scope(ScopeKind::Package);
        state
    }

    // =========================================================================
    // Scopes
    // =========================================================================

    pub(crate) fn push_scope(&mut self, kind: ScopeKind) -> ScopeId {
        let parent = if self.scopes.is_empty() {
            None
        } else {
            Some(self.current_scope)
        };
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(kind, parent));
        self.current_scope = id;
        id
    }

    /// Run `f` in a fresh child scope of the current one.
    pub(crate) fn with_scope<F>(&mut self, kind: ScopeKind, f: F)
    where
        F: FnOnce(&mut Self),
    {
        let saved = self.current_scope;
        self.push_scope(kind);
        f(self);
        self.current_scope = saved;
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    pub fn package_scope(&self) -> &Scope {
        &self.scopes[self.package_scope.0 as usize]
    }

    pub fn universe_scope(&self) -> &Scope {
        &self.scopes[self.universe.0 as usize]
    }

    // =========================================================================
    // Symbols
    // =========================================================================

    /// Declare `name` in the current scope, shadowing any outer symbol.
    pub(crate) fn declare_symbol(
        &mut self,
        name: &str,
        kind: SymbolKind,
        declaration: NodeIndex,
        name_node: NodeIndex,
    ) -> SymbolId {
        self.declare_in(self.current_scope, name, kind, declaration, name_node, None)
    }

    pub(crate) fn declare_in(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: SymbolKind,
        declaration: NodeIndex,
        name_node: NodeIndex,
        import_path: Option<String>,
    ) -> SymbolId {
        let id = self.symbols.alloc(Symbol {
            name: name.to_string(),
            kind,
            declaration,
            name_node,
            import_path,
        });
        if let Some(scope) = self.scopes.get_mut(scope.0 as usize) {
            scope.set(name.to_string(), id);
        }
        if name_node.is_some() {
            self.node_symbols.insert(name_node.0, id);
        }
        id
    }

    /// Look `name` up from the current scope outwards.
    pub(crate) fn lookup(&self, name: &str) -> Option<SymbolId> {
        let mut scope_id = Some(self.current_scope);
        while let Some(id) = scope_id {
            let scope = self.scopes.get(id.0 as usize)?;
            if let Some(symbol) = scope.get(name) {
                return Some(symbol);
            }
            scope_id = scope.parent;
        }
        None
    }

    pub(crate) fn lookup_local(&self, name: &str) -> Option<SymbolId> {
        self.scopes
            .get(self.current_scope.0 as usize)
            .and_then(|s| s.get(name))
    }

    /// Record a using occurrence of an identifier.
    pub(crate) fn resolve_identifier(&mut self, arena: &NodeArena, ident: NodeIndex) {
        let Some(name) = arena.identifier_text(ident) else {
            return;
        };
        if name == "_" {
            return;
        }
        match self.lookup(name) {
            Some(symbol) => {
                self.node_symbols.insert(ident.0, symbol);
            }
            None => {
                trace!(name, node = ident.0, "unresolved identifier");
                self.unresolved += 1;
            }
        }
    }

    pub fn get_symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn get_node_symbol(&self, ident: NodeIndex) -> Option<SymbolId> {
        self.node_symbols.get(&ident.0).copied()
    }

    pub fn unresolved_count(&self) -> usize {
        self.unresolved
    }
}

/// Bind every file of one package. `files` are `SourceFile` nodes in
/// `arena`.
pub fn bind_package(arena: &NodeArena, files: &[NodeIndex]) -> BinderState {
    let mut state = BinderState::new();

    for &file in files {
        state.collect_package_declarations(arena, file);
    }
    for &file in files {
        state.bind_source_file(arena, file);
    }

    debug!(
        files = files.len(),
        symbols = state.symbols.len(),
        resolved = state.node_symbols.len(),
        unresolved = state.unresolved,
        "bound package"
    );
    state
}
