//! Package-level declarations, imports and function signatures.

use sigchan_parser::{NodeArena, NodeData, NodeIndex, NodeList};
use sigchan_scanner::SyntaxKind;
use tracing::debug;

use crate::scopes::{ScopeId, ScopeKind};
use crate::state::BinderState;
use crate::symbols::SymbolKind;

impl BinderState {
    /// Pre-pass: declare every top-level name of `file` in the package
    /// scope, so that declarations are visible across files regardless of
    /// order.
    pub(crate) fn collect_package_declarations(&mut self, arena: &NodeArena, file: NodeIndex) {
        let Some(sf) = arena.get_source_file(file) else {
            return;
        };
        for &decl in &sf.decls {
            match arena.get(decl).map(|n| &n.data) {
                Some(NodeData::FuncDecl(func)) => {
                    // Methods belong to their receiver type, not to the package block.
                    if !func.receiver.is_empty() {
                        continue;
                    }
                    let Some(name) = arena.identifier_text(func.name) else {
                        continue;
                    };
                    if name == "init" || name == "_" {
                        continue;
                    }
                    self.declare_in(
                        self.package_scope,
                        name,
                        SymbolKind::Func,
                        decl,
                        func.name,
                        None,
                    );
                }
                Some(NodeData::GenDecl(decl_data)) => {
                    for &spec in &decl_data.specs {
                        self.declare_spec_names(arena, self.package_scope, decl_data.keyword, spec);
                    }
                }
                _ => {}
            }
        }
    }

    fn declare_spec_names(
        &mut self,
        arena: &NodeArena,
        scope: ScopeId,
        keyword: SyntaxKind,
        spec: NodeIndex,
    ) {
        match arena.get(spec).map(|n| &n.data) {
            Some(NodeData::ValueSpec(value_spec)) => {
                let kind = if keyword == SyntaxKind::ConstKeyword {
                    SymbolKind::Constant
                } else {
                    SymbolKind::Var
                };
                for &name in &value_spec.names {
                    if let Some(text) = arena.identifier_text(name)
                        && text != "_"
                    {
                        self.declare_in(scope, text, kind, spec, name, None);
                    }
                }
            }
            Some(NodeData::TypeSpec(type_spec)) => {
                if let Some(text) = arena.identifier_text(type_spec.name)
                    && text != "_"
                {
                    let name = type_spec.name;
                    self.declare_in(scope, text, SymbolKind::TypeName, spec, name, None);
                }
            }
            _ => {}
        }
    }

    pub(crate) fn bind_source_file(&mut self, arena: &NodeArena, file: NodeIndex) {
        let Some(sf) = arena.get_source_file(file) else {
            return;
        };
        self.current_scope = self.package_scope;
        self.push_scope(ScopeKind::File);

        for &decl in &sf.imports {
            if let Some(NodeData::GenDecl(decl_data)) = arena.get(decl).map(|n| &n.data) {
                for &spec in &decl_data.specs {
                    self.bind_import(arena, spec);
                }
            }
        }

        for &decl in &sf.decls {
            match arena.get(decl).map(|n| &n.data) {
                Some(NodeData::FuncDecl(func)) => {
                    self.bind_function(arena, &func.receiver, func.signature, func.body);
                }
                Some(NodeData::GenDecl(decl_data))
                    if decl_data.keyword == SyntaxKind::ImportKeyword =>
                {
                    for &spec in &decl_data.specs {
                        self.bind_import(arena, spec);
                    }
                }
                Some(NodeData::GenDecl(decl_data)) => {
                    for &spec in &decl_data.specs {
                        self.bind_spec_body(arena, spec);
                    }
                }
                _ => {}
            }
        }

        self.current_scope = self.package_scope;
    }

    fn bind_import(&mut self, arena: &NodeArena, spec: NodeIndex) {
        let Some(import) = arena.get_import_spec(spec) else {
            return;
        };
        let local_name = match arena.identifier_text(import.name) {
            Some("_") => return,
            Some(".") => {
                debug!(path = %import.path, "dot import; its names stay unresolved");
                return;
            }
            Some(alias) => alias,
            None => default_import_name(&import.path),
        };
        if local_name.is_empty() {
            return;
        }
        self.declare_in(
            self.current_scope,
            local_name,
            SymbolKind::Package,
            spec,
            import.name,
            Some(import.path.clone()),
        );
    }

    /// Types and initializers of a spec whose names are already declared.
    fn bind_spec_body(&mut self, arena: &NodeArena, spec: NodeIndex) {
        match arena.get(spec).map(|n| &n.data) {
            Some(NodeData::ValueSpec(value_spec)) => {
                self.bind_expr(arena, value_spec.type_node);
                for &value in &value_spec.values {
                    self.bind_expr(arena, value);
                }
            }
            Some(NodeData::TypeSpec(type_spec)) => self.bind_expr(arena, type_spec.type_node),
            _ => {}
        }
    }

    /// `var`, `const` or `type` inside a function body. Value names become
    /// visible after the spec; a type name is visible in its own definition.
    pub(crate) fn bind_local_gen_decl(&mut self, arena: &NodeArena, decl: NodeIndex) {
        let Some(NodeData::GenDecl(decl_data)) = arena.get(decl).map(|n| &n.data) else {
            return;
        };
        for &spec in &decl_data.specs {
            if decl_data.keyword == SyntaxKind::TypeKeyword {
                self.declare_spec_names(arena, self.current_scope, decl_data.keyword, spec);
                self.bind_spec_body(arena, spec);
            } else {
                self.bind_spec_body(arena, spec);
                self.declare_spec_names(arena, self.current_scope, decl_data.keyword, spec);
            }
        }
    }

    /// Function declaration or literal: receiver, parameters and results
    /// share one scope with the top level of the body.
    pub(crate) fn bind_function(
        &mut self,
        arena: &NodeArena,
        receiver: &NodeList,
        signature: NodeIndex,
        body: NodeIndex,
    ) {
        self.with_scope(ScopeKind::Function, |state| {
            state.bind_fields(arena, receiver, Some(SymbolKind::Param));
            if let Some(NodeData::FuncType(func_type)) = arena.get(signature).map(|n| &n.data) {
                state.bind_fields(arena, &func_type.params, Some(SymbolKind::Param));
                state.bind_fields(arena, &func_type.results, Some(SymbolKind::Param));
            }
            if let Some(NodeData::Block(block)) = arena.get(body).map(|n| &n.data) {
                state.bind_statements(arena, &block.statements);
            }
        });
    }

    /// Resolve field types; with `declare`, also declare the field names in
    /// the current scope.
    pub(crate) fn bind_fields(
        &mut self,
        arena: &NodeArena,
        fields: &NodeList,
        declare: Option<SymbolKind>,
    ) {
        for &field in fields {
            let Some(NodeData::Field(data)) = arena.get(field).map(|n| &n.data) else {
                continue;
            };
            self.bind_expr(arena, data.type_node);
            let Some(kind) = declare else {
                continue;
            };
            for &name in &data.names {
                if let Some(text) = arena.identifier_text(name)
                    && text != "_"
                {
                    self.declare_symbol(text, kind, field, name);
                }
            }
        }
    }
}

/// Local name of an import without an explicit alias: the last path
/// element, skipping a trailing major-version element (`.../v2`) and
/// dropping a `gopkg.in` style `.vN` suffix.
pub(crate) fn default_import_name(path: &str) -> &str {
    let mut segments = path.rsplit('/');
    let mut last = segments.next().unwrap_or(path);
    if is_major_version(last)
        && let Some(previous) = segments.next()
    {
        last = previous;
    }
    match last.rsplit_once('.') {
        Some((stem, suffix)) if is_major_version(suffix) => stem,
        _ => last,
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}
