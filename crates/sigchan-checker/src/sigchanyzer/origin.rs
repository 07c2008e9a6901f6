//! One-hop backward resolution from a use of a variable to the expression
//! that initialized it.

use sigchan_binder::Resolver;
use sigchan_parser::{NodeArena, NodeData, NodeIndex, NodeKind, NodeList};

/// Where an identifier's value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// The initializer paired with the identifier in its declaration.
    Value(NodeIndex),
    /// No symbol, or a symbol without a declaring node (builtins, dot
    /// imports).
    Unresolved,
    /// `a, b := f()` or `var c T`: names and values do not pair up.
    ArityMismatch { names: usize, values: usize },
    /// Declared by something that carries no initializer we follow:
    /// parameters, range clauses, functions, imports, types.
    Unhandled(NodeKind),
}

/// Resolve `ident` to the value it was declared with.
///
/// Only `:=` statements and `var`/`const` specs are followed, and only
/// when every name has its own value. The result is never traced further.
pub fn resolve_origin(arena: &NodeArena, resolver: &dyn Resolver, ident: NodeIndex) -> Origin {
    let Some(symbol) = resolver.symbol_of(ident).and_then(|id| resolver.symbol(id)) else {
        return Origin::Unresolved;
    };
    let Some(declaration) = arena.get(symbol.declaration) else {
        return Origin::Unresolved;
    };
    match &declaration.data {
        NodeData::AssignStmt(assign) if assign.is_define() => {
            paired_value(&assign.lhs, &assign.rhs, symbol.name_node)
        }
        NodeData::ValueSpec(spec) => paired_value(&spec.names, &spec.values, symbol.name_node),
        other => Origin::Unhandled(other.kind()),
    }
}

fn paired_value(names: &NodeList, values: &NodeList, name: NodeIndex) -> Origin {
    if names.len() != values.len() {
        return Origin::ArityMismatch {
            names: names.len(),
            values: values.len(),
        };
    }
    names
        .iter()
        .position(|&candidate| candidate == name)
        .map_or(Origin::Unresolved, |at| Origin::Value(values[at]))
}
