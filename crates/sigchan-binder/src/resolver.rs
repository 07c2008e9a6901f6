//! Read-only name and type resolution over a bound package.

use std::fmt;

use sigchan_parser::parser::node::ChanDir;
use sigchan_parser::{NodeArena, NodeData, NodeIndex};

use crate::state::BinderState;
use crate::symbols::{Symbol, SymbolId, SymbolKind};

/// Local alias chains longer than this are treated as unresolvable.
const MAX_ALIAS_DEPTH: u32 = 16;

/// A package-qualified name. `package` is the import path for members of
/// imported packages and `None` for the universe and the current package.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub package: Option<String>,
    pub name: String,
}

impl QualifiedName {
    pub fn is(&self, package: &str, name: &str) -> bool {
        self.package.as_deref() == Some(package) && self.name == name
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.package {
            Some(package) => write!(f, "{package}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Structural view of a type expression, with local aliases followed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRef {
    Named(QualifiedName),
    Pointer(Box<TypeRef>),
    Slice(Box<TypeRef>),
    Array(Box<TypeRef>),
    Map {
        key: Box<TypeRef>,
        value: Box<TypeRef>,
    },
    Chan {
        dir: ChanDir,
        element: Box<TypeRef>,
    },
    Func,
    Struct,
    Interface,
    Unknown,
}

impl TypeRef {
    pub fn is_named(&self, package: &str, name: &str) -> bool {
        matches!(self, TypeRef::Named(q) if q.is(package, name))
    }

    pub fn chan_element(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Chan { element, .. } => Some(element),
            _ => None,
        }
    }
}

/// What analyses may ask about names in a package.
pub trait Resolver {
    fn symbol_of(&self, ident: NodeIndex) -> Option<SymbolId>;

    fn symbol(&self, id: SymbolId) -> Option<&Symbol>;

    /// The node that declared the symbol `ident` refers to.
    fn declaration_of(&self, ident: NodeIndex) -> Option<NodeIndex> {
        let symbol = self.symbol(self.symbol_of(ident)?)?;
        symbol.declaration.to_option()
    }

    /// `pkg.Name` through an import, or a plain identifier.
    fn qualified_name_of(&self, expr: NodeIndex) -> Option<QualifiedName>;

    /// Whether `ident` refers to the universe builtin `name`, not a
    /// shadowing declaration.
    fn is_builtin(&self, ident: NodeIndex, name: &str) -> bool {
        self.symbol_of(ident)
            .and_then(|id| self.symbol(id))
            .is_some_and(|s| s.kind == SymbolKind::Builtin && s.name == name)
    }

    fn resolve_type(&self, type_expr: NodeIndex) -> TypeRef;
}

/// `Resolver` over one parsed and bound package.
#[derive(Clone, Copy)]
pub struct PackageResolver<'a> {
    arena: &'a NodeArena,
    binder: &'a BinderState,
}

impl<'a> PackageResolver<'a> {
    pub fn new(arena: &'a NodeArena, binder: &'a BinderState) -> Self {
        PackageResolver { arena, binder }
    }

    fn resolve_type_at_depth(&self, type_expr: NodeIndex, depth: u32) -> TypeRef {
        let type_expr = self.arena.skip_parens(type_expr);
        let Some(node) = self.arena.get(type_expr) else {
            return TypeRef::Unknown;
        };
        let resolve = |child: NodeIndex| Box::new(self.resolve_type_at_depth(child, depth));
        match &node.data {
            NodeData::Ident(_) => self.resolve_type_name(type_expr, depth),
            NodeData::SelectorExpr(_) => match self.qualified_name_of(type_expr) {
                Some(name) if name.package.is_some() => TypeRef::Named(name),
                _ => TypeRef::Unknown,
            },
            NodeData::StarExpr { expression } => TypeRef::Pointer(resolve(*expression)),
            NodeData::ArrayType { length, element } if length.is_none() => {
                TypeRef::Slice(resolve(*element))
            }
            NodeData::ArrayType { element, .. } => TypeRef::Array(resolve(*element)),
            NodeData::MapType { key, value } => TypeRef::Map {
                key: resolve(*key),
                value: resolve(*value),
            },
            NodeData::ChanType(chan) => TypeRef::Chan {
                dir: chan.dir,
                element: resolve(chan.element),
            },
            NodeData::FuncType(_) => TypeRef::Func,
            NodeData::StructType { .. } => TypeRef::Struct,
            NodeData::InterfaceType { .. } => TypeRef::Interface,
            _ => TypeRef::Unknown,
        }
    }

    fn resolve_type_name(&self, ident: NodeIndex, depth: u32) -> TypeRef {
        let Some(symbol) = self.symbol_of(ident).and_then(|id| self.symbol(id)) else {
            return TypeRef::Unknown;
        };
        match symbol.kind {
            SymbolKind::PredeclaredType => TypeRef::Named(QualifiedName {
                package: None,
                name: symbol.name.clone(),
            }),
            SymbolKind::TypeName => {
                let Some(spec) = self.arena.get_type_spec(symbol.declaration) else {
                    return TypeRef::Unknown;
                };
                if !spec.is_alias {
                    // A defined type is distinct from its underlying type.
                    return TypeRef::Named(QualifiedName {
                        package: None,
                        name: symbol.name.clone(),
                    });
                }
                if depth >= MAX_ALIAS_DEPTH {
                    return TypeRef::Unknown;
                }
                self.resolve_type_at_depth(spec.type_node, depth + 1)
            }
            _ => TypeRef::Unknown,
        }
    }
}

impl Resolver for PackageResolver<'_> {
    fn symbol_of(&self, ident: NodeIndex) -> Option<SymbolId> {
        self.binder.get_node_symbol(ident)
    }

    fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.binder.get_symbol(id)
    }

    fn qualified_name_of(&self, expr: NodeIndex) -> Option<QualifiedName> {
        let expr = self.arena.skip_parens(expr);
        match &self.arena.get(expr)?.data {
            NodeData::Ident(_) => {
                let symbol = self.symbol(self.symbol_of(expr)?)?;
                if symbol.kind == SymbolKind::Package {
                    return None;
                }
                Some(QualifiedName {
                    package: None,
                    name: symbol.name.clone(),
                })
            }
            NodeData::SelectorExpr(sel) => {
                let base = self.symbol(self.symbol_of(sel.expression)?)?;
                if base.kind != SymbolKind::Package {
                    return None;
                }
                Some(QualifiedName {
                    package: base.import_path.clone(),
                    name: self.arena.identifier_text(sel.name)?.to_string(),
                })
            }
            _ => None,
        }
    }

    fn resolve_type(&self, type_expr: NodeIndex) -> TypeRef {
        self.resolve_type_at_depth(type_expr, 0)
    }
}

impl BinderState {
    pub fn resolver<'a>(&'a self, arena: &'a NodeArena) -> PackageResolver<'a> {
        PackageResolver::new(arena, self)
    }
}
