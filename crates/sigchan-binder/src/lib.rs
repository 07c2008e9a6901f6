//! Name binding for Go packages.
//!
//! The binder walks every file of a package once, building the universe,
//! package, file and local scopes, and records the symbol each identifier
//! refers to. Analyses consume the result through the [`Resolver`] trait.

pub mod resolver;
pub mod scopes;
pub mod state;
mod state_declarations;
mod state_expressions;
mod state_statements;
pub mod symbols;
mod universe;

pub use resolver::{PackageResolver, QualifiedName, Resolver, TypeRef};
pub use scopes::{Scope, ScopeId, ScopeKind};
pub use state::{BinderState, bind_package};
pub use symbols::{Symbol, SymbolArena, SymbolId, SymbolKind};
