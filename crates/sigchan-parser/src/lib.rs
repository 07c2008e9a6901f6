//! Go parser and AST types for the sigchan analyzer.
//!
//! This crate provides:
//! - `NodeArena` - Arena storage for AST nodes, addressed by `NodeIndex`
//! - `NodeData` - Closed set of node variants (declarations, statements,
//!   expressions and type expressions)
//! - `ParserState` - Recursive descent parser for Go source files
//! - `syntax` - Child traversal utilities

pub mod parser;
pub mod syntax;

pub use parser::base::{NodeIndex, NodeList};
pub use parser::node::{Node, NodeArena, NodeData, NodeKind};
pub use parser::state::{ParseDiagnostic, ParsedPackage, ParserState, parse_package};
