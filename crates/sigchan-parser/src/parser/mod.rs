//! Parser module: AST node storage and the recursive descent parser.

pub mod base;
pub mod node;
pub mod node_access;
pub mod node_arena;
pub mod state;
mod state_declarations;
mod state_expressions;
mod state_statements;
mod state_types;

pub use base::{NodeIndex, NodeList};
pub use node::{Node, NodeArena, NodeData, NodeKind};
pub use state::{ParseDiagnostic, ParserState};

#[cfg(test)]
#[path = "tests/state_statement_tests.rs"]
mod state_statement_tests;

#[cfg(test)]
#[path = "tests/state_expression_tests.rs"]
mod state_expression_tests;
