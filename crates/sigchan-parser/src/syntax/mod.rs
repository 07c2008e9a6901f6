//! Syntax utilities over the parsed AST.

pub mod walk;

pub use walk::{children, for_each_child, map_children, walk_preorder};
