//! Structural printer for Go expressions and type expressions.
//!
//! Output follows gofmt spacing, so a rendered node can be spliced back
//! into gofmt-formatted source.

pub mod printer;

pub use printer::{PrintError, Printer, print_node};
