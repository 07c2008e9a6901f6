//! Printer state and node dispatch.

mod expressions;
mod helpers;
mod types;

use sigchan_parser::{NodeArena, NodeData, NodeIndex, NodeKind};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrintError {
    #[error("malformed syntax at offset {pos}")]
    Malformed { pos: u32 },
    #[error("node {index} does not exist")]
    MissingNode { index: u32 },
    #[error("cannot print {kind:?} as an expression")]
    Unsupported { kind: NodeKind },
}

/// Lowest binary precedence; a top-level expression is printed with it.
pub(crate) const LOWEST_PREC: u8 = 0;
pub(crate) const UNARY_PREC: u8 = 6;
pub(crate) const HIGHEST_PREC: u8 = 7;

pub struct Printer<'a> {
    pub(crate) arena: &'a NodeArena,
    pub(crate) out: String,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        Printer {
            arena,
            out: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    /// Print `index` as a complete expression.
    pub fn emit(&mut self, index: NodeIndex) -> Result<(), PrintError> {
        self.expr1(index, LOWEST_PREC, 1)
    }

    /// Print an expression whose surrounding operator binds with `prec1`.
    pub(crate) fn expr1(
        &mut self,
        index: NodeIndex,
        prec1: u8,
        depth: u32,
    ) -> Result<(), PrintError> {
        let node = self
            .arena
            .get(index)
            .ok_or(PrintError::MissingNode { index: index.0 })?;

        match &node.data {
            NodeData::Bad => Err(PrintError::Malformed { pos: node.pos }),
            NodeData::Ident(ident) => {
                self.write(&ident.name);
                Ok(())
            }
            NodeData::BasicLit(lit) => {
                self.write(&lit.value);
                Ok(())
            }
            NodeData::BinaryExpr(binary) => {
                let depth = depth.max(1);
                let cutoff = self.cutoff(index, depth);
                self.emit_binary(binary, prec1, cutoff, depth)
            }
            NodeData::UnaryExpr(unary) => self.emit_unary(unary, prec1, depth),
            NodeData::StarExpr { expression } => self.emit_star(*expression, prec1, depth),
            NodeData::ParenExpr { expression } => {
                self.write("(");
                self.expr1(*expression, LOWEST_PREC, reduce_depth(depth))?;
                self.write(")");
                Ok(())
            }
            NodeData::SelectorExpr(sel) => {
                self.expr1(sel.expression, HIGHEST_PREC, depth)?;
                self.write(".");
                self.expr1(sel.name, HIGHEST_PREC, depth)
            }
            NodeData::TypeAssertExpr {
                expression,
                type_node,
            } => {
                self.expr1(*expression, HIGHEST_PREC, depth)?;
                self.write(".(");
                if type_node.is_none() {
                    self.write("type");
                } else {
                    self.expr1(*type_node, LOWEST_PREC, 1)?;
                }
                self.write(")");
                Ok(())
            }
            NodeData::IndexExpr(index_data) => {
                self.expr1(index_data.expression, HIGHEST_PREC, 1)?;
                self.write("[");
                self.emit_list(&index_data.indices, depth + 1)?;
                self.write("]");
                Ok(())
            }
            NodeData::SliceExpr(slice) => self.emit_slice(slice, depth),
            NodeData::CallExpr(call) => self.emit_call(call, depth),
            NodeData::CompositeLit(lit) => self.emit_composite(lit),
            NodeData::KeyValueExpr { key, value } => {
                self.expr1(*key, LOWEST_PREC, depth)?;
                self.write(": ");
                self.expr1(*value, LOWEST_PREC, depth)
            }
            NodeData::Ellipsis { element } => {
                self.write("...");
                if element.is_some() {
                    self.expr1(*element, LOWEST_PREC, depth)?;
                }
                Ok(())
            }
            NodeData::ArrayType { .. }
            | NodeData::MapType { .. }
            | NodeData::ChanType(_)
            | NodeData::FuncType(_)
            | NodeData::StructType { .. }
            | NodeData::InterfaceType { .. } => self.emit_type(index),
            // A function literal carries a statement body.
            other => {
                trace!(kind = ?other.kind(), "unsupported node in printer");
                Err(PrintError::Unsupported { kind: other.kind() })
            }
        }
    }
}

/// Parentheses undo one level of depth.
pub(crate) fn reduce_depth(depth: u32) -> u32 {
    depth.saturating_sub(1).max(1)
}

/// Render the expression or type expression at `index`.
pub fn print_node(arena: &NodeArena, index: NodeIndex) -> Result<String, PrintError> {
    let mut printer = Printer::new(arena);
    printer.emit(index)?;
    Ok(printer.finish())
}
