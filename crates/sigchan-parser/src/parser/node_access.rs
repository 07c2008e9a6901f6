//! Typed accessors over `NodeArena`.
//!
//! Each `get_*` returns `None` both for missing nodes and for nodes of a
//! different kind, so callers can chain them with `?` / `let ... else`.

use sigchan_common::Span;

use super::base::NodeIndex;
use super::node::{
    AssignData, CallData, ChanTypeData, FuncDeclData, IdentData, ImportSpecData, LiteralData,
    Node, NodeArena, NodeData, NodeKind, SelectorData, SourceFileData, TypeSpecData,
    ValueSpecData,
};

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            return None;
        }
        self.nodes.get(index.0 as usize)
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<NodeKind> {
        self.get(index).map(Node::kind)
    }

    pub fn span(&self, index: NodeIndex) -> Option<Span> {
        self.get(index).map(|n| Span::new(n.pos, n.end))
    }

    pub fn get_identifier(&self, index: NodeIndex) -> Option<&IdentData> {
        match &self.get(index)?.data {
            NodeData::Ident(data) => Some(data),
            _ => None,
        }
    }

    /// Name of an identifier node.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        self.get_identifier(index).map(|d| d.name.as_str())
    }

    pub fn get_literal(&self, index: NodeIndex) -> Option<&LiteralData> {
        match &self.get(index)?.data {
            NodeData::BasicLit(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_call(&self, index: NodeIndex) -> Option<&CallData> {
        match &self.get(index)?.data {
            NodeData::CallExpr(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_selector(&self, index: NodeIndex) -> Option<&SelectorData> {
        match &self.get(index)?.data {
            NodeData::SelectorExpr(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_chan_type(&self, index: NodeIndex) -> Option<&ChanTypeData> {
        match &self.get(index)?.data {
            NodeData::ChanType(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_assign(&self, index: NodeIndex) -> Option<&AssignData> {
        match &self.get(index)?.data {
            NodeData::AssignStmt(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_value_spec(&self, index: NodeIndex) -> Option<&ValueSpecData> {
        match &self.get(index)?.data {
            NodeData::ValueSpec(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_type_spec(&self, index: NodeIndex) -> Option<&TypeSpecData> {
        match &self.get(index)?.data {
            NodeData::TypeSpec(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_import_spec(&self, index: NodeIndex) -> Option<&ImportSpecData> {
        match &self.get(index)?.data {
            NodeData::ImportSpec(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_func_decl(&self, index: NodeIndex) -> Option<&FuncDeclData> {
        match &self.get(index)?.data {
            NodeData::FuncDecl(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_source_file(&self, index: NodeIndex) -> Option<&SourceFileData> {
        match &self.get(index)?.data {
            NodeData::SourceFile(data) => Some(data),
            _ => None,
        }
    }

    /// Strip any number of enclosing parentheses.
    pub fn skip_parens(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(Node {
            data: NodeData::ParenExpr { expression },
            ..
        }) = self.get(index)
        {
            index = *expression;
        }
        index
    }
}
