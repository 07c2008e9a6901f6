//! Expression and type-expression binding.

use sigchan_parser::syntax::children;
use sigchan_parser::{NodeArena, NodeData, NodeIndex, NodeList};

use crate::state::BinderState;

impl BinderState {
    pub(crate) fn bind_expr(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(node) = arena.get(idx) else {
            return;
        };
        match &node.data {
            NodeData::Ident(_) => self.resolve_identifier(arena, idx),
            // Only the operand is lexical; the selected name is a field,
            // method or package member.
            NodeData::SelectorExpr(sel) => self.bind_expr(arena, sel.expression),
            NodeData::KeyValueExpr { key, value } => {
                // A bare identifier key may name a struct field.
                if arena.get_identifier(*key).is_none() {
                    self.bind_expr(arena, *key);
                }
                self.bind_expr(arena, *value);
            }
            NodeData::FuncLit { signature, body } => {
                self.bind_function(arena, &NodeList::new(), *signature, *body);
            }
            NodeData::FuncType(func_type) => {
                self.bind_fields(arena, &func_type.params, None);
                self.bind_fields(arena, &func_type.results, None);
            }
            NodeData::StructType { fields } => self.bind_fields(arena, fields, None),
            NodeData::InterfaceType { methods } => self.bind_fields(arena, methods, None),
            NodeData::Field(field) => self.bind_expr(arena, field.type_node),
            _ => {
                for child in children(arena, idx) {
                    self.bind_expr(arena, child);
                }
            }
        }
    }
}
