//! Parser state - type expressions, signatures and field lists.

use sigchan_scanner::SyntaxKind;

use super::base::{NodeIndex, NodeList};
use super::node::{
    BinaryData, ChanDir, ChanTypeData, FieldData, FuncTypeData, NodeData, SelectorData,
    UnaryData,
};
use super::state::ParserState;

impl ParserState {
    pub(crate) fn is_type_start(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::Identifier
                | SyntaxKind::AsteriskToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::MapKeyword
                | SyntaxKind::ChanKeyword
                | SyntaxKind::ArrowToken
                | SyntaxKind::FuncKeyword
                | SyntaxKind::StructKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::OpenParenToken
        )
    }

    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier => self.parse_type_name(),
            SyntaxKind::AsteriskToken => {
                self.next_token();
                let expression = self.parse_type();
                self.arena
                    .add(pos, self.prev_end, NodeData::StarExpr { expression })
            }
            SyntaxKind::OpenBracketToken => self.parse_array_type(),
            SyntaxKind::MapKeyword => self.parse_map_type(),
            SyntaxKind::ChanKeyword => self.parse_chan_type(),
            SyntaxKind::ArrowToken => {
                self.next_token();
                if !self.is_token(SyntaxKind::ChanKeyword) {
                    return self.bad_expression("'chan'");
                }
                self.next_token();
                let element = self.parse_type();
                self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::ChanType(ChanTypeData {
                        dir: ChanDir::Recv,
                        element,
                    }),
                )
            }
            SyntaxKind::FuncKeyword => {
                self.next_token();
                self.parse_signature(pos)
            }
            SyntaxKind::StructKeyword => self.parse_struct_type(),
            SyntaxKind::InterfaceKeyword => self.parse_interface_type(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression = self.parse_type();
                self.expect(SyntaxKind::CloseParenToken);
                self.arena
                    .add(pos, self.prev_end, NodeData::ParenExpr { expression })
            }
            _ => self.bad_expression("type"),
        }
    }

    /// `T` or `pkg.T`.
    pub(crate) fn parse_type_name(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let ident = self.parse_ident();
        if self.is_token(SyntaxKind::DotToken) {
            self.next_token();
            let name = self.parse_ident();
            return self.arena.add(
                pos,
                self.prev_end,
                NodeData::SelectorExpr(SelectorData {
                    expression: ident,
                    name,
                }),
            );
        }
        ident
    }

    fn parse_array_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.expect(SyntaxKind::OpenBracketToken);
        let length = match self.token() {
            SyntaxKind::CloseBracketToken => NodeIndex::NONE,
            SyntaxKind::DotDotDotToken => {
                let ellipsis_pos = self.token_pos();
                self.next_token();
                self.arena.add(
                    ellipsis_pos,
                    self.prev_end,
                    NodeData::Ellipsis {
                        element: NodeIndex::NONE,
                    },
                )
            }
            _ => {
                self.expr_lev += 1;
                let length = self.parse_expr();
                self.expr_lev -= 1;
                length
            }
        };
        self.expect(SyntaxKind::CloseBracketToken);
        let element = self.parse_type();
        self.arena
            .add(pos, self.prev_end, NodeData::ArrayType { length, element })
    }

    fn parse_map_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.expect(SyntaxKind::MapKeyword);
        self.expect(SyntaxKind::OpenBracketToken);
        let key = self.parse_type();
        self.expect(SyntaxKind::CloseBracketToken);
        let value = self.parse_type();
        self.arena
            .add(pos, self.prev_end, NodeData::MapType { key, value })
    }

    /// `chan T` or `chan<- T`; `<-chan T` is handled by the caller.
    pub(crate) fn parse_chan_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.expect(SyntaxKind::ChanKeyword);
        let dir = if self.parse_optional(SyntaxKind::ArrowToken) {
            ChanDir::Send
        } else {
            ChanDir::Both
        };
        let element = self.parse_type();
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::ChanType(ChanTypeData { dir, element }),
        )
    }

    /// Parameters and results following `func` (and the name, if any).
    /// `pos` is the position of the `func` keyword.
    pub(crate) fn parse_signature(&mut self, pos: u32) -> NodeIndex {
        let params = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_parameters()
        } else {
            let message = format!("expected '(', found {}", self.describe_token());
            self.error_at_current_token(message);
            NodeList::new()
        };

        let results = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_parameters()
        } else if self.is_type_start() {
            let type_pos = self.token_pos();
            let type_node = self.parse_type();
            let mut results = NodeList::new();
            results.push(self.arena.add(
                type_pos,
                self.prev_end,
                NodeData::Field(FieldData {
                    names: NodeList::new(),
                    type_node,
                    tag: NodeIndex::NONE,
                }),
            ));
            results
        } else {
            NodeList::new()
        };

        self.arena.add(
            pos,
            self.prev_end,
            NodeData::FuncType(FuncTypeData { params, results }),
        )
    }

    fn parse_param_type(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::DotDotDotToken) {
            let pos = self.token_pos();
            self.next_token();
            let element = self.parse_type();
            return self
                .arena
                .add(pos, self.prev_end, NodeData::Ellipsis { element });
        }
        self.parse_type()
    }

    /// Parenthesized parameter list. Groups `a, b int` into one `Field`;
    /// a list without any names yields one unnamed `Field` per type.
    pub(crate) fn parse_parameters(&mut self) -> NodeList {
        self.expect(SyntaxKind::OpenParenToken);

        let mut entries: Vec<(NodeIndex, NodeIndex)> = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let first = self.parse_param_type();
            let type_node = if matches!(
                self.token(),
                SyntaxKind::CommaToken | SyntaxKind::CloseParenToken
            ) {
                NodeIndex::NONE
            } else {
                self.parse_param_type()
            };
            entries.push((first, type_node));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect(SyntaxKind::CloseParenToken);

        let mut fields = NodeList::new();
        let named = entries.iter().any(|(_, t)| t.is_some());
        if !named {
            for (type_node, _) in entries {
                let span = self.arena.span(type_node).unwrap_or_default();
                fields.push(self.arena.add(
                    span.start,
                    span.end,
                    NodeData::Field(FieldData {
                        names: NodeList::new(),
                        type_node,
                        tag: NodeIndex::NONE,
                    }),
                ));
            }
            return fields;
        }

        let mut pending = NodeList::new();
        for (name, type_node) in entries {
            if self.arena.get_identifier(name).is_none() {
                let span = self.arena.span(name).unwrap_or_default();
                self.error_at(
                    span.start,
                    span.len(),
                    "mixed named and unnamed parameters".into(),
                );
            }
            pending.push(name);
            if type_node.is_some() {
                fields.push(self.add_field(std::mem::take(&mut pending), type_node));
            }
        }
        if let Some(&last) = pending.last() {
            let span = self.arena.span(last).unwrap_or_default();
            self.error_at(
                span.start,
                span.len(),
                "mixed named and unnamed parameters".into(),
            );
            let bad = self.arena.add_bad(span.end, span.end);
            fields.push(self.add_field(pending, bad));
        }
        fields
    }

    fn add_field(&mut self, names: NodeList, type_node: NodeIndex) -> NodeIndex {
        let start = names
            .first()
            .and_then(|&n| self.arena.span(n))
            .map_or(0, |s| s.start);
        let end = self.arena.span(type_node).map_or(start, |s| s.end);
        self.arena.add(
            start,
            end,
            NodeData::Field(FieldData {
                names,
                type_node,
                tag: NodeIndex::NONE,
            }),
        )
    }

    fn parse_struct_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.expect(SyntaxKind::StructKeyword);
        self.expect(SyntaxKind::OpenBraceToken);
        let mut fields = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            fields.push(self.parse_field_decl());
            self.expect_semi();
            if self.token_pos() == before {
                self.next_token();
            }
        }
        self.expect(SyntaxKind::CloseBraceToken);
        self.arena
            .add(pos, self.prev_end, NodeData::StructType { fields })
    }

    fn parse_field_decl(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut names = NodeList::new();
        let type_node = match self.token() {
            SyntaxKind::AsteriskToken => {
                self.next_token();
                let expression = self.parse_type_name();
                self.arena
                    .add(pos, self.prev_end, NodeData::StarExpr { expression })
            }
            SyntaxKind::Identifier => {
                let first = self.parse_ident();
                match self.token() {
                    SyntaxKind::DotToken => {
                        self.next_token();
                        let name = self.parse_ident();
                        self.arena.add(
                            pos,
                            self.prev_end,
                            NodeData::SelectorExpr(SelectorData {
                                expression: first,
                                name,
                            }),
                        )
                    }
                    SyntaxKind::SemicolonToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::StringLiteral => first,
                    _ => {
                        names.push(first);
                        while self.parse_optional(SyntaxKind::CommaToken) {
                            names.push(self.parse_ident());
                        }
                        self.parse_type()
                    }
                }
            }
            _ => self.bad_expression("field name or embedded type"),
        };

        let tag = if self.is_token(SyntaxKind::StringLiteral) {
            let tag_pos = self.token_pos();
            let text = self.token_text().to_string();
            self.next_token();
            self.arena
                .add_literal(tag_pos, self.prev_end, SyntaxKind::StringLiteral, text)
        } else {
            NodeIndex::NONE
        };

        self.arena.add(
            pos,
            self.prev_end,
            NodeData::Field(FieldData {
                names,
                type_node,
                tag,
            }),
        )
    }

    fn parse_interface_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.expect(SyntaxKind::InterfaceKeyword);
        self.expect(SyntaxKind::OpenBraceToken);
        let mut methods = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            methods.push(self.parse_interface_element());
            self.expect_semi();
            if self.token_pos() == before {
                self.next_token();
            }
        }
        self.expect(SyntaxKind::CloseBraceToken);
        self.arena
            .add(pos, self.prev_end, NodeData::InterfaceType { methods })
    }

    fn parse_interface_element(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if self.is_token(SyntaxKind::Identifier) {
            let name = self.parse_type_name();
            if self.is_token(SyntaxKind::OpenParenToken)
                && self.arena.get_identifier(name).is_some()
            {
                let signature = self.parse_signature(pos);
                let mut names = NodeList::new();
                names.push(name);
                return self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::Field(FieldData {
                        names,
                        type_node: signature,
                        tag: NodeIndex::NONE,
                    }),
                );
            }
            let type_node = self.parse_union_rest(pos, name);
            return self.embedded_field(pos, type_node);
        }
        let first = self.parse_constraint_term();
        let type_node = self.parse_union_rest(pos, first);
        self.embedded_field(pos, type_node)
    }

    fn embedded_field(&mut self, pos: u32, type_node: NodeIndex) -> NodeIndex {
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::Field(FieldData {
                names: NodeList::new(),
                type_node,
                tag: NodeIndex::NONE,
            }),
        )
    }

    fn parse_constraint_term(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::TildeToken) {
            let pos = self.token_pos();
            self.next_token();
            let operand = self.parse_type();
            return self.arena.add(
                pos,
                self.prev_end,
                NodeData::UnaryExpr(UnaryData {
                    operator: SyntaxKind::TildeToken,
                    operand,
                }),
            );
        }
        self.parse_type()
    }

    /// `A | ~B | C` in an interface constraint.
    fn parse_union_rest(&mut self, pos: u32, mut left: NodeIndex) -> NodeIndex {
        while self.parse_optional(SyntaxKind::BarToken) {
            let right = self.parse_constraint_term();
            left = self.arena.add(
                pos,
                self.prev_end,
                NodeData::BinaryExpr(BinaryData {
                    left,
                    operator: SyntaxKind::BarToken,
                    right,
                }),
            );
        }
        left
    }
}
