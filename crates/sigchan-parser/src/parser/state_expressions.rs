//! Parser state - expression parsing methods.

use sigchan_scanner::SyntaxKind;

use super::base::{NodeIndex, NodeList};
use super::node::{
    BinaryData, CallData, ChanDir, ChanTypeData, CompositeLitData, IndexData, NodeData,
    SelectorData, SliceData, UnaryData,
};
use super::state::ParserState;

impl ParserState {
    pub(crate) fn parse_expr(&mut self) -> NodeIndex {
        self.parse_binary_expr(1)
    }

    pub(crate) fn parse_expr_list(&mut self) -> NodeList {
        let mut list = NodeList::new();
        list.push(self.parse_expr());
        while self.parse_optional(SyntaxKind::CommaToken) {
            list.push(self.parse_expr());
        }
        list
    }

    /// Precedence climbing over the five Go binary levels.
    fn parse_binary_expr(&mut self, min_prec: u8) -> NodeIndex {
        let pos = self.token_pos();
        let mut left = self.parse_unary_expr();
        loop {
            let operator = self.token();
            let prec = operator.binary_precedence();
            if prec < min_prec || prec == 0 {
                return left;
            }
            self.next_token();
            let right = self.parse_binary_expr(prec + 1);
            left = self.arena.add(
                pos,
                self.prev_end,
                NodeData::BinaryExpr(BinaryData {
                    left,
                    operator,
                    right,
                }),
            );
        }
    }

    pub(crate) fn parse_unary_expr(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::CaretToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::TildeToken => {
                let operator = self.token();
                self.next_token();
                let operand = self.parse_unary_expr();
                self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::UnaryExpr(UnaryData { operator, operand }),
                )
            }
            SyntaxKind::ArrowToken => {
                self.next_token();
                if self.is_token(SyntaxKind::ChanKeyword) {
                    // `<-chan T` in expression position.
                    self.next_token();
                    let element = self.parse_type();
                    return self.arena.add(
                        pos,
                        self.prev_end,
                        NodeData::ChanType(ChanTypeData {
                            dir: ChanDir::Recv,
                            element,
                        }),
                    );
                }
                let operand = self.parse_unary_expr();
                self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::UnaryExpr(UnaryData {
                        operator: SyntaxKind::ArrowToken,
                        operand,
                    }),
                )
            }
            SyntaxKind::AsteriskToken => {
                self.next_token();
                let expression = self.parse_unary_expr();
                self.arena
                    .add(pos, self.prev_end, NodeData::StarExpr { expression })
            }
            _ => self.parse_primary_expr(),
        }
    }

    fn parse_operand(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier => self.parse_ident(),
            kind if kind.is_literal() => {
                let value = self.token_text().to_string();
                self.next_token();
                self.arena.add_literal(pos, self.prev_end, kind, value)
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                self.expr_lev += 1;
                let expression = self.parse_expr();
                self.expr_lev -= 1;
                self.expect(SyntaxKind::CloseParenToken);
                self.arena
                    .add(pos, self.prev_end, NodeData::ParenExpr { expression })
            }
            SyntaxKind::FuncKeyword => {
                self.next_token();
                let signature = self.parse_signature(pos);
                if !self.is_token(SyntaxKind::OpenBraceToken) {
                    return signature;
                }
                self.expr_lev += 1;
                let body = self.parse_block();
                self.expr_lev -= 1;
                self.arena
                    .add(pos, self.prev_end, NodeData::FuncLit { signature, body })
            }
            SyntaxKind::OpenBracketToken
            | SyntaxKind::MapKeyword
            | SyntaxKind::ChanKeyword
            | SyntaxKind::StructKeyword
            | SyntaxKind::InterfaceKeyword => self.parse_type(),
            _ => self.bad_expression("expression"),
        }
    }

    fn parse_primary_expr(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut x = self.parse_operand();
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    x = match self.token() {
                        SyntaxKind::Identifier => {
                            let name = self.parse_ident();
                            self.arena.add(
                                pos,
                                self.prev_end,
                                NodeData::SelectorExpr(SelectorData {
                                    expression: x,
                                    name,
                                }),
                            )
                        }
                        SyntaxKind::OpenParenToken => self.parse_type_assertion(pos, x),
                        _ => {
                            let bad = self.bad_expression("selector or type assertion");
                            self.arena.add(
                                pos,
                                self.prev_end,
                                NodeData::SelectorExpr(SelectorData {
                                    expression: x,
                                    name: bad,
                                }),
                            )
                        }
                    };
                }
                SyntaxKind::OpenBracketToken => x = self.parse_index_or_slice(pos, x),
                SyntaxKind::OpenParenToken => x = self.parse_call(pos, x),
                SyntaxKind::OpenBraceToken => {
                    if self.is_literal_type(x)
                        && (self.expr_lev >= 0 || !self.is_type_name(x))
                    {
                        x = self.parse_literal_value(pos, x);
                    } else {
                        return x;
                    }
                }
                _ => return x,
            }
        }
    }

    fn parse_type_assertion(&mut self, pos: u32, expression: NodeIndex) -> NodeIndex {
        self.expect(SyntaxKind::OpenParenToken);
        let type_node = if self.parse_optional(SyntaxKind::TypeKeyword) {
            NodeIndex::NONE
        } else {
            self.parse_type()
        };
        self.expect(SyntaxKind::CloseParenToken);
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::TypeAssertExpr {
                expression,
                type_node,
            },
        )
    }

    fn parse_index_or_slice(&mut self, pos: u32, expression: NodeIndex) -> NodeIndex {
        self.expect(SyntaxKind::OpenBracketToken);
        self.expr_lev += 1;

        let mut index = [NodeIndex::NONE; 3];
        let mut colons = 0usize;
        if !self.is_token(SyntaxKind::ColonToken) {
            index[0] = self.parse_expr();
        }
        while self.is_token(SyntaxKind::ColonToken) && colons < 2 {
            colons += 1;
            self.next_token();
            if !matches!(
                self.token(),
                SyntaxKind::ColonToken | SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken
            ) {
                index[colons] = self.parse_expr();
            }
        }

        let mut indices = NodeList::new();
        if colons == 0 {
            indices.push(index[0]);
            while self.parse_optional(SyntaxKind::CommaToken) {
                if self.is_token(SyntaxKind::CloseBracketToken) {
                    break;
                }
                indices.push(self.parse_type());
            }
        }

        self.expr_lev -= 1;
        self.expect(SyntaxKind::CloseBracketToken);

        if colons == 0 {
            return self.arena.add(
                pos,
                self.prev_end,
                NodeData::IndexExpr(IndexData {
                    expression,
                    indices,
                }),
            );
        }
        let three_index = colons == 2;
        if three_index && (index[1].is_none() || index[2].is_none()) {
            self.error_at(
                pos,
                self.prev_end - pos,
                "middle and final index required in 3-index slice".into(),
            );
        }
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::SliceExpr(SliceData {
                expression,
                low: index[0],
                high: index[1],
                max: index[2],
                three_index,
            }),
        )
    }

    fn parse_call(&mut self, pos: u32, callee: NodeIndex) -> NodeIndex {
        self.expect(SyntaxKind::OpenParenToken);
        self.expr_lev += 1;
        let mut arguments = NodeList::new();
        let mut has_ellipsis = false;
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            // Types are valid arguments: `make(chan T)`, `new(T)`.
            arguments.push(self.parse_expr());
            if self.parse_optional(SyntaxKind::DotDotDotToken) {
                has_ellipsis = true;
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expr_lev -= 1;
        self.expect(SyntaxKind::CloseParenToken);
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::CallExpr(CallData {
                callee,
                arguments,
                has_ellipsis,
            }),
        )
    }

    fn parse_literal_value(&mut self, pos: u32, type_node: NodeIndex) -> NodeIndex {
        self.expect(SyntaxKind::OpenBraceToken);
        self.expr_lev += 1;
        let mut elements = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            elements.push(self.parse_element());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expr_lev -= 1;
        if self.is_token(SyntaxKind::SemicolonToken) {
            self.error_at_current_token(
                "missing ',' before newline in composite literal".into(),
            );
            self.next_token();
        }
        self.expect(SyntaxKind::CloseBraceToken);
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::CompositeLit(CompositeLitData {
                type_node,
                elements,
            }),
        )
    }

    fn parse_element(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let key = self.parse_element_value();
        if self.parse_optional(SyntaxKind::ColonToken) {
            let value = self.parse_element_value();
            return self
                .arena
                .add(pos, self.prev_end, NodeData::KeyValueExpr { key, value });
        }
        key
    }

    fn parse_element_value(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            // Elided element type: `[]T{{1, 2}, {3, 4}}`.
            let pos = self.token_pos();
            return self.parse_literal_value(pos, NodeIndex::NONE);
        }
        self.parse_expr()
    }

    fn is_type_name(&self, index: NodeIndex) -> bool {
        match self.arena.get(index).map(|n| &n.data) {
            Some(NodeData::Ident(_)) => true,
            Some(NodeData::SelectorExpr(sel)) => {
                self.arena.get_identifier(sel.expression).is_some()
            }
            _ => false,
        }
    }

    fn is_literal_type(&self, index: NodeIndex) -> bool {
        match self.arena.get(index).map(|n| &n.data) {
            Some(
                NodeData::Ident(_)
                | NodeData::ArrayType { .. }
                | NodeData::StructType { .. }
                | NodeData::MapType { .. },
            ) => true,
            Some(NodeData::SelectorExpr(sel)) => {
                self.arena.get_identifier(sel.expression).is_some()
            }
            Some(NodeData::IndexExpr(idx)) => self.is_type_name(idx.expression),
            _ => false,
        }
    }
}
