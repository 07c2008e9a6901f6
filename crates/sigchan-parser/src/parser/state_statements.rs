//! Parser state - statement parsing methods.

use sigchan_scanner::SyntaxKind;

use super::base::{NodeIndex, NodeList};
use super::node::{
    AssignData, BlockData, CaseClauseData, CommClauseData, ForData, IfData, NodeData,
    RangeData, SwitchData,
};
use super::state::ParserState;

#[derive(Clone, Copy, PartialEq, Eq)]
enum SimpleMode {
    Basic,
    /// A leading `ident:` is a label.
    Labeled,
    /// `k, v := range x` is accepted (for-statement headers).
    Range,
}

/// Result of a simple statement in a for header, where `range` clauses
/// are not yet statements of their own.
enum Simple {
    Stmt(NodeIndex),
    Range {
        key: NodeIndex,
        value: NodeIndex,
        op: SyntaxKind,
        expression: NodeIndex,
    },
}

impl ParserState {
    /// `{ statements }`
    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.expect(SyntaxKind::OpenBraceToken);
        let statements = self.parse_stmt_list();
        self.expect(SyntaxKind::CloseBraceToken);
        let block = NodeData::Block(BlockData { statements });
        self.arena.add(pos, self.prev_end, block)
    }

    fn parse_stmt_list(&mut self) -> NodeList {
        let mut list = NodeList::new();
        while !matches!(
            self.token(),
            SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken
                | SyntaxKind::CaseKeyword
                | SyntaxKind::DefaultKeyword
        ) {
            let before = self.token_pos();
            let stmt = self.parse_stmt();
            if stmt.is_some() {
                list.push(stmt);
            }
            if self.token_pos() == before
                && !matches!(
                    self.token(),
                    SyntaxKind::CloseBraceToken
                        | SyntaxKind::EndOfFileToken
                        | SyntaxKind::CaseKeyword
                        | SyntaxKind::DefaultKeyword
                )
            {
                self.next_token();
            }
        }
        list
    }

    pub(crate) fn parse_stmt(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword | SyntaxKind::TypeKeyword => {
                let keyword = self.token();
                let declaration = self.parse_gen_decl(keyword);
                let end = self.arena.span(declaration).map_or(pos, |s| s.end);
                self.arena
                    .add(pos, end, NodeData::DeclStmt { declaration })
            }
            SyntaxKind::GoKeyword | SyntaxKind::DeferKeyword => self.parse_go_defer_stmt(),
            SyntaxKind::ReturnKeyword => self.parse_return_stmt(),
            SyntaxKind::BreakKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::GotoKeyword
            | SyntaxKind::FallthroughKeyword => self.parse_branch_stmt(),
            SyntaxKind::OpenBraceToken => {
                let block = self.parse_block();
                self.expect_semi();
                block
            }
            SyntaxKind::IfKeyword => {
                let stmt = self.parse_if_stmt();
                self.expect_semi();
                stmt
            }
            SyntaxKind::ForKeyword => {
                let stmt = self.parse_for_stmt();
                self.expect_semi();
                stmt
            }
            SyntaxKind::SwitchKeyword => {
                let stmt = self.parse_switch_stmt();
                self.expect_semi();
                stmt
            }
            SyntaxKind::SelectKeyword => {
                let stmt = self.parse_select_stmt();
                self.expect_semi();
                stmt
            }
            SyntaxKind::SemicolonToken => {
                self.next_token();
                self.arena.add(pos, pos, NodeData::EmptyStmt)
            }
            SyntaxKind::Identifier
            | SyntaxKind::IntLiteral
            | SyntaxKind::FloatLiteral
            | SyntaxKind::ImagLiteral
            | SyntaxKind::RuneLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::FuncKeyword
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::StructKeyword
            | SyntaxKind::MapKeyword
            | SyntaxKind::ChanKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::AsteriskToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::CaretToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::ArrowToken => {
                let stmt = self.parse_simple_stmt_node(SimpleMode::Labeled);
                let labeled = matches!(
                    self.arena.get(stmt).map(|n| &n.data),
                    Some(NodeData::LabeledStmt { .. })
                );
                if !labeled {
                    self.expect_semi();
                }
                stmt
            }
            _ => {
                let message = format!("expected statement, found {}", self.describe_token());
                self.error_at_current_token(message);
                self.sync_statement();
                let end = self.prev_end.max(pos);
                self.arena.add_bad(pos, end)
            }
        }
    }

    fn parse_simple_stmt_node(&mut self, mode: SimpleMode) -> NodeIndex {
        match self.parse_simple_stmt(mode) {
            Simple::Stmt(stmt) => stmt,
            // Only reachable in `SimpleMode::Range`.
            Simple::Range { expression, .. } => expression,
        }
    }

    fn parse_simple_stmt(&mut self, mode: SimpleMode) -> Simple {
        let pos = self.token_pos();

        if mode == SimpleMode::Range && self.is_token(SyntaxKind::RangeKeyword) {
            self.next_token();
            let expression = self.parse_expr();
            return Simple::Range {
                key: NodeIndex::NONE,
                value: NodeIndex::NONE,
                op: SyntaxKind::Unknown,
                expression,
            };
        }

        let lhs = self.parse_expr_list();
        let token = self.token();

        if token == SyntaxKind::ColonEqualsToken || token.is_assignment() {
            let op = token;
            self.next_token();
            if mode == SimpleMode::Range
                && self.is_token(SyntaxKind::RangeKeyword)
                && (op == SyntaxKind::ColonEqualsToken || op == SyntaxKind::EqualsToken)
            {
                self.next_token();
                let expression = self.parse_expr();
                if lhs.len() > 2 {
                    let message = "range clause permits at most two iteration variables";
                    self.error_at(pos, self.prev_end - pos, message.into());
                }
                return Simple::Range {
                    key: lhs.first().copied().unwrap_or(NodeIndex::NONE),
                    value: lhs.get(1).copied().unwrap_or(NodeIndex::NONE),
                    op,
                    expression,
                };
            }
            let rhs = self.parse_expr_list();
            return Simple::Stmt(self.arena.add(
                pos,
                self.prev_end,
                NodeData::AssignStmt(AssignData { lhs, op, rhs }),
            ));
        }

        if lhs.len() > 1 {
            self.error_at(
                pos,
                self.prev_end - pos,
                format!("expected 1 expression, found {}", lhs.len()),
            );
        }
        let first = lhs[0];

        match token {
            SyntaxKind::ColonToken
                if mode == SimpleMode::Labeled && self.arena.get_identifier(first).is_some() =>
            {
                self.next_token();
                let statement = if self.is_token(SyntaxKind::CloseBraceToken) {
                    let at = self.token_pos();
                    self.arena.add(at, at, NodeData::EmptyStmt)
                } else {
                    self.parse_stmt()
                };
                let end = self.arena.span(statement).map_or(self.prev_end, |s| s.end);
                Simple::Stmt(self.arena.add(
                    pos,
                    end,
                    NodeData::LabeledStmt {
                        label: first,
                        statement,
                    },
                ))
            }
            SyntaxKind::ArrowToken => {
                self.next_token();
                let value = self.parse_expr();
                Simple::Stmt(self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::SendStmt {
                        channel: first,
                        value,
                    },
                ))
            }
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                self.next_token();
                Simple::Stmt(self.arena.add(
                    pos,
                    self.prev_end,
                    NodeData::IncDecStmt {
                        expression: first,
                        operator: token,
                    },
                ))
            }
            _ => Simple::Stmt(self.arena.add(
                pos,
                self.prev_end,
                NodeData::ExprStmt { expression: first },
            )),
        }
    }

    /// Unwrap an expression statement used as a condition.
    fn condition_of(&mut self, stmt: NodeIndex, context: &str) -> NodeIndex {
        match self.arena.get(stmt).map(|n| &n.data) {
            Some(NodeData::ExprStmt { expression }) => *expression,
            Some(_) => {
                let span = self.arena.span(stmt).unwrap_or_default();
                self.error_at(
                    span.start,
                    span.len(),
                    format!("cannot use statement as value in {context}"),
                );
                self.arena.add_bad(span.start, span.end)
            }
            None => NodeIndex::NONE,
        }
    }

    fn parse_go_defer_stmt(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let keyword = self.token();
        self.next_token();
        let call = self.parse_expr();
        let inner = self.arena.skip_parens(call);
        if self.arena.get_call(inner).is_none() {
            let span = self.arena.span(call).unwrap_or_default();
            self.error_at(
                span.start,
                span.len(),
                format!("expression in {} must be function call", keyword.text()),
            );
        }
        let end = self.prev_end;
        self.expect_semi();
        let data = if keyword == SyntaxKind::GoKeyword {
            NodeData::GoStmt { call }
        } else {
            NodeData::DeferStmt { call }
        };
        self.arena.add(pos, end, data)
    }

    fn parse_return_stmt(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.expect(SyntaxKind::ReturnKeyword);
        let results = if matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken
        ) {
            NodeList::new()
        } else {
            self.parse_expr_list()
        };
        let end = self.prev_end;
        self.expect_semi();
        self.arena
            .add(pos, end, NodeData::ReturnStmt { results })
    }

    fn parse_branch_stmt(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let keyword = self.token();
        self.next_token();
        let label = if keyword != SyntaxKind::FallthroughKeyword
            && self.is_token(SyntaxKind::Identifier)
        {
            self.parse_ident()
        } else {
            NodeIndex::NONE
        };
        let end = self.prev_end;
        self.expect_semi();
        self.arena
            .add(pos, end, NodeData::BranchStmt { keyword, label })
    }

    fn parse_if_stmt(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.expect(SyntaxKind::IfKeyword);

        let saved = self.expr_lev;
        self.expr_lev = -1;
        let mut init = NodeIndex::NONE;
        let condition;
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.error_at_current_token("missing condition in if statement".into());
            condition = self.arena.add_bad(pos, pos);
        } else {
            let first = if self.is_token(SyntaxKind::SemicolonToken) {
                NodeIndex::NONE
            } else {
                self.parse_simple_stmt_node(SimpleMode::Basic)
            };
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                init = first;
                if self.is_token(SyntaxKind::OpenBraceToken) {
                    self.error_at_current_token("missing condition in if statement".into());
                    condition = self.arena.add_bad(pos, pos);
                } else {
                    let stmt = self.parse_simple_stmt_node(SimpleMode::Basic);
                    condition = self.condition_of(stmt, "if statement");
                }
            } else {
                condition = self.condition_of(first, "if statement");
            }
        }
        self.expr_lev = saved;

        let then_block = self.parse_block();
        let else_branch = if self.parse_optional(SyntaxKind::ElseKeyword) {
            match self.token() {
                SyntaxKind::IfKeyword => self.parse_if_stmt(),
                SyntaxKind::OpenBraceToken => self.parse_block(),
                _ => self.bad_expression("if statement or block"),
            }
        } else {
            NodeIndex::NONE
        };

        self.arena.add(
            pos,
            self.prev_end,
            NodeData::IfStmt(IfData {
                init,
                condition,
                then_block,
                else_branch,
            }),
        )
    }

    fn parse_for_stmt(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.expect(SyntaxKind::ForKeyword);

        let saved = self.expr_lev;
        self.expr_lev = -1;
        let mut init = NodeIndex::NONE;
        let mut condition = NodeIndex::NONE;
        let mut post = NodeIndex::NONE;
        let mut range = None;

        if !self.is_token(SyntaxKind::OpenBraceToken) {
            let mut header = None;
            if !self.is_token(SyntaxKind::SemicolonToken) {
                match self.parse_simple_stmt(SimpleMode::Range) {
                    Simple::Range {
                        key,
                        value,
                        op,
                        expression,
                    } => range = Some((key, value, op, expression)),
                    Simple::Stmt(stmt) => header = Some(stmt),
                }
            }
            if range.is_none() && self.is_token(SyntaxKind::SemicolonToken) {
                self.next_token();
                init = header.take().unwrap_or(NodeIndex::NONE);
                if !self.is_token(SyntaxKind::SemicolonToken) {
                    let stmt = self.parse_simple_stmt_node(SimpleMode::Basic);
                    condition = self.condition_of(stmt, "for loop");
                }
                self.expect(SyntaxKind::SemicolonToken);
                if !self.is_token(SyntaxKind::OpenBraceToken) {
                    post = self.parse_simple_stmt_node(SimpleMode::Basic);
                }
            } else if let Some(stmt) = header {
                condition = self.condition_of(stmt, "for loop");
            }
        }
        self.expr_lev = saved;

        let body = self.parse_block();
        if let Some((key, value, op, expression)) = range {
            return self.arena.add(
                pos,
                self.prev_end,
                NodeData::RangeStmt(RangeData {
                    key,
                    value,
                    op,
                    expression,
                    body,
                }),
            );
        }
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::ForStmt(ForData {
                init,
                condition,
                post,
                body,
            }),
        )
    }

    fn parse_switch_stmt(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.expect(SyntaxKind::SwitchKeyword);

        let saved = self.expr_lev;
        self.expr_lev = -1;
        let mut init = NodeIndex::NONE;
        let mut guard = NodeIndex::NONE;
        if !self.is_token(SyntaxKind::OpenBraceToken) {
            if !self.is_token(SyntaxKind::SemicolonToken) {
                guard = self.parse_simple_stmt_node(SimpleMode::Basic);
            }
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                init = guard;
                guard = NodeIndex::NONE;
                if !self.is_token(SyntaxKind::OpenBraceToken) {
                    guard = self.parse_simple_stmt_node(SimpleMode::Basic);
                }
            }
        }
        self.expr_lev = saved;

        let is_type_switch = self.is_type_switch_guard(guard);

        self.expect(SyntaxKind::OpenBraceToken);
        let mut clauses = NodeList::new();
        while matches!(
            self.token(),
            SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
        ) {
            clauses.push(self.parse_case_clause());
        }
        self.expect(SyntaxKind::CloseBraceToken);

        if is_type_switch {
            return self.arena.add(
                pos,
                self.prev_end,
                NodeData::TypeSwitchStmt(SwitchData {
                    init,
                    tag: guard,
                    clauses,
                }),
            );
        }
        let tag = if guard.is_some() {
            self.condition_of(guard, "switch expression")
        } else {
            NodeIndex::NONE
        };
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::SwitchStmt(SwitchData { init, tag, clauses }),
        )
    }

    /// `x.(type)` or `v := x.(type)`.
    fn is_type_switch_guard(&self, guard: NodeIndex) -> bool {
        let is_type_guard = |expr: NodeIndex| {
            matches!(
                self.arena.get(expr).map(|n| &n.data),
                Some(NodeData::TypeAssertExpr { type_node, .. }) if type_node.is_none()
            )
        };
        match self.arena.get(guard).map(|n| &n.data) {
            Some(NodeData::ExprStmt { expression }) => is_type_guard(*expression),
            Some(NodeData::AssignStmt(assign)) => {
                assign.is_define()
                    && assign.lhs.len() == 1
                    && assign.rhs.len() == 1
                    && is_type_guard(assign.rhs[0])
            }
            _ => false,
        }
    }

    fn parse_case_clause(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let is_default = self.is_token(SyntaxKind::DefaultKeyword);
        self.next_token();
        let list = if is_default {
            NodeList::new()
        } else {
            self.parse_expr_list()
        };
        self.expect(SyntaxKind::ColonToken);
        let body = self.parse_stmt_list();
        self.arena.add(
            pos,
            self.prev_end,
            NodeData::CaseClause(CaseClauseData {
                list,
                is_default,
                body,
            }),
        )
    }

    fn parse_select_stmt(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.expect(SyntaxKind::SelectKeyword);
        self.expect(SyntaxKind::OpenBraceToken);
        let mut clauses = NodeList::new();
        while matches!(
            self.token(),
            SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
        ) {
            let clause_pos = self.token_pos();
            let comm = if self.parse_optional(SyntaxKind::CaseKeyword) {
                self.parse_simple_stmt_node(SimpleMode::Basic)
            } else {
                self.next_token();
                NodeIndex::NONE
            };
            self.expect(SyntaxKind::ColonToken);
            let body = self.parse_stmt_list();
            clauses.push(self.arena.add(
                clause_pos,
                self.prev_end,
                NodeData::CommClause(CommClauseData { comm, body }),
            ));
        }
        self.expect(SyntaxKind::CloseBraceToken);
        self.arena
            .add(pos, self.prev_end, NodeData::SelectStmt { clauses })
    }
}
