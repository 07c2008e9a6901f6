//! Statement binding with Go's block structure.

use sigchan_parser::parser::node::{AssignData, SwitchData};
use sigchan_parser::{NodeArena, NodeData, NodeIndex, NodeList};

use crate::scopes::ScopeKind;
use crate::state::BinderState;
use crate::symbols::SymbolKind;

impl BinderState {
    pub(crate) fn bind_statements(&mut self, arena: &NodeArena, statements: &NodeList) {
        for &stmt in statements {
            self.bind_stmt(arena, stmt);
        }
    }

    pub(crate) fn bind_stmt(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(node) = arena.get(idx) else {
            return;
        };
        match &node.data {
            NodeData::Block(block) => {
                self.with_scope(ScopeKind::Block, |state| {
                    state.bind_statements(arena, &block.statements);
                });
            }
            NodeData::ExprStmt { expression } => self.bind_expr(arena, *expression),
            NodeData::AssignStmt(assign) => self.bind_assign(arena, idx, assign),
            NodeData::IncDecStmt { expression, .. } => self.bind_expr(arena, *expression),
            NodeData::SendStmt { channel, value } => {
                self.bind_expr(arena, *channel);
                self.bind_expr(arena, *value);
            }
            NodeData::GoStmt { call } | NodeData::DeferStmt { call } => {
                self.bind_expr(arena, *call);
            }
            NodeData::ReturnStmt { results } => {
                for &result in results {
                    self.bind_expr(arena, result);
                }
            }
            NodeData::LabeledStmt { statement, .. } => self.bind_stmt(arena, *statement),
            NodeData::DeclStmt { declaration } => self.bind_local_gen_decl(arena, *declaration),
            NodeData::IfStmt(data) => {
                self.with_scope(ScopeKind::Block, |state| {
                    state.bind_stmt(arena, data.init);
                    state.bind_expr(arena, data.condition);
                    state.bind_stmt(arena, data.then_block);
                    state.bind_stmt(arena, data.else_branch);
                });
            }
            NodeData::ForStmt(data) => {
                self.with_scope(ScopeKind::Block, |state| {
                    state.bind_stmt(arena, data.init);
                    state.bind_expr(arena, data.condition);
                    state.bind_stmt(arena, data.post);
                    state.bind_stmt(arena, data.body);
                });
            }
            NodeData::RangeStmt(data) => {
                self.with_scope(ScopeKind::Block, |state| {
                    state.bind_expr(arena, data.expression);
                    if data.op == sigchan_scanner::SyntaxKind::ColonEqualsToken {
                        for name in [data.key, data.value] {
                            state.declare_local_var(arena, idx, name);
                        }
                    } else {
                        state.bind_expr(arena, data.key);
                        state.bind_expr(arena, data.value);
                    }
                    state.bind_stmt(arena, data.body);
                });
            }
            NodeData::SwitchStmt(data) => self.bind_switch(arena, data),
            NodeData::TypeSwitchStmt(data) => self.bind_type_switch(arena, data),
            NodeData::SelectStmt { clauses } => {
                for &clause in clauses {
                    let Some(NodeData::CommClause(comm)) = arena.get(clause).map(|n| &n.data)
                    else {
                        continue;
                    };
                    self.with_scope(ScopeKind::Block, |state| {
                        state.bind_stmt(arena, comm.comm);
                        state.bind_statements(arena, &comm.body);
                    });
                }
            }
            NodeData::BranchStmt { .. } | NodeData::EmptyStmt | NodeData::Bad => {}
            _ => self.bind_expr(arena, idx),
        }
    }

    fn bind_assign(&mut self, arena: &NodeArena, idx: NodeIndex, assign: &AssignData) {
        for &value in &assign.rhs {
            self.bind_expr(arena, value);
        }
        if !assign.is_define() {
            for &target in &assign.lhs {
                self.bind_expr(arena, target);
            }
            return;
        }
        for &target in &assign.lhs {
            if arena.get_identifier(target).is_none() {
                self.bind_expr(arena, target);
                continue;
            }
            self.declare_local_var(arena, idx, target);
        }
    }

    /// Declare a `:=` or range variable. A name already declared in the same
    /// scope is reused, as in `n, err := f()` after an earlier `err`.
    fn declare_local_var(&mut self, arena: &NodeArena, declaration: NodeIndex, ident: NodeIndex) {
        let Some(name) = arena.identifier_text(ident) else {
            return;
        };
        if name == "_" {
            return;
        }
        if let Some(existing) = self.lookup_local(name) {
            self.node_symbols.insert(ident.0, existing);
            return;
        }
        self.declare_symbol(name, SymbolKind::Var, declaration, ident);
    }

    fn bind_switch(&mut self, arena: &NodeArena, data: &SwitchData) {
        self.with_scope(ScopeKind::Block, |state| {
            state.bind_stmt(arena, data.init);
            state.bind_expr(arena, data.tag);
            for &clause in &data.clauses {
                let Some(NodeData::CaseClause(case)) = arena.get(clause).map(|n| &n.data) else {
                    continue;
                };
                for &expr in &case.list {
                    state.bind_expr(arena, expr);
                }
                state.with_scope(ScopeKind::Block, |state| {
                    state.bind_statements(arena, &case.body);
                });
            }
        });
    }

    /// `switch v := x.(type)` declares `v` afresh in every clause.
    fn bind_type_switch(&mut self, arena: &NodeArena, data: &SwitchData) {
        self.with_scope(ScopeKind::Block, |state| {
            state.bind_stmt(arena, data.init);

            let mut bound_name = None;
            match arena.get(data.tag).map(|n| &n.data) {
                Some(NodeData::AssignStmt(assign)) => {
                    for &value in &assign.rhs {
                        state.bind_expr(arena, value);
                    }
                    bound_name = assign
                        .lhs
                        .first()
                        .and_then(|&lhs| arena.identifier_text(lhs))
                        .filter(|&name| name != "_");
                }
                Some(NodeData::ExprStmt { expression }) => state.bind_expr(arena, *expression),
                _ => {}
            }

            for &clause in &data.clauses {
                let Some(NodeData::CaseClause(case)) = arena.get(clause).map(|n| &n.data) else {
                    continue;
                };
                for &expr in &case.list {
                    state.bind_expr(arena, expr);
                }
                state.with_scope(ScopeKind::Block, |state| {
                    if let Some(name) = bound_name {
                        state.declare_symbol(name, SymbolKind::Var, data.tag, NodeIndex::NONE);
                    }
                    state.bind_statements(arena, &case.body);
                });
            }
        });
    }
}
