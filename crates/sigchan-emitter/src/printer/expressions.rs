//! Operators, calls, slices and composite literals.

use sigchan_parser::parser::node::{BinaryData, CallData, CompositeLitData, SliceData, UnaryData};
use sigchan_parser::{NodeData, NodeIndex};
use sigchan_scanner::SyntaxKind;

use super::{HIGHEST_PREC, LOWEST_PREC, PrintError, Printer, UNARY_PREC, reduce_depth};

impl Printer<'_> {
    // =========================================================================
    // Binary expressions
    // =========================================================================

    /// gofmt drops the blanks around operators that bind tighter than the
    /// cutoff, so `a + b*c` keeps its visual grouping.
    pub(super) fn emit_binary(
        &mut self,
        binary: &BinaryData,
        prec1: u8,
        cutoff: u8,
        depth: u32,
    ) -> Result<(), PrintError> {
        let prec = binary.operator.binary_precedence();
        if prec < prec1 {
            self.write("(");
            self.expr1_binary_in_parens(binary, reduce_depth(depth))?;
            self.write(")");
            return Ok(());
        }

        let print_blank = prec < cutoff;
        let left_depth = depth + self.diff_prec(binary.left, prec);
        self.expr1(binary.left, prec, left_depth)?;
        if print_blank {
            self.write_space();
        }
        self.write(binary.operator.text());
        if print_blank {
            self.write_space();
        }
        self.expr1(binary.right, prec + 1, depth + 1)
    }

    fn expr1_binary_in_parens(
        &mut self,
        binary: &BinaryData,
        depth: u32,
    ) -> Result<(), PrintError> {
        let cutoff = self.cutoff_of(binary, depth);
        self.emit_binary(binary, LOWEST_PREC, cutoff, depth)
    }

    pub(super) fn cutoff(&self, index: NodeIndex, depth: u32) -> u8 {
        match self.arena.get(index).map(|n| &n.data) {
            Some(NodeData::BinaryExpr(binary)) => self.cutoff_of(binary, depth),
            _ => HIGHEST_PREC,
        }
    }

    fn cutoff_of(&self, binary: &BinaryData, depth: u32) -> u8 {
        let (has4, has5, max_problem) = self.walk_binary(binary);
        if max_problem > 0 {
            return max_problem + 1;
        }
        match (has4 && has5, depth == 1) {
            (true, true) => 5,
            (true, false) => 4,
            (false, true) => 6,
            (false, false) => 4,
        }
    }

    /// Precedence levels present in a chain of binary operators, and the
    /// highest level at which removing blanks would change the tokens
    /// (`a / *p` must not become `a/*p`).
    fn walk_binary(&self, binary: &BinaryData) -> (bool, bool, u8) {
        let prec = binary.operator.binary_precedence();
        let mut has4 = prec == 4;
        let mut has5 = prec == 5;
        let mut max_problem = 0;

        if let Some(NodeData::BinaryExpr(left)) = self.arena.get(binary.left).map(|n| &n.data)
            && left.operator.binary_precedence() >= prec
        {
            let (h4, h5, problem) = self.walk_binary(left);
            has4 |= h4;
            has5 |= h5;
            max_problem = max_problem.max(problem);
        }

        match self.arena.get(binary.right).map(|n| &n.data) {
            Some(NodeData::BinaryExpr(right)) if right.operator.binary_precedence() > prec => {
                let (h4, h5, problem) = self.walk_binary(right);
                has4 |= h4;
                has5 |= h5;
                max_problem = max_problem.max(problem);
            }
            Some(NodeData::StarExpr { .. }) if binary.operator == SyntaxKind::SlashToken => {
                max_problem = 5;
            }
            Some(NodeData::UnaryExpr(unary)) => {
                match (binary.operator, unary.operator) {
                    (SyntaxKind::SlashToken, SyntaxKind::AsteriskToken)
                    | (SyntaxKind::AmpersandToken, SyntaxKind::AmpersandToken)
                    | (SyntaxKind::AmpersandToken, SyntaxKind::CaretToken) => max_problem = 5,
                    (SyntaxKind::PlusToken, SyntaxKind::PlusToken)
                    | (SyntaxKind::MinusToken, SyntaxKind::MinusToken) => {
                        max_problem = max_problem.max(4);
                    }
                    _ => {}
                }
            }
            _ => {}
        }
        (has4, has5, max_problem)
    }

    fn diff_prec(&self, expr: NodeIndex, prec: u8) -> u32 {
        match self.arena.get(expr).map(|n| &n.data) {
            Some(NodeData::BinaryExpr(binary)) if binary.operator.binary_precedence() == prec => 0,
            _ => 1,
        }
    }

    // =========================================================================
    // Unary expressions
    // =========================================================================

    pub(super) fn emit_unary(
        &mut self,
        unary: &UnaryData,
        prec1: u8,
        depth: u32,
    ) -> Result<(), PrintError> {
        if UNARY_PREC < prec1 {
            self.write("(");
            self.emit_unary(unary, LOWEST_PREC, depth)?;
            self.write(")");
            return Ok(());
        }
        self.write(unary.operator.text());
        // `- -x` and `<- <-c` would otherwise scan as different tokens.
        if let Some(NodeData::UnaryExpr(inner)) = self.arena.get(unary.operand).map(|n| &n.data)
            && matches!(
                (unary.operator, inner.operator),
                (SyntaxKind::MinusToken, SyntaxKind::MinusToken)
                    | (SyntaxKind::PlusToken, SyntaxKind::PlusToken)
                    | (SyntaxKind::AmpersandToken, SyntaxKind::AmpersandToken)
            )
        {
            self.write_space();
        }
        self.expr1(unary.operand, UNARY_PREC, depth)
    }

    pub(super) fn emit_star(
        &mut self,
        expression: NodeIndex,
        prec1: u8,
        depth: u32,
    ) -> Result<(), PrintError> {
        if UNARY_PREC < prec1 {
            self.write("(");
            self.emit_star(expression, LOWEST_PREC, depth)?;
            self.write(")");
            return Ok(());
        }
        self.write("*");
        self.expr1(expression, UNARY_PREC, depth)
    }

    // =========================================================================
    // Calls, slices, literals
    // =========================================================================

    pub(super) fn emit_call(&mut self, call: &CallData, depth: u32) -> Result<(), PrintError> {
        let depth = if call.arguments.len() > 1 {
            depth + 1
        } else {
            depth
        };
        self.expr1(call.callee, HIGHEST_PREC, depth)?;
        self.write("(");
        self.emit_list(&call.arguments, depth)?;
        if call.has_ellipsis {
            self.write("...");
        }
        self.write(")");
        Ok(())
    }

    pub(super) fn emit_slice(&mut self, slice: &SliceData, depth: u32) -> Result<(), PrintError> {
        self.expr1(slice.expression, HIGHEST_PREC, 1)?;
        self.write("[");

        let mut indices = vec![slice.low, slice.high];
        if slice.three_index {
            indices.push(slice.max);
        }
        let mut needs_blanks = false;
        if depth <= 1 {
            let present = indices.iter().filter(|i| i.is_some()).count();
            let has_binary = indices.iter().any(|&i| {
                matches!(
                    self.arena.get(i).map(|n| &n.data),
                    Some(NodeData::BinaryExpr(_))
                )
            });
            needs_blanks = present > 1 && has_binary;
        }

        for (i, &index) in indices.iter().enumerate() {
            if i > 0 {
                if indices[i - 1].is_some() && needs_blanks {
                    self.write_space();
                }
                self.write(":");
                if index.is_some() && needs_blanks {
                    self.write_space();
                }
            }
            if index.is_some() {
                self.expr1(index, LOWEST_PREC, depth + 1)?;
            }
        }
        self.write("]");
        Ok(())
    }

    pub(super) fn emit_composite(&mut self, lit: &CompositeLitData) -> Result<(), PrintError> {
        if lit.type_node.is_some() {
            self.expr1(lit.type_node, HIGHEST_PREC, 1)?;
        }
        self.write("{");
        self.emit_list(&lit.elements, 1)?;
        self.write("}");
        Ok(())
    }
}
