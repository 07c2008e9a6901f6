//! Parser state: token cursor, diagnostics and shared helpers.
//!
//! The grammar itself is split across `state_declarations`,
//! `state_statements`, `state_expressions` and `state_types`.

use std::sync::Arc;

use sigchan_common::Diagnostic;
use sigchan_common::diagnostics::diagnostic_codes;
use sigchan_scanner::{ScannerState, SyntaxKind};
use tracing::{debug, trace};

use super::base::NodeIndex;
use super::node::NodeArena;

/// A syntax error found while parsing one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    /// Expression nesting level: negative inside control clauses, where a
    /// `{` after a type name opens the statement body rather than a
    /// composite literal.
    pub(crate) expr_lev: i32,
    /// End of the last consumed token (implicit semicolons excluded).
    pub(crate) prev_end: u32,
}

impl ParserState {
    pub fn new(file_name: String, source: String) -> Self {
        Self::with_arena(NodeArena::new(), file_name, Arc::from(source))
    }

    /// Parse into an existing arena, so that several files of one package
    /// share a single index space.
    pub fn with_arena(arena: NodeArena, file_name: String, source: Arc<str>) -> Self {
        ParserState {
            scanner: ScannerState::new(source),
            arena,
            file_name,
            parse_diagnostics: Vec::new(),
            expr_lev: 0,
            prev_end: 0,
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    pub fn into_parts(self) -> (NodeArena, Vec<ParseDiagnostic>) {
        (self.arena, self.parse_diagnostics)
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.scanner.token() == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_start() as u32
    }

    pub(crate) fn token_text(&self) -> &str {
        self.scanner.token_text()
    }

    pub(crate) fn next_token(&mut self) {
        if !self.scanner.is_implicit_semicolon() {
            self.prev_end = self.scanner.token_end() as u32;
        }
        self.scanner.scan();
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report an error. Returns whether it was present.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let message = format!("expected '{}', found {}", kind.text(), self.describe_token());
        self.error_at_current_token(message);
        false
    }

    /// Statement terminator: `;` (explicit or inserted), or nothing before
    /// a closing `)` / `}`.
    pub(crate) fn expect_semi(&mut self) {
        match self.token() {
            SyntaxKind::SemicolonToken => self.next_token(),
            SyntaxKind::CloseParenToken | SyntaxKind::CloseBraceToken => {}
            _ => {
                let message = format!("expected ';', found {}", self.describe_token());
                self.error_at_current_token(message);
                self.sync_statement();
            }
        }
    }

    pub(crate) fn describe_token(&self) -> String {
        match self.token() {
            SyntaxKind::EndOfFileToken => "EOF".to_string(),
            SyntaxKind::SemicolonToken if self.scanner.is_implicit_semicolon() => {
                "newline".to_string()
            }
            SyntaxKind::Identifier => format!("'{}'", self.token_text()),
            kind if kind.is_literal() => self.token_text().to_string(),
            kind => format!("'{}'", kind.text()),
        }
    }

    // =========================================================================
    // Diagnostics and recovery
    // =========================================================================

    pub(crate) fn error_at(&mut self, start: u32, length: u32, message: String) {
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == start)
        {
            return;
        }
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message,
            code: diagnostic_codes::SYNTAX_ERROR,
        });
    }

    pub(crate) fn error_at_current_token(&mut self, message: String) {
        let start = self.token_pos();
        let length = (self.scanner.token_end() - self.scanner.token_start()) as u32;
        self.error_at(start, length, message);
    }

    /// Skip tokens up to the next statement boundary. A closing `}` is left
    /// for the enclosing block.
    pub(crate) fn sync_statement(&mut self) {
        trace!(pos = self.token_pos(), "sync_statement");
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken | SyntaxKind::CloseBraceToken => return,
                SyntaxKind::SemicolonToken => {
                    self.next_token();
                    return;
                }
                SyntaxKind::BreakKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::ContinueKeyword
                | SyntaxKind::DeferKeyword
                | SyntaxKind::FallthroughKeyword
                | SyntaxKind::ForKeyword
                | SyntaxKind::GoKeyword
                | SyntaxKind::GotoKeyword
                | SyntaxKind::IfKeyword
                | SyntaxKind::ReturnKeyword
                | SyntaxKind::SelectKeyword
                | SyntaxKind::SwitchKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::VarKeyword => return,
                _ => self.next_token(),
            }
        }
    }

    /// Skip to the next top-level declaration keyword.
    pub(crate) fn sync_declaration(&mut self) {
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken
                | SyntaxKind::FuncKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::ImportKeyword => return,
                _ => self.next_token(),
            }
        }
    }

    /// Report a missing operand and produce a `Bad` node. Consumes the
    /// offending token unless it closes an enclosing construct.
    pub(crate) fn bad_expression(&mut self, what: &str) -> NodeIndex {
        let pos = self.token_pos();
        let message = format!("expected {what}, found {}", self.describe_token());
        self.error_at_current_token(message);
        match self.token() {
            SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::CommaToken
            | SyntaxKind::ColonToken
            | SyntaxKind::EndOfFileToken => {}
            _ => self.next_token(),
        }
        let end = self.prev_end.max(pos);
        self.arena.add_bad(pos, end)
    }
}

/// Every file of one package, parsed into a shared arena.
#[derive(Debug)]
pub struct ParsedPackage {
    pub arena: NodeArena,
    /// `SourceFile` nodes, in input order.
    pub files: Vec<NodeIndex>,
    /// Syntax errors, already attributed to their files.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedPackage {
    pub fn file_name(&self, file: NodeIndex) -> Option<&str> {
        self.arena
            .get_source_file(file)
            .map(|sf| sf.file_name.as_str())
    }
}

/// Parse `(file name, source text)` pairs that belong to one package.
pub fn parse_package<I>(sources: I) -> ParsedPackage
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut arena = NodeArena::new();
    let mut files = Vec::new();
    let mut diagnostics = Vec::new();

    for (file_name, text) in sources {
        let mut parser = ParserState::with_arena(arena, file_name.clone(), Arc::from(text));
        let root = parser.parse_source_file();
        let (returned, parse_diagnostics) = parser.into_parts();
        arena = returned;
        if !parse_diagnostics.is_empty() {
            debug!(file = %file_name, errors = parse_diagnostics.len(), "syntax errors");
        }
        diagnostics.extend(parse_diagnostics.into_iter().map(|d| {
            Diagnostic::error(file_name.clone(), d.start, d.length, d.message, d.code)
        }));
        files.push(root);
    }

    ParsedPackage {
        arena,
        files,
        diagnostics,
    }
}
