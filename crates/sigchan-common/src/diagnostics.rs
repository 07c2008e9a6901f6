//! Diagnostic types shared by the parser, the analyzers and the CLI.

use serde::Serialize;

use crate::span::Span;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// Well-known diagnostic codes.
pub mod diagnostic_codes {
    /// Syntax error reported by the scanner or parser.
    pub const SYNTAX_ERROR: u32 = 1001;
    /// Unterminated string, rune or comment.
    pub const UNTERMINATED_LITERAL: u32 = 1002;
    /// Character that cannot start any token.
    pub const INVALID_CHARACTER: u32 = 1003;
    /// Unbuffered `os.Signal` channel passed to `signal.Notify`.
    pub const UNBUFFERED_SIGNAL_CHANNEL: u32 = 2001;
}

/// A single replacement of the byte range `[start, end)` with `new_text`.
///
/// An empty `file` means the file of the diagnostic carrying the edit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub file: String,
    pub start: u32,
    pub end: u32,
    pub new_text: String,
}

impl TextEdit {
    #[must_use]
    pub fn replace(span: Span, new_text: impl Into<String>) -> Self {
        Self {
            file: String::new(),
            start: span.start,
            end: span.end,
            new_text: new_text.into(),
        }
    }

    /// Target a file other than the diagnostic's own.
    #[must_use]
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    /// The file this edit applies to, given the file of its diagnostic.
    pub fn target_file<'a>(&'a self, diagnostic_file: &'a str) -> &'a str {
        if self.file.is_empty() { diagnostic_file } else { &self.file }
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// A fix that can be applied mechanically to resolve a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedFix {
    /// Human-readable description of the fix.
    pub message: String,
    pub text_edits: Vec<TextEdit>,
}

/// A diagnostic message with optional suggested fixes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Name of the analyzer that produced this diagnostic (empty for syntax errors).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggested_fixes: Vec<SuggestedFix>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
            source: String::new(),
            suggested_fixes: Vec::new(),
        }
    }

    /// Create a new warning diagnostic.
    #[must_use]
    pub const fn warning(
        file: String,
        start: u32,
        length: u32,
        message: String,
        code: u32,
    ) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Warning,
            code,
            source: String::new(),
            suggested_fixes: Vec::new(),
        }
    }

    /// Tag the diagnostic with the analyzer that produced it.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Attach a suggested fix.
    #[must_use]
    pub fn with_fix(mut self, fix: SuggestedFix) -> Self {
        self.suggested_fixes.push(fix);
        self
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.start, self.start + self.length)
    }
}
