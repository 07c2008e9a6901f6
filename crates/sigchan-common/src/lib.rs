//! Common types and utilities for the sigchan Go analyzer.
//!
//! This crate provides foundational types used across all sigchan crates:
//! - Source spans (`Span`, `Spanned`)
//! - Position types and line maps for byte offset -> line/column conversion
//! - Diagnostics with suggested fixes
//! - Text edit application

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::{Span, Spanned};

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Diagnostics and suggested fixes
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, SuggestedFix, TextEdit};

// Applying suggested fixes to source text
pub mod text_edit;
pub use text_edit::{EditError, apply_text_edits};
