//! Go scanner/tokenizer for the sigchan analyzer.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine with automatic semicolon insertion
//! - `char_codes` - Character classification utilities

pub mod char_codes;
pub mod scanner;
pub mod syntax_kind;

pub use scanner::{CommentRange, ScannerDiagnostic, ScannerState};
pub use syntax_kind::SyntaxKind;
