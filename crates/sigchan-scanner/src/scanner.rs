//! Scanner state machine.
//!
//! Produces one token per `scan()` call. Comments are trivia: they are
//! recorded in `comments()` and skipped. Semicolons are inserted at line
//! ends by Go's automatic semicolon rule; an inserted semicolon has an
//! empty span and `is_implicit_semicolon()` returns true.

use std::sync::Arc;

use sigchan_common::diagnostics::diagnostic_codes;

use crate::char_codes::{
    is_binary_digit, is_dec_digit, is_hex_digit, is_horizontal_space, is_identifier_part,
    is_identifier_start, is_octal_digit,
};
use crate::syntax_kind::SyntaxKind;

/// Byte range of a comment, including its delimiters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommentRange {
    pub pos: u32,
    pub end: u32,
    pub is_block: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
    pub code: u32,
}

pub struct ScannerState {
    source: Arc<str>,
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_end: usize,
    implicit_semicolon: bool,
    insert_semi: bool,
    comments: Vec<CommentRange>,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(source: Arc<str>) -> Self {
        ScannerState {
            source,
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            token_end: 0,
            implicit_semicolon: false,
            insert_semi: false,
            comments: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.source)
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    #[inline]
    pub fn token_end(&self) -> usize {
        self.token_end
    }

    pub fn token_text(&self) -> &str {
        &self.source[self.token_start..self.token_end]
    }

    pub fn is_implicit_semicolon(&self) -> bool {
        self.token == SyntaxKind::SemicolonToken && self.implicit_semicolon
    }

    pub fn comments(&self) -> &[CommentRange] {
        &self.comments
    }

    pub fn take_comments(&mut self) -> Vec<CommentRange> {
        std::mem::take(&mut self.comments)
    }

    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + offset).copied()
    }

    fn error(&mut self, pos: usize, length: usize, message: &'static str, code: u32) {
        self.diagnostics.push(ScannerDiagnostic {
            pos,
            length,
            message,
            code,
        });
    }

    fn finish(&mut self, kind: SyntaxKind, start: usize) -> SyntaxKind {
        self.token = kind;
        self.token_start = start;
        self.token_end = self.pos;
        self.implicit_semicolon = false;
        self.insert_semi = kind.ends_statement();
        kind
    }

    fn implicit_semicolon_at(&mut self, pos: usize) -> SyntaxKind {
        self.token = SyntaxKind::SemicolonToken;
        self.token_start = pos;
        self.token_end = pos;
        self.implicit_semicolon = true;
        self.insert_semi = false;
        SyntaxKind::SemicolonToken
    }

    /// Advance to the next token.
    pub fn scan(&mut self) -> SyntaxKind {
        let bytes_len = self.source.len();
        loop {
            while let Some(b) = self.peek_byte(0) {
                if is_horizontal_space(b) {
                    self.pos += 1;
                } else if b == b'\n' {
                    if self.insert_semi {
                        let at = self.pos;
                        self.pos += 1;
                        return self.implicit_semicolon_at(at);
                    }
                    self.pos += 1;
                } else {
                    break;
                }
            }

            if self.pos >= bytes_len {
                if self.insert_semi {
                    return self.implicit_semicolon_at(bytes_len);
                }
                self.token = SyntaxKind::EndOfFileToken;
                self.token_start = bytes_len;
                self.token_end = bytes_len;
                self.implicit_semicolon = false;
                return SyntaxKind::EndOfFileToken;
            }

            if self.peek_byte(0) == Some(b'/') {
                match self.peek_byte(1) {
                    Some(b'/') => {
                        self.skip_line_comment();
                        continue;
                    }
                    Some(b'*') => {
                        let start = self.pos;
                        let had_newline = self.skip_block_comment();
                        if had_newline && self.insert_semi {
                            return self.implicit_semicolon_at(start);
                        }
                        continue;
                    }
                    _ => {}
                }
            }
            break;
        }

        let start = self.pos;
        let rest = &self.source[start..];
        let Some(ch) = rest.chars().next() else {
            return SyntaxKind::EndOfFileToken;
        };

        if is_identifier_start(ch) {
            let len = rest
                .char_indices()
                .find(|&(_, c)| !is_identifier_part(c))
                .map_or(rest.len(), |(i, _)| i);
            self.pos += len;
            let kind = SyntaxKind::keyword(&self.source[start..self.pos])
                .unwrap_or(SyntaxKind::Identifier);
            return self.finish(kind, start);
        }

        let b = ch as u32;
        if b < 0x80 {
            let b = b as u8;
            if is_dec_digit(b) || (b == b'.' && self.peek_byte(1).is_some_and(is_dec_digit)) {
                let kind = self.scan_number();
                return self.finish(kind, start);
            }
            match b {
                b'"' => {
                    self.scan_interpreted(b'"', start);
                    return self.finish(SyntaxKind::StringLiteral, start);
                }
                b'\'' => {
                    self.scan_interpreted(b'\'', start);
                    return self.finish(SyntaxKind::RuneLiteral, start);
                }
                b'`' => {
                    self.scan_raw_string(start);
                    return self.finish(SyntaxKind::StringLiteral, start);
                }
                _ => {}
            }
            if let Some(kind) = self.scan_operator(b) {
                return self.finish(kind, start);
            }
        }

        self.pos += ch.len_utf8();
        self.error(
            start,
            ch.len_utf8(),
            "invalid character",
            diagnostic_codes::INVALID_CHARACTER,
        );
        self.finish(SyntaxKind::Unknown, start)
    }

    fn skip_line_comment(&mut self) {
        let start = self.pos;
        let rest = &self.source.as_bytes()[start..];
        let len = memchr::memchr(b'\n', rest).unwrap_or(rest.len());
        self.pos += len;
        self.comments.push(CommentRange {
            pos: start as u32,
            end: self.pos as u32,
            is_block: false,
        });
    }

    /// Returns true when the comment spans a line break.
    fn skip_block_comment(&mut self) -> bool {
        let start = self.pos;
        let body = &self.source.as_bytes()[start + 2..];
        let (body_len, terminated) = match memchr::memmem::find(body, b"*/") {
            Some(i) => (i, true),
            None => (body.len(), false),
        };
        let had_newline = memchr::memchr(b'\n', &body[..body_len]).is_some();
        self.pos = start + 2 + body_len + if terminated { 2 } else { 0 };
        if !terminated {
            self.error(
                start,
                self.pos - start,
                "comment not terminated",
                diagnostic_codes::UNTERMINATED_LITERAL,
            );
        }
        self.comments.push(CommentRange {
            pos: start as u32,
            end: self.pos as u32,
            is_block: true,
        });
        had_newline
    }

    fn scan_digits(&mut self, accept: fn(u8) -> bool) -> usize {
        let mut count = 0;
        while let Some(b) = self.peek_byte(0) {
            if accept(b) {
                count += 1;
            } else if b != b'_' {
                break;
            }
            self.pos += 1;
        }
        count
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let mut kind = SyntaxKind::IntLiteral;
        let mut hex = false;

        if self.peek_byte(0) != Some(b'.') {
            if self.peek_byte(0) == Some(b'0') {
                match self.peek_byte(1).map(|b| b.to_ascii_lowercase()) {
                    Some(b'x') => {
                        self.pos += 2;
                        hex = true;
                        self.scan_digits(is_hex_digit);
                    }
                    Some(b'b') => {
                        self.pos += 2;
                        self.scan_digits(is_binary_digit);
                    }
                    Some(b'o') => {
                        self.pos += 2;
                        self.scan_digits(is_octal_digit);
                    }
                    _ => {
                        self.scan_digits(is_dec_digit);
                    }
                }
            } else {
                self.scan_digits(is_dec_digit);
            }
        }

        if self.peek_byte(0) == Some(b'.') {
            kind = SyntaxKind::FloatLiteral;
            self.pos += 1;
            self.scan_digits(if hex { is_hex_digit } else { is_dec_digit });
        }

        let exponent = self.peek_byte(0).map(|b| b.to_ascii_lowercase());
        if (exponent == Some(b'e') && !hex) || (exponent == Some(b'p') && hex) {
            kind = SyntaxKind::FloatLiteral;
            self.pos += 1;
            if matches!(self.peek_byte(0), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.scan_digits(is_dec_digit) == 0 {
                self.error(
                    start,
                    self.pos - start,
                    "exponent has no digits",
                    diagnostic_codes::SYNTAX_ERROR,
                );
            }
        }

        if self.peek_byte(0) == Some(b'i') {
            self.pos += 1;
            kind = SyntaxKind::ImagLiteral;
        }
        kind
    }

    fn scan_interpreted(&mut self, quote: u8, start: usize) {
        self.pos += 1;
        loop {
            match self.peek_byte(0) {
                None | Some(b'\n') => {
                    let message = if quote == b'"' {
                        "string literal not terminated"
                    } else {
                        "rune literal not terminated"
                    };
                    self.error(
                        start,
                        self.pos - start,
                        message,
                        diagnostic_codes::UNTERMINATED_LITERAL,
                    );
                    return;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    if let Some(c) = self.source[self.pos..].chars().next() {
                        self.pos += c.len_utf8();
                    }
                }
                Some(b) if b == quote => {
                    self.pos += 1;
                    return;
                }
                Some(_) => {
                    if let Some(c) = self.source[self.pos..].chars().next() {
                        self.pos += c.len_utf8();
                    }
                }
            }
        }
    }

    fn scan_raw_string(&mut self, start: usize) {
        let body = &self.source.as_bytes()[start + 1..];
        match memchr::memchr(b'`', body) {
            Some(i) => self.pos = start + 1 + i + 1,
            None => {
                self.pos = self.source.len();
                self.error(
                    start,
                    self.pos - start,
                    "raw string literal not terminated",
                    diagnostic_codes::UNTERMINATED_LITERAL,
                );
            }
        }
    }

    fn scan_operator(&mut self, b: u8) -> Option<SyntaxKind> {
        use SyntaxKind as K;
        let next = self.peek_byte(1);
        let next2 = self.peek_byte(2);
        let (kind, len) = match (b, next, next2) {
            (b'(', _, _) => (K::OpenParenToken, 1),
            (b')', _, _) => (K::CloseParenToken, 1),
            (b'[', _, _) => (K::OpenBracketToken, 1),
            (b']', _, _) => (K::CloseBracketToken, 1),
            (b'{', _, _) => (K::OpenBraceToken, 1),
            (b'}', _, _) => (K::CloseBraceToken, 1),
            (b',', _, _) => (K::CommaToken, 1),
            (b';', _, _) => (K::SemicolonToken, 1),
            (b'~', _, _) => (K::TildeToken, 1),
            (b'.', Some(b'.'), Some(b'.')) => (K::DotDotDotToken, 3),
            (b'.', _, _) => (K::DotToken, 1),
            (b':', Some(b'='), _) => (K::ColonEqualsToken, 2),
            (b':', _, _) => (K::ColonToken, 1),
            (b'+', Some(b'+'), _) => (K::PlusPlusToken, 2),
            (b'+', Some(b'='), _) => (K::PlusEqualsToken, 2),
            (b'+', _, _) => (K::PlusToken, 1),
            (b'-', Some(b'-'), _) => (K::MinusMinusToken, 2),
            (b'-', Some(b'='), _) => (K::MinusEqualsToken, 2),
            (b'-', _, _) => (K::MinusToken, 1),
            (b'*', Some(b'='), _) => (K::AsteriskEqualsToken, 2),
            (b'*', _, _) => (K::AsteriskToken, 1),
            (b'/', Some(b'='), _) => (K::SlashEqualsToken, 2),
            (b'/', _, _) => (K::SlashToken, 1),
            (b'%', Some(b'='), _) => (K::PercentEqualsToken, 2),
            (b'%', _, _) => (K::PercentToken, 1),
            (b'^', Some(b'='), _) => (K::CaretEqualsToken, 2),
            (b'^', _, _) => (K::CaretToken, 1),
            (b'<', Some(b'-'), _) => (K::ArrowToken, 2),
            (b'<', Some(b'<'), Some(b'=')) => (K::LessThanLessThanEqualsToken, 3),
            (b'<', Some(b'<'), _) => (K::LessThanLessThanToken, 2),
            (b'<', Some(b'='), _) => (K::LessThanEqualsToken, 2),
            (b'<', _, _) => (K::LessThanToken, 1),
            (b'>', Some(b'>'), Some(b'=')) => (K::GreaterThanGreaterThanEqualsToken, 3),
            (b'>', Some(b'>'), _) => (K::GreaterThanGreaterThanToken, 2),
            (b'>', Some(b'='), _) => (K::GreaterThanEqualsToken, 2),
            (b'>', _, _) => (K::GreaterThanToken, 1),
            (b'=', Some(b'='), _) => (K::EqualsEqualsToken, 2),
            (b'=', _, _) => (K::EqualsToken, 1),
            (b'!', Some(b'='), _) => (K::ExclamationEqualsToken, 2),
            (b'!', _, _) => (K::ExclamationToken, 1),
            (b'&', Some(b'^'), Some(b'=')) => (K::AmpersandCaretEqualsToken, 3),
            (b'&', Some(b'^'), _) => (K::AmpersandCaretToken, 2),
            (b'&', Some(b'&'), _) => (K::AmpersandAmpersandToken, 2),
            (b'&', Some(b'='), _) => (K::AmpersandEqualsToken, 2),
            (b'&', _, _) => (K::AmpersandToken, 1),
            (b'|', Some(b'|'), _) => (K::BarBarToken, 2),
            (b'|', Some(b'='), _) => (K::BarEqualsToken, 2),
            (b'|', _, _) => (K::BarToken, 1),
            _ => return None,
        };
        self.pos += len;
        Some(kind)
    }
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
