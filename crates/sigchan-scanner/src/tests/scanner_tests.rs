//! Tests for the scanner.

use super::*;

fn scan_all(source: &str) -> (Vec<(SyntaxKind, String)>, ScannerState) {
    let mut scanner = ScannerState::new(Arc::from(source));
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        let text = if scanner.is_implicit_semicolon() {
            "\n".to_string()
        } else {
            scanner.token_text().to_string()
        };
        tokens.push((kind, text));
    }
    (tokens, scanner)
}

fn kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).0.into_iter().map(|(k, _)| k).collect()
}

#[test]
fn scans_channel_creation() {
    use SyntaxKind as K;
    assert_eq!(
        kinds("c := make(chan os.Signal, 1)"),
        vec![
            K::Identifier,
            K::ColonEqualsToken,
            K::Identifier,
            K::OpenParenToken,
            K::ChanKeyword,
            K::Identifier,
            K::DotToken,
            K::Identifier,
            K::CommaToken,
            K::IntLiteral,
            K::CloseParenToken,
            K::SemicolonToken,
        ]
    );
}

#[test]
fn inserts_semicolons_only_after_statement_enders() {
    let (tokens, _) = scan_all("x := 1 +\n2\nreturn\n}\n");
    let texts: Vec<&str> = tokens.iter().map(|(_, t)| t.as_str()).collect();
    assert_eq!(
        texts,
        vec!["x", ":=", "1", "+", "2", "\n", "return", "\n", "}", "\n"]
    );
}

#[test]
fn line_comment_still_terminates_statement() {
    let (tokens, scanner) = scan_all("c := make(chan os.Signal) // want \"unbuffered\"\nnext");
    let semi = tokens
        .iter()
        .position(|(k, _)| *k == SyntaxKind::SemicolonToken)
        .unwrap();
    assert_eq!(tokens[semi - 1].1, ")");
    assert_eq!(scanner.comments().len(), 1);
    assert!(!scanner.comments()[0].is_block);
}

#[test]
fn multi_line_block_comment_acts_like_newline() {
    let (tokens, _) = scan_all("a /* one\ntwo */ b");
    assert_eq!(tokens[1].0, SyntaxKind::SemicolonToken);
    assert_eq!(tokens[2].1, "b");
}

#[test]
fn scans_number_forms() {
    use SyntaxKind as K;
    let (tokens, scanner) = scan_all("1 0x1F 0o17 0b1 1_000 1.5 .5 1e9 0x1p-2 3i");
    let got: Vec<K> = tokens
        .iter()
        .filter(|(k, _)| *k != K::SemicolonToken)
        .map(|(k, _)| *k)
        .collect();
    assert_eq!(
        got,
        vec![
            K::IntLiteral,
            K::IntLiteral,
            K::IntLiteral,
            K::IntLiteral,
            K::IntLiteral,
            K::FloatLiteral,
            K::FloatLiteral,
            K::FloatLiteral,
            K::FloatLiteral,
            K::ImagLiteral,
        ]
    );
    assert!(scanner.get_scanner_diagnostics().is_empty());
}

#[test]
fn scans_strings_and_runes() {
    let (tokens, scanner) = scan_all("\"a\\\"b\" `raw\nline` '\\n'");
    assert_eq!(tokens[0], (SyntaxKind::StringLiteral, "\"a\\\"b\"".to_string()));
    assert_eq!(
        tokens[1],
        (SyntaxKind::StringLiteral, "`raw\nline`".to_string())
    );
    assert_eq!(tokens[2], (SyntaxKind::RuneLiteral, "'\\n'".to_string()));
    assert!(scanner.get_scanner_diagnostics().is_empty());
}

#[test]
fn unterminated_string_reports_diagnostic() {
    let (_, scanner) = scan_all("x := \"oops\ny := 1");
    let diags = scanner.get_scanner_diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].message, "string literal not terminated");
    assert_eq!(diags[0].pos, 5);
}

#[test]
fn scans_compound_operators() {
    use SyntaxKind as K;
    assert_eq!(
        kinds("a &^= b <<= c <- d ... e"),
        vec![
            K::Identifier,
            K::AmpersandCaretEqualsToken,
            K::Identifier,
            K::LessThanLessThanEqualsToken,
            K::Identifier,
            K::ArrowToken,
            K::Identifier,
            K::DotDotDotToken,
            K::Identifier,
            K::SemicolonToken,
        ]
    );
}

#[test]
fn invalid_character_is_reported_and_skipped() {
    let (tokens, scanner) = scan_all("a @ b");
    assert_eq!(tokens[1].0, SyntaxKind::Unknown);
    assert_eq!(
        scanner.get_scanner_diagnostics()[0].message,
        "invalid character"
    );
}
