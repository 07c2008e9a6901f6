//! Token kinds produced by the scanner.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals
    Identifier,
    IntLiteral,
    FloatLiteral,
    ImagLiteral,
    RuneLiteral,
    StringLiteral,

    // Operators
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    AmpersandCaretToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    AmpersandCaretEqualsToken,
    AmpersandAmpersandToken,
    BarBarToken,
    ArrowToken,
    PlusPlusToken,
    MinusMinusToken,
    EqualsEqualsToken,
    LessThanToken,
    GreaterThanToken,
    EqualsToken,
    ExclamationToken,
    TildeToken,
    ExclamationEqualsToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    ColonEqualsToken,
    DotDotDotToken,

    // Punctuation
    OpenParenToken,
    OpenBracketToken,
    OpenBraceToken,
    CommaToken,
    DotToken,
    CloseParenToken,
    CloseBracketToken,
    CloseBraceToken,
    SemicolonToken,
    ColonToken,

    // Keywords
    BreakKeyword,
    CaseKeyword,
    ChanKeyword,
    ConstKeyword,
    ContinueKeyword,
    DefaultKeyword,
    DeferKeyword,
    ElseKeyword,
    FallthroughKeyword,
    ForKeyword,
    FuncKeyword,
    GoKeyword,
    GotoKeyword,
    IfKeyword,
    ImportKeyword,
    InterfaceKeyword,
    MapKeyword,
    PackageKeyword,
    RangeKeyword,
    ReturnKeyword,
    SelectKeyword,
    StructKeyword,
    SwitchKeyword,
    TypeKeyword,
    VarKeyword,
}

impl SyntaxKind {
    /// Look up a keyword by its source text.
    pub fn keyword(text: &str) -> Option<SyntaxKind> {
        Some(match text {
            "break" => Self::BreakKeyword,
            "case" => Self::CaseKeyword,
            "chan" => Self::ChanKeyword,
            "const" => Self::ConstKeyword,
            "continue" => Self::ContinueKeyword,
            "default" => Self::DefaultKeyword,
            "defer" => Self::DeferKeyword,
            "else" => Self::ElseKeyword,
            "fallthrough" => Self::FallthroughKeyword,
            "for" => Self::ForKeyword,
            "func" => Self::FuncKeyword,
            "go" => Self::GoKeyword,
            "goto" => Self::GotoKeyword,
            "if" => Self::IfKeyword,
            "import" => Self::ImportKeyword,
            "interface" => Self::InterfaceKeyword,
            "map" => Self::MapKeyword,
            "package" => Self::PackageKeyword,
            "range" => Self::RangeKeyword,
            "return" => Self::ReturnKeyword,
            "select" => Self::SelectKeyword,
            "struct" => Self::StructKeyword,
            "switch" => Self::SwitchKeyword,
            "type" => Self::TypeKeyword,
            "var" => Self::VarKeyword,
            _ => return None,
        })
    }

    pub const fn is_keyword(self) -> bool {
        (self as u16) >= (Self::BreakKeyword as u16)
    }

    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IntLiteral
                | Self::FloatLiteral
                | Self::ImagLiteral
                | Self::RuneLiteral
                | Self::StringLiteral
        )
    }

    /// Tokens after which a newline inserts a semicolon.
    pub const fn ends_statement(self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::IntLiteral
                | Self::FloatLiteral
                | Self::ImagLiteral
                | Self::RuneLiteral
                | Self::StringLiteral
                | Self::BreakKeyword
                | Self::ContinueKeyword
                | Self::FallthroughKeyword
                | Self::ReturnKeyword
                | Self::PlusPlusToken
                | Self::MinusMinusToken
                | Self::CloseParenToken
                | Self::CloseBracketToken
                | Self::CloseBraceToken
        )
    }

    /// Binary operator precedence (Go spec); 0 for non-binary tokens.
    pub const fn binary_precedence(self) -> u8 {
        match self {
            Self::BarBarToken => 1,
            Self::AmpersandAmpersandToken => 2,
            Self::EqualsEqualsToken
            | Self::ExclamationEqualsToken
            | Self::LessThanToken
            | Self::LessThanEqualsToken
            | Self::GreaterThanToken
            | Self::GreaterThanEqualsToken => 3,
            Self::PlusToken | Self::MinusToken | Self::BarToken | Self::CaretToken => 4,
            Self::AsteriskToken
            | Self::SlashToken
            | Self::PercentToken
            | Self::LessThanLessThanToken
            | Self::GreaterThanGreaterThanToken
            | Self::AmpersandToken
            | Self::AmpersandCaretToken => 5,
            _ => 0,
        }
    }

    /// Whether this token is an assignment operator (`=`, `+=`, ...).
    pub const fn is_assignment(self) -> bool {
        matches!(
            self,
            Self::EqualsToken
                | Self::PlusEqualsToken
                | Self::MinusEqualsToken
                | Self::AsteriskEqualsToken
                | Self::SlashEqualsToken
                | Self::PercentEqualsToken
                | Self::AmpersandEqualsToken
                | Self::BarEqualsToken
                | Self::CaretEqualsToken
                | Self::LessThanLessThanEqualsToken
                | Self::GreaterThanGreaterThanEqualsToken
                | Self::AmpersandCaretEqualsToken
        )
    }

    /// Source text of fixed tokens (operators, punctuation, keywords).
    pub const fn text(self) -> &'static str {
        match self {
            Self::PlusToken => "+",
            Self::MinusToken => "-",
            Self::AsteriskToken => "*",
            Self::SlashToken => "/",
            Self::PercentToken => "%",
            Self::AmpersandToken => "&",
            Self::BarToken => "|",
            Self::CaretToken => "^",
            Self::LessThanLessThanToken => "<<",
            Self::GreaterThanGreaterThanToken => ">>",
            Self::AmpersandCaretToken => "&^",
            Self::PlusEqualsToken => "+=",
            Self::MinusEqualsToken => "-=",
            Self::AsteriskEqualsToken => "*=",
            Self::SlashEqualsToken => "/=",
            Self::PercentEqualsToken => "%=",
            Self::AmpersandEqualsToken => "&=",
            Self::BarEqualsToken => "|=",
            Self::CaretEqualsToken => "^=",
            Self::LessThanLessThanEqualsToken => "<<=",
            Self::GreaterThanGreaterThanEqualsToken => ">>=",
            Self::AmpersandCaretEqualsToken => "&^=",
            Self::AmpersandAmpersandToken => "&&",
            Self::BarBarToken => "||",
            Self::ArrowToken => "<-",
            Self::PlusPlusToken => "++",
            Self::MinusMinusToken => "--",
            Self::EqualsEqualsToken => "==",
            Self::LessThanToken => "<",
            Self::GreaterThanToken => ">",
            Self::EqualsToken => "=",
            Self::ExclamationToken => "!",
            Self::TildeToken => "~",
            Self::ExclamationEqualsToken => "!=",
            Self::LessThanEqualsToken => "<=",
            Self::GreaterThanEqualsToken => ">=",
            Self::ColonEqualsToken => ":=",
            Self::DotDotDotToken => "...",
            Self::OpenParenToken => "(",
            Self::OpenBracketToken => "[",
            Self::OpenBraceToken => "{",
            Self::CommaToken => ",",
            Self::DotToken => ".",
            Self::CloseParenToken => ")",
            Self::CloseBracketToken => "]",
            Self::CloseBraceToken => "}",
            Self::SemicolonToken => ";",
            Self::ColonToken => ":",
            Self::BreakKeyword => "break",
            Self::CaseKeyword => "case",
            Self::ChanKeyword => "chan",
            Self::ConstKeyword => "const",
            Self::ContinueKeyword => "continue",
            Self::DefaultKeyword => "default",
            Self::DeferKeyword => "defer",
            Self::ElseKeyword => "else",
            Self::FallthroughKeyword => "fallthrough",
            Self::ForKeyword => "for",
            Self::FuncKeyword => "func",
            Self::GoKeyword => "go",
            Self::GotoKeyword => "goto",
            Self::IfKeyword => "if",
            Self::ImportKeyword => "import",
            Self::InterfaceKeyword => "interface",
            Self::MapKeyword => "map",
            Self::PackageKeyword => "package",
            Self::RangeKeyword => "range",
            Self::ReturnKeyword => "return",
            Self::SelectKeyword => "select",
            Self::StructKeyword => "struct",
            Self::SwitchKeyword => "switch",
            Self::TypeKeyword => "type",
            Self::VarKeyword => "var",
            Self::Unknown
            | Self::EndOfFileToken
            | Self::Identifier
            | Self::IntLiteral
            | Self::FloatLiteral
            | Self::ImagLiteral
            | Self::RuneLiteral
            | Self::StringLiteral => "",
        }
    }
}
