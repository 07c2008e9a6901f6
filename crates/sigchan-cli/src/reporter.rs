use colored::Colorize;
use rustc_hash::FxHashMap;
use serde::Serialize;

use sigchan_common::{Diagnostic, DiagnosticCategory, LineMap, Position};

use crate::driver::SourceFile;

/// Renders diagnostics as text, reading source lines from the files that
/// were checked rather than from disk.
pub struct Reporter<'a> {
    color: bool,
    snippets: bool,
    sources: &'a FxHashMap<String, SourceFile>,
    line_maps: FxHashMap<String, LineMap>,
}

impl<'a> Reporter<'a> {
    pub fn new(sources: &'a FxHashMap<String, SourceFile>) -> Self {
        Reporter {
            color: false,
            snippets: false,
            sources,
            line_maps: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_snippets(mut self, snippets: bool) -> Self {
        self.snippets = snippets;
        self
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics {
            out.push_str(&self.format_diagnostic(diagnostic));
            out.push('\n');
        }
        out
    }

    /// `file:line:col - warning SC2001: message [analyzer]`, optionally
    /// followed by the source line with the span underlined.
    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let mut output = match self.position_for(&diagnostic.file, diagnostic.start) {
            Some(position) => format!("{}:{}:{}", diagnostic.file, position.line, position.column),
            None if diagnostic.file.is_empty() => "<unknown>".to_string(),
            None => diagnostic.file.clone(),
        };
        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        output.push(' ');
        output.push_str(&self.format_code(diagnostic.code));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);
        if !diagnostic.source.is_empty() {
            output.push_str(&format!(" [{}]", diagnostic.source));
        }

        if self.snippets {
            if let Some(snippet) = self.format_snippet(diagnostic) {
                output.push_str(&snippet);
            }
            for fix in &diagnostic.suggested_fixes {
                let label = if self.color {
                    "fix".green().to_string()
                } else {
                    "fix".to_string()
                };
                output.push_str(&format!("\n       {label}: {}", fix.message));
            }
        }
        output
    }

    /// The diagnostic's line, numbered, with `~` under the reported span.
    fn format_snippet(&mut self, diagnostic: &Diagnostic) -> Option<String> {
        if diagnostic.length == 0 {
            return None;
        }
        let position = self.position_for(&diagnostic.file, diagnostic.start)?;
        let text = &self.sources.get(&diagnostic.file)?.text;
        let line_text = text.lines().nth(position.line.checked_sub(1)? as usize)?;

        // Columns are byte based; the underline stops at the end of the line.
        let start_col = position.column as usize - 1;
        let end_col = (start_col + diagnostic.length as usize).min(line_text.len());
        let mut underline = String::new();
        for (offset, ch) in line_text.char_indices() {
            if offset >= end_col {
                break;
            }
            let mark = if offset < start_col { ' ' } else { '~' };
            let width = if ch == '\t' { 4 } else { 1 };
            underline.extend(std::iter::repeat_n(mark, width));
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        let line_text = line_text.replace('\t', "    ");
        Some(format!("\n  {:>3}   {line_text}\n        {underline}", position.line))
    }

    fn position_for(&mut self, file: &str, offset: u32) -> Option<Position> {
        let sources = self.sources;
        let source = sources.get(file)?;
        let map = self
            .line_maps
            .entry(file.to_string())
            .or_insert_with(|| LineMap::build(&source.text));
        Some(map.offset_to_position(offset))
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("SC{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
    line: u32,
    column: u32,
}

/// Diagnostics as a pretty-printed JSON array, each entry carrying its
/// 1-based line and column.
pub fn render_json(
    diagnostics: &[Diagnostic],
    sources: &FxHashMap<String, SourceFile>,
) -> serde_json::Result<String> {
    let mut line_maps: FxHashMap<&str, LineMap> = FxHashMap::default();
    let entries: Vec<JsonDiagnostic<'_>> = diagnostics
        .iter()
        .map(|diagnostic| {
            let position = sources
                .get(&diagnostic.file)
                .map(|source| {
                    line_maps
                        .entry(diagnostic.file.as_str())
                        .or_insert_with(|| LineMap::build(&source.text))
                        .offset_to_position(diagnostic.start)
                })
                .unwrap_or(Position::new(0, 0));
            JsonDiagnostic {
                diagnostic,
                line: position.line,
                column: position.column,
            }
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}
