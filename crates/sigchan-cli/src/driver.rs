//! Reads, parses and checks packages in parallel, and applies fixes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use sigchan_checker::{ALL_ANALYZERS, run_analyzers};
use sigchan_common::{Diagnostic, DiagnosticCategory, TextEdit, apply_text_edits};
use sigchan_parser::parse_package;
use tracing::{debug, info_span, warn};

use crate::config::Settings;
use crate::discovery::{DirectoryFiles, discover, package_clause};

/// A source file as read from disk.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

/// Result of checking every package under the requested paths.
#[derive(Debug, Default)]
pub struct CheckOutcome {
    /// Sorted by file name, then offset.
    pub diagnostics: Vec<Diagnostic>,
    /// Analyzer failures, already logged.
    pub analysis_errors: Vec<String>,
    /// Every file that was checked, by diagnostic file name.
    pub sources: FxHashMap<String, SourceFile>,
    pub packages: usize,
}

impl CheckOutcome {
    pub fn has_syntax_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }
}

struct PackageOutcome {
    diagnostics: Vec<Diagnostic>,
    analysis_errors: Vec<String>,
    sources: Vec<(String, SourceFile)>,
}

pub fn check_paths(paths: &[PathBuf], settings: &Settings) -> Result<CheckOutcome> {
    let directories = discover(paths, settings)?;
    debug!(directories = directories.len(), "discovered Go files");
    check_directories(&directories, settings)
}

pub fn check_directories(
    directories: &[DirectoryFiles],
    settings: &Settings,
) -> Result<CheckOutcome> {
    let per_directory: Vec<Vec<PackageOutcome>> = directories
        .par_iter()
        .map(|directory| check_directory(directory, settings))
        .collect::<Result<_>>()?;

    let mut outcome = CheckOutcome::default();
    for package in per_directory.into_iter().flatten() {
        outcome.packages += 1;
        outcome.diagnostics.extend(package.diagnostics);
        outcome.analysis_errors.extend(package.analysis_errors);
        outcome.sources.extend(package.sources);
    }
    outcome.diagnostics.sort_by(|a, b| {
        (&a.file, a.start, &a.message_text).cmp(&(&b.file, b.start, &b.message_text))
    });
    Ok(outcome)
}

/// Read one directory and check each package declared in it. A directory
/// usually holds one package, plus an external `_test` package.
fn check_directory(
    directory: &DirectoryFiles,
    settings: &Settings,
) -> Result<Vec<PackageOutcome>> {
    let mut packages: BTreeMap<String, Vec<SourceFile>> = BTreeMap::new();
    for path in &directory.files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let package = package_clause(&text).unwrap_or_default();
        packages.entry(package).or_default().push(SourceFile {
            path: path.clone(),
            text,
        });
    }

    Ok(packages
        .into_iter()
        .map(|(name, files)| check_package(&directory.dir, &name, files, settings))
        .collect())
}

fn check_package(
    dir: &Path,
    name: &str,
    files: Vec<SourceFile>,
    settings: &Settings,
) -> PackageOutcome {
    let _span = info_span!("package", dir = %dir.display(), name).entered();

    let sources: Vec<(String, SourceFile)> = files
        .into_iter()
        .map(|file| (file.path.display().to_string(), file))
        .collect();
    let parsed = parse_package(
        sources
            .iter()
            .map(|(file_name, file)| (file_name.clone(), file.text.clone())),
    );
    let report = run_analyzers(&parsed, ALL_ANALYZERS, &settings.analysis);

    let analysis_errors = report
        .errors
        .iter()
        .map(|error| {
            warn!(package = name, %error, "analysis error");
            format!("{}: {error}", dir.display())
        })
        .collect();

    let mut diagnostics = parsed.diagnostics;
    diagnostics.extend(report.diagnostics);
    debug!(
        files = sources.len(),
        diagnostics = diagnostics.len(),
        "checked package"
    );

    PackageOutcome {
        diagnostics,
        analysis_errors,
        sources,
    }
}

/// Every suggested edit, grouped by the file it changes.
pub fn collect_edits(diagnostics: &[Diagnostic]) -> BTreeMap<String, Vec<TextEdit>> {
    let mut edits: BTreeMap<String, Vec<TextEdit>> = BTreeMap::new();
    for diagnostic in diagnostics {
        for fix in &diagnostic.suggested_fixes {
            for edit in &fix.text_edits {
                // Normalized so that one fix reported from two files dedups.
                let target = edit.target_file(&diagnostic.file).to_string();
                edits.entry(target.clone()).or_default().push(TextEdit {
                    file: target,
                    ..edit.clone()
                });
            }
        }
    }
    edits
}

/// Apply every suggested fix in place. Returns the paths that changed.
pub fn apply_fixes(outcome: &CheckOutcome) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (file_name, edits) in collect_edits(&outcome.diagnostics) {
        let source = outcome
            .sources
            .get(&file_name)
            .with_context(|| format!("fix targets a file that was not checked: {file_name}"))?;
        let fixed = apply_text_edits(&source.text, &edits)
            .with_context(|| format!("cannot apply fixes to {}", source.path.display()))?;
        if fixed == source.text {
            continue;
        }
        std::fs::write(&source.path, fixed)
            .with_context(|| format!("failed to write {}", source.path.display()))?;
        debug!(path = %source.path.display(), edits = edits.len(), "applied fixes");
        written.push(source.path.clone());
    }
    Ok(written)
}

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
/// Diagnostics were reported, matching `go vet`.
pub const EXIT_DIAGNOSTICS: i32 = 3;

/// Everything a run produced, for the binary to print.
#[derive(Debug)]
pub struct RunSummary {
    pub outcome: CheckOutcome,
    /// Files rewritten by `--fix`.
    pub fixed: Vec<PathBuf>,
    pub exit_code: i32,
}

/// Check `paths` and apply fixes if asked to.
///
/// Analyzer failures make the run exit with [`EXIT_ERROR`]. Otherwise any
/// diagnostic exits with [`EXIT_DIAGNOSTICS`], except under `--fix` when
/// every diagnostic carried a fix that was written and nothing failed to
/// parse.
pub fn run(paths: &[PathBuf], settings: &Settings, fix: bool) -> Result<RunSummary> {
    let outcome = check_paths(paths, settings)?;
    let fixed = if fix { apply_fixes(&outcome)? } else { Vec::new() };

    let exit_code = if !outcome.analysis_errors.is_empty() {
        EXIT_ERROR
    } else if outcome.diagnostics.is_empty() {
        EXIT_SUCCESS
    } else if fix
        && !outcome.has_syntax_errors()
        && outcome
            .diagnostics
            .iter()
            .all(|d| !d.suggested_fixes.is_empty())
    {
        EXIT_SUCCESS
    } else {
        EXIT_DIAGNOSTICS
    };

    Ok(RunSummary {
        outcome,
        fixed,
        exit_code,
    })
}
