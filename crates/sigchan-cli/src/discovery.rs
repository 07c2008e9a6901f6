//! Finding Go source files and grouping them into packages.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use sigchan_scanner::{ScannerState, SyntaxKind};
use tracing::trace;
use walkdir::{DirEntry, WalkDir};

use crate::config::Settings;

/// Go files of one directory, in name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryFiles {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

pub fn is_go_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "go")
}

pub fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with("_test.go"))
}

/// Directories the go tool ignores: `vendor`, `testdata`, and names
/// starting with `.` or `_`.
fn is_ignored_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name == "vendor" || name == "testdata" || name.starts_with('.') || name.starts_with('_')
}

/// Collect the Go files under `paths`, grouped by directory.
///
/// Files named explicitly are always checked. Files found by walking a
/// directory are subject to ignored directories, `--no-tests` and exclude
/// globs; globs are matched against the path relative to the walked root
/// as well as the full path.
pub fn discover(paths: &[PathBuf], settings: &Settings) -> Result<Vec<DirectoryFiles>> {
    let mut by_dir: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();

    for root in paths {
        let metadata = std::fs::metadata(root)
            .with_context(|| format!("cannot access {}", root.display()))?;
        if metadata.is_file() {
            if !is_go_file(root) {
                bail!("{} is not a Go source file", root.display());
            }
            let dir = root.parent().map(Path::to_path_buf).unwrap_or_default();
            by_dir.entry(dir).or_default().push(root.clone());
            continue;
        }

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_ignored_dir(entry));
        for entry in walker {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_go_file(path) {
                continue;
            }
            if !settings.include_tests && is_test_file(path) {
                trace!(path = %path.display(), "skipping test file");
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path);
            if settings.is_excluded(relative) || settings.is_excluded(path) {
                trace!(path = %path.display(), "excluded");
                continue;
            }
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            by_dir.entry(dir).or_default().push(path.to_path_buf());
        }
    }

    Ok(by_dir
        .into_iter()
        .map(|(dir, mut files)| {
            files.sort();
            files.dedup();
            DirectoryFiles { dir, files }
        })
        .collect())
}

/// Name in the `package` clause, skipping leading comments. `None` when the
/// file does not start with a package clause.
pub fn package_clause(source: &str) -> Option<String> {
    let mut scanner = ScannerState::new(Arc::from(source));
    if scanner.scan() != SyntaxKind::PackageKeyword {
        return None;
    }
    if scanner.scan() != SyntaxKind::Identifier {
        return None;
    }
    Some(scanner.token_text().to_string())
}
