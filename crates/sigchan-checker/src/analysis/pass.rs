use std::any::Any;

use rustc_hash::FxHashMap;
use sigchan_binder::Resolver;
use sigchan_common::Diagnostic;
use sigchan_parser::{NodeArena, NodeIndex, ParsedPackage};
use tracing::debug;

use crate::analysis::analyzer::Analyzer;
use crate::config::AnalysisConfig;

/// One analyzer applied to one package.
///
/// A pass owns nothing of the package: the arena, resolver and config are
/// borrowed for the duration of `run`, and diagnostics are collected until
/// the driver takes them.
pub struct Pass<'a> {
    pub analyzer: &'static Analyzer,
    pub arena: &'a NodeArena,
    /// `SourceFile` nodes of the package, in the order they were parsed.
    pub files: &'a [NodeIndex],
    pub resolver: &'a dyn Resolver,
    pub config: &'a AnalysisConfig,
    results: &'a FxHashMap<&'static str, Box<dyn Any>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Pass<'a> {
    pub(crate) fn new(
        analyzer: &'static Analyzer,
        package: &'a ParsedPackage,
        resolver: &'a dyn Resolver,
        config: &'a AnalysisConfig,
        results: &'a FxHashMap<&'static str, Box<dyn Any>>,
    ) -> Self {
        Pass {
            analyzer,
            arena: &package.arena,
            files: &package.files,
            resolver,
            config,
            results,
            diagnostics: Vec::new(),
        }
    }

    /// Result of a required analyzer. Asking for an analyzer that is not
    /// listed in `requires`, or with the wrong type, yields `None`.
    pub fn result_of<T: 'static>(&self, analyzer: &Analyzer) -> Option<&'a T> {
        if !self.analyzer.requires(analyzer) {
            debug!(
                analyzer = self.analyzer.name,
                requested = analyzer.name,
                "result requested without a declared requirement"
            );
            return None;
        }
        let results: &'a FxHashMap<&'static str, Box<dyn Any>> = self.results;
        results.get(analyzer.name)?.downcast_ref::<T>()
    }

    /// The `SourceFile` that contains `node`.
    ///
    /// `parse_package` allocates every node of a file before the file's
    /// root, and files one after another, so the owner is the first root at
    /// or after `node`.
    pub fn file_of(&self, node: NodeIndex) -> Option<NodeIndex> {
        if node.is_none() {
            return None;
        }
        let at = self.files.partition_point(|file| file.0 < node.0);
        self.files.get(at).copied()
    }

    pub fn file_name_of(&self, node: NodeIndex) -> Option<&'a str> {
        let file = self.file_of(node)?;
        self.arena
            .get_source_file(file)
            .map(|sf| sf.file_name.as_str())
    }

    /// Record a diagnostic. An empty `source` is filled in with the name of
    /// the reporting analyzer.
    pub fn report(&mut self, mut diagnostic: Diagnostic) {
        if diagnostic.source.is_empty() {
            diagnostic.source = self.analyzer.name.to_string();
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn reported(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
