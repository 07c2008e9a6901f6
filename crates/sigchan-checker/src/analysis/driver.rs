//! Runs a set of analyzers over one parsed package.

use std::any::Any;

use rustc_hash::{FxHashMap, FxHashSet};
use sigchan_binder::bind_package;
use sigchan_common::Diagnostic;
use sigchan_parser::ParsedPackage;
use tracing::{debug, debug_span, warn};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::pass::Pass;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

/// Everything the analyzers produced for one package.
#[derive(Debug, Default)]
pub struct AnalysisReport {
    /// Sorted by file, then offset.
    pub diagnostics: Vec<Diagnostic>,
    pub errors: Vec<AnalysisError>,
}

impl AnalysisReport {
    fn failed(error: AnalysisError) -> Self {
        warn!(%error, "analysis did not run");
        AnalysisReport {
            diagnostics: Vec::new(),
            errors: vec![error],
        }
    }
}

/// Bind `package` and run `analyzers` over it.
///
/// Requirements run before the analyzers that need them, and every
/// analyzer runs at most once even when several others require it. An
/// analyzer that fails is recorded in `errors`; analyzers that require it
/// are skipped, the rest still run.
pub fn run_analyzers(
    package: &ParsedPackage,
    analyzers: &[&'static Analyzer],
    config: &AnalysisConfig,
) -> AnalysisReport {
    let _span = debug_span!("run_analyzers", files = package.files.len()).entered();

    if let Err(error) = config.validate() {
        return AnalysisReport::failed(error);
    }
    let order = match schedule(analyzers) {
        Ok(order) => order,
        Err(error) => return AnalysisReport::failed(error),
    };

    let binder = bind_package(&package.arena, &package.files);
    let resolver = binder.resolver(&package.arena);

    let mut results: FxHashMap<&'static str, Box<dyn Any>> = FxHashMap::default();
    let mut report = AnalysisReport::default();

    for analyzer in order {
        if let Some(missing) = analyzer
            .requires
            .iter()
            .find(|required| !results.contains_key(required.name))
        {
            let error = AnalysisError::MissingResult {
                analyzer: analyzer.name,
                requires: missing.name,
            };
            warn!(%error, "skipping analyzer");
            report.errors.push(error);
            continue;
        }

        let mut pass = Pass::new(analyzer, package, &resolver, config, &results);
        let outcome = (analyzer.run)(&mut pass);
        let diagnostics = pass.into_diagnostics();
        match outcome {
            Ok(output) => {
                debug!(
                    analyzer = analyzer.name,
                    diagnostics = diagnostics.len(),
                    "analyzer finished"
                );
                report.diagnostics.extend(diagnostics);
                results.insert(analyzer.name, output.unwrap_or_else(|| Box::new(())));
            }
            Err(error) => {
                warn!(analyzer = analyzer.name, %error, "analyzer failed");
                report.errors.push(error);
            }
        }
    }

    report.diagnostics.sort_by(|a, b| {
        (&a.file, a.start, a.length, &a.message_text).cmp(&(
            &b.file,
            b.start,
            b.length,
            &b.message_text,
        ))
    });
    report
}

/// Order `roots` and their transitive requirements so that every analyzer
/// comes after what it requires.
pub(crate) fn schedule(
    roots: &[&'static Analyzer],
) -> Result<Vec<&'static Analyzer>, AnalysisError> {
    let mut order = Vec::new();
    let mut done = FxHashSet::default();
    let mut visiting = Vec::new();
    for &root in roots {
        visit(root, &mut order, &mut done, &mut visiting)?;
    }
    Ok(order)
}

fn visit(
    analyzer: &'static Analyzer,
    order: &mut Vec<&'static Analyzer>,
    done: &mut FxHashSet<&'static str>,
    visiting: &mut Vec<&'static str>,
) -> Result<(), AnalysisError> {
    if done.contains(analyzer.name) {
        return Ok(());
    }
    if let Some(&via) = visiting.last()
        && visiting.contains(&analyzer.name)
    {
        return Err(AnalysisError::DependencyCycle {
            analyzer: analyzer.name,
            via,
        });
    }
    visiting.push(analyzer.name);
    for &required in analyzer.requires {
        visit(required, order, done, visiting)?;
    }
    visiting.pop();
    done.insert(analyzer.name);
    order.push(analyzer);
    Ok(())
}
