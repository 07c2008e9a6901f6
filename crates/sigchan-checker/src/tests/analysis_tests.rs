use std::sync::atomic::{AtomicUsize, Ordering};

use sigchan_common::Diagnostic;
use sigchan_parser::{NodeKind, ParsedPackage, parse_package};

use crate::analysis::driver::schedule;
use crate::analysis::{Analyzer, AnalyzerOutput, INSPECT, Inspector, Pass, run_analyzers};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

fn parse(files: &[(&str, &str)]) -> ParsedPackage {
    let parsed = parse_package(
        files
            .iter()
            .map(|(name, text)| (name.to_string(), text.to_string())),
    );
    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    parsed
}

fn call_texts(parsed: &ParsedPackage, text: &str) -> Vec<String> {
    let inspector = Inspector::new(&parsed.arena, &parsed.files);
    let mut out = Vec::new();
    inspector.preorder(&[NodeKind::CallExpr], |call| {
        let span = parsed.arena.span(call).unwrap();
        out.push(span.slice(text).unwrap().to_string());
    });
    out
}

// =============================================================================
// Inspector
// =============================================================================

#[test]
fn inspector_visits_calls_outer_first_in_source_order() {
    let text = "package p\n\nfunc f() {\n\tg(h(1), k())\n\tm()\n}\n";
    let parsed = parse(&[("p.go", text)]);
    assert_eq!(
        call_texts(&parsed, text),
        ["g(h(1), k())", "h(1)", "k()", "m()"]
    );
}

#[test]
fn inspector_filter_selects_several_kinds() {
    let text = "package p\n\nvar x = 1\n\nfunc f() { _ = x }\n";
    let parsed = parse(&[("p.go", text)]);
    let inspector = Inspector::new(&parsed.arena, &parsed.files);

    let mut kinds = Vec::new();
    inspector.preorder(&[NodeKind::FuncDecl, NodeKind::ValueSpec], |node| {
        kinds.push(parsed.arena.kind(node).unwrap());
    });
    assert_eq!(kinds, [NodeKind::ValueSpec, NodeKind::FuncDecl]);

    let mut none = 0;
    inspector.preorder(&[NodeKind::SelectStmt], |_| none += 1);
    assert_eq!(none, 0);
}

#[test]
fn empty_filter_visits_every_reachable_node() {
    let text = "package p\n\nfunc f() {}\n";
    let mut parsed = parse(&[("p.go", text)]);
    let reachable = Inspector::new(&parsed.arena, &parsed.files).len();

    // Scratch nodes are not reachable from a file.
    parsed.arena.add_identifier(0, 0, "scratch");
    let inspector = Inspector::new(&parsed.arena, &parsed.files);
    assert_eq!(inspector.len(), reachable);

    let mut first = None;
    inspector.preorder(&[], |node| {
        first.get_or_insert(node);
    });
    assert_eq!(first, Some(parsed.files[0]));
}

#[test]
fn inspector_spans_every_file() {
    let parsed = parse(&[
        ("a.go", "package p\n\nfunc a() { x() }\n"),
        ("b.go", "package p\n\nfunc b() { y() }\n"),
    ]);
    let inspector = Inspector::new(&parsed.arena, &parsed.files);
    assert_eq!(inspector.nodes_of(NodeKind::CallExpr).count(), 2);
    assert_eq!(inspector.nodes_of(NodeKind::SourceFile).count(), 2);
}

// =============================================================================
// Driver
// =============================================================================

static COUNT_CALLS: Analyzer = Analyzer {
    name: "countcalls",
    doc: "count call expressions",
    requires: &[&INSPECT],
    run: run_count_calls,
};

fn run_count_calls(pass: &mut Pass<'_>) -> Result<AnalyzerOutput, AnalysisError> {
    let inspector = pass
        .result_of::<Inspector>(&INSPECT)
        .ok_or(AnalysisError::Failed {
            analyzer: "countcalls",
            message: "no inspector".to_string(),
        })?;
    let calls = inspector.nodes_of(NodeKind::CallExpr).count();
    Ok(Some(Box::new(calls)))
}

static REPORT_CALLS: Analyzer = Analyzer {
    name: "reportcalls",
    doc: "report the number of calls at the end and start of each file\n\nUsed by tests.",
    requires: &[&COUNT_CALLS],
    run: run_report_calls,
};

fn run_report_calls(pass: &mut Pass<'_>) -> Result<AnalyzerOutput, AnalysisError> {
    // Not declared as a requirement, so not visible.
    assert!(pass.result_of::<Inspector>(&INSPECT).is_none());
    // Declared, but asked for with the wrong type.
    assert!(pass.result_of::<String>(&COUNT_CALLS).is_none());

    let count = *pass.result_of::<usize>(&COUNT_CALLS).unwrap();
    for &file in pass.files.iter().rev() {
        let name = pass.file_name_of(file).unwrap().to_string();
        let end = pass.arena.span(file).unwrap().end;
        pass.report(Diagnostic::warning(name.clone(), end, 0, format!("{count} calls"), 1));
        let start = Diagnostic::warning(name, 0, 0, "start".to_string(), 1);
        pass.report(start.with_source("custom"));
    }
    Ok(None)
}

static FAILING: Analyzer = Analyzer {
    name: "failing",
    doc: "always fails",
    requires: &[],
    run: |_| {
        Err(AnalysisError::Failed {
            analyzer: "failing",
            message: "boom".to_string(),
        })
    },
};

static AFTER_FAILING: Analyzer = Analyzer {
    name: "afterfailing",
    doc: "requires a failing analyzer",
    requires: &[&FAILING],
    run: |_| panic!("must not run"),
};

static CYCLE_A: Analyzer = Analyzer {
    name: "cyclea",
    doc: "",
    requires: &[&CYCLE_B],
    run: |_| Ok(None),
};

static CYCLE_B: Analyzer = Analyzer {
    name: "cycleb",
    doc: "",
    requires: &[&CYCLE_A],
    run: |_| Ok(None),
};

static RUNS: AtomicUsize = AtomicUsize::new(0);

static COUNTED: Analyzer = Analyzer {
    name: "counted",
    doc: "",
    requires: &[],
    run: |_| {
        RUNS.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    },
};

static NEEDS_COUNTED_1: Analyzer = Analyzer {
    name: "needscounted1",
    doc: "",
    requires: &[&COUNTED],
    run: |_| Ok(None),
};

static NEEDS_COUNTED_2: Analyzer = Analyzer {
    name: "needscounted2",
    doc: "",
    requires: &[&COUNTED, &NEEDS_COUNTED_1],
    run: |_| Ok(None),
};

#[test]
fn schedule_puts_requirements_first() {
    let order = schedule(&[&REPORT_CALLS, &COUNT_CALLS]).unwrap();
    let names: Vec<_> = order.iter().map(|a| a.name).collect();
    assert_eq!(names, ["inspect", "countcalls", "reportcalls"]);
}

#[test]
fn schedule_rejects_cycles() {
    let err = schedule(&[&CYCLE_A]).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::DependencyCycle {
            analyzer: "cyclea",
            via: "cycleb"
        }
    ));
}

#[test]
fn shared_requirement_runs_once() {
    let parsed = parse(&[("p.go", "package p\n")]);
    let report = run_analyzers(
        &parsed,
        &[&NEEDS_COUNTED_2, &NEEDS_COUNTED_1, &COUNTED],
        &AnalysisConfig::default(),
    );
    assert!(report.errors.is_empty());
    assert_eq!(RUNS.load(Ordering::SeqCst), 1);
}

#[test]
fn results_flow_and_diagnostics_are_sorted() {
    let parsed = parse(&[
        ("a.go", "package p\n\nfunc a() { x(); y() }\n"),
        ("b.go", "package p\n\nfunc b() { z() }\n"),
    ]);
    let report = run_analyzers(&parsed, &[&REPORT_CALLS], &AnalysisConfig::default());
    assert!(report.errors.is_empty(), "{:?}", report.errors);

    let summary: Vec<_> = report
        .diagnostics
        .iter()
        .map(|d| (d.file.as_str(), d.message_text.as_str(), d.source.as_str()))
        .collect();
    assert_eq!(
        summary,
        [
            ("a.go", "start", "custom"),
            ("a.go", "3 calls", "reportcalls"),
            ("b.go", "start", "custom"),
            ("b.go", "3 calls", "reportcalls"),
        ]
    );
}

#[test]
fn failure_skips_dependents_but_not_others() {
    let parsed = parse(&[("p.go", "package p\n\nfunc f() { g() }\n")]);
    let report = run_analyzers(
        &parsed,
        &[&AFTER_FAILING, &COUNT_CALLS],
        &AnalysisConfig::default(),
    );
    assert_eq!(
        report.errors,
        [
            AnalysisError::Failed {
                analyzer: "failing",
                message: "boom".to_string(),
            },
            AnalysisError::MissingResult {
                analyzer: "afterfailing",
                requires: "failing",
            },
        ]
    );
}

#[test]
fn analyzer_summary_is_first_doc_line() {
    assert_eq!(
        REPORT_CALLS.summary(),
        "report the number of calls at the end and start of each file"
    );
    assert_eq!(CYCLE_A.summary(), "");
    assert!(REPORT_CALLS.requires(&COUNT_CALLS));
    assert!(!REPORT_CALLS.requires(&INSPECT));
}
