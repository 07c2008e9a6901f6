use sigchan_checker::sigchanyzer::{FIX_MESSAGE, MESSAGE};
use sigchan_checker::{
    AnalysisConfig, AnalysisReport, QualifiedRef, SIGCHANYZER, find_analyzer, run_analyzers,
};
use sigchan_common::diagnostics::diagnostic_codes;
use sigchan_common::{DiagnosticCategory, apply_text_edits};
use sigchan_parser::{ParsedPackage, parse_package};

fn parse(files: &[(&str, &str)]) -> ParsedPackage {
    let parsed = parse_package(
        files
            .iter()
            .map(|(name, text)| (name.to_string(), text.to_string())),
    );
    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    parsed
}

fn check_with(source: &str, config: &AnalysisConfig) -> AnalysisReport {
    let parsed = parse(&[("main.go", source)]);
    let report = run_analyzers(&parsed, &[&SIGCHANYZER], config);
    assert!(report.errors.is_empty(), "{:?}", report.errors);
    report
}

fn check(source: &str) -> AnalysisReport {
    check_with(source, &AnalysisConfig::default())
}

fn fix(source: &str, report: &AnalysisReport) -> String {
    let edits: Vec<_> = report
        .diagnostics
        .iter()
        .flat_map(|d| d.suggested_fixes.iter())
        .flat_map(|f| f.text_edits.iter().cloned())
        .collect();
    apply_text_edits(source, &edits).unwrap()
}

fn text_at(source: &str, start: u32, end: u32) -> &str {
    &source[start as usize..end as usize]
}

const HEADER: &str = "package main\n\nimport (\n\t\"os\"\n\t\"os/signal\"\n)\n\n";

fn program(body: &str) -> String {
    format!("{HEADER}func main() {{\n{body}}}\n")
}

// =============================================================================
// Bound channels
// =============================================================================

#[test]
fn bound_unbuffered_channel_is_reported_at_the_notify_call() {
    let source = program("\tc := make(chan os.Signal)\n\tsignal.Notify(c, os.Interrupt)\n\t<-c\n");
    let report = check(&source);

    assert_eq!(report.diagnostics.len(), 1);
    let diag = &report.diagnostics[0];
    assert_eq!(diag.message_text, MESSAGE);
    assert_eq!(diag.file, "main.go");
    assert_eq!(diag.code, diagnostic_codes::UNBUFFERED_SIGNAL_CHANNEL);
    assert_eq!(diag.category, DiagnosticCategory::Warning);
    assert_eq!(
        text_at(&source, diag.start, diag.start + diag.length),
        "signal.Notify(c, os.Interrupt)"
    );

    assert_eq!(diag.suggested_fixes.len(), 1);
    let fix = &diag.suggested_fixes[0];
    assert_eq!(fix.message, FIX_MESSAGE);
    assert_eq!(fix.text_edits.len(), 1);
    let edit = &fix.text_edits[0];
    assert_eq!(
        text_at(&source, edit.start, edit.end),
        "make(chan os.Signal)"
    );
    assert_eq!(edit.new_text, "make(chan os.Signal, 1)");
}

#[test]
fn bound_buffered_channel_is_not_reported() {
    let report = check(&program(
        "\tc := make(chan os.Signal, 1)\n\tsignal.Notify(c, os.Interrupt)\n",
    ));
    assert!(report.diagnostics.is_empty());
}

#[test]
fn var_spec_and_package_level_channels_are_followed() {
    let source = format!(
        "{HEADER}var global = make(chan os.Signal)\n\nfunc main() {{\n\tvar local = make(chan os.Signal)\n\tsignal.Notify(local)\n\tsignal.Notify(global)\n}}\n"
    );
    let report = check(&source);
    assert_eq!(report.diagnostics.len(), 2);
    assert_eq!(
        fix(&source, &report),
        source.replace("make(chan os.Signal)", "make(chan os.Signal, 1)")
    );
}

#[test]
fn channel_declared_in_another_file_is_followed() {
    let decl = "package main\n\nimport \"os\"\n\nvar sigs = make(chan os.Signal)\n";
    let main = "package main\n\nimport (\n\t\"os\"\n\t\"os/signal\"\n)\n\nfunc main() {\n\tsignal.Notify(sigs, os.Interrupt)\n}\n";
    let parsed = parse(&[("decl.go", decl), ("main.go", main)]);
    let report = run_analyzers(&parsed, &[&SIGCHANYZER], &AnalysisConfig::default());

    assert_eq!(report.diagnostics.len(), 1);
    let diag = &report.diagnostics[0];
    // The diagnostic is anchored in main.go; the edit names decl.go.
    assert_eq!(diag.file, "main.go");
    let edit = &diag.suggested_fixes[0].text_edits[0];
    assert_eq!(edit.file, "decl.go");
    assert_eq!(edit.target_file(&diag.file), "decl.go");
    assert_eq!(text_at(decl, edit.start, edit.end), "make(chan os.Signal)");
}

// =============================================================================
// Inline channels
// =============================================================================

#[test]
fn inline_unbuffered_channel_is_reported_with_fix() {
    let source = program("\tsignal.Notify(make(chan os.Signal), os.Interrupt)\n");
    let report = check(&source);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(
        fix(&source, &report),
        program("\tsignal.Notify(make(chan os.Signal, 1), os.Interrupt)\n")
    );
}

#[test]
fn inline_buffered_channel_is_not_reported() {
    for capacity in ["1", "10", "0x1", "0b1", "0o17", "017", "1_000"] {
        let report = check(&program(&format!(
            "\tsignal.Notify(make(chan os.Signal, {capacity}), os.Interrupt)\n"
        )));
        assert!(report.diagnostics.is_empty(), "capacity {capacity}");
    }
}

#[test]
fn explicit_capacity_is_never_rewritten() {
    // Zero and computed capacities are left to the author.
    for capacity in ["0", "n", "len(os.Args)"] {
        let report = check(&program(&format!(
            "\tn := 2\n\t_ = n\n\tc := make(chan os.Signal, {capacity})\n\tsignal.Notify(c)\n\tsignal.Notify(make(chan os.Signal, {capacity}))\n"
        )));
        assert!(report.diagnostics.is_empty(), "capacity {capacity}");
    }
}

// =============================================================================
// Registration call shapes
// =============================================================================

#[test]
fn import_aliases_are_transparent() {
    let source = "package main\n\nimport (\n\t\"os\"\n\tao \"os\"\n\tsig \"os/signal\"\n)\n\nfunc main() {\n\tc := make(chan ao.Signal)\n\tsig.Notify(c, os.Interrupt)\n}\n";
    let report = check(source);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(
        report.diagnostics[0].suggested_fixes[0].text_edits[0].new_text,
        "make(chan ao.Signal, 1)"
    );
}

#[test]
fn variable_holding_notify_is_followed_once() {
    let source = program(
        "\tregister := signal.Notify\n\tc := make(chan os.Signal)\n\tregister(c, os.Interrupt)\n",
    );
    let report = check(&source);
    assert_eq!(report.diagnostics.len(), 1);
    let diag = &report.diagnostics[0];
    assert_eq!(
        text_at(&source, diag.start, diag.start + diag.length),
        "register(c, os.Interrupt)"
    );
}

#[test]
fn alias_of_an_alias_is_missed() {
    let report = check(&program(
        "\tf := signal.Notify\n\tg := f\n\tc := make(chan os.Signal)\n\tg(c, os.Interrupt)\n",
    ));
    assert!(
        report.diagnostics.is_empty(),
        "only one hop of aliasing is followed: {:?}",
        report.diagnostics
    );
}

#[test]
fn other_functions_named_notify_are_ignored() {
    let source = "package main\n\nimport \"os\"\n\ntype bus struct{}\n\nfunc (bus) Notify(c chan os.Signal) {}\n\nfunc Notify(c chan os.Signal) {}\n\nfunc main() {\n\tvar signal bus\n\tsignal.Notify(make(chan os.Signal))\n\tNotify(make(chan os.Signal))\n}\n";
    assert!(check(source).diagnostics.is_empty());
}

#[test]
fn dot_import_is_not_resolved() {
    let source = "package main\n\nimport (\n\t\"os\"\n\t. \"os/signal\"\n)\n\nfunc main() {\n\tNotify(make(chan os.Signal), os.Interrupt)\n}\n";
    assert!(check(source).diagnostics.is_empty());
}

#[test]
fn notify_without_arguments_is_ignored() {
    assert!(check(&program("\tsignal.Notify()\n")).diagnostics.is_empty());
}

// =============================================================================
// Creation shapes
// =============================================================================

#[test]
fn arity_mismatched_declaration_abstains() {
    let source = format!(
        "{HEADER}func pair() (chan os.Signal, error) {{\n\treturn make(chan os.Signal), nil\n}}\n\nfunc main() {{\n\tc, _ := pair()\n\tsignal.Notify(c)\n\tvar d chan os.Signal\n\td = make(chan os.Signal)\n\tsignal.Notify(d)\n}}\n"
    );
    assert!(check(&source).diagnostics.is_empty());
}

#[test]
fn parameters_and_range_variables_abstain() {
    let source = format!(
        "{HEADER}func watch(c chan os.Signal, all []chan os.Signal) {{\n\tsignal.Notify(c)\n\tfor _, d := range all {{\n\t\tsignal.Notify(d)\n\t}}\n}}\n"
    );
    assert!(check(&source).diagnostics.is_empty());
}

#[test]
fn shadowed_make_is_not_the_builtin() {
    let source = format!(
        "{HEADER}func main() {{\n\tmake := func(t interface{{}}) chan os.Signal {{ return nil }}\n\tc := make(nil)\n\tsignal.Notify(c)\n}}\n"
    );
    assert!(check(&source).diagnostics.is_empty());
}

#[test]
fn element_type_is_compared_by_identity() {
    let source = format!(
        "{HEADER}type alias = os.Signal\ntype defined os.Signal\ntype Signal int\n\nfunc main() {{\n\ta := make(chan alias)\n\tsignal.Notify(a)\n\td := make(chan defined)\n\tsignal.Notify(d)\n\ts := make(chan Signal)\n\tsignal.Notify(s)\n\ti := make(chan int)\n\tsignal.Notify(i)\n}}\n"
    );
    let report = check(&source);
    assert_eq!(report.diagnostics.len(), 1);
    let edit = &report.diagnostics[0].suggested_fixes[0].text_edits[0];
    assert_eq!(edit.new_text, "make(chan alias, 1)");
}

#[test]
fn directional_channel_types_are_creations() {
    let source = program("\tc := make(chan<- os.Signal)\n\tsignal.Notify(c)\n");
    let report = check(&source);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(
        report.diagnostics[0].suggested_fixes[0].text_edits[0].new_text,
        "make(chan<- os.Signal, 1)"
    );
}

#[test]
fn parenthesized_and_non_call_origins_abstain() {
    let report = check(&program(
        "\tc := (make(chan os.Signal))\n\tsignal.Notify(c)\n\tvar chans [1]chan os.Signal\n\tsignal.Notify(chans[0])\n",
    ));
    assert!(report.diagnostics.is_empty());
}

// =============================================================================
// Fixes
// =============================================================================

#[test]
fn applying_fixes_is_idempotent() {
    let source = program(
        "\tc := make(chan os.Signal)\n\tsignal.Notify(c, os.Interrupt)\n\tsignal.Notify(make(chan os.Signal))\n",
    );
    let first = check(&source);
    assert_eq!(first.diagnostics.len(), 2);

    let fixed = fix(&source, &first);
    assert!(check(&fixed).diagnostics.is_empty());
}

#[test]
fn shared_channel_yields_one_edit_after_deduplication() {
    let source = program(
        "\tc := make(chan os.Signal)\n\tsignal.Notify(c, os.Interrupt)\n\tsignal.Notify(c, os.Kill)\n",
    );
    let report = check(&source);
    assert_eq!(report.diagnostics.len(), 2);
    assert_eq!(
        report.diagnostics[0].suggested_fixes,
        report.diagnostics[1].suggested_fixes
    );
    assert_eq!(
        fix(&source, &report),
        program(
            "\tc := make(chan os.Signal, 1)\n\tsignal.Notify(c, os.Interrupt)\n\tsignal.Notify(c, os.Kill)\n"
        )
    );
}

#[test]
fn analysis_leaves_the_arena_untouched() {
    let source = program("\tsignal.Notify(make(chan os.Signal))\n");
    let parsed = parse(&[("main.go", source.as_str())]);
    let before = parsed.arena.len();
    let report = run_analyzers(&parsed, &[&SIGCHANYZER], &AnalysisConfig::default());
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(parsed.arena.len(), before);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn configured_capacity_is_written_by_the_fix() {
    let mut config = AnalysisConfig::default();
    config.sigchanyzer.capacity = 4;
    let source = program("\tsignal.Notify(make(chan os.Signal))\n");
    let report = check_with(&source, &config);
    assert_eq!(
        report.diagnostics[0].suggested_fixes[0].text_edits[0].new_text,
        "make(chan os.Signal, 4)"
    );
}

#[test]
fn configured_registration_and_signal_type() {
    let mut config = AnalysisConfig::default();
    config.sigchanyzer.registration = QualifiedRef::new("example.com/events", "Register");
    config.sigchanyzer.signal_type = QualifiedRef::new("example.com/events", "Signal");
    let source = "package main\n\nimport \"example.com/events\"\n\nfunc main() {\n\tevents.Register(make(chan events.Signal), events.X)\n\tc := make(chan events.Signal, 2)\n\tevents.Register(c, events.X)\n}\n";
    let report = check_with(source, &config);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(
        report.diagnostics[0].suggested_fixes[0].text_edits[0].new_text,
        "make(chan events.Signal, 1)"
    );
}

#[test]
fn invalid_config_is_an_error_not_a_panic() {
    let mut config = AnalysisConfig::default();
    config.sigchanyzer.capacity = 0;
    let source = program("");
    let parsed = parse(&[("main.go", source.as_str())]);
    let report = run_analyzers(&parsed, &[&SIGCHANYZER], &config);
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn analyzer_identity() {
    let analyzer = find_analyzer("sigchanyzer").unwrap();
    assert_eq!(analyzer.name, "sigchanyzer");
    assert_eq!(
        analyzer.doc,
        "check for unbuffered channel of os.Signal, which can be at risk of missing the signal."
    );
    assert_eq!(analyzer.requires.len(), 1);
    assert_eq!(analyzer.requires[0].name, "inspect");
    assert!(find_analyzer("inspect").is_none());
}
