//! sigchanyzer benchmarks.
//!
//! Measures parse + bind + analysis over generated packages with a growing
//! number of `signal.Notify` sites.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sigchan_checker::{AnalysisConfig, SIGCHANYZER, run_analyzers};
use sigchan_parser::parse_package;

/// A handler mixing bound, inline, buffered and unbuffered channels.
const HANDLER: &str = r#"
func handler_N() {
	c := make(chan os.Signal)
	signal.Notify(c, os.Interrupt)
	d := make(chan os.Signal, 1)
	signal.Notify(d, os.Interrupt)
	signal.Notify(make(chan os.Signal), os.Interrupt)
	for i := 0; i < 10; i++ {
		if i%2 == 0 {
			select {
			case <-c:
			case <-d:
			}
		}
	}
}
"#;

fn package_source(handlers: usize) -> String {
    let mut source = String::from("package main\n\nimport (\n\t\"os\"\n\t\"os/signal\"\n)\n");
    for n in 0..handlers {
        source.push_str(&HANDLER.replace("_N", &format!("_{n}")));
    }
    source
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("sigchanyzer");
    let config = AnalysisConfig::default();

    for handlers in [1usize, 10, 100, 500] {
        let source = package_source(handlers);
        group.bench_with_input(BenchmarkId::new("parse", handlers), &source, |b, source| {
            b.iter(|| {
                let parsed = parse_package([("main.go".to_string(), source.clone())]);
                black_box(parsed.arena.len())
            })
        });

        let parsed = parse_package([("main.go".to_string(), source.clone())]);
        group.bench_with_input(BenchmarkId::new("analyze", handlers), &parsed, |b, parsed| {
            b.iter(|| {
                let report = run_analyzers(parsed, &[&SIGCHANYZER], &config);
                black_box(report.diagnostics.len())
            })
        });
    }

    group.finish();
}

criterion_group!(sigchanyzer_benches, bench_analysis);
criterion_main!(sigchanyzer_benches);
