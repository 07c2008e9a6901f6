#![allow(clippy::print_stderr, clippy::print_stdout)]

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;

use sigchan_checker::ALL_ANALYZERS;
use sigchan_cli::args::{CliArgs, OutputFormat};
use sigchan_cli::config::{find_config, load_config, resolve_settings};
use sigchan_cli::driver::{self, EXIT_ERROR};
use sigchan_cli::reporter::{Reporter, render_json};

fn main() {
    // Only installs a subscriber when SIGCHAN_LOG or RUST_LOG is set.
    sigchan_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let code = match run(&args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("sigchan: {error:#}");
            EXIT_ERROR
        }
    };
    std::process::exit(code);
}

fn run(args: &CliArgs) -> Result<i32> {
    if args.list_analyzers {
        for analyzer in ALL_ANALYZERS {
            println!("{}: {}", analyzer.name, analyzer.summary());
        }
        return Ok(driver::EXIT_SUCCESS);
    }

    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let config_path = args.config.clone().or_else(|| find_config(&cwd));
    let file_config = config_path.as_deref().map(load_config).transpose()?;
    let settings = resolve_settings(args, file_config)?;

    let summary = driver::run(&args.paths_or_default(), &settings, args.fix)?;
    let outcome = &summary.outcome;

    match args.format {
        OutputFormat::Json => {
            let json = render_json(&outcome.diagnostics, &outcome.sources)
                .context("failed to serialize diagnostics")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            let pretty = args.pretty.unwrap_or_else(|| std::io::stdout().is_terminal());
            if args.no_color {
                colored::control::set_override(false);
            }
            let mut reporter = Reporter::new(&outcome.sources)
                .with_color(pretty && !args.no_color)
                .with_snippets(pretty);
            // render() ends every diagnostic with a newline.
            print!("{}", reporter.render(&outcome.diagnostics));
        }
    }

    for error in &outcome.analysis_errors {
        eprintln!("sigchan: {error}");
    }
    for path in &summary.fixed {
        eprintln!("fixed {}", path.display());
    }
    Ok(summary.exit_code)
}
