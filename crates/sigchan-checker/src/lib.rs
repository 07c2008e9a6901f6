//! Analysis framework and the `sigchanyzer` rule.
//!
//! An [`Analyzer`] is a named unit of analysis that may depend on the
//! results of other analyzers. [`run_analyzers`] binds a parsed package,
//! runs the requested analyzers (requirements first) and returns their
//! diagnostics in source order.
//!
//! The only rule shipped here is [`SIGCHANYZER`], which reports channels of
//! `os.Signal` created without buffering and then handed to
//! `signal.Notify`.

pub mod analysis;
pub mod config;
pub mod error;
pub mod sigchanyzer;

pub use analysis::{
    AnalysisReport, Analyzer, AnalyzerOutput, INSPECT, Inspector, Pass, run_analyzers,
};
pub use config::{AnalysisConfig, QualifiedRef, RuleConfig};
pub use error::AnalysisError;
pub use sigchanyzer::SIGCHANYZER;

/// Every rule the checker knows about. `inspect` is pulled in through
/// requirements and is not listed.
pub static ALL_ANALYZERS: &[&Analyzer] = &[&SIGCHANYZER];

/// Look up a rule by name.
pub fn find_analyzer(name: &str) -> Option<&'static Analyzer> {
    ALL_ANALYZERS.iter().copied().find(|a| a.name == name)
}

#[cfg(test)]
#[path = "tests/analysis_tests.rs"]
mod analysis_tests;

#[cfg(test)]
#[path = "tests/classify_tests.rs"]
mod classify_tests;
