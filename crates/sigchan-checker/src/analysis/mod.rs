//! Analyzer descriptors, per-package passes and the driver that runs them.

pub mod analyzer;
pub mod driver;
pub mod inspector;
pub mod pass;

pub use analyzer::{Analyzer, AnalyzerOutput};
pub use driver::{AnalysisReport, run_analyzers};
pub use inspector::{INSPECT, Inspector};
pub use pass::Pass;
