use thiserror::Error;

/// Failure of one analyzer, or of the driver before any analyzer ran.
///
/// Errors are collected in the `AnalysisReport`; a failing analyzer does
/// not stop the others, only those that require its result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("invalid analysis configuration: {0}")]
    InvalidConfig(String),

    #[error("analyzer `{analyzer}` depends on itself through `{via}`")]
    DependencyCycle {
        analyzer: &'static str,
        via: &'static str,
    },

    #[error("analyzer `{analyzer}` skipped: required analyzer `{requires}` produced no result")]
    MissingResult {
        analyzer: &'static str,
        requires: &'static str,
    },

    #[error("analyzer `{analyzer}` failed: {message}")]
    Failed {
        analyzer: &'static str,
        message: String,
    },
}
