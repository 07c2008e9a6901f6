use std::any::Any;
use std::fmt;

use crate::analysis::pass::Pass;
use crate::error::AnalysisError;

/// Value an analyzer hands to the analyzers that require it. `None` when
/// the analyzer only reports diagnostics.
pub type AnalyzerOutput = Option<Box<dyn Any>>;

pub type RunFn = fn(&mut Pass<'_>) -> Result<AnalyzerOutput, AnalysisError>;

/// Static description of one analysis.
///
/// Analyzers are declared as `static` items and identified by `name`;
/// `requires` lists the analyzers whose results `run` reads through
/// [`Pass::result_of`].
pub struct Analyzer {
    pub name: &'static str,
    pub doc: &'static str,
    pub requires: &'static [&'static Analyzer],
    pub run: RunFn,
}

impl Analyzer {
    /// First line of `doc`, for listings.
    pub fn summary(&self) -> &'static str {
        self.doc.lines().next().unwrap_or_default()
    }

    pub fn requires(&self, other: &Analyzer) -> bool {
        self.requires.iter().any(|r| r.name == other.name)
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("name", &self.name)
            .field(
                "requires",
                &self.requires.iter().map(|r| r.name).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
