//! Settings that flow from `sigchan.json` and the command line into every
//! `Pass`.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// A package-qualified Go name, such as `os/signal.Notify`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QualifiedRef {
    /// Import path of the defining package.
    pub package: String,
    pub name: String,
}

impl QualifiedRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        QualifiedRef {
            package: package.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for QualifiedRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// What `sigchanyzer` looks for and what its fix inserts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct RuleConfig {
    /// The call that registers a channel for signal delivery.
    pub registration: QualifiedRef,
    /// Element type of the registered channel.
    pub signal_type: QualifiedRef,
    /// Buffer size written by the suggested fix.
    pub capacity: u64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            registration: QualifiedRef::new("os/signal", "Notify"),
            signal_type: QualifiedRef::new("os", "Signal"),
            capacity: 1,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct AnalysisConfig {
    pub sigchanyzer: RuleConfig,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let rule = &self.sigchanyzer;
        if rule.capacity == 0 {
            return Err(AnalysisError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        for (field, name) in [
            ("registration", &rule.registration),
            ("signalType", &rule.signal_type),
        ] {
            if name.package.is_empty() || name.name.is_empty() {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{field} needs both a package and a name"
                )));
            }
        }
        Ok(())
    }
}
