use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the sigchan binary.
#[derive(Parser, Debug)]
#[command(
    name = "sigchan",
    version,
    about = "Report unbuffered os.Signal channels passed to signal.Notify"
)]
pub struct CliArgs {
    /// Go files or directories to check. Directories are searched recursively.
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Apply suggested fixes to the source files in place.
    #[arg(long)]
    pub fix: bool,

    /// Output format for diagnostics.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Skip files matching this glob. May be given more than once.
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Do not check `_test.go` files.
    #[arg(long = "no-tests")]
    pub no_tests: bool,

    /// Path to a sigchan.json configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable color and source snippets in text output.
    #[arg(long)]
    pub pretty: Option<bool>,

    /// Disable color in text output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// List the available analyzers and exit.
    #[arg(long = "list-analyzers")]
    pub list_analyzers: bool,
}

impl CliArgs {
    /// Paths to check, defaulting to the current directory.
    pub fn paths_or_default(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.paths.clone()
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
