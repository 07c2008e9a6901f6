//! Library half of the `sigchan` binary: argument parsing, configuration,
//! package discovery, parallel checking, fixing and reporting.

pub mod args;
pub mod config;
pub mod discovery;
pub mod driver;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;

#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;
