use clap::Parser;
use std::path::Path;

use sigchan_checker::QualifiedRef;

use crate::args::CliArgs;
use crate::config::{ConfigError, FileConfig, parse_config, resolve_settings};

fn args(extra: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("sigchan").chain(extra.iter().copied())).unwrap()
}

#[test]
fn parses_full_config() {
    let config = parse_config(
        r#"{
            "registration": { "package": "example.com/sig", "name": "Watch" },
            "signalType": { "package": "os", "name": "Signal" },
            "capacity": 4,
            "exclude": ["**/generated/**"],
            "tests": false
        }"#,
        Path::new("sigchan.json"),
    )
    .unwrap();
    assert_eq!(
        config.registration,
        Some(QualifiedRef::new("example.com/sig", "Watch"))
    );
    assert_eq!(config.capacity, Some(4));
    assert_eq!(config.exclude, vec!["**/generated/**"]);
    assert_eq!(config.tests, Some(false));
}

#[test]
fn empty_config_is_all_defaults() {
    let config = parse_config("{}", Path::new("sigchan.json")).unwrap();
    assert_eq!(config, FileConfig::default());
}

#[test]
fn unknown_field_is_an_error() {
    let err = parse_config(r#"{ "capcity": 2 }"#, Path::new("conf/sigchan.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    let message = err.to_string();
    assert!(message.contains("conf/sigchan.json"), "{message}");
    assert!(message.contains("capcity"), "{message}");
}

#[test]
fn file_values_reach_the_rule() {
    let file = FileConfig {
        registration: Some(QualifiedRef::new("example.com/sig", "Watch")),
        capacity: Some(8),
        ..FileConfig::default()
    };
    let settings = resolve_settings(&args(&[]), Some(file)).unwrap();
    let rule = &settings.analysis.sigchanyzer;
    assert_eq!(
        rule.registration,
        QualifiedRef::new("example.com/sig", "Watch")
    );
    assert_eq!(rule.signal_type, QualifiedRef::new("os", "Signal"));
    assert_eq!(rule.capacity, 8);
    assert!(settings.include_tests);
}

#[test]
fn zero_capacity_is_rejected() {
    let file = FileConfig {
        capacity: Some(0),
        ..FileConfig::default()
    };
    let err = resolve_settings(&args(&[]), Some(file)).unwrap_err();
    assert!(matches!(err, ConfigError::Analysis(_)));
}

#[test]
fn exclude_patterns_merge() {
    let file = FileConfig {
        exclude: vec!["**/generated/**".to_string()],
        ..FileConfig::default()
    };
    let settings = resolve_settings(&args(&["--exclude", "*_mock.go"]), Some(file)).unwrap();
    assert_eq!(
        settings.exclude_patterns,
        vec!["**/generated/**", "*_mock.go"]
    );
    assert!(settings.is_excluded(Path::new("api/generated/types.go")));
    assert!(settings.is_excluded(Path::new("store_mock.go")));
    // `*` does not cross directories.
    assert!(!settings.is_excluded(Path::new("store/store_mock.go")));
    assert!(!settings.is_excluded(Path::new("api/types.go")));
}

#[test]
fn no_tests_flag_wins() {
    let file = FileConfig {
        tests: Some(true),
        ..FileConfig::default()
    };
    let settings = resolve_settings(&args(&["--no-tests"]), Some(file)).unwrap();
    assert!(!settings.include_tests);

    let file = FileConfig {
        tests: Some(false),
        ..FileConfig::default()
    };
    let settings = resolve_settings(&args(&[]), Some(file)).unwrap();
    assert!(!settings.include_tests);
}

#[test]
fn bad_glob_is_reported() {
    let err = resolve_settings(&args(&["--exclude", "a[b"]), None).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Glob { ref pattern, .. } if pattern == "a[b"
    ));
}
