use crate::tracing_config::LogFormat;

#[test]
fn log_format_names_are_case_insensitive() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse("TREE"), LogFormat::Tree);
    assert_eq!(LogFormat::parse(" Json\n"), LogFormat::Json);
    assert_eq!(LogFormat::parse("text"), LogFormat::Text);
}

#[test]
fn unknown_log_format_falls_back_to_text() {
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("sarif"), LogFormat::Text);
}
