use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tombstone::commands::command_argument_builder;
use tombstone::handlers::*;
use tombstone_core::config::{DEFAULT_DATA_FILE, DEFAULT_DELAY, DEFAULT_MANIFEST_FILE};
use tombstone_core::harvest::TransportErrorPolicy;

fn sub_matches(argv: &[&str]) -> clap::ArgMatches {
    let matches = command_argument_builder()
        .try_get_matches_from(argv)
        .unwrap();
    let (_, sub) = matches.subcommand().unwrap();
    sub.clone()
}

#[test]
fn test_expand_path_plain() {
    assert_eq!(expand_path("data/out.csv"), PathBuf::from("data/out.csv"));
}

#[test]
fn test_expand_path_tilde() {
    let expanded = expand_path("~/urls.txt");
    assert!(!expanded.to_string_lossy().starts_with('~'));
    assert!(expanded.ends_with("urls.txt"));
}

#[test]
fn test_parse_transport_policy() {
    assert_eq!(
        parse_transport_policy("retry", 5),
        Ok(TransportErrorPolicy::Retry { attempts: 5 })
    );
    assert!(
        parse_transport_policy("sometimes", 5)
            .unwrap_err()
            .contains("Unknown transport error policy")
    );
}

#[test]
fn test_load_selector_table_default() {
    let table = load_selector_table(None).unwrap();
    assert_eq!(table.score, ".score");
}

#[test]
fn test_load_selector_table_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, r#"{{"artist": "h2.artist"}}"#)?;

    let path = PathBuf::from(temp_file.path());
    let table = load_selector_table(Some(&path))?;

    assert_eq!(table.artist, "h2.artist");
    assert_eq!(table.labels, ".labels-list li");
    Ok(())
}

#[test]
fn test_load_selector_table_bad_json() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "not json").unwrap();

    let path = PathBuf::from(temp_file.path());
    let err = load_selector_table(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("Failed to load selector table"));
}

#[test]
fn test_harvest_defaults() {
    let options = harvest_options_from_args(&sub_matches(&["tombstone", "harvest"])).unwrap();

    assert_eq!(options.manifest_path, PathBuf::from(DEFAULT_MANIFEST_FILE));
    assert_eq!(options.site.base_url, "https://pitchfork.com/");
    assert_eq!(options.on_transport_error, TransportErrorPolicy::Exhaust);
    assert_eq!(options.delay, DEFAULT_DELAY);
}

#[test]
fn test_harvest_flags() {
    let options = harvest_options_from_args(&sub_matches(&[
        "tombstone",
        "harvest",
        "-o",
        "out/urls.txt",
        "--base-url",
        "http://localhost:8080",
        "--on-error",
        "retry",
        "--retries",
        "2",
    ]))
    .unwrap();

    assert_eq!(options.manifest_path, PathBuf::from("out/urls.txt"));
    assert_eq!(options.site.base_url, "http://localhost:8080/");
    assert_eq!(
        options.on_transport_error,
        TransportErrorPolicy::Retry { attempts: 2 }
    );
}

#[test]
fn test_harvest_rejects_unknown_policy() {
    let result = command_argument_builder().try_get_matches_from([
        "tombstone",
        "harvest",
        "--on-error",
        "ignore",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_extract_defaults() {
    let options = extract_options_from_args(&sub_matches(&["tombstone", "extract"])).unwrap();

    assert_eq!(options.manifest_path, PathBuf::from(DEFAULT_MANIFEST_FILE));
    assert_eq!(options.data_path, PathBuf::from(DEFAULT_DATA_FILE));
    assert_eq!(options.selectors.year_released, ".single-album-tombstone__meta-year");
}

#[test]
fn test_extract_missing_selector_file() {
    let result = extract_options_from_args(&sub_matches(&[
        "tombstone",
        "extract",
        "-s",
        "/definitely/not/here.json",
    ]));
    assert!(result.is_err());
}

#[test]
fn test_option_error_keeps_context_chain() {
    let err = extract_options_from_args(&sub_matches(&[
        "tombstone",
        "extract",
        "--selectors",
        "/nonexistent/selectors.json",
    ]))
    .unwrap_err();

    let shown = format!("{:#}", err);
    assert!(shown.starts_with("Failed to load selector table /nonexistent/selectors.json: "));
    assert!(shown.len() > "Failed to load selector table /nonexistent/selectors.json: ".len());
}
