use super::Config;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn test_missing_file_uses_defaults() {
    let cfg = Config::load_from(Path::new("/nonexistent/formgrid.toml"));

    assert_eq!(cfg, Config::default());
    assert!(cfg.pretty);
    assert_eq!(cfg.template(), None);
}

#[test]
fn test_file_overrides_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "template_path = \"forms/demo.json\"\npretty = false\nlog_filter = \"debug\""
    )
    .unwrap();

    let cfg = Config::load_from(file.path());

    assert_eq!(cfg.template(), Some(Path::new("forms/demo.json")));
    assert!(!cfg.pretty);
    assert_eq!(cfg.log_filter, "debug");
}

#[test]
fn test_empty_file_matches_default() {
    let parsed = facet_toml::from_str::<Config>("").unwrap();

    assert_eq!(parsed, Config::default());

    let file = NamedTempFile::new().unwrap();
    assert_eq!(Config::load_from(file.path()), Config::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "pretty = false").unwrap();

    let cfg = Config::load_from(file.path());

    assert_eq!(
        cfg,
        Config {
            pretty: false,
            ..Config::default()
        }
    );
}
