use super::{load_template, parse_template};
use crate::error::TemplateError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn test_parse_bare_array() {
    let sections = parse_template(
        r#"[
            {"name": "Intro", "sectionIndex": 0},
            {"name": "Contact", "sectionIndex": 1, "fields": [
                [{"id": "email", "type": "text", "label": "Email"}],
                []
            ]}
        ]"#,
    )
    .unwrap();

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].fields, None);
    assert_eq!(sections[1].column_count(), 2);
    assert_eq!(sections[1].column(0).unwrap()[0].id, "email");
}

#[test]
fn test_parse_snapshot_shaped_object() {
    let sections = parse_template(
        r#"{"version": 3, "activeSectionIndex": 0, "sections": [{"name": "Only"}]}"#,
    )
    .unwrap();

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].name, "Only");
}

#[test]
fn test_parse_rejects_non_template() {
    assert!(matches!(
        parse_template(r#"{"name": "not a list"}"#),
        Err(TemplateError::Json(_))
    ));
}

#[test]
fn test_load_template_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"[{{"name": "From disk"}}]"#).unwrap();

    let sections = load_template(file.path()).unwrap();

    assert_eq!(sections[0].name, "From disk");
}

#[test]
fn test_load_template_missing_file() {
    let err = load_template(Path::new("/nonexistent/template.json")).unwrap_err();

    assert!(matches!(err, TemplateError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/template.json"));
}
