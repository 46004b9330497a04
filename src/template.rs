//! Template loading for the initial document.
//!
//! A template is plain JSON in the same shape the store publishes: either a bare array of sections
//! or an object carrying them under `"sections"` (which is what a serialised snapshot looks like).

use crate::error::TemplateError;
use crate::section::Section;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum TemplateDocument {
    Bare(Vec<Section>),
    Wrapped { sections: Vec<Section> },
}

/// Parse template JSON into sections.
///
/// # Errors
///
/// Returns an error if the JSON is neither a section array nor an object with a `sections` array.
pub fn parse_template(json: &str) -> Result<Vec<Section>, TemplateError> {
    let document: TemplateDocument = serde_json::from_str(json)?;
    Ok(match document {
        TemplateDocument::Bare(sections) | TemplateDocument::Wrapped { sections } => sections,
    })
}

/// Read and parse a template file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a valid template.
pub fn load_template(path: &Path) -> Result<Vec<Section>, TemplateError> {
    let contents = fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_template(&contents)
}

#[cfg(test)]
#[path = "tests/template.rs"]
mod tests;
