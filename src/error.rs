//! Error types for store operations, template loading and edit plans.
//!
//! Store operations validate every index before touching the document, so any of these errors
//! means nothing was mutated and no subscriber was notified.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Level of the document tree an index refers to.
pub enum IndexKind {
    /// Position in the document.
    Section,
    /// Column within a section.
    Column,
    /// Slot within a column.
    Field,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Section => "section",
            Self::Column => "column",
            Self::Field => "field",
        })
    }
}

/// Rejected store operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Index outside the current bounds of the addressed list.
    #[error("{kind} index {index} is out of bounds (length {len})")]
    InvalidIndex {
        /// Which list was addressed.
        kind: IndexKind,
        /// The offending index.
        index: usize,
        /// Length of the list at the time of the call.
        len: usize,
    },

    /// Field operation on a section that has no columns to hold fields.
    #[error("section {section_index} has no columns")]
    ColumnNotInitialized {
        /// Section that lacks columns.
        section_index: usize,
    },

    /// Column grid larger than the store allows.
    #[error("{requested} columns requested, at most {max} allowed")]
    TooManyColumns {
        /// Column count asked for.
        requested: usize,
        /// Largest accepted column count.
        max: usize,
    },
}

/// Failure to obtain the initial sections from a template source.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The template file could not be read.
    #[error("failed to read template {}: {source}", .path.display())]
    Io {
        /// Template location.
        path: PathBuf,
        /// Underlying read error.
        #[source]
        source: io::Error,
    },

    /// The template is not a section list.
    #[error("invalid template: {0}")]
    Json(#[from] serde_json::Error),
}

/// Edit plan stopped at an operation the store rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("step {step} ({operation}) failed: {source}")]
pub struct PlanError {
    /// Zero-based position of the failing operation in the plan.
    pub step: usize,
    /// Name of the failing operation.
    pub operation: &'static str,
    /// Why the store rejected it.
    #[source]
    pub source: StoreError,
}
