//! Section, column and field representation for the form document.
//!
//! A document is an ordered list of sections. Each section optionally owns a grid of columns,
//! and each column is an ordered list of fields. Sections and fields carry their own position
//! (`section_index`, `column_index`, `field_index`) so that renderers can address them without
//! walking the tree; the store keeps those positions in sync with the actual layout.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered list of fields sharing one layout column.
pub type Column = Vec<Field>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Named block of the document holding zero or more columns of fields.
pub struct Section {
    /// Heading shown for the section.
    pub name: String,
    /// Position of this section in the document.
    #[serde(default)]
    pub section_index: usize,
    /// Column grid, absent until the first field or column is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Column>>,
}

impl Section {
    #[must_use]
    /// Creates a section with no column grid.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            section_index: 0,
            fields: None,
        }
    }

    #[must_use]
    /// The section a freshly reset document starts with.
    pub fn intro() -> Self {
        Self::new("Intro")
    }

    #[must_use]
    /// Sets the position this section claims in the document.
    pub fn at(mut self, section_index: usize) -> Self {
        self.section_index = section_index;
        self
    }

    #[must_use]
    /// Replaces the column grid.
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.fields = Some(columns);
        self
    }

    #[must_use]
    /// Number of layout columns, zero when no grid exists yet.
    pub fn column_count(&self) -> usize {
        self.fields.as_ref().map_or(0, Vec::len)
    }

    #[must_use]
    /// Column at `column_index`, if the grid has one.
    pub fn column(&self, column_index: usize) -> Option<&Column> {
        self.fields.as_ref()?.get(column_index)
    }

    /// Iterates every field of the section, column by column.
    pub fn iter_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().flatten().flatten()
    }

    /// Rewrites the stored positions of this section and all its fields.
    pub(crate) fn renumber(&mut self, section_index: usize) {
        self.section_index = section_index;
        for (column_index, column) in self.fields.iter_mut().flatten().enumerate() {
            for (field_index, field) in column.iter_mut().enumerate() {
                field.section_index = section_index;
                field.column_index = column_index;
                field.field_index = field_index;
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Single input or display element placed in a column.
///
/// Only the identity, type and position are interpreted here. Everything else a field type needs
/// (labels, options, validation flags) lives in `config` and is passed through untouched.
pub struct Field {
    /// Identifier assigned by the caller.
    pub id: String,
    /// Field type name such as `"text"` or `"select"`.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Position of the owning section in the document.
    #[serde(default)]
    pub section_index: usize,
    /// Column holding this field within its section.
    #[serde(default)]
    pub column_index: usize,
    /// Position of this field within its column.
    #[serde(default)]
    pub field_index: usize,
    /// Type-specific properties, serialised alongside the structural keys.
    #[serde(flatten)]
    pub config: Map<String, Value>,
}

impl Field {
    #[must_use]
    /// Creates a field at the origin slot with no type-specific properties.
    pub fn new(id: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type: field_type.into(),
            section_index: 0,
            column_index: 0,
            field_index: 0,
            config: Map::new(),
        }
    }

    #[must_use]
    /// Targets the given section and column, leaving the field index alone.
    pub fn in_column(mut self, section_index: usize, column_index: usize) -> Self {
        self.section_index = section_index;
        self.column_index = column_index;
        self
    }

    #[must_use]
    /// Targets an exact slot.
    pub fn at(mut self, position: FieldPosition) -> Self {
        self.section_index = position.section_index;
        self.column_index = position.column_index;
        self.field_index = position.field_index;
        self
    }

    #[must_use]
    /// Adds or replaces one type-specific property.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    #[must_use]
    /// Slot this field claims to occupy.
    pub fn position(&self) -> FieldPosition {
        FieldPosition {
            section_index: self.section_index,
            column_index: self.column_index,
            field_index: self.field_index,
        }
    }

    /// Shallow merge: identity, type and position come from `incoming`, its properties override
    /// ours, and properties it does not mention are kept.
    pub fn merge(&mut self, incoming: Field) {
        self.id = incoming.id;
        self.field_type = incoming.field_type;
        self.section_index = incoming.section_index;
        self.column_index = incoming.column_index;
        self.field_index = incoming.field_index;
        self.config.extend(incoming.config);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Address of a field slot: section, then column, then position in the column.
pub struct FieldPosition {
    /// Section holding the column.
    pub section_index: usize,
    /// Column within the section.
    pub column_index: usize,
    /// Slot within the column.
    pub field_index: usize,
}

impl FieldPosition {
    #[must_use]
    /// Builds a position from its three coordinates.
    pub fn new(section_index: usize, column_index: usize, field_index: usize) -> Self {
        Self {
            section_index,
            column_index,
            field_index,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Direction of a one-slot shift.
pub enum Direction {
    /// Towards the start of the list.
    Up,
    /// Towards the end of the list.
    Down,
}

impl Direction {
    #[must_use]
    /// Neighbouring slot of `index` in a list of `len` items, `None` at the boundary.
    pub fn neighbour(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Self::Up => index.checked_sub(1),
            Self::Down => Some(index + 1).filter(|&next| next < len),
        }
    }
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
