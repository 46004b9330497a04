//! The ordered document store: the single source of truth for the form being built.
//!
//! Renderers need one document they can read and a fixed set of operations to change it. The store
//! owns that document behind an `Rc` and mutates it copy-on-write, so a [`Snapshot`] handed out
//! earlier never observes later edits. Every change to the sections renumbers the positional indices
//! of all sections and fields; every successful operation bumps the version and notifies subscribers
//! in registration order.
//!
//! Operations validate their indices before mutating. A rejected operation leaves the document,
//! the version and the active section exactly as they were.

use crate::error::{IndexKind, StoreError};
use crate::section::{Column, Direction, Field, FieldPosition, Section};
use serde::Serialize;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace, warn};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Immutable view of the store at one version.
pub struct Snapshot {
    /// Number of changes applied since the store was created.
    pub version: u64,
    /// Section currently focused for editing.
    pub active_section_index: usize,
    /// The document in display order.
    pub sections: Rc<Vec<Section>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Handle returned by [`DocumentStore::subscribe`], used to unsubscribe.
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Snapshot)>;

/// Largest column grid [`DocumentStore::change_column_count`] accepts.
pub const MAX_COLUMNS: usize = 64;

/// Owns the document and the active section, and publishes every change.
pub struct DocumentStore {
    sections: Rc<Vec<Section>>,
    template: Vec<Section>,
    active_section_index: usize,
    version: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStore")
            .field("sections", &self.sections)
            .field("active_section_index", &self.active_section_index)
            .field("version", &self.version)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

fn renumber(sections: &mut [Section]) {
    for (section_index, section) in sections.iter_mut().enumerate() {
        section.renumber(section_index);
    }
}

fn check_index<T>(items: &[T], index: usize, kind: IndexKind) -> Result<&T, StoreError> {
    items.get(index).ok_or(StoreError::InvalidIndex {
        kind,
        index,
        len: items.len(),
    })
}

impl DocumentStore {
    #[must_use]
    /// Creates a store whose document starts as (and resets to) `template`.
    ///
    /// Positional indices in the template are normalised to the actual layout.
    pub fn new(mut template: Vec<Section>) -> Self {
        renumber(&mut template);
        Self {
            sections: Rc::new(template.clone()),
            template,
            active_section_index: 0,
            version: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    #[must_use]
    /// Current document, active section and version.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: self.version,
            active_section_index: self.active_section_index,
            sections: Rc::clone(&self.sections),
        }
    }

    #[must_use]
    /// Sections in display order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    /// Section at `index`, if present.
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    #[must_use]
    /// Section currently focused for editing.
    pub fn active_section_index(&self) -> usize {
        self.active_section_index
    }

    #[must_use]
    /// Number of changes published so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    /// Sections restored by [`use_template`](Self::use_template).
    pub fn template(&self) -> &[Section] {
        &self.template
    }

    #[must_use]
    /// First field anywhere in the document with the given id.
    pub fn find_field(&self, id: &str) -> Option<&Field> {
        self.sections
            .iter()
            .flat_map(Section::iter_fields)
            .find(|field| field.id == id)
    }

    /// Registers a callback run with the new snapshot after every published change.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Snapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a callback; returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(registered, _)| *registered != id);
        self.subscribers.len() != before
    }

    // --- Sections ---

    /// Focuses the section at `index`.
    ///
    /// An empty document accepts only index 0.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidIndex`] if `index` is not a section of a non-empty document.
    pub fn set_active_section(&mut self, index: usize) -> Result<(), StoreError> {
        if !(self.sections.is_empty() && index == 0) {
            check_index(self.sections.as_slice(), index, IndexKind::Section)?;
        }
        self.active_section_index = index;
        self.publish("set_active_section");
        Ok(())
    }

    /// Appends a section to the end of the document and returns its position.
    pub fn add_section(&mut self, section: Section) -> usize {
        let sections = Rc::make_mut(&mut self.sections);
        sections.push(section);
        let index = sections.len() - 1;
        self.commit("add_section");
        index
    }

    /// Replaces the section at `section.section_index` wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidIndex`] if no section exists at that position.
    pub fn modify_section(&mut self, section: Section) -> Result<(), StoreError> {
        let index = section.section_index;
        check_index(self.sections.as_slice(), index, IndexKind::Section)?;
        Rc::make_mut(&mut self.sections)[index] = section;
        self.commit("modify_section");
        Ok(())
    }

    /// Moves the section at `index` one slot in `direction`.
    ///
    /// Returns `false` without publishing when the section is already at that end.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidIndex`] if no section exists at `index`.
    pub fn shift_section(&mut self, index: usize, direction: Direction) -> Result<bool, StoreError> {
        check_index(self.sections.as_slice(), index, IndexKind::Section)?;
        let Some(target) = direction.neighbour(index, self.sections.len()) else {
            debug!(index, ?direction, "section already at boundary");
            return Ok(false);
        };
        Rc::make_mut(&mut self.sections).swap(index, target);
        self.commit("shift_section");
        Ok(true)
    }

    /// Removes and returns the section at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidIndex`] if no section exists at `index`.
    pub fn delete_section(&mut self, index: usize) -> Result<Section, StoreError> {
        check_index(self.sections.as_slice(), index, IndexKind::Section)?;
        let removed = Rc::make_mut(&mut self.sections).remove(index);
        self.commit("delete_section");
        Ok(removed)
    }

    /// Replaces the document with a single empty "Intro" section and focuses it.
    pub fn reset_sections(&mut self) {
        self.sections = Rc::new(vec![Section::intro()]);
        self.active_section_index = 0;
        self.commit("reset_sections");
    }

    /// Replaces the document with a fresh copy of the template and focuses the first section.
    pub fn use_template(&mut self) {
        self.sections = Rc::new(self.template.clone());
        self.active_section_index = 0;
        self.commit("use_template");
    }

    // --- Fields ---

    /// Appends `field` to column `field.column_index` of section `field.section_index`.
    ///
    /// A section without a column grid gets a single empty column first. The position the field
    /// ended up at is returned; `field.field_index` is ignored.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidIndex`] if the section or column does not exist.
    /// - [`StoreError::ColumnNotInitialized`] if the section's columns were all removed.
    pub fn add_field(&mut self, field: Field) -> Result<FieldPosition, StoreError> {
        let section_index = field.section_index;
        let column_index = field.column_index;
        let section = check_index(self.sections.as_slice(), section_index, IndexKind::Section)?;
        let column_count = match section.fields.as_deref() {
            None => 1,
            Some([]) => return Err(StoreError::ColumnNotInitialized { section_index }),
            Some(columns) => columns.len(),
        };
        if column_index >= column_count {
            return Err(StoreError::InvalidIndex {
                kind: IndexKind::Column,
                index: column_index,
                len: column_count,
            });
        }

        let column = &mut self.grid_mut(section_index)[column_index];
        column.push(field);
        let position = FieldPosition::new(section_index, column_index, column.len() - 1);
        self.commit("add_field");
        Ok(position)
    }

    /// Merges `field` into the slot it names.
    ///
    /// The incoming id and type replace the stored ones, incoming properties override stored ones
    /// and properties the incoming field does not mention are kept. Naming the slot just past the
    /// end of a column appends `field` as is. A section with no columns gets a single empty one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidIndex`] if the section or column does not exist, or the field
    /// index is beyond the end of the column.
    pub fn modify_field(&mut self, field: Field) -> Result<(), StoreError> {
        let FieldPosition {
            section_index,
            column_index,
            field_index,
        } = field.position();
        let section = check_index(self.sections.as_slice(), section_index, IndexKind::Section)?;
        let column_len = match section.fields.as_deref() {
            None | Some([]) if column_index == 0 => 0,
            None | Some([]) => {
                return Err(StoreError::InvalidIndex {
                    kind: IndexKind::Column,
                    index: column_index,
                    len: 1,
                });
            }
            Some(columns) => check_index(columns, column_index, IndexKind::Column)?.len(),
        };
        if field_index > column_len {
            return Err(StoreError::InvalidIndex {
                kind: IndexKind::Field,
                index: field_index,
                len: column_len,
            });
        }

        let grid = self.grid_mut(section_index);
        if grid.is_empty() {
            grid.push(Column::new());
        }
        let column = &mut grid[column_index];
        if let Some(existing) = column.get_mut(field_index) {
            existing.merge(field);
        } else {
            column.push(field);
        }
        self.commit("modify_field");
        Ok(())
    }

    /// Moves the field at `position` one slot in `direction` within its column.
    ///
    /// Returns `false` without publishing when the field is already at that end.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ColumnNotInitialized`] if the section has no columns.
    /// - [`StoreError::InvalidIndex`] if the section, column or field does not exist.
    pub fn shift_field(
        &mut self,
        position: FieldPosition,
        direction: Direction,
    ) -> Result<bool, StoreError> {
        let column_len = self.existing_field(position)?;
        let Some(target) = direction.neighbour(position.field_index, column_len) else {
            debug!(?position, ?direction, "field already at boundary");
            return Ok(false);
        };
        self.grid_mut(position.section_index)[position.column_index]
            .swap(position.field_index, target);
        self.commit("shift_field");
        Ok(true)
    }

    /// Removes and returns the field at `position`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ColumnNotInitialized`] if the section has no columns.
    /// - [`StoreError::InvalidIndex`] if the section, column or field does not exist.
    pub fn delete_field(&mut self, position: FieldPosition) -> Result<Field, StoreError> {
        self.existing_field(position)?;
        let removed =
            self.grid_mut(position.section_index)[position.column_index].remove(position.field_index);
        self.commit("delete_field");
        Ok(removed)
    }

    // --- Layout ---

    /// Resizes the column grid of a section to exactly `count` columns.
    ///
    /// Growing appends empty columns. Shrinking drops the trailing columns together with every
    /// field in them.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidIndex`] if no section exists at `section_index`.
    /// - [`StoreError::TooManyColumns`] if `count` exceeds [`MAX_COLUMNS`].
    pub fn change_column_count(
        &mut self,
        section_index: usize,
        count: usize,
    ) -> Result<(), StoreError> {
        check_index(self.sections.as_slice(), section_index, IndexKind::Section)?;
        if count > MAX_COLUMNS {
            return Err(StoreError::TooManyColumns {
                requested: count,
                max: MAX_COLUMNS,
            });
        }
        let grid = self.grid_mut(section_index);
        let discarded: usize = grid.iter().skip(count).map(Vec::len).sum();
        grid.resize_with(count, Column::new);
        if discarded > 0 {
            warn!(section_index, count, discarded, "column shrink discarded fields");
        }
        self.commit("change_column_count");
        Ok(())
    }

    // --- Internals ---

    /// Column grid of a validated section, created with one empty column if absent.
    fn grid_mut(&mut self, section_index: usize) -> &mut Vec<Column> {
        Rc::make_mut(&mut self.sections)[section_index]
            .fields
            .get_or_insert_with(|| vec![Column::new()])
    }

    fn existing_columns(&self, section_index: usize) -> Result<&[Column], StoreError> {
        let section = check_index(self.sections.as_slice(), section_index, IndexKind::Section)?;
        match section.fields.as_deref() {
            None | Some([]) => Err(StoreError::ColumnNotInitialized { section_index }),
            Some(columns) => Ok(columns),
        }
    }

    /// Validates that `position` names an existing field and returns the length of its column.
    fn existing_field(&self, position: FieldPosition) -> Result<usize, StoreError> {
        let columns = self.existing_columns(position.section_index)?;
        let column = check_index(columns, position.column_index, IndexKind::Column)?;
        check_index(column, position.field_index, IndexKind::Field)?;
        Ok(column.len())
    }

    /// Restores positional invariants after the sections changed, then publishes.
    fn commit(&mut self, operation: &'static str) {
        let sections = Rc::make_mut(&mut self.sections);
        renumber(sections);
        let len = sections.len();
        if self.active_section_index >= len {
            self.active_section_index = len.saturating_sub(1);
        }
        self.publish(operation);
    }

    /// Bumps the version and hands the new snapshot to every subscriber.
    fn publish(&mut self, operation: &'static str) {
        self.version += 1;
        debug!(
            operation,
            version = self.version,
            sections = self.sections.len(),
            "document updated"
        );

        let snapshot = self.snapshot();
        for (id, subscriber) in &mut self.subscribers {
            trace!(subscription = id.0, version = snapshot.version, "notifying subscriber");
            subscriber(&snapshot);
        }
    }
}

#[cfg(test)]
#[path = "tests/store.rs"]
mod tests;
