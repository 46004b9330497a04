//! The edit plan replays a recorded sequence of store operations.
//!
//! Work done in a builder session can be captured as JSON and applied later to another store, for
//! scripting layout changes or seeding a document. Each entry names one store operation through its
//! `"op"` tag and carries the same arguments the store method takes.

use crate::error::{PlanError, StoreError};
use crate::section::{Direction, Field, FieldPosition, Section};
use crate::store::DocumentStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
/// Serialisable sequence of store operations applied in order.
pub struct EditPlan {
    /// Operations in application order.
    pub operations: Vec<Operation>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
/// One store operation with its arguments.
pub enum Operation {
    /// See [`DocumentStore::set_active_section`].
    SetActiveSection {
        /// Section to focus.
        index: usize,
    },
    /// See [`DocumentStore::add_section`].
    AddSection {
        /// Section to append.
        section: Section,
    },
    /// See [`DocumentStore::modify_section`].
    ModifySection {
        /// Replacement, addressed by its `section_index`.
        section: Section,
    },
    /// See [`DocumentStore::shift_section`].
    ShiftSection {
        /// Section to move.
        section_index: usize,
        /// Where to move it.
        direction: Direction,
    },
    /// See [`DocumentStore::delete_section`].
    DeleteSection {
        /// Section to remove.
        section_index: usize,
    },
    /// See [`DocumentStore::reset_sections`].
    ResetSections,
    /// See [`DocumentStore::use_template`].
    UseTemplate,
    /// See [`DocumentStore::add_field`].
    AddField {
        /// Field to append, addressed by its section and column.
        field: Field,
    },
    /// See [`DocumentStore::modify_field`].
    ModifyField {
        /// Field to merge, addressed by its full position.
        field: Field,
    },
    /// See [`DocumentStore::shift_field`].
    ShiftField {
        /// Slot of the field to move.
        position: FieldPosition,
        /// Where to move it.
        direction: Direction,
    },
    /// See [`DocumentStore::delete_field`].
    DeleteField {
        /// Slot of the field to remove.
        position: FieldPosition,
    },
    /// See [`DocumentStore::change_column_count`].
    ChangeColumnCount {
        /// Section to reshape.
        section_index: usize,
        /// Number of columns it should end up with.
        count: usize,
    },
}

impl Operation {
    #[must_use]
    /// Name of the store operation, as used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetActiveSection { .. } => "setActiveSection",
            Self::AddSection { .. } => "addSection",
            Self::ModifySection { .. } => "modifySection",
            Self::ShiftSection { .. } => "shiftSection",
            Self::DeleteSection { .. } => "deleteSection",
            Self::ResetSections => "resetSections",
            Self::UseTemplate => "useTemplate",
            Self::AddField { .. } => "addField",
            Self::ModifyField { .. } => "modifyField",
            Self::ShiftField { .. } => "shiftField",
            Self::DeleteField { .. } => "deleteField",
            Self::ChangeColumnCount { .. } => "changeColumnCount",
        }
    }

    /// Runs this operation against `store`.
    ///
    /// # Errors
    ///
    /// Returns whatever the corresponding store method rejects the arguments with.
    pub fn apply(&self, store: &mut DocumentStore) -> Result<(), StoreError> {
        match self {
            Self::SetActiveSection { index } => store.set_active_section(*index)?,
            Self::AddSection { section } => {
                store.add_section(section.clone());
            }
            Self::ModifySection { section } => store.modify_section(section.clone())?,
            Self::ShiftSection {
                section_index,
                direction,
            } => {
                store.shift_section(*section_index, *direction)?;
            }
            Self::DeleteSection { section_index } => {
                store.delete_section(*section_index)?;
            }
            Self::ResetSections => store.reset_sections(),
            Self::UseTemplate => store.use_template(),
            Self::AddField { field } => {
                store.add_field(field.clone())?;
            }
            Self::ModifyField { field } => store.modify_field(field.clone())?,
            Self::ShiftField {
                position,
                direction,
            } => {
                store.shift_field(*position, *direction)?;
            }
            Self::DeleteField { position } => {
                store.delete_field(*position)?;
            }
            Self::ChangeColumnCount {
                section_index,
                count,
            } => store.change_column_count(*section_index, *count)?,
        }
        Ok(())
    }
}

impl EditPlan {
    /// Applies every operation in order and returns how many were applied.
    ///
    /// Application stops at the first rejected operation. Operations before it stay applied; the
    /// rejected one changes nothing.
    ///
    /// # Errors
    ///
    /// Returns a [`PlanError`] naming the step and operation the store rejected.
    pub fn apply(&self, store: &mut DocumentStore) -> Result<usize, PlanError> {
        for (step, operation) in self.operations.iter().enumerate() {
            operation.apply(store).map_err(|source| PlanError {
                step,
                operation: operation.name(),
                source,
            })?;
            debug!(step, operation = operation.name(), "applied plan step");
        }
        Ok(self.operations.len())
    }
}

#[cfg(test)]
#[path = "tests/edit_plan.rs"]
mod tests;
