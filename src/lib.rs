//! formgrid: an ordered section/column/field document store for form builders.
//!
//! The [`store::DocumentStore`] owns the document and exposes the operations a builder UI needs;
//! [`edit_plan`] replays recorded operations and [`template`] loads starting documents.
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod edit_plan;
pub mod error;
pub mod section;
pub mod store;
pub mod template;

pub use error::{IndexKind, PlanError, StoreError, TemplateError};
pub use section::{Column, Direction, Field, FieldPosition, Section};
pub use store::{DocumentStore, Snapshot, SubscriptionId};
