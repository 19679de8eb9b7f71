//! Descriptor types for configuration-driven CRUD screens
//!
//! `backoffice-fields` is a schema-only crate: it owns the declarative
//! metadata that drives the generic form and list engines — field
//! descriptors, table column descriptors, and filter descriptors — plus the
//! validation rules a field can carry. It knows nothing about services,
//! navigation, or rendering; consumers bundle these descriptors into form
//! and list configurations and hand them to `backoffice-engine`.
//!
//! # Architecture
//!
//! - **Descriptors are data**: built in code with `with_*` builders,
//!   immutable once bundled into a configuration
//! - **Typed keys**: every descriptor key is checked against the target
//!   entity's [`Entity::field_names`] at configuration-build time, so a
//!   mismatched key is a construction error instead of a silently dead
//!   control
//! - **Values are JSON**: field and filter values flow through the engines
//!   as [`FieldValue`] so one engine serves any serializable entity

pub mod column;
pub mod entity;
pub mod error;
pub mod field;
pub mod filter;
pub mod validate;

pub use column::{BadgeMapping, ColumnDescriptor, RenderKind};
pub use entity::{Entity, EntityId};
pub use error::{ConfigError, Result};
pub use field::{FieldDescriptor, FieldKind, FieldValue, SelectOption};
pub use filter::{FilterDescriptor, FilterInput};
pub use validate::{ValidationFailure, ValidatorSpec, validate_value};
