//! Generic, configuration-driven CRUD engines
//!
//! `backoffice-engine` provides two reusable behavior units — a form engine
//! and a list engine — that serve any [`backoffice_fields::Entity`] without
//! per-entity code. A concrete screen supplies a configuration bundle
//! (descriptors, titles, transforms, related-data loaders) plus a service
//! reference; the engine manages all behavior and the service performs the
//! actual entity I/O.
//!
//! # Architecture
//!
//! - **Composition over inheritance**: an engine is constructed with its
//!   configuration, service, and collaborators, and exposes state through
//!   accessor methods — no shared mutable base state
//! - **Collaborators are traits**: notifications, confirmation dialogs, and
//!   navigation are injected [`Notifier`]/[`Navigator`] references, never
//!   ambient globals
//! - **Checked search dispatch**: a filter's named search capability is
//!   verified against the service's capability map when the list engine is
//!   built, so a missing capability is a construction error rather than a
//!   silent runtime fallback
//! - **Exclusive mutation**: engine operations take `&mut self`, so one
//!   engine instance can never race its own in-flight work; teardown
//!   cancels anything still pending via a scoped [`CancellationToken`]
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod collab;
pub mod config;
pub mod error;
pub mod form;
pub mod list;
pub mod related;
pub mod service;
pub mod value;

pub use collab::{Navigator, Notifier};
pub use config::{
    AfterLoad, AfterSuccess, BeforeSave, EmptyState, FormConfig, FormConfigBuilder, IdentityFn,
    ListConfig, ListConfigBuilder,
};
pub use error::{EngineError, Result};
pub use form::{FormEngine, FormPhase, SubmitOutcome};
pub use list::{ListEngine, ListPhase, SortDirection};
pub use related::{RelatedDataSpec, RelatedLoader};
pub use service::{CrudFormService, CrudListService, SearchOutcome, ServiceError, ServiceResult};
