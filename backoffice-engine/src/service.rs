//! Service traits — the persistence boundary of the engines.
//!
//! Services own the actual entity I/O (HTTP, database, memory — the engine
//! does not care). Failures carry a human-readable message only; the engine
//! never interprets error codes, it forwards the message to the notifier.

use async_trait::async_trait;

use backoffice_fields::{Entity, EntityId, FieldValue};

/// A collaborator failure, reported as a message for the user.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// What the form engine needs from a persistence collaborator.
#[async_trait]
pub trait CrudFormService<T: Entity>: Send + Sync {
    async fn fetch_by_id(&self, id: EntityId) -> ServiceResult<T>;
    async fn create(&self, entity: T) -> ServiceResult<T>;
    async fn update(&self, id: EntityId, entity: T) -> ServiceResult<T>;
}

/// Result of a named search capability — a single item or a sequence.
/// The list engine normalizes both to a sequence.
#[derive(Debug, Clone)]
pub enum SearchOutcome<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> SearchOutcome<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

/// What the list engine needs from a persistence collaborator.
///
/// Beyond listing and deletion, a service declares an open-ended set of
/// named search capabilities. A filter descriptor's `dispatch` name must
/// appear in [`search_capabilities`](Self::search_capabilities); the list
/// engine checks this when it is constructed, which turns the
/// capability-name indirection into a checked contract instead of a
/// call-time lookup that silently misses.
#[async_trait]
pub trait CrudListService<T: Entity>: Send + Sync {
    async fn list_all(&self) -> ServiceResult<Vec<T>>;

    async fn delete(&self, id: EntityId) -> ServiceResult<()>;

    /// The search capabilities this service provides.
    fn search_capabilities(&self) -> &[&str] {
        &[]
    }

    /// Run a declared search capability with the active filter value.
    async fn search(&self, capability: &str, value: &FieldValue) -> ServiceResult<SearchOutcome<T>> {
        let _ = value;
        Err(ServiceError::new(format!(
            "search capability '{capability}' is not implemented"
        )))
    }
}
