//! Related reference data for form choice fields.
//!
//! A form often needs secondary collections — the categories a customer can
//! belong to, the customers a contract can reference. A [`RelatedDataSpec`]
//! names such a collection and carries the loader that fetches it. Loads
//! marked `load_on_init` are issued concurrently at form initialization and
//! jointly awaited; one failing load degrades that collection only and
//! never blocks the base entity load.

use std::sync::Arc;

use async_trait::async_trait;

use backoffice_fields::FieldValue;

use crate::service::ServiceResult;

/// Fetches one related reference collection.
#[async_trait]
pub trait RelatedLoader: Send + Sync {
    async fn load(&self) -> ServiceResult<Vec<FieldValue>>;
}

/// One named related-data collection a form depends on.
#[derive(Clone)]
pub struct RelatedDataSpec {
    /// Name the collection is stored under and referenced by
    /// `FieldDescriptor::options_source`.
    pub property_name: String,
    /// Load during form initialization (default) or on demand.
    pub load_on_init: bool,
    pub loader: Arc<dyn RelatedLoader>,
}

impl RelatedDataSpec {
    pub fn new(property_name: impl Into<String>, loader: Arc<dyn RelatedLoader>) -> Self {
        Self {
            property_name: property_name.into(),
            load_on_init: true,
            loader,
        }
    }

    /// Skip the initial load; the screen will trigger it explicitly.
    pub fn deferred(mut self) -> Self {
        self.load_on_init = false;
        self
    }
}

impl std::fmt::Debug for RelatedDataSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelatedDataSpec")
            .field("property_name", &self.property_name)
            .field("load_on_init", &self.load_on_init)
            .finish_non_exhaustive()
    }
}
