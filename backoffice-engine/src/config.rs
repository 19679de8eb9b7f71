//! Per-entity configuration bundles for the generic engines.
//!
//! A screen builds one of these once, wraps it in an `Arc`, and hands it to
//! an engine together with a service reference. Builders validate the
//! bundle up front: empty field/column sets, duplicate keys, keys that do
//! not exist on the entity, undeclared related-data sources, and
//! uncompilable pattern validators are all rejected at build time.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use backoffice_fields::{
    ColumnDescriptor, ConfigError, Entity, FieldDescriptor, FieldValue, FilterDescriptor,
};

use crate::related::RelatedDataSpec;

/// Transforms the raw form value into the persistence payload.
/// Receives the form value and whether the engine is in edit mode.
pub type BeforeSave = Arc<dyn Fn(FieldValue, bool) -> FieldValue + Send + Sync>;

/// Transforms a loaded entity (serialized) into the form value to patch in.
pub type AfterLoad = Arc<dyn Fn(FieldValue) -> FieldValue + Send + Sync>;

/// Caller-supplied success hook; when present it replaces the default
/// navigation back to the list.
pub type AfterSuccess<T> = Arc<dyn Fn(&T, bool) + Send + Sync>;

/// Stable row identity for view-layer diffing.
pub type IdentityFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// What the list shows when the (filtered) collection is empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmptyState {
    pub icon: String,
    pub title: String,
    pub subtitle: String,
}

impl EmptyState {
    pub fn new(
        icon: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
    ) -> Self {
        Self {
            icon: icon.into(),
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// Immutable per-entity metadata bundle driving a [`FormEngine`].
///
/// Built by [`FormConfigBuilder`]; shared across engine instances via `Arc`.
///
/// [`FormEngine`]: crate::form::FormEngine
pub struct FormConfig<T: Entity> {
    pub entity_name: String,
    pub entity_name_plural: String,
    pub base_route: String,
    pub fields: Vec<FieldDescriptor>,
    pub related_data: Vec<RelatedDataSpec>,
    pub create_title: Option<String>,
    pub edit_title: Option<String>,
    pub before_save: Option<BeforeSave>,
    pub after_load: Option<AfterLoad>,
    pub after_success: Option<AfterSuccess<T>>,
    /// Per-field overrides for validation error messages.
    pub error_messages: HashMap<String, String>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> FormConfig<T> {
    pub fn builder(
        entity_name: impl Into<String>,
        entity_name_plural: impl Into<String>,
        base_route: impl Into<String>,
    ) -> FormConfigBuilder<T> {
        FormConfigBuilder {
            entity_name: entity_name.into(),
            entity_name_plural: entity_name_plural.into(),
            base_route: base_route.into(),
            fields: Vec::new(),
            related_data: Vec::new(),
            create_title: None,
            edit_title: None,
            before_save: None,
            after_load: None,
            after_success: None,
            error_messages: HashMap::new(),
        }
    }

    /// Descriptor for a field key, if declared.
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }
}

impl<T: Entity> fmt::Debug for FormConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormConfig")
            .field("entity_name", &self.entity_name)
            .field("base_route", &self.base_route)
            .field("fields", &self.fields.len())
            .field("related_data", &self.related_data.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`FormConfig`]; `build()` performs configuration validation.
pub struct FormConfigBuilder<T: Entity> {
    entity_name: String,
    entity_name_plural: String,
    base_route: String,
    fields: Vec<FieldDescriptor>,
    related_data: Vec<RelatedDataSpec>,
    create_title: Option<String>,
    edit_title: Option<String>,
    before_save: Option<BeforeSave>,
    after_load: Option<AfterLoad>,
    after_success: Option<AfterSuccess<T>>,
    error_messages: HashMap<String, String>,
}

impl<T: Entity> FormConfigBuilder<T> {
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn related(mut self, spec: RelatedDataSpec) -> Self {
        self.related_data.push(spec);
        self
    }

    pub fn create_title(mut self, title: impl Into<String>) -> Self {
        self.create_title = Some(title.into());
        self
    }

    pub fn edit_title(mut self, title: impl Into<String>) -> Self {
        self.edit_title = Some(title.into());
        self
    }

    /// Transform the form value before create/update.
    pub fn before_save(
        mut self,
        transform: impl Fn(FieldValue, bool) -> FieldValue + Send + Sync + 'static,
    ) -> Self {
        self.before_save = Some(Arc::new(transform));
        self
    }

    /// Transform the loaded entity before patching it into the controls.
    pub fn after_load(
        mut self,
        transform: impl Fn(FieldValue) -> FieldValue + Send + Sync + 'static,
    ) -> Self {
        self.after_load = Some(Arc::new(transform));
        self
    }

    /// Replace the default post-save navigation with a custom hook.
    pub fn after_success(mut self, hook: impl Fn(&T, bool) + Send + Sync + 'static) -> Self {
        self.after_success = Some(Arc::new(hook));
        self
    }

    /// Override the validation message for a field.
    pub fn error_message(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.error_messages.insert(key.into(), message.into());
        self
    }

    pub fn build(self) -> Result<FormConfig<T>, ConfigError> {
        if self.fields.is_empty() {
            return Err(ConfigError::NoFields {
                entity: self.entity_name,
            });
        }

        let valid_keys = T::field_names();
        let mut seen = HashSet::new();
        let related_names: HashSet<&str> = self
            .related_data
            .iter()
            .map(|spec| spec.property_name.as_str())
            .collect();

        for field in &self.fields {
            if !seen.insert(field.key.as_str()) {
                return Err(ConfigError::DuplicateKey {
                    entity: self.entity_name,
                    key: field.key.clone(),
                });
            }
            if !valid_keys.contains(&field.key.as_str()) {
                return Err(ConfigError::UnknownKey {
                    entity: self.entity_name,
                    key: field.key.clone(),
                });
            }
            if let Some(source) = &field.options_source {
                if !related_names.contains(source.as_str()) {
                    return Err(ConfigError::UnknownRelatedSource {
                        key: field.key.clone(),
                        related: source.clone(),
                    });
                }
            }
            for spec in field.effective_validators() {
                if !spec.is_well_formed() {
                    if let backoffice_fields::ValidatorSpec::Pattern(pattern) = spec {
                        return Err(ConfigError::InvalidPattern {
                            key: field.key.clone(),
                            pattern,
                        });
                    }
                }
            }
        }

        Ok(FormConfig {
            entity_name: self.entity_name,
            entity_name_plural: self.entity_name_plural,
            base_route: self.base_route,
            fields: self.fields,
            related_data: self.related_data,
            create_title: self.create_title,
            edit_title: self.edit_title,
            before_save: self.before_save,
            after_load: self.after_load,
            after_success: self.after_success,
            error_messages: self.error_messages,
            _entity: PhantomData,
        })
    }
}

/// Immutable per-entity metadata bundle driving a [`ListEngine`].
///
/// [`ListEngine`]: crate::list::ListEngine
pub struct ListConfig<T: Entity> {
    pub entity_name: String,
    pub entity_name_plural: String,
    pub base_route: String,
    pub columns: Vec<ColumnDescriptor>,
    pub filters: Vec<FilterDescriptor>,
    pub empty_state: EmptyState,
    pub show_count: bool,
    /// Row identity; defaults to the entity id (or the row index when the
    /// item has not been persisted).
    pub identity: Option<IdentityFn<T>>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> ListConfig<T> {
    /// Stable key for one row, for view-layer diffing.
    pub fn item_key(&self, item: &T, index: usize) -> String {
        if let Some(identity) = &self.identity {
            return identity(item);
        }
        match item.id() {
            Some(id) => id.to_string(),
            None => format!("row-{index}"),
        }
    }

    pub fn builder(
        entity_name: impl Into<String>,
        entity_name_plural: impl Into<String>,
        base_route: impl Into<String>,
    ) -> ListConfigBuilder<T> {
        ListConfigBuilder {
            entity_name: entity_name.into(),
            entity_name_plural: entity_name_plural.into(),
            base_route: base_route.into(),
            columns: Vec::new(),
            filters: Vec::new(),
            empty_state: None,
            show_count: false,
            identity: None,
        }
    }
}

impl<T: Entity> fmt::Debug for ListConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListConfig")
            .field("entity_name", &self.entity_name)
            .field("base_route", &self.base_route)
            .field("columns", &self.columns.len())
            .field("filters", &self.filters.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ListConfig`]; `build()` performs configuration validation.
pub struct ListConfigBuilder<T: Entity> {
    entity_name: String,
    entity_name_plural: String,
    base_route: String,
    columns: Vec<ColumnDescriptor>,
    filters: Vec<FilterDescriptor>,
    empty_state: Option<EmptyState>,
    show_count: bool,
    identity: Option<IdentityFn<T>>,
}

impl<T: Entity> ListConfigBuilder<T> {
    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    pub fn filter(mut self, filter: FilterDescriptor) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn empty_state(mut self, empty_state: EmptyState) -> Self {
        self.empty_state = Some(empty_state);
        self
    }

    pub fn show_count(mut self) -> Self {
        self.show_count = true;
        self
    }

    /// Override the id-based row identity.
    pub fn identity(mut self, identity: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.identity = Some(Arc::new(identity));
        self
    }

    pub fn build(self) -> Result<ListConfig<T>, ConfigError> {
        if self.columns.is_empty() {
            return Err(ConfigError::NoColumns {
                entity: self.entity_name,
            });
        }

        let valid_keys = T::field_names();
        for column in &self.columns {
            if !valid_keys.contains(&column.head_key()) {
                return Err(ConfigError::UnknownKey {
                    entity: self.entity_name,
                    key: column.key.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for filter in &self.filters {
            if !seen.insert(filter.key.as_str()) {
                return Err(ConfigError::DuplicateKey {
                    entity: self.entity_name,
                    key: filter.key.clone(),
                });
            }
            let head = filter.key.split('.').next().unwrap_or(&filter.key);
            if !valid_keys.contains(&head) {
                return Err(ConfigError::UnknownKey {
                    entity: self.entity_name,
                    key: filter.key.clone(),
                });
            }
        }

        let empty_state = self.empty_state.unwrap_or_else(|| {
            EmptyState::new(
                "inbox",
                format!("No {} found", self.entity_name_plural.to_lowercase()),
                format!("Start by adding a new {}", self.entity_name.to_lowercase()),
            )
        });

        Ok(ListConfig {
            entity_name: self.entity_name,
            entity_name_plural: self.entity_name_plural,
            base_route: self.base_route,
            columns: self.columns,
            filters: self.filters,
            empty_state,
            show_count: self.show_count,
            identity: self.identity,
            _entity: PhantomData,
        })
    }
}
