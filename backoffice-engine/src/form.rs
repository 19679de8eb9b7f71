//! Generic form engine — create/edit behavior for a single entity.
//!
//! One engine instance serves one screen activation. Construction takes the
//! immutable [`FormConfig`], the persistence service, and the UI
//! collaborators; [`FormEngine::initialize`] builds the controls, decides
//! create vs edit from the route identifier, and issues the related-data
//! and entity loads concurrently. All later interaction goes through
//! control accessors and [`FormEngine::submit`].

use std::collections::HashMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use backoffice_fields::{
    Entity, EntityId, FieldValue, SelectOption, ValidationFailure, validate_value,
};

use crate::collab::{Navigator, Notifier};
use crate::config::FormConfig;
use crate::error::{EngineError, Result};
use crate::related::RelatedDataSpec;
use crate::service::CrudFormService;
use crate::value::option_label;

/// The form's mode/lifecycle state machine.
///
/// The create/edit branch is decided once, at initialization, from the
/// route identifier; it is never re-evaluated during the activation. A
/// failed entity load is terminal for the activation: the engine notifies,
/// navigates back to the list, and stays in `LoadingForEdit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Constructed, not yet initialized.
    Create,
    /// Edit mode, entity load in flight.
    LoadingForEdit,
    /// Create mode, editable.
    ReadyCreate,
    /// Edit mode, entity loaded, editable.
    ReadyEdit,
    /// Save in flight.
    Submitting,
    /// Last save failed; still editable.
    SubmitError,
}

impl FormPhase {
    fn name(self) -> &'static str {
        match self {
            Self::Create => "uninitialized",
            Self::LoadingForEdit => "loading",
            Self::ReadyCreate | Self::ReadyEdit => "ready",
            Self::Submitting => "submitting",
            Self::SubmitError => "in save-error state",
        }
    }
}

/// What a submit attempt produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    /// Persisted; carries the collaborator's response entity.
    Saved(T),
    /// Validation blocked the submit; no service call was made.
    Invalid,
    /// The collaborator rejected the save; the form remains editable.
    Failed,
    /// The engine was shut down while the save was in flight.
    Cancelled,
}

/// One editable control, backing exactly one declared field descriptor.
#[derive(Debug, Clone)]
struct Control {
    key: String,
    value: FieldValue,
    touched: bool,
}

/// Reusable create/edit behavior for any [`Entity`].
pub struct FormEngine<T, S>
where
    T: Entity,
    S: CrudFormService<T>,
{
    config: Arc<FormConfig<T>>,
    service: Arc<S>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    controls: Vec<Control>,
    related: HashMap<String, Vec<FieldValue>>,
    phase: FormPhase,
    entity_id: Option<EntityId>,
    loading: bool,
    cancel: CancellationToken,
}

impl<T, S> FormEngine<T, S>
where
    T: Entity,
    S: CrudFormService<T>,
{
    pub fn new(
        config: Arc<FormConfig<T>>,
        service: Arc<S>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            service,
            notifier,
            navigator,
            controls: Vec::new(),
            related: HashMap::new(),
            phase: FormPhase::Create,
            entity_id: None,
            loading: false,
            cancel: CancellationToken::new(),
        }
    }

    /// Build the controls, determine create/edit mode from the route
    /// identifier, and run the initial loads.
    ///
    /// Related-data loads are issued concurrently and jointly awaited; a
    /// failing one degrades its collection and notifies, nothing more. The
    /// entity load (edit mode only) runs concurrently with them; its
    /// failure is terminal — notification plus navigation back to the list.
    pub async fn initialize(&mut self, route_id: Option<&str>) -> Result<()> {
        self.build_controls();

        let id = route_id
            .and_then(|raw| raw.trim().parse::<EntityId>().ok())
            .filter(|&id| id > 0);

        match id {
            Some(id) => {
                self.entity_id = Some(id);
                self.phase = FormPhase::LoadingForEdit;
            }
            None => {
                self.phase = FormPhase::ReadyCreate;
            }
        }

        let wants_related = self
            .config
            .related_data
            .iter()
            .any(|spec| spec.load_on_init);
        if id.is_none() && !wants_related {
            return Ok(());
        }

        self.loading = true;

        let related_fut = fetch_related(&self.config.related_data, Arc::clone(&self.notifier));
        let service = Arc::clone(&self.service);
        let entity_fut = async move {
            match id {
                Some(id) => Some(service.fetch_by_id(id).await),
                None => None,
            }
        };

        let cancel = self.cancel.clone();
        let (related, entity) = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(entity = %self.config.entity_name, "form initialization cancelled");
                self.loading = false;
                return Ok(());
            }
            out = async { tokio::join!(related_fut, entity_fut) } => out,
        };

        self.related = related;

        match entity {
            None => {}
            Some(Ok(entity)) => {
                self.patch_from_entity(&entity);
                self.phase = FormPhase::ReadyEdit;
            }
            Some(Err(err)) => {
                warn!(
                    entity = %self.config.entity_name,
                    error = %err,
                    "entity load failed, leaving form"
                );
                self.notifier.error(&err.message).await;
                self.navigator.navigate_to(&self.config.base_route);
            }
        }

        self.loading = false;
        Ok(())
    }

    /// One control per declared field descriptor, seeded with its default
    /// (or kind-appropriate empty) value. No control exists for keys not
    /// declared in the configuration.
    fn build_controls(&mut self) {
        self.controls = self
            .config
            .fields
            .iter()
            .map(|field| Control {
                key: field.key.clone(),
                value: field.seed_value(),
                touched: false,
            })
            .collect();
    }

    /// Copy a loaded entity onto the controls by key, after `after_load`.
    fn patch_from_entity(&mut self, entity: &T) {
        let mut form_value = serde_json::to_value(entity).unwrap_or_default();
        if let Some(after_load) = &self.config.after_load {
            form_value = after_load(form_value);
        }
        let Some(object) = form_value.as_object() else {
            return;
        };
        for control in &mut self.controls {
            match object.get(&control.key) {
                Some(value) if !value.is_null() => control.value = value.clone(),
                _ => debug!(key = %control.key, "loaded entity has no value for control"),
            }
        }
    }

    /// Validate every control and persist via create or update.
    pub async fn submit(&mut self) -> Result<SubmitOutcome<T>> {
        if !matches!(
            self.phase,
            FormPhase::ReadyCreate | FormPhase::ReadyEdit | FormPhase::SubmitError
        ) {
            return Err(EngineError::NotReady {
                operation: "submit",
                phase: self.phase.name(),
            });
        }

        if self.has_invalid_controls() {
            for control in &mut self.controls {
                control.touched = true;
            }
            self.notifier
                .warning("Please fill in all required fields correctly")
                .await;
            return Ok(SubmitOutcome::Invalid);
        }

        let is_edit = self.entity_id.is_some();
        self.phase = FormPhase::Submitting;
        self.loading = true;

        let mut payload = self.form_value();
        if let Some(before_save) = &self.config.before_save {
            payload = before_save(payload, is_edit);
        }

        let entity: T = match serde_json::from_value(payload) {
            Ok(entity) => entity,
            Err(err) => {
                warn!(
                    entity = %self.config.entity_name,
                    error = %err,
                    "form value does not deserialize into the entity"
                );
                self.loading = false;
                self.phase = FormPhase::SubmitError;
                self.notifier
                    .error(&format!(
                        "Failed to save {}",
                        self.config.entity_name.to_lowercase()
                    ))
                    .await;
                return Ok(SubmitOutcome::Failed);
            }
        };

        let service = Arc::clone(&self.service);
        let entity_id = self.entity_id;
        let request = async move {
            match entity_id {
                Some(id) => service.update(id, entity).await,
                None => service.create(entity).await,
            }
        };

        let cancel = self.cancel.clone();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(entity = %self.config.entity_name, "submit cancelled");
                self.loading = false;
                return Ok(SubmitOutcome::Cancelled);
            }
            result = request => result,
        };

        self.loading = false;
        match result {
            Ok(saved) => {
                self.phase = if is_edit {
                    FormPhase::ReadyEdit
                } else {
                    FormPhase::ReadyCreate
                };
                let verb = if is_edit { "updated" } else { "created" };
                self.notifier
                    .success(&format!("{} {verb} successfully", self.config.entity_name))
                    .await;
                match &self.config.after_success {
                    Some(hook) => hook(&saved, is_edit),
                    None => self.navigator.navigate_to(&self.config.base_route),
                }
                Ok(SubmitOutcome::Saved(saved))
            }
            Err(err) => {
                self.phase = FormPhase::SubmitError;
                self.notifier.error(&err.message).await;
                Ok(SubmitOutcome::Failed)
            }
        }
    }

    /// Abandon the form and navigate back to the list.
    pub fn cancel(&self) {
        self.navigator.navigate_to(&self.config.base_route);
    }

    /// Cancel all in-flight work tied to this screen activation.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Token a screen can use to observe or trigger teardown.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    // =========================================================================
    // Control access
    // =========================================================================

    pub fn set_value(&mut self, key: &str, value: FieldValue) -> Result<()> {
        let control = self
            .controls
            .iter_mut()
            .find(|c| c.key == key)
            .ok_or_else(|| EngineError::UnknownField { key: key.into() })?;
        control.value = value;
        Ok(())
    }

    pub fn touch(&mut self, key: &str) -> Result<()> {
        let control = self
            .controls
            .iter_mut()
            .find(|c| c.key == key)
            .ok_or_else(|| EngineError::UnknownField { key: key.into() })?;
        control.touched = true;
        Ok(())
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.controls.iter().find(|c| c.key == key).map(|c| &c.value)
    }

    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    pub fn is_touched(&self, key: &str) -> bool {
        self.controls
            .iter()
            .find(|c| c.key == key)
            .is_some_and(|c| c.touched)
    }

    /// The whole form value as one JSON object, in field order.
    pub fn form_value(&self) -> FieldValue {
        let mut object = serde_json::Map::new();
        for control in &self.controls {
            object.insert(control.key.clone(), control.value.clone());
        }
        FieldValue::Object(object)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    fn failures_for(&self, key: &str) -> Vec<ValidationFailure> {
        let Some(descriptor) = self.config.field(key) else {
            return Vec::new();
        };
        let Some(control) = self.controls.iter().find(|c| c.key == key) else {
            return Vec::new();
        };
        validate_value(&descriptor.effective_validators(), &control.value)
    }

    fn has_invalid_controls(&self) -> bool {
        self.controls
            .iter()
            .any(|control| !self.failures_for(&control.key).is_empty())
    }

    /// Should the view show an inline error for this field right now?
    pub fn is_field_invalid(&self, key: &str) -> bool {
        self.is_touched(key) && !self.failures_for(key).is_empty()
    }

    /// Highest-priority error message for a field: the configured override,
    /// else the canonical message for the first failure.
    pub fn field_error(&self, key: &str) -> Option<String> {
        let failures = self.failures_for(key);
        let first = failures.first()?;
        if let Some(message) = self.config.error_messages.get(key) {
            return Some(message.clone());
        }
        Some(first.canonical_message())
    }

    // =========================================================================
    // Related data and presentation
    // =========================================================================

    /// Options for a select/radio field: static descriptor options, else
    /// the named related collection mapped to `{id, label}` pairs.
    pub fn options_for(&self, key: &str) -> Vec<SelectOption> {
        let Some(descriptor) = self.config.field(key) else {
            return Vec::new();
        };
        if !descriptor.options.is_empty() {
            return descriptor.options.clone();
        }
        let Some(source) = &descriptor.options_source else {
            return Vec::new();
        };
        let Some(items) = self.related.get(source) else {
            return Vec::new();
        };
        items
            .iter()
            .map(|item| SelectOption {
                value: item.get("id").cloned().unwrap_or_else(|| item.clone()),
                label: option_label(item),
                disabled: false,
            })
            .collect()
    }

    /// A loaded related collection, if present.
    pub fn related(&self, property_name: &str) -> Option<&[FieldValue]> {
        self.related.get(property_name).map(Vec::as_slice)
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_edit_mode(&self) -> bool {
        self.entity_id.is_some()
    }

    pub fn entity_id(&self) -> Option<EntityId> {
        self.entity_id
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Screen title: the configured one, else "New/Edit <entity>".
    pub fn title(&self) -> String {
        if self.is_edit_mode() {
            self.config
                .edit_title
                .clone()
                .unwrap_or_else(|| format!("Edit {}", self.config.entity_name))
        } else {
            self.config
                .create_title
                .clone()
                .unwrap_or_else(|| format!("New {}", self.config.entity_name))
        }
    }
}

/// Issue every `load_on_init` related load concurrently and jointly await
/// them. Failures degrade their own collection and notify; successes land
/// in the returned map.
async fn fetch_related(
    specs: &[RelatedDataSpec],
    notifier: Arc<dyn Notifier>,
) -> HashMap<String, Vec<FieldValue>> {
    let wanted: Vec<&RelatedDataSpec> = specs.iter().filter(|spec| spec.load_on_init).collect();
    if wanted.is_empty() {
        return HashMap::new();
    }

    let loads = wanted.iter().map(|spec| {
        let loader = Arc::clone(&spec.loader);
        async move { loader.load().await }
    });
    let results = futures::future::join_all(loads).await;

    let mut map = HashMap::new();
    for (spec, result) in wanted.iter().zip(results) {
        match result {
            Ok(items) => {
                debug!(property = %spec.property_name, count = items.len(), "related data loaded");
                map.insert(spec.property_name.clone(), items);
            }
            Err(err) => {
                warn!(property = %spec.property_name, error = %err, "related data load failed");
                notifier
                    .error(&format!("Failed to load {}", spec.property_name))
                    .await;
            }
        }
    }
    map
}
