//! Generic list engine — loading, filtering, sorting, and deletion for an
//! entity collection.
//!
//! The engine keeps the master collection (the last full load), an optional
//! dispatched-search result, and the view the screen renders (filtered,
//! sorted). Filtering recomputes the view from the master every time, so
//! re-applying the same filters is idempotent, and clearing filters restores
//! the master without another service call. Items are held alongside their
//! serialized JSON shape so that dotted column keys and generic comparisons
//! never re-serialize per access.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use backoffice_fields::{Entity, FieldValue, FilterDescriptor, RenderKind};

use crate::collab::Notifier;
use crate::config::ListConfig;
use crate::error::{EngineError, Result};
use crate::service::CrudListService;
use crate::value::{
    compare_values, display_label, format_currency, format_date, is_truthy, resolve_path,
    value_text,
};

/// Lifecycle of the list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// Constructed, nothing loaded yet.
    Idle,
    /// Full load or dispatched search in flight.
    Loading,
    /// Collection available (possibly empty).
    Loaded,
    /// Delete confirmed and in flight.
    Deleting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One loaded item together with its serialized shape.
struct Row<T> {
    item: T,
    shape: FieldValue,
}

impl<T: Entity> Row<T> {
    fn new(item: T) -> Self {
        let shape = serde_json::to_value(&item).unwrap_or_default();
        Self { item, shape }
    }
}

/// Reusable list behavior for any [`Entity`].
pub struct ListEngine<T, S>
where
    T: Entity,
    S: CrudListService<T>,
{
    config: Arc<ListConfig<T>>,
    service: Arc<S>,
    notifier: Arc<dyn Notifier>,
    all: Vec<Row<T>>,
    searched: Option<Vec<Row<T>>>,
    view: Vec<usize>,
    filter_values: HashMap<String, FieldValue>,
    sort_key: Option<String>,
    sort_direction: SortDirection,
    phase: ListPhase,
    cancel: CancellationToken,
}

impl<T, S> ListEngine<T, S>
where
    T: Entity,
    S: CrudListService<T>,
{
    /// Construct the engine, verifying every dispatch filter against the
    /// service's declared search capabilities.
    pub fn new(
        config: Arc<ListConfig<T>>,
        service: Arc<S>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let capabilities = service.search_capabilities();
        for filter in &config.filters {
            if let Some(capability) = &filter.dispatch {
                if !capabilities.contains(&capability.as_str()) {
                    return Err(backoffice_fields::ConfigError::UnknownCapability {
                        key: filter.key.clone(),
                        capability: capability.clone(),
                    }
                    .into());
                }
            }
        }

        let filter_values = config
            .filters
            .iter()
            .map(|filter| (filter.key.clone(), filter.empty_value()))
            .collect();

        Ok(Self {
            config,
            service,
            notifier,
            all: Vec::new(),
            searched: None,
            view: Vec::new(),
            filter_values,
            sort_key: None,
            sort_direction: SortDirection::Ascending,
            phase: ListPhase::Idle,
            cancel: CancellationToken::new(),
        })
    }

    /// Load the full collection and rebuild the view.
    ///
    /// A failing load notifies and leaves the previous collection in place.
    pub async fn load_all(&mut self) -> Result<()> {
        let prior = self.phase;
        self.phase = ListPhase::Loading;

        let service = Arc::clone(&self.service);
        let cancel = self.cancel.clone();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(entity = %self.config.entity_name, "list load cancelled");
                self.phase = prior;
                return Ok(());
            }
            result = service.list_all() => result,
        };

        match result {
            Ok(items) => {
                debug!(entity = %self.config.entity_name, count = items.len(), "collection loaded");
                self.all = items.into_iter().map(Row::new).collect();
                self.searched = None;
                self.rebuild_view();
            }
            Err(err) => {
                warn!(entity = %self.config.entity_name, error = %err, "collection load failed");
                self.notifier
                    .error(&format!(
                        "Failed to load {}",
                        self.config.entity_name_plural.to_lowercase()
                    ))
                    .await;
            }
        }

        self.phase = ListPhase::Loaded;
        Ok(())
    }

    /// Set one filter's value without applying it.
    pub fn set_filter(&mut self, key: &str, value: FieldValue) -> Result<()> {
        if !self.filter_values.contains_key(key) {
            return Err(EngineError::UnknownFilter { key: key.into() });
        }
        self.filter_values.insert(key.into(), value);
        Ok(())
    }

    pub fn filter_value(&self, key: &str) -> Option<&FieldValue> {
        self.filter_values.get(key)
    }

    /// Apply the current filter values.
    ///
    /// The first active dispatch filter, in configuration order, wins
    /// exclusively: its search capability replaces local filtering entirely.
    /// With no active dispatch filter, every active filter narrows the full
    /// collection with a local predicate.
    pub async fn apply_filters(&mut self) -> Result<()> {
        let dispatched = self.config.filters.iter().find_map(|filter| {
            let capability = filter.dispatch.as_deref()?;
            let value = self.filter_values.get(&filter.key)?;
            is_truthy(value).then(|| (capability.to_string(), value.clone(), filter.key.clone()))
        });

        match dispatched {
            Some((capability, value, key)) => self.run_search(&capability, &value, &key).await,
            None => {
                self.searched = None;
                self.rebuild_view();
                Ok(())
            }
        }
    }

    async fn run_search(&mut self, capability: &str, value: &FieldValue, key: &str) -> Result<()> {
        let prior = self.phase;
        self.phase = ListPhase::Loading;

        let service = Arc::clone(&self.service);
        let cancel = self.cancel.clone();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(capability, "search cancelled");
                self.phase = prior;
                return Ok(());
            }
            result = service.search(capability, value) => result,
        };

        match result {
            Ok(outcome) => {
                let items = outcome.into_vec();
                debug!(capability, filter = key, count = items.len(), "search applied");
                // A dispatched result replaces the view wholesale; local
                // predicates do not run on top of it, and the master
                // collection stays untouched for clear_filters.
                let searched: Vec<Row<T>> = items.into_iter().map(Row::new).collect();
                self.view = (0..searched.len()).collect();
                self.searched = Some(searched);
                self.resort_view();
            }
            Err(err) => {
                warn!(capability, error = %err, "search failed");
                self.notifier.error(&err.message).await;
            }
        }

        self.phase = ListPhase::Loaded;
        Ok(())
    }

    /// Reset every filter to its empty value and restore the master
    /// collection; no service call is made.
    pub fn clear_filters(&mut self) {
        for filter in &self.config.filters {
            self.filter_values
                .insert(filter.key.clone(), filter.empty_value());
        }
        self.searched = None;
        self.rebuild_view();
    }

    /// Rebuild the view from the master collection with local predicates.
    fn rebuild_view(&mut self) {
        let view: Vec<usize> = self
            .all
            .iter()
            .enumerate()
            .filter(|(_, row)| self.matches_local_filters(&row.shape))
            .map(|(index, _)| index)
            .collect();
        self.view = view;
        self.resort_view();
    }

    fn matches_local_filters(&self, shape: &FieldValue) -> bool {
        self.config.filters.iter().all(|filter| {
            if filter.dispatch.is_some() {
                return true;
            }
            let Some(wanted) = self.filter_values.get(&filter.key) else {
                return true;
            };
            if !is_truthy(wanted) {
                return true;
            }
            let actual = resolve_path(shape, &filter.key);
            local_match(filter, wanted, actual)
        })
    }

    /// Sort by a column key; a second call on the same key toggles the
    /// direction. Null and missing values stay last in both directions.
    pub fn sort(&mut self, key: &str) {
        match &self.sort_key {
            Some(current) if current == key => {
                self.sort_direction = match self.sort_direction {
                    SortDirection::Ascending => SortDirection::Descending,
                    SortDirection::Descending => SortDirection::Ascending,
                };
            }
            _ => {
                self.sort_key = Some(key.to_string());
                self.sort_direction = SortDirection::Ascending;
            }
        }
        self.resort_view();
    }

    /// The collection the view currently indexes into.
    fn rows(&self) -> &[Row<T>] {
        match &self.searched {
            Some(rows) => rows,
            None => &self.all,
        }
    }

    fn resort_view(&mut self) {
        let Some(key) = self.sort_key.clone() else {
            return;
        };
        let descending = self.sort_direction == SortDirection::Descending;
        let rows: &[Row<T>] = match &self.searched {
            Some(rows) => rows,
            None => &self.all,
        };
        self.view.sort_by(|&a, &b| {
            let va = resolve_path(&rows[a].shape, &key).filter(|v| !v.is_null());
            let vb = resolve_path(&rows[b].shape, &key).filter(|v| !v.is_null());
            match (va, vb) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(va), Some(vb)) => {
                    let ordering = compare_values(va, vb);
                    if descending { ordering.reverse() } else { ordering }
                }
            }
        });
    }

    /// Confirm with the user, then delete and refresh.
    ///
    /// Returns whether a deletion actually happened. Declining the
    /// confirmation is a no-op; a failing delete notifies and does not
    /// refresh, keeping the stale row visible rather than pretending.
    pub async fn confirm_and_delete(&mut self, index: usize) -> Result<bool> {
        let Some(&row_index) = self.view.get(index) else {
            return Ok(false);
        };
        let row = &self.rows()[row_index];
        let Some(id) = row.item.id() else {
            return Ok(false);
        };
        let label = display_label(&row.shape, &self.config.entity_name);

        if !self.notifier.confirm_delete(&label).await {
            debug!(entity = %self.config.entity_name, id, "delete declined");
            return Ok(false);
        }

        self.phase = ListPhase::Deleting;
        match self.service.delete(id).await {
            Ok(()) => {
                self.notifier
                    .success(&format!("{} deleted successfully", self.config.entity_name))
                    .await;
                self.load_all().await?;
                Ok(true)
            }
            Err(err) => {
                warn!(entity = %self.config.entity_name, id, error = %err, "delete failed");
                self.notifier.error(&err.message).await;
                self.phase = ListPhase::Loaded;
                Ok(false)
            }
        }
    }

    /// Cancel all in-flight work tied to this screen activation.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    // =========================================================================
    // View access
    // =========================================================================

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    /// The visible items, filtered and sorted.
    pub fn items(&self) -> Vec<&T> {
        let rows = self.rows();
        self.view.iter().map(|&i| &rows[i].item).collect()
    }

    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    pub fn total_loaded(&self) -> usize {
        self.all.len()
    }

    pub fn sort_state(&self) -> Option<(&str, SortDirection)> {
        self.sort_key
            .as_deref()
            .map(|key| (key, self.sort_direction))
    }

    /// Stable key for the visible row at `index`, for view-layer diffing.
    pub fn item_key(&self, index: usize) -> Option<String> {
        let &row_index = self.view.get(index)?;
        Some(self.config.item_key(&self.rows()[row_index].item, index))
    }

    /// Render the cell at (visible row, column) to display text.
    pub fn render_cell(&self, index: usize, column_key: &str) -> Option<String> {
        let &row_index = self.view.get(index)?;
        let column = self.config.columns.iter().find(|c| c.key == column_key)?;
        let shape = &self.rows()[row_index].shape;
        let value = resolve_path(shape, &column.key).filter(|v| !v.is_null());

        let text = match &column.render {
            RenderKind::Plain => match value {
                Some(value) => value_text(value),
                None => "-".to_string(),
            },
            RenderKind::Badge(badge) => {
                if value.is_some_and(is_truthy) {
                    badge.true_label.clone()
                } else {
                    badge.false_label.clone()
                }
            }
            RenderKind::Currency => format_currency(value),
            RenderKind::Date => format_date(value),
            RenderKind::Custom => match &column.formatter {
                Some(formatter) => formatter(value.unwrap_or(&FieldValue::Null), shape),
                None => "-".to_string(),
            },
        };
        Some(text)
    }

    /// "<n> <entity-or-plural>" for the header, when enabled.
    pub fn count_label(&self) -> Option<String> {
        if !self.config.show_count {
            return None;
        }
        let count = self.view.len();
        let noun = if count == 1 {
            self.config.entity_name.to_lowercase()
        } else {
            self.config.entity_name_plural.to_lowercase()
        };
        Some(format!("{count} {noun}"))
    }

    /// Route to the edit screen for the visible row at `index`.
    pub fn edit_route(&self, index: usize) -> Option<String> {
        let &row_index = self.view.get(index)?;
        let id = self.rows()[row_index].item.id()?;
        Some(format!("{}/{id}", self.config.base_route))
    }

    /// Route to the create screen.
    pub fn new_route(&self) -> String {
        format!("{}/new", self.config.base_route)
    }
}

/// Local predicate for one inactive-dispatch filter against one item value.
fn local_match(filter: &FilterDescriptor, wanted: &FieldValue, actual: Option<&FieldValue>) -> bool {
    use backoffice_fields::FilterInput;

    match &filter.input {
        // Case-insensitive substring containment.
        FilterInput::Text => {
            let needle = value_text(wanted).to_lowercase();
            actual.is_some_and(|v| value_text(v).to_lowercase().contains(&needle))
        }
        // Exact match on the textual value.
        FilterInput::Select { .. } | FilterInput::Date => {
            actual.is_some_and(|v| value_text(v) == value_text(wanted))
        }
        // Checked means "only truthy values".
        FilterInput::Checkbox => actual.is_some_and(is_truthy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use std::sync::Mutex;

    use backoffice_fields::{
        BadgeMapping, ColumnDescriptor, EntityId, FilterInput, RenderKind,
    };

    use crate::service::{SearchOutcome, ServiceError, ServiceResult};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Gadget {
        id: Option<EntityId>,
        name: String,
        active: bool,
        #[serde(default)]
        price: Option<f64>,
    }

    impl Entity for Gadget {
        fn id(&self) -> Option<EntityId> {
            self.id
        }

        fn field_names() -> &'static [&'static str] {
            &["id", "name", "active", "price"]
        }
    }

    fn gadget(id: EntityId, name: &str, active: bool, price: Option<f64>) -> Gadget {
        Gadget {
            id: Some(id),
            name: name.into(),
            active,
            price,
        }
    }

    struct StubService {
        items: Mutex<Vec<Gadget>>,
        calls: Mutex<Vec<String>>,
        fail_delete: bool,
    }

    impl StubService {
        fn with(items: Vec<Gadget>) -> Self {
            Self {
                items: Mutex::new(items),
                calls: Mutex::new(Vec::new()),
                fail_delete: false,
            }
        }
    }

    #[async_trait]
    impl CrudListService<Gadget> for StubService {
        async fn list_all(&self) -> ServiceResult<Vec<Gadget>> {
            self.calls.lock().unwrap().push("list_all".into());
            Ok(self.items.lock().unwrap().clone())
        }

        async fn delete(&self, id: EntityId) -> ServiceResult<()> {
            self.calls.lock().unwrap().push(format!("delete:{id}"));
            if self.fail_delete {
                return Err(ServiceError::new("gadget is in use"));
            }
            self.items.lock().unwrap().retain(|g| g.id != Some(id));
            Ok(())
        }

        fn search_capabilities(&self) -> &[&str] {
            &["search-by-name"]
        }

        async fn search(
            &self,
            capability: &str,
            value: &FieldValue,
        ) -> ServiceResult<SearchOutcome<Gadget>> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("search:{capability}:{value}"));
            let needle = value.as_str().unwrap_or_default().to_lowercase();
            let hits = self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|g| g.name.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            Ok(SearchOutcome::Many(hits))
        }
    }

    #[derive(Default)]
    struct StubNotifier {
        confirm: std::sync::atomic::AtomicBool,
        messages: Mutex<Vec<(String, String)>>,
    }

    impl StubNotifier {
        fn confirming() -> Self {
            let stub = Self::default();
            stub.confirm.store(true, std::sync::atomic::Ordering::SeqCst);
            stub
        }
    }

    #[async_trait]
    impl Notifier for StubNotifier {
        async fn success(&self, message: &str) {
            self.messages.lock().unwrap().push(("success".into(), message.into()));
        }

        async fn error(&self, message: &str) {
            self.messages.lock().unwrap().push(("error".into(), message.into()));
        }

        async fn warning(&self, message: &str) {
            self.messages.lock().unwrap().push(("warning".into(), message.into()));
        }

        async fn confirm_delete(&self, _label: &str) -> bool {
            self.confirm.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    fn config() -> Arc<ListConfig<Gadget>> {
        Arc::new(
            ListConfig::<Gadget>::builder("Gadget", "Gadgets", "/gadgets")
                .column(ColumnDescriptor::new("name", "Name").sortable())
                .column(
                    ColumnDescriptor::new("active", "Status")
                        .with_render(RenderKind::Badge(BadgeMapping::active_inactive())),
                )
                .column(
                    ColumnDescriptor::new("price", "Price")
                        .with_render(RenderKind::Currency)
                        .sortable(),
                )
                .filter(
                    FilterDescriptor::new("name", "Name", FilterInput::Text)
                        .with_dispatch("search-by-name"),
                )
                .filter(FilterDescriptor::new("active", "Active only", FilterInput::Checkbox))
                .show_count()
                .build()
                .unwrap(),
        )
    }

    fn seed() -> Vec<Gadget> {
        vec![
            gadget(1, "Widget", true, Some(19.9)),
            gadget(2, "sprocket", false, Some(5.0)),
            gadget(3, "Gear", true, None),
        ]
    }

    fn engine_with(
        service: StubService,
        notifier: Arc<StubNotifier>,
    ) -> ListEngine<Gadget, StubService> {
        ListEngine::new(config(), Arc::new(service), notifier).unwrap()
    }

    #[tokio::test]
    async fn undeclared_capability_is_rejected_at_construction() {
        let config = Arc::new(
            ListConfig::<Gadget>::builder("Gadget", "Gadgets", "/gadgets")
                .column(ColumnDescriptor::new("name", "Name"))
                .filter(
                    FilterDescriptor::new("name", "Name", FilterInput::Text)
                        .with_dispatch("search-by-serial"),
                )
                .build()
                .unwrap(),
        );
        let result = ListEngine::new(
            config,
            Arc::new(StubService::with(Vec::new())),
            Arc::new(StubNotifier::default()),
        );
        match result {
            Err(EngineError::Config(err)) => {
                assert!(err.to_string().contains("search-by-serial"));
            }
            _ => panic!("expected capability rejection"),
        }
    }

    #[tokio::test]
    async fn load_all_fills_the_view() {
        let mut engine = engine_with(
            StubService::with(seed()),
            Arc::new(StubNotifier::default()),
        );
        engine.load_all().await.unwrap();
        assert_eq!(engine.phase(), ListPhase::Loaded);
        assert_eq!(engine.len(), 3);
        assert_eq!(engine.count_label().as_deref(), Some("3 gadgets"));
    }

    #[tokio::test]
    async fn checkbox_filter_keeps_truthy_rows_and_is_idempotent() {
        let mut engine = engine_with(
            StubService::with(seed()),
            Arc::new(StubNotifier::default()),
        );
        engine.load_all().await.unwrap();

        engine.set_filter("active", json!(true)).unwrap();
        engine.apply_filters().await.unwrap();
        assert_eq!(engine.len(), 2);

        // Applying again from the same inputs changes nothing.
        engine.apply_filters().await.unwrap();
        assert_eq!(engine.len(), 2);
    }

    #[tokio::test]
    async fn dispatch_filter_wins_exclusively() {
        let service = StubService::with(seed());
        let notifier = Arc::new(StubNotifier::default());
        let mut engine = engine_with(service, notifier);
        engine.load_all().await.unwrap();

        // Both filters active: the dispatch one replaces local filtering,
        // so the inactive "sprocket" row survives despite the checkbox.
        engine.set_filter("name", json!("sprocket")).unwrap();
        engine.set_filter("active", json!(true)).unwrap();
        engine.apply_filters().await.unwrap();
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.items()[0].name, "sprocket");
    }

    #[tokio::test]
    async fn blank_dispatch_value_falls_back_to_local_filtering() {
        let mut engine = engine_with(
            StubService::with(seed()),
            Arc::new(StubNotifier::default()),
        );
        engine.load_all().await.unwrap();

        engine.set_filter("name", json!("   ")).unwrap();
        engine.set_filter("active", json!(true)).unwrap();
        engine.apply_filters().await.unwrap();
        assert_eq!(engine.len(), 2);
    }

    #[tokio::test]
    async fn clear_filters_restores_master_without_reload() {
        let mut engine = engine_with(
            StubService::with(seed()),
            Arc::new(StubNotifier::default()),
        );
        engine.load_all().await.unwrap();
        engine.set_filter("name", json!("widget")).unwrap();
        engine.apply_filters().await.unwrap();
        assert_eq!(engine.len(), 1);

        engine.clear_filters();
        assert_eq!(engine.len(), 3);
        assert_eq!(engine.filter_value("name"), Some(&json!("")));
        assert_eq!(engine.filter_value("active"), Some(&json!(false)));

        let calls = engine.service.calls.lock().unwrap().clone();
        assert_eq!(calls.iter().filter(|c| *c == "list_all").count(), 1);
    }

    #[tokio::test]
    async fn unknown_filter_key_is_an_error() {
        let mut engine = engine_with(
            StubService::with(seed()),
            Arc::new(StubNotifier::default()),
        );
        let err = engine.set_filter("colour", json!("red")).unwrap_err();
        assert!(matches!(err, EngineError::UnknownFilter { .. }));
    }

    #[tokio::test]
    async fn sort_toggles_direction_and_pins_nulls_last() {
        let mut engine = engine_with(
            StubService::with(seed()),
            Arc::new(StubNotifier::default()),
        );
        engine.load_all().await.unwrap();

        engine.sort("price");
        let ascending: Vec<_> = engine.items().iter().map(|g| g.id).collect();
        assert_eq!(ascending, [Some(2), Some(1), Some(3)]);

        engine.sort("price");
        let descending: Vec<_> = engine.items().iter().map(|g| g.id).collect();
        // Gear has no price and stays last in both directions.
        assert_eq!(descending, [Some(1), Some(2), Some(3)]);
        assert_eq!(
            engine.sort_state(),
            Some(("price", SortDirection::Descending))
        );
    }

    #[tokio::test]
    async fn sort_by_name_is_case_insensitive() {
        let mut engine = engine_with(
            StubService::with(seed()),
            Arc::new(StubNotifier::default()),
        );
        engine.load_all().await.unwrap();
        engine.sort("name");
        let names: Vec<_> = engine.items().iter().map(|g| g.name.clone()).collect();
        assert_eq!(names, ["Gear", "sprocket", "Widget"]);
    }

    #[tokio::test]
    async fn declined_confirmation_deletes_nothing() {
        let mut engine = engine_with(
            StubService::with(seed()),
            Arc::new(StubNotifier::default()),
        );
        engine.load_all().await.unwrap();

        let deleted = engine.confirm_and_delete(0).await.unwrap();
        assert!(!deleted);
        assert_eq!(engine.len(), 3);
    }

    #[tokio::test]
    async fn confirmed_delete_calls_service_once_and_refreshes() {
        let notifier = Arc::new(StubNotifier::confirming());
        let service = StubService::with(seed());
        let mut engine = ListEngine::new(config(), Arc::new(service), notifier.clone()).unwrap();
        engine.load_all().await.unwrap();

        let deleted = engine.confirm_and_delete(0).await.unwrap();
        assert!(deleted);
        assert_eq!(engine.len(), 2);

        let calls = engine.service.calls.lock().unwrap().clone();
        let deletes: Vec<_> = calls.iter().filter(|c| c.starts_with("delete")).collect();
        assert_eq!(deletes, ["delete:1"]);
        let loads = calls.iter().filter(|c| *c == "list_all").count();
        assert_eq!(loads, 2);
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_row_and_notifies() {
        let notifier = Arc::new(StubNotifier::confirming());
        let mut service = StubService::with(seed());
        service.fail_delete = true;
        let mut engine = ListEngine::new(config(), Arc::new(service), notifier.clone()).unwrap();
        engine.load_all().await.unwrap();

        let deleted = engine.confirm_and_delete(0).await.unwrap();
        assert!(!deleted);
        assert_eq!(engine.len(), 3);

        let messages = notifier.messages.lock().unwrap();
        assert!(messages.iter().any(|(kind, m)| kind == "error" && m == "gadget is in use"));

        let calls = engine.service.calls.lock().unwrap().clone();
        let loads = calls.iter().filter(|c| *c == "list_all").count();
        assert_eq!(loads, 1);
    }

    #[tokio::test]
    async fn cells_render_per_column_kind() {
        let mut engine = engine_with(
            StubService::with(seed()),
            Arc::new(StubNotifier::default()),
        );
        engine.load_all().await.unwrap();

        assert_eq!(engine.render_cell(0, "name").as_deref(), Some("Widget"));
        assert_eq!(engine.render_cell(0, "active").as_deref(), Some("Active"));
        assert_eq!(engine.render_cell(0, "price").as_deref(), Some("R$ 19,90"));
        assert_eq!(engine.render_cell(1, "active").as_deref(), Some("Inactive"));
        // Missing price renders as zero currency.
        assert_eq!(engine.render_cell(2, "price").as_deref(), Some("R$ 0,00"));
    }

    #[tokio::test]
    async fn routes_follow_the_base_route() {
        let mut engine = engine_with(
            StubService::with(seed()),
            Arc::new(StubNotifier::default()),
        );
        engine.load_all().await.unwrap();
        assert_eq!(engine.new_route(), "/gadgets/new");
        assert_eq!(engine.edit_route(0).as_deref(), Some("/gadgets/1"));
    }

    #[tokio::test]
    async fn item_keys_use_entity_ids() {
        let mut engine = engine_with(
            StubService::with(seed()),
            Arc::new(StubNotifier::default()),
        );
        engine.load_all().await.unwrap();
        assert_eq!(engine.item_key(0).as_deref(), Some("1"));
    }
}
