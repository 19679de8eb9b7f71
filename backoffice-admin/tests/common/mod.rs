//! Shared collaborators and fixtures for the engine integration tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use backoffice_admin::{Category, Customer, EntityRef, MemoryStore};
use backoffice_admin::configs::customer::{SEARCH_BY_NAME, SEARCH_BY_TAX_ID};
use backoffice_engine::{Navigator, Notifier};

/// Records every notification; the confirm response is configurable.
#[derive(Default)]
pub struct RecordingNotifier {
    confirm_response: AtomicBool,
    pub messages: Mutex<Vec<(String, String)>>,
    pub confirmations: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn confirming() -> Self {
        let notifier = Self::default();
        notifier.confirm_response.store(true, Ordering::SeqCst);
        notifier
    }

    pub fn messages_of(&self, kind: &str) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| k == kind)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn success(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(("success".into(), message.into()));
    }

    async fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(("error".into(), message.into()));
    }

    async fn warning(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(("warning".into(), message.into()));
    }

    async fn confirm_delete(&self, label: &str) -> bool {
        self.confirmations.lock().unwrap().push(label.into());
        self.confirm_response.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, route: &str) {
        self.routes.lock().unwrap().push(route.into());
    }
}

pub fn customer(id: i64, name: &str, tax_id: &str, active: bool) -> Customer {
    Customer {
        id: Some(id),
        name: name.into(),
        email: Some(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
        tax_id: Some(tax_id.into()),
        phone: None,
        birth_date: None,
        category: Some(EntityRef::new(1, "Standard")),
        address: None,
        active,
    }
}

/// A customer store with both search capabilities registered.
pub fn customer_store() -> MemoryStore<Customer> {
    MemoryStore::<Customer>::new()
        .with_search(SEARCH_BY_NAME, |customer, value| {
            value.as_str().is_some_and(|needle| {
                customer
                    .name
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            })
        })
        .with_search(SEARCH_BY_TAX_ID, |customer, value| {
            value
                .as_str()
                .is_some_and(|needle| customer.tax_id.as_deref() == Some(needle))
        })
}

pub fn category(id: i64, name: &str) -> Category {
    Category {
        id: Some(id),
        name: name.into(),
        description: None,
        active: true,
    }
}
