//! Filter control descriptors.

use serde::{Deserialize, Serialize};

use crate::field::{FieldValue, SelectOption};

/// The input control a filter renders as.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "input", rename_all = "kebab-case")]
pub enum FilterInput {
    Text,
    Select { options: Vec<SelectOption> },
    Checkbox,
    Date,
}

/// Declarative description of one filter control.
///
/// `dispatch` names a search capability on the bound list service. The list
/// engine verifies the capability is declared by the service at
/// construction time; when the filter is active it replaces local predicate
/// filtering with that server-side search.
#[derive(Debug, Clone)]
pub struct FilterDescriptor {
    pub key: String,
    pub label: String,
    pub input: FilterInput,
    pub placeholder: Option<String>,
    pub search_on_enter: bool,
    pub dispatch: Option<String>,
}

impl FilterDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>, input: FilterInput) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            input,
            placeholder: None,
            search_on_enter: false,
            dispatch: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Apply the filter when the user presses Enter.
    pub fn search_on_enter(mut self) -> Self {
        self.search_on_enter = true;
        self
    }

    /// Dispatch to a named search capability instead of filtering locally.
    pub fn with_dispatch(mut self, capability: impl Into<String>) -> Self {
        self.dispatch = Some(capability.into());
        self
    }

    /// The type-appropriate empty value for this filter.
    pub fn empty_value(&self) -> FieldValue {
        match self.input {
            FilterInput::Checkbox => FieldValue::Bool(false),
            _ => FieldValue::String(String::new()),
        }
    }
}
