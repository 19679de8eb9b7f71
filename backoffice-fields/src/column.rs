//! Table column descriptors.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::field::FieldValue;

/// Formats a resolved cell value; receives the value and the whole item.
pub type CellFormatter = Arc<dyn Fn(&FieldValue, &FieldValue) -> String + Send + Sync>;

/// Labels and style classes for a boolean badge column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BadgeMapping {
    pub true_label: String,
    pub false_label: String,
    #[serde(default)]
    pub true_class: Option<String>,
    #[serde(default)]
    pub false_class: Option<String>,
}

impl BadgeMapping {
    pub fn new(true_label: impl Into<String>, false_label: impl Into<String>) -> Self {
        Self {
            true_label: true_label.into(),
            false_label: false_label.into(),
            true_class: None,
            false_class: None,
        }
    }

    /// Conventional active/inactive badge.
    pub fn active_inactive() -> Self {
        Self {
            true_label: "Active".into(),
            false_label: "Inactive".into(),
            true_class: Some("badge-success".into()),
            false_class: Some("badge-danger".into()),
        }
    }
}

/// How a column's resolved value is rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "render", rename_all = "kebab-case")]
pub enum RenderKind {
    Plain,
    Badge(BadgeMapping),
    Currency,
    Date,
    /// Rendered by the column's formatter function.
    Custom,
}

/// Declarative description of one table column.
///
/// `key` may be a dotted path traversing one level of a related object,
/// e.g. `customer.name` on a contract row.
#[derive(Clone)]
pub struct ColumnDescriptor {
    pub key: String,
    pub label: String,
    pub render: RenderKind,
    pub width: Option<String>,
    pub sortable: bool,
    /// Formatter for [`RenderKind::Custom`] columns.
    pub formatter: Option<CellFormatter>,
}

impl ColumnDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            render: RenderKind::Plain,
            width: None,
            sortable: false,
            formatter: None,
        }
    }

    pub fn with_render(mut self, render: RenderKind) -> Self {
        self.render = render;
        self
    }

    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Render through a custom formatter.
    pub fn with_formatter(
        mut self,
        formatter: impl Fn(&FieldValue, &FieldValue) -> String + Send + Sync + 'static,
    ) -> Self {
        self.render = RenderKind::Custom;
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// The head segment of the key — the property on the entity itself.
    pub fn head_key(&self) -> &str {
        self.key.split('.').next().unwrap_or(&self.key)
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("render", &self.render)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
