//! Declarative screen configurations, one module per entity.
//!
//! Each module builds the [`FormConfig`]/[`ListConfig`] bundle its screens
//! hand to the engines. Everything entity-specific lives here — the screens
//! themselves carry no per-entity logic.
//!
//! [`FormConfig`]: backoffice_engine::FormConfig
//! [`ListConfig`]: backoffice_engine::ListConfig

pub mod address;
pub mod category;
pub mod contract;
pub mod customer;
pub mod line_item;
pub mod service_offering;

use backoffice_fields::FieldValue;
use serde_json::json;

/// Replace blank-string values under the given keys with null, so optional
/// entity properties deserialize to `None` instead of `Some("")`.
fn blank_to_null(mut value: FieldValue, keys: &[&str]) -> FieldValue {
    if let Some(object) = value.as_object_mut() {
        for key in keys {
            if let Some(FieldValue::String(text)) = object.get(*key) {
                if text.trim().is_empty() {
                    object.insert((*key).into(), FieldValue::Null);
                }
            }
        }
    }
    value
}

/// Normalize a relation control to a `{id}` reference object. A select
/// control holds the chosen option's id; an untouched edit control still
/// holds the loaded reference object.
fn id_to_ref(mut value: FieldValue, keys: &[&str]) -> FieldValue {
    if let Some(object) = value.as_object_mut() {
        for key in keys {
            if let Some(id) = object.get(*key).and_then(FieldValue::as_i64) {
                object.insert((*key).into(), json!({ "id": id }));
            }
        }
    }
    value
}
