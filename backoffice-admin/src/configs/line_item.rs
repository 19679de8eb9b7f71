//! Line-item screens; the total is derived, never typed.

use backoffice_engine::{FormConfig, ListConfig};
use backoffice_fields::{
    ColumnDescriptor, ConfigError, FieldDescriptor, FieldKind, FieldValue, FilterDescriptor,
    FilterInput, RenderKind,
};
use serde_json::json;

use crate::models::LineItem;

pub fn form_config() -> Result<FormConfig<LineItem>, ConfigError> {
    FormConfig::builder("Item", "Items", "/items")
        .field(FieldDescriptor::new("description", "Description", FieldKind::text()).required())
        .field(
            FieldDescriptor::new(
                "quantity",
                "Quantity",
                FieldKind::Number {
                    min: Some(0.01),
                    max: None,
                    step: Some(1.0),
                },
            )
            .required(),
        )
        .field(
            FieldDescriptor::new("unit_price", "Unit price", FieldKind::Currency).required(),
        )
        .field(FieldDescriptor::new("total", "Total", FieldKind::Currency).disabled())
        .before_save(|mut value, _is_edit| {
            let quantity = value.get("quantity").and_then(FieldValue::as_f64);
            let unit_price = value.get("unit_price").and_then(FieldValue::as_f64);
            if let (Some(object), Some(quantity), Some(unit_price)) =
                (value.as_object_mut(), quantity, unit_price)
            {
                object.insert("total".into(), json!(quantity * unit_price));
            }
            value
        })
        .build()
}

pub fn list_config() -> Result<ListConfig<LineItem>, ConfigError> {
    ListConfig::builder("Item", "Items", "/items")
        .column(ColumnDescriptor::new("description", "Description").sortable())
        .column(
            ColumnDescriptor::new("quantity", "Qty")
                .with_width("5rem")
                .with_formatter(|value, _item| {
                    match value.as_f64() {
                        Some(quantity) => format!("{quantity}x"),
                        None => "-".to_string(),
                    }
                }),
        )
        .column(
            ColumnDescriptor::new("unit_price", "Unit price")
                .with_render(RenderKind::Currency)
                .with_width("8rem"),
        )
        .column(
            ColumnDescriptor::new("total", "Total")
                .with_render(RenderKind::Currency)
                .with_width("8rem")
                .sortable(),
        )
        .filter(FilterDescriptor::new("description", "Description", FilterInput::Text))
        .show_count()
        .build()
}
