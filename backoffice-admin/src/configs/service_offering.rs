//! Service-offering screens, with a priced currency column.

use backoffice_engine::{FormConfig, ListConfig};
use backoffice_fields::{
    BadgeMapping, ColumnDescriptor, ConfigError, FieldDescriptor, FieldKind, FilterDescriptor,
    FilterInput, RenderKind, ValidatorSpec,
};

use crate::models::ServiceOffering;

pub fn form_config() -> Result<FormConfig<ServiceOffering>, ConfigError> {
    FormConfig::builder("Service", "Services", "/services")
        .field(FieldDescriptor::new("name", "Name", FieldKind::text()).required())
        .field(FieldDescriptor::new(
            "description",
            "Description",
            FieldKind::Textarea { rows: Some(4) },
        ))
        .field(
            FieldDescriptor::new("price", "Price", FieldKind::Currency)
                .required()
                .with_validator(ValidatorSpec::Min(0.0)),
        )
        .field(FieldDescriptor::new("active", "Active", FieldKind::Checkbox).with_default(true))
        .before_save(|value, _is_edit| super::blank_to_null(value, &["description"]))
        .error_message("price", "Price must be zero or more")
        .build()
}

pub fn list_config() -> Result<ListConfig<ServiceOffering>, ConfigError> {
    ListConfig::builder("Service", "Services", "/services")
        .column(ColumnDescriptor::new("name", "Name").sortable())
        .column(
            ColumnDescriptor::new("price", "Price")
                .with_render(RenderKind::Currency)
                .with_width("8rem")
                .sortable(),
        )
        .column(
            ColumnDescriptor::new("active", "Status")
                .with_render(RenderKind::Badge(BadgeMapping::active_inactive()))
                .with_width("6rem"),
        )
        .filter(FilterDescriptor::new("name", "Name", FilterInput::Text))
        .filter(FilterDescriptor::new("active", "Active only", FilterInput::Checkbox))
        .show_count()
        .build()
}
