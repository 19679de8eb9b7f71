//! Category screens — the simplest entity, filtered locally only.

use backoffice_engine::{FormConfig, ListConfig};
use backoffice_fields::{
    BadgeMapping, ColumnDescriptor, ConfigError, FieldDescriptor, FieldKind, FilterDescriptor,
    FilterInput, RenderKind,
};

use crate::models::Category;

pub fn form_config() -> Result<FormConfig<Category>, ConfigError> {
    FormConfig::builder("Category", "Categories", "/categories")
        .field(FieldDescriptor::new("name", "Name", FieldKind::text()).required())
        .field(
            FieldDescriptor::new(
                "description",
                "Description",
                FieldKind::Textarea { rows: Some(3) },
            )
            .with_placeholder("What distinguishes this category"),
        )
        .field(FieldDescriptor::new("active", "Active", FieldKind::Checkbox).with_default(true))
        .before_save(|value, _is_edit| super::blank_to_null(value, &["description"]))
        .build()
}

pub fn list_config() -> Result<ListConfig<Category>, ConfigError> {
    ListConfig::builder("Category", "Categories", "/categories")
        .column(ColumnDescriptor::new("name", "Name").sortable())
        .column(ColumnDescriptor::new("description", "Description"))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configs_build() {
        assert!(form_config().is_ok());
        let list = list_config().unwrap();
        assert!(list.filters.iter().all(|f| f.dispatch.is_none()));
    }
}
