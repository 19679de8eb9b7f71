//! Customer screens: form with category reference data and a list with
//! server-side name and tax-id searches.

use std::sync::Arc;

use backoffice_engine::{FormConfig, ListConfig, RelatedDataSpec, RelatedLoader};
use backoffice_fields::{
    BadgeMapping, ColumnDescriptor, ConfigError, FieldDescriptor, FieldKind, FilterDescriptor,
    FilterInput, RenderKind, ValidatorSpec,
};

use crate::models::Customer;

/// Search capability names the customer list dispatches to.
pub const SEARCH_BY_NAME: &str = "search-by-name";
pub const SEARCH_BY_TAX_ID: &str = "search-by-tax-id";

pub fn form_config(
    categories: Arc<dyn RelatedLoader>,
) -> Result<FormConfig<Customer>, ConfigError> {
    FormConfig::builder("Customer", "Customers", "/customers")
        .field(FieldDescriptor::new("name", "Full name", FieldKind::text()).required())
        .field(
            FieldDescriptor::new("email", "Email", FieldKind::Email)
                .with_placeholder("name@example.com"),
        )
        .field(
            FieldDescriptor::new("tax_id", "CPF", FieldKind::TaxId)
                .with_validator(ValidatorSpec::Pattern(r"^\d{11}$".into()))
                .with_placeholder("digits only"),
        )
        .field(FieldDescriptor::new("phone", "Phone", FieldKind::Phone))
        .field(FieldDescriptor::new("birth_date", "Birth date", FieldKind::Date))
        .field(
            FieldDescriptor::new("category", "Category", FieldKind::Select)
                .with_options_source("categories"),
        )
        .field(FieldDescriptor::new("active", "Active", FieldKind::Checkbox).with_default(true))
        .related(RelatedDataSpec::new("categories", categories))
        .before_save(|value, _is_edit| {
            let value = super::blank_to_null(value, &["email", "tax_id", "phone", "birth_date"]);
            super::id_to_ref(value, &["category"])
        })
        .error_message("tax_id", "CPF must be 11 digits")
        .build()
}

pub fn list_config() -> Result<ListConfig<Customer>, ConfigError> {
    ListConfig::builder("Customer", "Customers", "/customers")
        .column(ColumnDescriptor::new("name", "Name").sortable())
        .column(ColumnDescriptor::new("email", "Email"))
        .column(ColumnDescriptor::new("phone", "Phone").with_width("10rem"))
        .column(
            ColumnDescriptor::new("category.name", "Category")
                .with_width("10rem")
                .sortable(),
        )
        .column(
            ColumnDescriptor::new("active", "Status")
                .with_render(RenderKind::Badge(BadgeMapping::active_inactive()))
                .with_width("6rem"),
        )
        .filter(
            FilterDescriptor::new("name", "Name", FilterInput::Text)
                .with_placeholder("Search by name")
                .with_dispatch(SEARCH_BY_NAME)
                .search_on_enter(),
        )
        .filter(
            FilterDescriptor::new("tax_id", "CPF", FilterInput::Text)
                .with_placeholder("Search by CPF")
                .with_dispatch(SEARCH_BY_TAX_ID)
                .search_on_enter(),
        )
        .filter(FilterDescriptor::new("active", "Active only", FilterInput::Checkbox))
        .show_count()
        .build()
}
