//! Address screens, with Brazilian state and postal-code formats.

use backoffice_engine::{FormConfig, ListConfig};
use backoffice_fields::{
    ColumnDescriptor, ConfigError, FieldDescriptor, FieldKind, FilterDescriptor, FilterInput,
    ValidatorSpec,
};

use crate::models::Address;

pub fn form_config() -> Result<FormConfig<Address>, ConfigError> {
    FormConfig::builder("Address", "Addresses", "/addresses")
        .field(FieldDescriptor::new("street", "Street", FieldKind::text()).required())
        .field(FieldDescriptor::new("number", "Number", FieldKind::text()).with_placeholder("s/n"))
        .field(FieldDescriptor::new("complement", "Complement", FieldKind::text()))
        .field(FieldDescriptor::new("district", "District", FieldKind::text()))
        .field(FieldDescriptor::new("city", "City", FieldKind::text()).required())
        .field(
            FieldDescriptor::new("state", "State", FieldKind::text())
                .required()
                .with_validator(ValidatorSpec::Pattern(r"^[A-Z]{2}$".into())),
        )
        .field(
            FieldDescriptor::new("zip_code", "CEP", FieldKind::text())
                .with_validator(ValidatorSpec::Pattern(r"^\d{5}-?\d{3}$".into()))
                .with_placeholder("00000-000"),
        )
        .before_save(|value, _is_edit| {
            super::blank_to_null(value, &["number", "complement", "district", "zip_code"])
        })
        .error_message("state", "Use the two-letter state code")
        .error_message("zip_code", "CEP must look like 00000-000")
        .build()
}

pub fn list_config() -> Result<ListConfig<Address>, ConfigError> {
    ListConfig::builder("Address", "Addresses", "/addresses")
        .column(ColumnDescriptor::new("street", "Street").sortable())
        .column(ColumnDescriptor::new("district", "District"))
        .column(ColumnDescriptor::new("city", "City").sortable())
        .column(ColumnDescriptor::new("state", "State").with_width("5rem"))
        .filter(FilterDescriptor::new("city", "City", FilterInput::Text))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configs_build() {
        let form = form_config().unwrap();
        assert!(form.field("state").unwrap().required);
        assert!(list_config().is_ok());
    }
}
