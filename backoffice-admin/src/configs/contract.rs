//! Contract screens: two related-data sources and dotted columns that
//! reach through the customer and service references.

use std::sync::Arc;

use backoffice_engine::{FormConfig, ListConfig, RelatedDataSpec, RelatedLoader};
use backoffice_fields::{
    BadgeMapping, ColumnDescriptor, ConfigError, FieldDescriptor, FieldKind, FilterDescriptor,
    FilterInput, RenderKind, ValidatorSpec,
};

use crate::models::Contract;

pub fn form_config(
    customers: Arc<dyn RelatedLoader>,
    services: Arc<dyn RelatedLoader>,
) -> Result<FormConfig<Contract>, ConfigError> {
    FormConfig::builder("Contract", "Contracts", "/contracts")
        .field(
            FieldDescriptor::new("customer", "Customer", FieldKind::Select)
                .required()
                .with_options_source("customers"),
        )
        .field(
            FieldDescriptor::new("service", "Service", FieldKind::Select)
                .required()
                .with_options_source("services"),
        )
        .field(FieldDescriptor::new("start_date", "Start date", FieldKind::Date).required())
        .field(FieldDescriptor::new("end_date", "End date", FieldKind::Date))
        .field(
            FieldDescriptor::new("amount", "Monthly amount", FieldKind::Currency)
                .required()
                .with_validator(ValidatorSpec::Min(0.01)),
        )
        .field(FieldDescriptor::new("active", "Active", FieldKind::Checkbox).with_default(true))
        .related(RelatedDataSpec::new("customers", customers))
        .related(RelatedDataSpec::new("services", services))
        .before_save(|value, _is_edit| {
            let value = super::blank_to_null(value, &["end_date"]);
            super::id_to_ref(value, &["customer", "service"])
        })
        .build()
}

pub fn list_config() -> Result<ListConfig<Contract>, ConfigError> {
    ListConfig::builder("Contract", "Contracts", "/contracts")
        .column(ColumnDescriptor::new("customer.name", "Customer").sortable())
        .column(ColumnDescriptor::new("service.name", "Service"))
        .column(
            ColumnDescriptor::new("start_date", "Start")
                .with_render(RenderKind::Date)
                .with_width("7rem")
                .sortable(),
        )
        .column(
            ColumnDescriptor::new("amount", "Amount")
                .with_render(RenderKind::Currency)
                .with_width("8rem")
                .sortable(),
        )
        .column(
            ColumnDescriptor::new("active", "Status")
                .with_render(RenderKind::Badge(BadgeMapping::active_inactive()))
                .with_width("6rem"),
        )
        .filter(FilterDescriptor::new("customer.name", "Customer", FilterInput::Text))
        .filter(FilterDescriptor::new("active", "Active only", FilterInput::Checkbox))
        .show_count()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use backoffice_engine::ServiceResult;
    use backoffice_fields::FieldValue;
    use serde_json::json;

    struct Empty;

    #[async_trait]
    impl RelatedLoader for Empty {
        async fn load(&self) -> ServiceResult<Vec<FieldValue>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn form_config_builds_with_two_sources() {
        let config = form_config(Arc::new(Empty), Arc::new(Empty)).unwrap();
        assert_eq!(config.related_data.len(), 2);
    }

    #[test]
    fn before_save_wraps_both_relations() {
        let config = form_config(Arc::new(Empty), Arc::new(Empty)).unwrap();
        let before_save = config.before_save.as_ref().unwrap();
        let payload = before_save(
            json!({
                "customer": 1,
                "service": 2,
                "start_date": "2024-01-01",
                "end_date": "",
                "amount": 99.9,
                "active": true
            }),
            false,
        );
        let contract: Contract = serde_json::from_value(payload).unwrap();
        assert_eq!(contract.customer.map(|c| c.id), Some(1));
        assert_eq!(contract.service.map(|s| s.id), Some(2));
        assert!(contract.end_date.is_none());
    }

    #[test]
    fn list_config_reaches_through_references() {
        let config = list_config().unwrap();
        assert!(config.columns.iter().any(|c| c.key == "customer.name"));
    }
}
