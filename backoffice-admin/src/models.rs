//! Domain entities for the admin backoffice.
//!
//! Every entity derives its serialized shape with serde and declares its
//! property names through [`Entity::field_names`]; the configuration
//! builders check descriptor keys against that list at build time.

use serde::{Deserialize, Serialize};

use backoffice_fields::{Entity, EntityId};

/// A shallow reference to another entity, embedded where a row or form
/// holds a relation (e.g. a contract's customer). Carries the name so
/// dotted column keys like `customer.name` resolve without a join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: EntityId,
    #[serde(default)]
    pub name: Option<String>,
}

impl EntityRef {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// CPF, digits only.
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub category: Option<EntityRef>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// A service the business offers, with its standard price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub customer: Option<EntityRef>,
    #[serde(default)]
    pub service: Option<EntityRef>,
    /// ISO dates, `YYYY-MM-DD`.
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    pub amount: f64,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub street: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub complement: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub zip_code: Option<String>,
}

/// One billable line on an invoice or order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    #[serde(default)]
    pub total: Option<f64>,
}

fn default_true() -> bool {
    true
}

impl Entity for Customer {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "email",
            "tax_id",
            "phone",
            "birth_date",
            "category",
            "address",
            "active",
        ]
    }
}

impl Entity for Category {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn field_names() -> &'static [&'static str] {
        &["id", "name", "description", "active"]
    }
}

impl Entity for ServiceOffering {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn field_names() -> &'static [&'static str] {
        &["id", "name", "description", "price", "active"]
    }
}

impl Entity for Contract {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "id",
            "customer",
            "service",
            "start_date",
            "end_date",
            "amount",
            "active",
        ]
    }
}

impl Entity for Address {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "id",
            "street",
            "number",
            "complement",
            "district",
            "city",
            "state",
            "zip_code",
        ]
    }
}

impl Entity for LineItem {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn field_names() -> &'static [&'static str] {
        &["id", "description", "quantity", "unit_price", "total"]
    }
}
