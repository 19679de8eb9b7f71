//! Form field descriptors.
//!
//! A [`FieldDescriptor`] declares one editable control: its key on the
//! entity, how it is rendered, what it defaults to, and which validation
//! rules apply. The form engine builds exactly one control per descriptor.

use serde::{Deserialize, Serialize};

use crate::validate::ValidatorSpec;

/// Field and filter values flow through the engines as JSON values.
pub type FieldValue = serde_json::Value;

/// A single option in a select or radio field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectOption {
    pub value: FieldValue,
    pub label: String,
    #[serde(default)]
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<FieldValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }
}

/// The kind of a form field — determines the control, the empty value, and
/// any kind-specific constraints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldKind {
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    Email,
    Password,
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    Currency,
    Date,
    Textarea {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rows: Option<u8>,
    },
    Select,
    Checkbox,
    Radio,
    /// National tax identifier (digits-only, masked in the view layer).
    TaxId,
    Phone,
}

impl FieldKind {
    /// Plain text field with no length constraints.
    pub fn text() -> Self {
        Self::Text {
            min_length: None,
            max_length: None,
        }
    }

    /// Number field with no bounds.
    pub fn number() -> Self {
        Self::Number {
            min: None,
            max: None,
            step: None,
        }
    }

    /// The value a control of this kind starts with when no default is
    /// configured.
    pub fn empty_value(&self) -> FieldValue {
        match self {
            Self::Checkbox => FieldValue::Bool(false),
            Self::Number { .. } | Self::Currency => FieldValue::Null,
            _ => FieldValue::String(String::new()),
        }
    }

    /// Validators implied by the kind itself (length and numeric bounds).
    pub fn implicit_validators(&self) -> Vec<ValidatorSpec> {
        let mut specs = Vec::new();
        match self {
            Self::Text {
                min_length,
                max_length,
            } => {
                if let Some(min) = min_length {
                    specs.push(ValidatorSpec::MinLength(*min));
                }
                if let Some(max) = max_length {
                    specs.push(ValidatorSpec::MaxLength(*max));
                }
            }
            Self::Email => specs.push(ValidatorSpec::Email),
            Self::Number { min, max, .. } => {
                if let Some(min) = min {
                    specs.push(ValidatorSpec::Min(*min));
                }
                if let Some(max) = max {
                    specs.push(ValidatorSpec::Max(*max));
                }
            }
            _ => {}
        }
        specs
    }
}

/// Declarative description of one editable form field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Property name on the target entity's serialized shape.
    pub key: String,
    /// Label shown to the user.
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Seed value for the control; the kind's empty value when absent.
    pub default_value: Option<FieldValue>,
    pub placeholder: Option<String>,
    /// Explicit validators, applied on top of the kind's implicit ones.
    pub validators: Vec<ValidatorSpec>,
    /// Static options for select/radio fields.
    pub options: Vec<SelectOption>,
    /// Name of a related-data collection that supplies the options instead.
    pub options_source: Option<String>,
    pub disabled: bool,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
            default_value: None,
            placeholder: None,
            validators: Vec::new(),
            options: Vec::new(),
            options_source: None,
            disabled: false,
        }
    }

    /// Mark the field required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Seed the control with a default value.
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Add an explicit validator.
    pub fn with_validator(mut self, validator: ValidatorSpec) -> Self {
        self.validators.push(validator);
        self
    }

    /// Set static options (select/radio fields).
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    /// Source the options from a named related-data collection.
    pub fn with_options_source(mut self, source: impl Into<String>) -> Self {
        self.options_source = Some(source.into());
        self
    }

    /// Disable the control.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// The full validator set: required, explicit, then kind-implicit.
    pub fn effective_validators(&self) -> Vec<ValidatorSpec> {
        let mut specs = Vec::new();
        if self.required {
            specs.push(ValidatorSpec::Required);
        }
        specs.extend(self.validators.iter().cloned());
        specs.extend(self.kind.implicit_validators());
        specs
    }

    /// The value a fresh control for this field holds.
    pub fn seed_value(&self) -> FieldValue {
        self.default_value
            .clone()
            .unwrap_or_else(|| self.kind.empty_value())
    }
}
