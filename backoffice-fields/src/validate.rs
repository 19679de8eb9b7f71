//! Field validation rules and their canonical messages.
//!
//! A [`ValidatorSpec`] is evaluated against a single [`FieldValue`]. Empty
//! values (null or blank string) pass every rule except [`ValidatorSpec::Required`],
//! matching the usual reactive-forms behavior where optional fields are only
//! validated once filled in.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::field::FieldValue;

/// A single validation rule attached to a field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum ValidatorSpec {
    Required,
    Email,
    Pattern(String),
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
}

/// Why a value failed validation. Carries enough context to build the
/// canonical per-kind message.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationFailure {
    Required,
    InvalidEmail,
    InvalidFormat,
    TooShort { min: usize },
    TooLong { max: usize },
    BelowMinimum { min: f64 },
    AboveMaximum { max: f64 },
}

impl ValidationFailure {
    /// The canonical user-facing message for this failure kind.
    pub fn canonical_message(&self) -> String {
        match self {
            Self::Required => "This field is required".to_string(),
            Self::InvalidEmail => "Invalid email address".to_string(),
            Self::InvalidFormat => "Invalid format".to_string(),
            Self::TooShort { min } => format!("Minimum of {min} characters"),
            Self::TooLong { max } => format!("Maximum of {max} characters"),
            Self::BelowMinimum { min } => format!("Minimum value is {min}"),
            Self::AboveMaximum { max } => format!("Maximum value is {max}"),
        }
    }
}

/// Is the value empty for validation purposes?
pub fn is_empty_value(value: &FieldValue) -> bool {
    match value {
        FieldValue::Null => true,
        FieldValue::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

impl ValidatorSpec {
    /// Evaluate this rule against a value.
    ///
    /// Returns `None` when the value passes. Pattern validators are
    /// compile-checked at configuration-build time; an uncompilable pattern
    /// reaching this point is treated as passing.
    pub fn validate(&self, value: &FieldValue) -> Option<ValidationFailure> {
        if matches!(self, Self::Required) {
            return is_empty_value(value).then_some(ValidationFailure::Required);
        }
        if is_empty_value(value) {
            return None;
        }

        match self {
            Self::Required => unreachable!("handled above"),
            Self::Email => {
                let text = value.as_str()?;
                let ok = text.split_once('@').is_some_and(|(local, domain)| {
                    !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
                });
                (!ok).then_some(ValidationFailure::InvalidEmail)
            }
            Self::Pattern(pattern) => {
                let text = value.as_str()?;
                let re = Regex::new(pattern).ok()?;
                (!re.is_match(text)).then_some(ValidationFailure::InvalidFormat)
            }
            Self::MinLength(min) => {
                let text = value.as_str()?;
                (text.chars().count() < *min).then_some(ValidationFailure::TooShort { min: *min })
            }
            Self::MaxLength(max) => {
                let text = value.as_str()?;
                (text.chars().count() > *max).then_some(ValidationFailure::TooLong { max: *max })
            }
            Self::Min(min) => {
                let number = value.as_f64()?;
                (number < *min).then_some(ValidationFailure::BelowMinimum { min: *min })
            }
            Self::Max(max) => {
                let number = value.as_f64()?;
                (number > *max).then_some(ValidationFailure::AboveMaximum { max: *max })
            }
        }
    }

    /// Check that the rule itself is well-formed (used at config build).
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Pattern(pattern) => Regex::new(pattern).is_ok(),
            _ => true,
        }
    }
}

/// Run every validator against a value, collecting all failures in order.
pub fn validate_value(validators: &[ValidatorSpec], value: &FieldValue) -> Vec<ValidationFailure> {
    validators
        .iter()
        .filter_map(|spec| spec.validate(value))
        .collect()
}
