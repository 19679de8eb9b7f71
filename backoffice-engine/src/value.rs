//! Value resolution, comparison, and display helpers shared by the engines.
//!
//! Items flow through the list engine as their serialized JSON shape;
//! descriptor keys resolve against that shape, supporting one dotted hop
//! into a related object (e.g. `customer.name`).

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate};

use backoffice_fields::FieldValue;

/// Resolve a (possibly dotted) key path against a serialized item.
pub fn resolve_path<'a>(root: &'a FieldValue, path: &str) -> Option<&'a FieldValue> {
    path.split('.')
        .try_fold(root, |value, segment| value.get(segment))
}

/// Filter-value truthiness: empty and falsy values deactivate a filter.
pub fn is_truthy(value: &FieldValue) -> bool {
    match value {
        FieldValue::Null => false,
        FieldValue::Bool(b) => *b,
        FieldValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        FieldValue::String(s) => !s.trim().is_empty(),
        FieldValue::Array(a) => !a.is_empty(),
        FieldValue::Object(_) => true,
    }
}

/// Plain-text rendering of a resolved value, without quoting strings.
pub fn value_text(value: &FieldValue) -> String {
    match value {
        FieldValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Total order over resolved field values for generic column sorting.
///
/// Missing and null values sort last regardless of direction (the caller
/// keeps them pinned when reversing). Across types: booleans, then
/// numbers, then strings (case-insensitive), then everything else.
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    fn rank(value: &FieldValue) -> u8 {
        match value {
            FieldValue::Bool(_) => 0,
            FieldValue::Number(_) => 1,
            FieldValue::String(_) => 2,
            _ => 3,
        }
    }

    match (a, b) {
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
        (FieldValue::Number(x), FieldValue::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (FieldValue::String(x), FieldValue::String(y)) => x
            .to_lowercase()
            .cmp(&y.to_lowercase())
            .then_with(|| x.cmp(y)),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Human-readable label for an item, used in delete confirmations.
///
/// Prefers a `name`, `title`, or `nome` property, then falls back to
/// `"<entity> #<id>"`.
pub fn display_label(item: &FieldValue, entity_name: &str) -> String {
    for key in ["name", "title", "nome"] {
        if let Some(FieldValue::String(text)) = item.get(key) {
            if !text.is_empty() {
                return text.clone();
            }
        }
    }
    match item.get("id").and_then(FieldValue::as_i64) {
        Some(id) => format!("{entity_name} #{id}"),
        None => entity_name.to_string(),
    }
}

/// Label for a select option built from a related item.
pub fn option_label(item: &FieldValue) -> String {
    for key in ["name", "title", "label", "nome"] {
        if let Some(FieldValue::String(text)) = item.get(key) {
            if !text.is_empty() {
                return text.clone();
            }
        }
    }
    value_text(item)
}

/// Format a numeric value as Brazilian currency, e.g. `R$ 1.234,56`.
pub fn format_currency(value: Option<&FieldValue>) -> String {
    let amount = value.and_then(FieldValue::as_f64).unwrap_or(0.0);
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac:02}")
}

/// Format an ISO date (or datetime) value as `DD/MM/YYYY`; `-` when absent.
pub fn format_date(value: Option<&FieldValue>) -> String {
    let Some(FieldValue::String(text)) = value else {
        return "-".to_string();
    };
    if text.is_empty() {
        return "-".to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return datetime.format("%d/%m/%Y").to_string();
    }
    text.clone()
}
