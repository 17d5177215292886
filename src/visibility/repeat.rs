use crate::field::{FieldStore, FieldValue};
use crate::logic::values_equal;
use crate::step::{FieldElement, Position, RepeatTrigger, Step, Subgrid};

/// Derives the instance count for a repeating container.
///
/// The count is a pure function of current field values: the larger of the
/// field-driven count and the text-variable-driven count, never below 1.
pub fn repeat_count(step: &Step, container: &Subgrid, store: &FieldStore) -> usize {
    let by_fields = count_from_repeated_fields(step, &container.common.position, store);
    let by_variables = count_from_text_variables(step, &container.common.position, store);
    let count = by_fields.max(by_variables).max(1);
    tracing::debug!(
        container = %container.common.position,
        by_fields,
        by_variables,
        count,
        "derived repeat count"
    );
    count
}

/// Maximum count contributed by repeated field descendants of the container.
///
/// A `set_value` trigger treats a trailing entry equal to the field's type
/// default as the "add new" placeholder slot and excludes it from the count
/// (`len - 1`); otherwise the count is exactly the stored length. The source
/// system shipped two inconsistent variants of this boundary; this crate
/// commits to the suppression rule.
fn count_from_repeated_fields(step: &Step, container: &Position, store: &FieldStore) -> usize {
    step.servar_fields
        .iter()
        .filter(|field| {
            field.servar.repeated && container.contains(&field.common.position)
        })
        .map(|field| field_instance_count(field, store))
        .max()
        .unwrap_or(0)
}

fn field_instance_count(field: &FieldElement, store: &FieldStore) -> usize {
    let items = match store.get(&field.servar.key) {
        Some(FieldValue::List(items)) => items,
        _ => return 0,
    };
    match field.servar.repeat_trigger {
        Some(RepeatTrigger::SetValue) => {
            let default = field.servar.default_value();
            match items.last() {
                Some(last) if values_equal(last, &default) => items.len().saturating_sub(1),
                Some(_) => items.len(),
                None => 0,
            }
        }
        None => items.len(),
    }
}

/// Maximum array length referenced by `{{variable}}` tokens in text and
/// button properties under the container.
fn count_from_text_variables(step: &Step, container: &Position, store: &FieldStore) -> usize {
    step.texts
        .iter()
        .chain(step.buttons.iter())
        .filter(|el| container.contains(&el.common.position))
        .flat_map(|el| text_variables(&el.properties))
        .filter_map(|name| match store.get(&name) {
            Some(FieldValue::List(items)) => Some(items.len()),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

/// Extracts `{{variable}}` token names from every string in a properties
/// payload, descending into nested arrays and objects (rich text stores its
/// runs as nested structures).
pub fn text_variables(properties: &serde_json::Map<String, serde_json::Value>) -> Vec<String> {
    let mut names = Vec::new();
    for value in properties.values() {
        collect_variables(value, &mut names);
    }
    names
}

fn collect_variables(value: &serde_json::Value, names: &mut Vec<String>) {
    match value {
        serde_json::Value::String(text) => scan_tokens(text, names),
        serde_json::Value::Array(items) => {
            for item in items {
                collect_variables(item, names);
            }
        }
        serde_json::Value::Object(map) => {
            for nested in map.values() {
                collect_variables(nested, names);
            }
        }
        _ => {}
    }
}

fn scan_tokens(text: &str, names: &mut Vec<String>) {
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = after[..end].trim();
                if !name.is_empty() {
                    names.push(name.to_string());
                }
                rest = &after[end + 2..];
            }
            None => break,
        }
    }
}
