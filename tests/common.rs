//! Common test utilities for building steps, elements, and field state.
use formtree::prelude::*;

#[allow(dead_code)]
pub fn common(id: &str, path: &[u32]) -> ElementCommon {
    ElementCommon {
        id: id.to_string(),
        position: Position::from(path),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn subgrid(path: &[u32]) -> Subgrid {
    Subgrid {
        common: common(&format!("grid-{}", Position::from(path)), path),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn repeated_subgrid(path: &[u32]) -> Subgrid {
    Subgrid {
        repeated: true,
        ..subgrid(path)
    }
}

#[allow(dead_code)]
pub fn field(key: &str, kind: ServarType, path: &[u32]) -> FieldElement {
    FieldElement {
        common: common(&format!("field-{key}"), path),
        servar: Servar::new(key, kind),
        properties: Default::default(),
    }
}

#[allow(dead_code)]
pub fn repeated_field(
    key: &str,
    kind: ServarType,
    path: &[u32],
    trigger: Option<RepeatTrigger>,
) -> FieldElement {
    let mut element = field(key, kind, path);
    element.servar.repeated = true;
    element.servar.repeat_trigger = trigger;
    element
}

#[allow(dead_code)]
pub fn content(kind: ContentKind, id: &str, path: &[u32]) -> ContentElement {
    ContentElement {
        common: common(id, path),
        kind,
        properties: Default::default(),
    }
}

#[allow(dead_code)]
pub fn text_with(id: &str, path: &[u32], text: &str) -> ContentElement {
    let mut element = content(ContentKind::Text, id, path);
    element
        .properties
        .insert("text".to_string(), serde_json::json!(text));
    element
}

#[allow(dead_code)]
pub fn rule(field_key: &str, comparison: Operator, values: Vec<Operand>) -> ComparisonRule {
    ComparisonRule::new(field_key, comparison).with_values(values)
}

#[allow(dead_code)]
pub fn hide_if(index: u32, field_key: &str, comparison: Operator, values: Vec<Operand>) -> HideIf {
    HideIf {
        index,
        rule: rule(field_key, comparison, values),
    }
}

/// Root grid with one text field at [0] and one button at [1].
#[allow(dead_code)]
pub fn basic_step() -> Step {
    Step {
        key: "basic".to_string(),
        origin: true,
        subgrids: vec![subgrid(&[])],
        servar_fields: vec![field("age", ServarType::Integer, &[0])],
        buttons: vec![content(ContentKind::Button, "next-btn", &[1])],
        ..Default::default()
    }
}

/// Root grid containing a repeated container at [0] with a `set_value`
/// repeated field inside it, plus a standalone button at [1].
#[allow(dead_code)]
pub fn repeating_step() -> Step {
    Step {
        key: "repeating".to_string(),
        subgrids: vec![subgrid(&[]), repeated_subgrid(&[0])],
        servar_fields: vec![repeated_field(
            "items",
            ServarType::TextField,
            &[0, 0],
            Some(RepeatTrigger::SetValue),
        )],
        buttons: vec![content(ContentKind::Button, "submit", &[1])],
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn store_with(entries: &[(&str, FieldValue)]) -> FieldStore {
    let mut store = FieldStore::new();
    for (key, value) in entries {
        store.set(*key, value.clone());
    }
    store
}

#[allow(dead_code)]
pub fn list_of_texts(items: &[&str]) -> FieldValue {
    FieldValue::List(items.iter().map(|s| FieldValue::Text(s.to_string())).collect())
}
