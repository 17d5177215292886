//! End-to-end tests: JSON definition in, visibility + tree + navigation out,
//! plus store seeding, hydration, and coalesced notification.
mod common;
use common::*;
use formtree::grid::NodeContent;
use formtree::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

const SIGNUP_STEP: &str = r#"{
    "key": "signup",
    "origin": true,
    "subgrids": [
        {"id": "g-root", "position": [], "width": "100%"},
        {"id": "g-extras", "position": [2], "repeated": true}
    ],
    "servar_fields": [
        {
            "id": "f-age",
            "position": [0],
            "servar": {"key": "age", "type": "integer", "required": true}
        },
        {
            "id": "f-items",
            "position": [2, 0],
            "servar": {
                "key": "items",
                "type": "text_field",
                "repeated": true,
                "repeat_trigger": "set_value"
            }
        }
    ],
    "texts": [
        {"id": "t-greet", "position": [1], "properties": {"text": "Welcome, {{name}}"}}
    ],
    "buttons": [
        {
            "id": "next-btn",
            "position": [3],
            "properties": {"text": "Next", "mobile_text": "Go"},
            "hide_ifs": [
                {"index": 0, "field_key": "age", "comparison": "less_than", "values": [18]}
            ]
        }
    ],
    "next_conditions": [
        {
            "element_type": "button",
            "element_id": "next-btn",
            "rules": [
                {"field_key": "age", "comparison": "greater_than_or_equal", "values": [18]}
            ],
            "next_step_key": "confirm"
        },
        {
            "element_type": "button",
            "element_id": "next-btn",
            "rules": [],
            "next_step_key": "underage"
        }
    ]
}"#;

#[test]
fn full_render_pass_from_json() {
    let step = Step::from_json(SIGNUP_STEP).unwrap();
    assert_eq!(step.key, "signup");
    assert!(step.origin);
    assert!(step.root_subgrid().is_some());

    let mut store = FieldStore::new();
    store.seed_step(&step);
    // Type-appropriate defaults: text-like fields seed empty, repeated
    // fields seed as an empty list.
    assert_eq!(store.get("age"), Some(&FieldValue::Text(String::new())));
    assert_eq!(store.get("items"), Some(&FieldValue::List(Vec::new())));

    store.hydrate(serde_json::json!({"age": 21, "items": ["a", "b"]}));
    assert_eq!(store.get("age"), Some(&FieldValue::Number(21.0)));

    // Age 21: the next button's hide rule (age < 18) does not fire.
    let visibility = compute_visibility(&step, &store);
    assert!(visibility.visible(&Position::from(&[3u32][..]), 0));
    // Two repeat instances for the extras container.
    assert_eq!(
        visibility.instances(&Position::from(&[2u32][..])),
        Some(&[true, true][..])
    );

    let tree = build_tree(&step, Viewport::Desktop, &store);
    let clones: Vec<_> = tree
        .root
        .children
        .iter()
        .filter(|node| node.repeat.is_some())
        .collect();
    assert_eq!(clones.len(), 2);

    // The two-rule condition beats the catch-all.
    let trigger = Trigger::button("next-btn");
    assert_eq!(
        next_step_key(&step.next_conditions, &trigger, &store),
        Some("confirm")
    );

    // Underage: the specific condition fails, the catch-all routes.
    store.set("age", 15.0);
    assert_eq!(
        next_step_key(&step.next_conditions, &trigger, &store),
        Some("underage")
    );
    // ... and the button hides.
    let visibility = compute_visibility(&step, &store);
    assert!(!visibility.visible(&Position::from(&[3u32][..]), 0));
}

#[test]
fn mobile_viewport_from_json() {
    let step = Step::from_json(SIGNUP_STEP).unwrap();
    let store = FieldStore::new();
    let tree = build_tree(&step, Viewport::Mobile, &store);

    let button = tree
        .map
        .values()
        .find_map(|entry| match &entry.content {
            NodeContent::Content(el) if el.common.id == "next-btn" => Some(el),
            _ => None,
        })
        .unwrap();
    assert_eq!(button.properties["text"], serde_json::json!("Go"));
}

#[test]
fn malformed_definitions_fail_at_conversion() {
    let err = Step::from_json(r#"{"key": "no-root", "subgrids": []}"#).unwrap_err();
    assert!(matches!(err, DefinitionError::MissingRootSubgrid { .. }));

    let err = Step::from_json("{not json").unwrap_err();
    assert!(matches!(err, DefinitionError::JsonParse(_)));

    let err = Step::from_json(
        r#"{
            "key": "bad-root",
            "subgrids": [{"id": "g", "position": []}],
            "buttons": [{"id": "b", "position": []}]
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, DefinitionError::NonContainerRoot { .. }));

    // Unknown comparison operators surface as parse errors, not silent rules.
    let err = Step::from_json(
        r#"{
            "key": "bad-op",
            "subgrids": [{"id": "g", "position": []}],
            "buttons": [{
                "id": "b",
                "position": [0],
                "hide_ifs": [{"index": 0, "field_key": "x", "comparison": "sounds_like"}]
            }]
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, DefinitionError::JsonParse(_)));
}

#[test]
fn store_versioning_tracks_mutations() {
    let mut store = FieldStore::new();
    let v0 = store.version();
    store.set("a", 1.0);
    assert!(store.version() > v0);
    let v1 = store.version();
    store.remove("a");
    assert!(store.version() > v1);
    // Removing a missing key is not a mutation.
    let v2 = store.version();
    store.remove("a");
    assert_eq!(store.version(), v2);
}

#[test]
fn field_values_round_trip_through_json() {
    let original = serde_json::json!({
        "name": "ada",
        "age": 36.5,
        "tags": ["x", "y"],
        "meta": {"nested": true}
    });
    let value = FieldValue::from(original.clone());
    assert_eq!(value.to_json(), original);
}

#[test]
fn notifier_coalesces_bursts() {
    let fired = Rc::new(Cell::new(0));
    let mut notifier = RenderNotifier::new(Duration::from_millis(100));
    let counter = Rc::clone(&fired);
    let id = notifier.subscribe(move || counter.set(counter.get() + 1));

    let t0 = Instant::now();
    assert!(!notifier.poll(t0), "nothing pending yet");

    // A burst of edits within the window flushes exactly once.
    notifier.mark_dirty(t0);
    notifier.mark_dirty(t0 + Duration::from_millis(30));
    notifier.mark_dirty(t0 + Duration::from_millis(60));
    assert!(!notifier.poll(t0 + Duration::from_millis(90)));
    assert!(notifier.pending());
    assert!(notifier.poll(t0 + Duration::from_millis(100)));
    assert_eq!(fired.get(), 1);
    assert!(!notifier.pending());
    assert!(!notifier.poll(t0 + Duration::from_millis(500)), "flush clears the burst");

    // Unsubscribed callbacks no longer fire.
    assert!(notifier.unsubscribe(id));
    notifier.mark_dirty(t0 + Duration::from_secs(1));
    assert!(notifier.poll(t0 + Duration::from_secs(2)));
    assert_eq!(fired.get(), 1);
}
