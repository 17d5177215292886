//! The comparison engine: evaluates one resolved rule against the field
//! store.
//!
//! Evaluation never fails. Malformed data (absent fields, type mismatches,
//! non-numeric ordering operands) degrades to `false` per the crate's
//! never-crash policy; the operator set itself is validated earlier, at
//! definition deserialization time.

mod operator;
mod rule;

pub use operator::Operator;
pub use rule::{ComparisonRule, HideIf, Operand};

use crate::field::{FieldStore, FieldValue};
use itertools::Itertools;

/// Evaluates `rule` against the store.
///
/// The left operand is the stored value under `rule.field_key`. Repeated
/// (array-valued) fields contribute **every** entry, each of which must
/// compare truthily against **some** right-hand value; passing `repeat_index`
/// narrows resolution to that single entry instead, which is how hide-if
/// rules are checked per repeat instance.
pub fn evaluate(rule: &ComparisonRule, store: &FieldStore, repeat_index: Option<usize>) -> bool {
    let stored = store.get(&rule.field_key);

    if rule.comparison.is_membership() {
        let collection = narrow_collection(stored, repeat_index);
        let rights = resolve_rights(&rule.values, store);
        let includes = rights.iter().any(|right| collection_includes(&collection, right));
        return match rule.comparison {
            Operator::SelectionsInclude => includes,
            Operator::SelectionsDontInclude => !includes,
            _ => unreachable!("is_membership covers exactly the selections operators"),
        };
    }

    let lefts = resolve_left(stored, repeat_index);
    // Unary operators inspect only the stored value; skip resolving `values`
    // so a stale field reference there cannot influence the result.
    let rights = if rule.comparison.is_unary() {
        Vec::new()
    } else {
        resolve_rights(&rule.values, store)
    };
    lefts
        .iter()
        .all(|left| value_holds(rule.comparison, left, &rights))
}

/// Left-operand resolution: a non-empty list yields its entries (or the
/// single narrowed entry), an empty list acts as one absent operand, and a
/// missing field is absent outright.
fn resolve_left(stored: Option<&FieldValue>, repeat_index: Option<usize>) -> Vec<FieldValue> {
    match stored {
        Some(FieldValue::List(items)) if !items.is_empty() => match repeat_index {
            Some(index) => vec![items.get(index).cloned().unwrap_or(FieldValue::Null)],
            None => items.clone(),
        },
        Some(FieldValue::List(_)) => vec![FieldValue::Null],
        Some(value) => vec![value.clone()],
        None => vec![FieldValue::Null],
    }
}

/// Right-operand resolution: field references read the store, and an
/// array-valued reference contributes each of its entries so that matching
/// is by "some" (multi-select semantics).
fn resolve_rights(operands: &[Operand], store: &FieldStore) -> Vec<FieldValue> {
    let mut rights = Vec::with_capacity(operands.len());
    for operand in operands {
        match operand {
            Operand::Literal(value) => rights.push(value.clone()),
            Operand::FieldRef(key) => match store.get(key) {
                Some(FieldValue::List(items)) => rights.extend(items.iter().cloned()),
                Some(value) => rights.push(value.clone()),
                None => rights.push(FieldValue::Null),
            },
        }
    }
    rights
}

/// Membership target for the selections operators. With a repeat index, a
/// list entry that is itself a collection narrows to that entry; otherwise
/// the whole stored value is the collection.
fn narrow_collection(stored: Option<&FieldValue>, repeat_index: Option<usize>) -> FieldValue {
    match (stored, repeat_index) {
        (Some(FieldValue::List(items)), Some(index)) => match items.get(index) {
            Some(entry @ (FieldValue::List(_) | FieldValue::Map(_))) => entry.clone(),
            _ => FieldValue::List(items.clone()),
        },
        (Some(value), _) => value.clone(),
        (None, _) => FieldValue::Null,
    }
}

/// Membership test. Lists match entries; maps match **keys**, not values —
/// a deliberate asymmetry carried over from the source system. A scalar
/// degenerates to equality.
fn collection_includes(collection: &FieldValue, candidate: &FieldValue) -> bool {
    match collection {
        FieldValue::List(items) => items.iter().any(|item| values_equal(item, candidate)),
        FieldValue::Map(entries) => {
            let key = candidate.coerce_string();
            entries.contains_key(&key)
        }
        other => values_equal(other, candidate),
    }
}

/// Applies the operator to one left value, flattening nested lists
/// (a repeated multi-valued field seen without a repeat index) so that every
/// leaf must hold.
fn value_holds(op: Operator, left: &FieldValue, rights: &[FieldValue]) -> bool {
    if let FieldValue::List(items) = left {
        if items.is_empty() {
            return scalar_holds(op, &FieldValue::Null, rights);
        }
        return items.iter().all(|item| value_holds(op, item, rights));
    }
    scalar_holds(op, left, rights)
}

fn scalar_holds(op: Operator, left: &FieldValue, rights: &[FieldValue]) -> bool {
    let some_right = |pred: &dyn Fn(&FieldValue) -> bool| rights.iter().any(|r| pred(r));
    match op {
        Operator::Equal => some_right(&|r| values_equal(left, r)),
        Operator::NotEqual => !some_right(&|r| values_equal(left, r)),
        Operator::EqualIgnoreCase => some_right(&|r| strings_equal_ignore_case(left, r)),
        Operator::NotEqualIgnoreCase => !some_right(&|r| strings_equal_ignore_case(left, r)),

        Operator::GreaterThan
        | Operator::GreaterThanOrEqual
        | Operator::LessThan
        | Operator::LessThanOrEqual => some_right(&|r| ordering_holds(op, left, r)),

        Operator::IsFilled => !left.is_empty_value(),
        Operator::IsEmpty => left.is_empty_value(),
        Operator::IsTrue => matches!(left, FieldValue::Bool(true)),
        Operator::IsFalse => matches!(left, FieldValue::Bool(false)),

        Operator::Contains => some_right(&|r| left.coerce_string().contains(&r.coerce_string())),
        Operator::NotContains => {
            !some_right(&|r| left.coerce_string().contains(&r.coerce_string()))
        }
        Operator::ContainsIgnoreCase => some_right(&|r| {
            left.coerce_string()
                .to_lowercase()
                .contains(&r.coerce_string().to_lowercase())
        }),
        Operator::NotContainsIgnoreCase => !some_right(&|r| {
            left.coerce_string()
                .to_lowercase()
                .contains(&r.coerce_string().to_lowercase())
        }),
        Operator::StartsWith => {
            some_right(&|r| left.coerce_string().starts_with(&r.coerce_string()))
        }
        Operator::NotStartsWith => {
            !some_right(&|r| left.coerce_string().starts_with(&r.coerce_string()))
        }
        Operator::EndsWith => some_right(&|r| left.coerce_string().ends_with(&r.coerce_string())),
        Operator::NotEndsWith => {
            !some_right(&|r| left.coerce_string().ends_with(&r.coerce_string()))
        }

        Operator::IsNumerical => left.as_number().is_some(),
        Operator::IsText => matches!(left, FieldValue::Text(_)) && left.as_number().is_none(),

        Operator::SelectionsInclude | Operator::SelectionsDontInclude => {
            // Handled before scalar dispatch; reaching here means a scalar
            // left, which degenerates to plain membership-as-equality.
            let includes = some_right(&|r| values_equal(left, r));
            if op == Operator::SelectionsInclude {
                includes
            } else {
                !includes
            }
        }
    }
}

/// Deep, numeric-aware equality: values that both parse as numbers compare
/// numerically (so `"18"` equals `18`), everything else compares
/// structurally.
pub fn values_equal(a: &FieldValue, b: &FieldValue) -> bool {
    if let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
        return x == y;
    }
    match (a, b) {
        (FieldValue::Null, FieldValue::Null) => true,
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x == y,
        (FieldValue::Text(x), FieldValue::Text(y)) => x == y,
        (FieldValue::List(x), FieldValue::List(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| values_equal(l, r))
        }
        (FieldValue::Map(x), FieldValue::Map(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, value)| y.get(key).is_some_and(|other| values_equal(value, other)))
        }
        (FieldValue::PendingFile(x), FieldValue::PendingFile(y)) => x == y,
        _ => false,
    }
}

fn strings_equal_ignore_case(a: &FieldValue, b: &FieldValue) -> bool {
    a.coerce_string().to_lowercase() == b.coerce_string().to_lowercase()
}

/// Ordering is numeric-only and absence never satisfies it: a null or empty
/// operand fails, and so does a non-numeric string. Mismatches are failed
/// comparisons, not errors.
fn ordering_holds(op: Operator, left: &FieldValue, right: &FieldValue) -> bool {
    if left.is_empty_value() || right.is_empty_value() {
        return false;
    }
    match (left.as_number(), right.as_number()) {
        (Some(l), Some(r)) => match op {
            Operator::GreaterThan => l > r,
            Operator::GreaterThanOrEqual => l >= r,
            Operator::LessThan => l < r,
            Operator::LessThanOrEqual => l <= r,
            _ => false,
        },
        _ => false,
    }
}

/// Evaluates an element's hide-if rows: OR over index groups of AND over the
/// rows in each group, with `show_logic` inverting the combined result.
/// An element with no rows is never hidden by its own rules.
pub fn element_hidden(
    hide_ifs: &[HideIf],
    show_logic: bool,
    store: &FieldStore,
    repeat_index: Option<usize>,
) -> bool {
    if hide_ifs.is_empty() {
        return false;
    }
    let groups = hide_ifs
        .iter()
        .map(|row| (row.index, &row.rule))
        .into_group_map();
    let matched = groups
        .values()
        .any(|rules| rules.iter().all(|rule| evaluate(rule, store, repeat_index)));
    if show_logic { !matched } else { matched }
}
