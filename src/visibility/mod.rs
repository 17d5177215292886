//! The visibility resolver: per-element, per-repeat-instance visibility.
//!
//! Containers are processed shallow-first so that an ancestor's hidden state
//! is always known before its descendants are examined; a hidden ancestor
//! forces every descendant hidden at the matching repeat index, regardless of
//! the descendant's own rules.

mod repeat;

pub use repeat::{repeat_count, text_variables};

use crate::field::FieldStore;
use crate::logic;
use crate::step::{ElementCommon, Position, Step, Subgrid};
use ahash::AHashMap;
use itertools::Itertools;

/// Visibility per position key: one boolean per repeat instance of the
/// nearest repeating ancestor (a single entry when there is none).
/// `true` means visible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilityMap {
    entries: AHashMap<String, Vec<bool>>,
}

impl VisibilityMap {
    /// Whether the instance at `index` is visible. Positions the resolver
    /// never saw default to visible (default-show), and an index past the
    /// recorded instances clamps to the last one.
    pub fn visible(&self, position: &Position, index: usize) -> bool {
        match self.entries.get(&position.key()) {
            Some(states) => states
                .get(index)
                .copied()
                .unwrap_or_else(|| states.last().copied().unwrap_or(true)),
            None => true,
        }
    }

    /// The full instance sequence for a position, if recorded.
    pub fn instances(&self, position: &Position) -> Option<&[bool]> {
        self.entries.get(&position.key()).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[bool])> {
        self.entries
            .iter()
            .map(|(key, states)| (key.as_str(), states.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Computes visibility for every positioned element of `step`.
pub fn compute_visibility(step: &Step, store: &FieldStore) -> VisibilityMap {
    let repeating: Vec<&Subgrid> = step
        .subgrids
        .iter()
        .filter(|grid| grid.repeated)
        .collect();

    // Hidden states, keyed by position. Containers land here first
    // (shallow-first) so leaf elements can consult their ancestors.
    let mut hidden: AHashMap<String, Vec<bool>> = AHashMap::new();

    let ordered_grids = step
        .subgrids
        .iter()
        .sorted_by_key(|grid| grid.common.position.depth());
    for grid in ordered_grids {
        let states = instance_hidden_states(&grid.common, step, store, &repeating, &hidden);
        hidden.insert(grid.common.position.key(), states);
    }

    for element in step.leaf_elements() {
        let states = instance_hidden_states(element.common(), step, store, &repeating, &hidden);
        hidden.insert(element.position().key(), states);
    }

    let entries = hidden
        .into_iter()
        .map(|(key, states)| (key, states.into_iter().map(|h| !h).collect()))
        .collect();
    VisibilityMap { entries }
}

/// Hidden state per repeat instance for one element: its own hide-if result
/// at that index, OR'd with any recorded ancestor hidden state.
fn instance_hidden_states(
    common: &ElementCommon,
    step: &Step,
    store: &FieldStore,
    repeating: &[&Subgrid],
    hidden: &AHashMap<String, Vec<bool>>,
) -> Vec<bool> {
    let ancestor = nearest_repeating_ancestor(repeating, &common.position);
    let count = ancestor
        .map(|container| repeat_count(step, container, store))
        .unwrap_or(1);

    (0..count)
        .map(|index| {
            let repeat_index = ancestor.is_some().then_some(index);
            logic::element_hidden(&common.hide_ifs, common.show_logic, store, repeat_index)
                || ancestor_hidden(hidden, &common.position, index)
        })
        .collect()
}

/// The deepest repeated subgrid whose position contains `position`. A
/// repeated subgrid is its own repeating ancestor: its hide-ifs evaluate per
/// instance too.
fn nearest_repeating_ancestor<'a>(
    repeating: &[&'a Subgrid],
    position: &Position,
) -> Option<&'a Subgrid> {
    repeating
        .iter()
        .filter(|grid| grid.common.position.contains(position))
        .max_by_key(|grid| grid.common.position.depth())
        .copied()
}

/// Whether any strict ancestor of `position` is hidden at `index`. An
/// ancestor outside the repeat context carries a single state; an ancestor
/// with fewer instances clamps to its last.
fn ancestor_hidden(
    hidden: &AHashMap<String, Vec<bool>>,
    position: &Position,
    index: usize,
) -> bool {
    position.ancestors().any(|ancestor| {
        hidden.get(&ancestor.key()).is_some_and(|states| {
            states
                .get(index)
                .copied()
                .unwrap_or_else(|| states.last().copied().unwrap_or(false))
        })
    })
}
