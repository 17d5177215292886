//! Step navigation: matching a triggering event against a step's declarative
//! condition list and picking the next step key.
//!
//! Each step is a state and each condition a labeled transition. The unique
//! `origin` step is the initial state; a step with no outgoing conditions is
//! terminal. Candidate conditions are tried most-specific-first (descending
//! rule count, declaration order on ties), and the first candidate whose
//! rules all hold wins. No match means no navigation.

use crate::field::FieldStore;
use crate::logic::{self, ComparisonRule};
use crate::step::Step;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// The element classes that can trigger navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    Button,
    Text,
    Field,
}

/// A user interaction that may drive navigation: which element fired, and
/// for clicks on a text span, the exact character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub kind: TriggerKind,
    pub element_id: String,
    pub span: Option<(u32, u32)>,
}

impl Trigger {
    pub fn button(element_id: impl Into<String>) -> Self {
        Self {
            kind: TriggerKind::Button,
            element_id: element_id.into(),
            span: None,
        }
    }

    pub fn text_span(element_id: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            kind: TriggerKind::Text,
            element_id: element_id.into(),
            span: Some((start, end)),
        }
    }

    pub fn field(element_id: impl Into<String>) -> Self {
        Self {
            kind: TriggerKind::Field,
            element_id: element_id.into(),
            span: None,
        }
    }
}

/// One entry of a step's `next_conditions` / `previous_conditions` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationRule {
    pub element_type: TriggerKind,
    pub element_id: String,
    /// Start/end character offsets for text-span-scoped triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
    #[serde(default)]
    pub rules: Vec<ComparisonRule>,
    pub next_step_key: String,
}

impl NavigationRule {
    fn span(&self) -> Option<(u32, u32)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// A span-scoped condition requires the exact same offsets; an unscoped
    /// condition matches any interaction on its element.
    fn matches(&self, trigger: &Trigger) -> bool {
        if self.element_type != trigger.kind || self.element_id != trigger.element_id {
            return false;
        }
        match self.span() {
            Some(span) => trigger.span == Some(span),
            None => true,
        }
    }
}

/// Resolves the step to navigate to for `trigger`, or `None` when no
/// condition matches.
///
/// A condition with more rules is more specific and is tried first; the sort
/// is stable, so equally specific conditions keep their declaration order.
pub fn next_step_key<'a>(
    conditions: &'a [NavigationRule],
    trigger: &Trigger,
    store: &FieldStore,
) -> Option<&'a str> {
    let mut candidates: Vec<&NavigationRule> = conditions
        .iter()
        .filter(|condition| condition.matches(trigger))
        .collect();
    candidates.sort_by_key(|condition| Reverse(condition.rules.len()));

    let target = candidates.into_iter().find(|condition| {
        condition
            .rules
            .iter()
            .all(|rule| logic::evaluate(rule, store, None))
    });
    match target {
        Some(condition) => {
            tracing::debug!(next = %condition.next_step_key, "navigation condition matched");
            Some(condition.next_step_key.as_str())
        }
        None => None,
    }
}

/// The form's unique entry step, if declared.
pub fn origin_step(steps: &[Step]) -> Option<&Step> {
    steps.iter().find(|step| step.origin)
}

/// A step with no outgoing next-conditions cannot advance; its buttons only
/// perform exits.
pub fn is_terminal(step: &Step) -> bool {
    step.next_conditions.is_empty()
}
