//! Prelude module for convenient imports
//!
//! Re-exports the types and functions most hosts need: the field store, the
//! comparison engine, the visibility resolver, the grid builder, and step
//! navigation. Import this module to drive a form without naming each module
//! individually.

// Field state
pub use crate::field::{FieldStore, FieldValue, RenderNotifier, SubscriberId};

// Comparison engine
pub use crate::logic::{ComparisonRule, HideIf, Operand, Operator, evaluate};

// Step model
pub use crate::step::{
    ContentElement, ContentKind, ElementCommon, ElementRef, FieldElement, Position, RepeatTrigger,
    Servar, ServarType, Step, StepDefinition, Subgrid,
};

// Visibility and repeats
pub use crate::visibility::{VisibilityMap, compute_visibility, repeat_count};

// Grid builder
pub use crate::grid::{GridNode, GridTree, NodeContent, Viewport, build_tree};

// Navigation
pub use crate::nav::{NavigationRule, Trigger, TriggerKind, is_terminal, next_step_key, origin_step};

// Error types
pub use crate::error::DefinitionError;
