//! # Formtree - Form Logic and Layout Engine
//!
//! **Formtree** is the logic core of an embeddable form runtime: given a
//! server-authored declarative step definition (a tree of containers,
//! fields, and layout metadata), it tracks field state, evaluates typed
//! comparison rules, resolves per-repeat-instance visibility, reconstructs
//! the nested grid layout tree, and drives step-to-step navigation. The
//! actual widget rendering, styling, and network layers are the host's
//! business; this crate consumes and produces plain data structures.
//!
//! ## Core Workflow
//!
//! 1. **Parse**: deserialize a backend step payload with [`Step::from_json`]
//!    (or build a [`step::StepDefinition`] yourself and convert it).
//! 2. **Seed**: create a [`field::FieldStore`] and seed type-appropriate
//!    defaults with `seed_step`; hydrate saved session values on top.
//! 3. **Resolve & build**: on every (coalesced) render pass, call
//!    [`visibility::compute_visibility`] and [`grid::build_tree`]; both are
//!    pure functions of the step and current field values.
//! 4. **Navigate**: on user interaction, mutate the store, then ask
//!    [`nav::next_step_key`] which step the triggering event leads to.
//!
//! Evaluation never panics or errors on malformed backend data: rules that
//! reference missing fields evaluate false, unknown positions render
//! nothing, and unmatched triggers produce no navigation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use formtree::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let json = std::fs::read_to_string("step.json")?;
//!     let step = Step::from_json(&json)?;
//!
//!     let mut store = FieldStore::new();
//!     store.seed_step(&step);
//!     store.set("age", 21.0);
//!
//!     // Pure render-pass outputs: visibility per repeat instance, and the
//!     // assembled layout tree for the presentation layer to walk.
//!     let visibility = compute_visibility(&step, &store);
//!     let tree = build_tree(&step, Viewport::Desktop, &store);
//!     tree.root.walk(&mut |node| {
//!         let instance = node.repeat.unwrap_or(0);
//!         if node.is_element && visibility.visible(&node.position, instance) {
//!             // hand the node to the widget renderer
//!         }
//!     });
//!
//!     // Navigation: most-specific matching condition whose rules all hold.
//!     let trigger = Trigger::button("next-btn");
//!     if let Some(next) = next_step_key(&step.next_conditions, &trigger, &store) {
//!         println!("advance to step '{}'", next);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency model
//!
//! The engine is single-threaded by design: all evaluation runs synchronously
//! within the host's event handling, and the [`field::FieldStore`] is the
//! only shared mutable state, accessed under a single-writer discipline.
//! Rerenders coalesce through [`field::RenderNotifier`] rather than firing
//! per keystroke.

pub mod error;
pub mod field;
pub mod grid;
pub mod logic;
pub mod nav;
pub mod prelude;
pub mod step;
pub mod visibility;

pub use step::Step;
