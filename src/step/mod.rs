//! The step data model: positions, element variants, field descriptors, and
//! conversion from raw backend definitions.

mod definition;
mod element;
mod position;
mod servar;

pub use definition::{ContentDefinition, StepDefinition};
pub use element::{
    ContentElement, ContentKind, ElementCommon, ElementRef, FieldElement, JsonMap, Subgrid,
};
pub use position::{Position, ROOT_KEY};
pub use servar::{RepeatTrigger, Servar, ServarType};

use crate::error::DefinitionError;
use crate::nav::NavigationRule;
use ahash::AHashSet;

/// One named step of a form: its element lists and navigation conditions.
///
/// Invariant established at conversion time: exactly one root subgrid sits at
/// the empty position. Elements are read-only once delivered; they reference
/// field values by `servar.key` and never own them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    pub key: String,
    /// At most one step per form is the entry point.
    pub origin: bool,
    pub subgrids: Vec<Subgrid>,
    pub servar_fields: Vec<FieldElement>,
    pub texts: Vec<ContentElement>,
    pub buttons: Vec<ContentElement>,
    pub images: Vec<ContentElement>,
    pub videos: Vec<ContentElement>,
    pub progress_bars: Vec<ContentElement>,
    pub next_conditions: Vec<NavigationRule>,
    pub previous_conditions: Vec<NavigationRule>,
}

impl Step {
    /// Parses a backend JSON payload and converts it into the typed model.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let definition: StepDefinition = serde_json::from_str(json)
            .map_err(|err| DefinitionError::JsonParse(err.to_string()))?;
        Self::from_definition(definition)
    }

    /// Validates and converts a raw definition.
    ///
    /// A missing root subgrid or a leaf element claiming the root position is
    /// an error; duplicate positions within a class only warn, and the grid
    /// builder later keeps the first occurrence.
    pub fn from_definition(definition: StepDefinition) -> Result<Self, DefinitionError> {
        let step_key = definition.key.clone();

        if !definition
            .subgrids
            .iter()
            .any(|grid| grid.common.position.is_root())
        {
            return Err(DefinitionError::MissingRootSubgrid { step_key });
        }

        let step = Step {
            key: definition.key,
            origin: definition.origin,
            subgrids: definition.subgrids,
            servar_fields: definition.servar_fields,
            texts: definition
                .texts
                .into_iter()
                .map(|el| el.into_element(ContentKind::Text))
                .collect(),
            buttons: definition
                .buttons
                .into_iter()
                .map(|el| el.into_element(ContentKind::Button))
                .collect(),
            images: definition
                .images
                .into_iter()
                .map(|el| el.into_element(ContentKind::Image))
                .collect(),
            videos: definition
                .videos
                .into_iter()
                .map(|el| el.into_element(ContentKind::Video))
                .collect(),
            progress_bars: definition
                .progress_bars
                .into_iter()
                .map(|el| el.into_element(ContentKind::ProgressBar))
                .collect(),
            next_conditions: definition.next_conditions,
            previous_conditions: definition.previous_conditions,
        };

        for element in step.elements() {
            if element.position().is_root() && !element.is_container() {
                return Err(DefinitionError::NonContainerRoot {
                    step_key: step.key.clone(),
                    element_id: element.common().id.clone(),
                });
            }
        }

        step.warn_duplicate_positions();
        Ok(step)
    }

    /// The container at the empty position. Guaranteed present after
    /// conversion.
    pub fn root_subgrid(&self) -> Option<&Subgrid> {
        self.subgrids
            .iter()
            .find(|grid| grid.common.position.is_root())
    }

    /// Every element in the step, containers included.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.subgrids
            .iter()
            .map(ElementRef::Subgrid)
            .chain(self.leaf_elements())
    }

    /// Every non-container element.
    pub fn leaf_elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.servar_fields
            .iter()
            .map(ElementRef::Field)
            .chain(self.texts.iter().map(ElementRef::Content))
            .chain(self.buttons.iter().map(ElementRef::Content))
            .chain(self.images.iter().map(ElementRef::Content))
            .chain(self.videos.iter().map(ElementRef::Content))
            .chain(self.progress_bars.iter().map(ElementRef::Content))
    }

    fn warn_duplicate_positions(&self) {
        let mut container_keys = AHashSet::new();
        for grid in &self.subgrids {
            if !container_keys.insert(grid.common.position.key()) {
                tracing::warn!(
                    step = %self.key,
                    position = %grid.common.position,
                    "duplicate subgrid position; the grid builder keeps the first"
                );
            }
        }
        let mut leaf_keys = AHashSet::new();
        for element in self.leaf_elements() {
            if !leaf_keys.insert(element.position().key()) {
                tracing::warn!(
                    step = %self.key,
                    position = %element.position(),
                    "duplicate element position; the grid builder keeps the first"
                );
            }
        }
    }
}
