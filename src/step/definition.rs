//! Raw, serde-shaped step definitions as delivered by the backend.
//!
//! The wire format tags content elements by which list they arrive in
//! (`texts`, `buttons`, ...), so the raw structs carry no kind field; the
//! conversion into the typed [`Step`](crate::step::Step) assigns it.

use crate::nav::NavigationRule;
use crate::step::element::{ContentElement, ContentKind, ElementCommon, JsonMap};
use crate::step::{FieldElement, Subgrid};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepDefinition {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub origin: bool,
    #[serde(default)]
    pub subgrids: Vec<Subgrid>,
    #[serde(default)]
    pub servar_fields: Vec<FieldElement>,
    #[serde(default)]
    pub texts: Vec<ContentDefinition>,
    #[serde(default)]
    pub buttons: Vec<ContentDefinition>,
    #[serde(default)]
    pub images: Vec<ContentDefinition>,
    #[serde(default)]
    pub videos: Vec<ContentDefinition>,
    #[serde(default)]
    pub progress_bars: Vec<ContentDefinition>,
    #[serde(default)]
    pub next_conditions: Vec<NavigationRule>,
    #[serde(default)]
    pub previous_conditions: Vec<NavigationRule>,
}

/// A content element before its kind is known.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentDefinition {
    #[serde(flatten)]
    pub common: ElementCommon,
    #[serde(default)]
    pub properties: JsonMap,
}

impl ContentDefinition {
    pub(crate) fn into_element(self, kind: ContentKind) -> ContentElement {
        ContentElement {
            common: self.common,
            kind,
            properties: self.properties,
        }
    }
}
