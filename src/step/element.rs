use crate::logic::HideIf;
use crate::step::{Position, Servar};
use serde::{Deserialize, Serialize};

pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Attributes every renderable element carries, whatever its kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementCommon {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_position: Option<Position>,
    #[serde(default)]
    pub styles: JsonMap,
    #[serde(default)]
    pub mobile_styles: JsonMap,
    #[serde(default)]
    pub hide_ifs: Vec<HideIf>,
    #[serde(default)]
    pub show_logic: bool,
}

/// A layout container. A subgrid flagged `repeated` has its subtree cloned
/// once per repeat instance; the instance count is derived from field data,
/// never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subgrid {
    #[serde(flatten)]
    pub common: ElementCommon,
    #[serde(default)]
    pub repeated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default)]
    pub cell_styles: JsonMap,
}

/// A form field. Owns its `servar` descriptor; the field's value lives in
/// the store under `servar.key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldElement {
    #[serde(flatten)]
    pub common: ElementCommon,
    pub servar: Servar,
    #[serde(default)]
    pub properties: JsonMap,
}

/// Which presentation widget a `ContentElement` renders as. The logic layer
/// only distinguishes these for trigger matching and text-variable scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Button,
    Text,
    Image,
    Video,
    ProgressBar,
}

/// A non-field, non-container element: buttons, texts, media, progress bars.
/// Type-specific payload stays in `properties` as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentElement {
    #[serde(flatten)]
    pub common: ElementCommon,
    pub kind: ContentKind,
    #[serde(default)]
    pub properties: JsonMap,
}

/// A borrowed view over any element kind, for uniform traversal.
#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    Subgrid(&'a Subgrid),
    Field(&'a FieldElement),
    Content(&'a ContentElement),
}

impl<'a> ElementRef<'a> {
    pub fn common(&self) -> &'a ElementCommon {
        match self {
            ElementRef::Subgrid(el) => &el.common,
            ElementRef::Field(el) => &el.common,
            ElementRef::Content(el) => &el.common,
        }
    }

    pub fn position(&self) -> &'a Position {
        &self.common().position
    }

    /// Subgrids are pure containers; everything else is a leaf element.
    pub fn is_container(&self) -> bool {
        matches!(self, ElementRef::Subgrid(_))
    }
}
