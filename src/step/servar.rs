use crate::field::FieldValue;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

/// The widget type behind a field. Determines the type-appropriate default
/// a fresh field seeds with.
///
/// `Unknown` absorbs widget types this crate has no special handling for;
/// they behave like plain text fields. New backend widget types must never
/// break an existing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServarType {
    TextField,
    TextArea,
    Email,
    PhoneNumber,
    Url,
    Integer,
    Checkbox,
    Dropdown,
    Multiselect,
    ButtonGroup,
    HexColor,
    FileUpload,
    Signature,
    Unknown,
}

impl ServarType {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "text_field" => ServarType::TextField,
            "text_area" => ServarType::TextArea,
            "email" => ServarType::Email,
            "phone_number" => ServarType::PhoneNumber,
            "url" => ServarType::Url,
            "integer" => ServarType::Integer,
            "checkbox" => ServarType::Checkbox,
            "dropdown" => ServarType::Dropdown,
            "multiselect" => ServarType::Multiselect,
            "button_group" => ServarType::ButtonGroup,
            "hex_color" => ServarType::HexColor,
            "file_upload" => ServarType::FileUpload,
            "signature" => ServarType::Signature,
            _ => ServarType::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for ServarType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(ServarType::from_tag(&tag))
    }
}

/// Policy for deriving a repeating container's instance count from this
/// field's stored array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatTrigger {
    SetValue,
}

/// The field descriptor a `FieldElement` owns: key, widget type, and the
/// flags the logic layer cares about. Elements reference field values by
/// `key`; they never own them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Servar {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: ServarType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub repeated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_trigger: Option<RepeatTrigger>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Servar {
    pub fn new(key: impl Into<String>, kind: ServarType) -> Self {
        Self {
            key: key.into(),
            kind,
            required: false,
            repeated: false,
            repeat_trigger: None,
            metadata: serde_json::Map::new(),
        }
    }

    /// The value a fresh, untouched field holds.
    pub fn default_value(&self) -> FieldValue {
        match self.kind {
            ServarType::Checkbox => FieldValue::Bool(false),
            ServarType::Multiselect | ServarType::ButtonGroup => FieldValue::List(Vec::new()),
            ServarType::HexColor => FieldValue::Text("FFFFFFFF".to_string()),
            ServarType::FileUpload | ServarType::Signature => FieldValue::Null,
            ServarType::TextField
            | ServarType::TextArea
            | ServarType::Email
            | ServarType::PhoneNumber
            | ServarType::Url
            | ServarType::Integer
            | ServarType::Dropdown
            | ServarType::Unknown => FieldValue::Text(String::new()),
        }
    }
}
