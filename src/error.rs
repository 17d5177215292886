use thiserror::Error;

/// Errors that can occur while converting a raw step definition into the
/// typed model.
///
/// These are the only fallible operations in the crate. Once a `Step` exists,
/// the evaluation-phase components (comparison engine, visibility resolver,
/// grid builder, navigation) degrade to conservative defaults instead of
/// erroring, so a single malformed rule can never take down a form session.
#[derive(Error, Debug, Clone)]
pub enum DefinitionError {
    #[error("Failed to parse step JSON: {0}")]
    JsonParse(String),

    #[error("Step '{step_key}' has no root subgrid with an empty position")]
    MissingRootSubgrid { step_key: String },

    #[error(
        "Element '{element_id}' in step '{step_key}' has an empty position but is not a subgrid"
    )]
    NonContainerRoot {
        step_key: String,
        element_id: String,
    },
}
