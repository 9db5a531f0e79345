use thiserror::Error;

/// Failure of a single filter invocation.
///
/// Only configuration-contract violations are fatal. An unrecognized
/// filter key never reaches this type (the executor skips it), and the
/// cosmetic composites absorb their own intermediate failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// A required input image or parameter entry was not supplied.
    #[error("missing required input `{0}`")]
    MissingInput(&'static str),

    /// A parameter value has the wrong shape or type for its filter.
    #[error("parameter `{key}` expects {expected}, got {got}")]
    Malformed {
        key: String,
        expected: &'static str,
        got: String,
    },

    /// A parameter value is NaN or infinite.
    #[error("parameter `{key}` must be finite, got {value}")]
    NonFinite { key: &'static str, value: f32 },

    /// An operation was asked to produce or consume a zero-sized image.
    #[error("image extent is empty")]
    EmptyExtent,

    /// Channel inputs to a compositing operation have different extents.
    #[error("channel inputs have mismatched extents")]
    ExtentMismatch,
}

/// Terminal failure of a pipeline run, carrying the offending stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("filter `{key}` at stage {index}: {source}")]
    Stage {
        index: usize,
        key: String,
        source: FilterError,
    },
}

impl PipelineError {
    pub fn stage_index(&self) -> usize {
        match self {
            Self::Stage { index, .. } => *index,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Stage { key, .. } => key,
        }
    }
}
