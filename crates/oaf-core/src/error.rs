use thiserror::Error;

use crate::filter::refs::ComponentKind;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}

/// A fault detected while reading or chasing reference strings.
#[derive(Debug, Error)]
pub enum RefError {
    #[error("invalid reference '{reference}' at {location}")]
    InvalidReference { reference: String, location: String },

    #[error("{kind} component not found: {name} (referenced from {context})")]
    ComponentNotFound {
        kind: ComponentKind,
        name: String,
        context: String,
    },
}

/// Error returned by [`crate::filter::apply`]: the underlying reference
/// fault wrapped with the pipeline stage that hit it. The cause stays
/// reachable through `std::error::Error::source` for programmatic
/// inspection.
#[derive(Debug, Error)]
#[error("{stage}: {source}")]
pub struct FilterError {
    stage: &'static str,
    #[source]
    source: RefError,
}

impl FilterError {
    pub(crate) fn new(stage: &'static str, source: RefError) -> Self {
        Self { stage, source }
    }

    /// The pipeline stage that failed, e.g. "resolving schema references".
    pub fn stage(&self) -> &'static str {
        self.stage
    }

    /// The underlying reference fault.
    pub fn cause(&self) -> &RefError {
        &self.source
    }
}

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("path '{0}' does not start with '/'")]
    InvalidPath(String),

    #[error("duplicate operationId: {0}")]
    DuplicateOperationId(String),

    #[error(transparent)]
    Reference(#[from] RefError),
}
