use thiserror::Error;

pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate content from AI. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The access credential was not present in the environment.
    #[error("{var} environment variable not set")]
    MissingCredential { var: String },

    /// Any transport or service-side failure. The underlying error is logged,
    /// never carried.
    #[error("Failed to generate content from AI. Please try again.")]
    GenerationFailed,

    #[error("Invalid content type: {0}")]
    InvalidCategory(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    ExternalService,
    Programming,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::MissingCredential { .. } => ErrorKind::Configuration,
            GenerationError::GenerationFailed => ErrorKind::ExternalService,
            GenerationError::InvalidCategory(_) => ErrorKind::Programming,
        }
    }
}
