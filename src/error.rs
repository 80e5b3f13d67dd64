use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures at the input edges. Formatting and describing never fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid JSON ({context}): {message}")]
    Json { context: String, message: String },

    #[error("invalid type descriptor {0}")]
    Descriptor(String),

    #[error("JSON pointer {0} selects nothing")]
    Pointer(String),

    #[error("jq: {0}")]
    Jq(String),
}
