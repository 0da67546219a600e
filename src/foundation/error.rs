/// Convenience result type used across Fukuwarai.
pub type FukuwaraiResult<T> = Result<T, FukuwaraiError>;

/// Top-level error taxonomy used by the library APIs.
///
/// Animation and scoring are infallible over well-typed input; only configuration, share-link
/// parsing and the snapshot pipeline can fail.
#[derive(thiserror::Error, Debug)]
pub enum FukuwaraiError {
    /// Invalid user-provided configuration or inputs.
    #[error("validation error: {0}")]
    Validation(String),

    /// The serialized scene failed to decode or rasterize.
    #[error("decode error: {0}")]
    Decode(String),

    /// A share link could not be parsed at all.
    #[error("restore error: {0}")]
    Restore(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FukuwaraiError {
    /// Build a [`FukuwaraiError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FukuwaraiError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`FukuwaraiError::Restore`] value.
    pub fn restore(msg: impl Into<String>) -> Self {
        Self::Restore(msg.into())
    }

    /// Build a [`FukuwaraiError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
