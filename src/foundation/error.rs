/// Convenience result type used across trailfx.
pub type TrailResult<T> = Result<T, TrailError>;

/// Top-level error taxonomy.
///
/// None of these are fatal to the render loop: a failing tick is skipped and the next one retries.
#[derive(thiserror::Error, Debug)]
pub enum TrailError {
    /// Invalid configuration or resolution values.
    #[error("validation error: {0}")]
    Validation(String),

    /// The frame source could not produce a frame this tick.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// The output surface rejected a draw.
    #[error("surface error: {0}")]
    Surface(String),

    /// A frame sink failed to consume output.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrailError {
    /// Build a [`TrailError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TrailError::SourceUnavailable`] value.
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    /// Build a [`TrailError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`TrailError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
