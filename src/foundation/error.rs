/// Convenience result type used across storyreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Unrecognized animation, motion-effect, transition, or font names are never errors: they are
/// replaced by documented defaults and reported as [`crate::SpecWarning`]s.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid or missing project configuration. Reported before any rendering starts.
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced asset file is missing, unreadable, or cannot be decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Failure while composing or encoding frames. Partial output is discarded.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// The render was cancelled through its [`crate::CancelToken`].
    #[error("render cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
