/// Convenience result type used across the crate.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by reel APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid reel document, timing table or content lookup.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while validating or sampling motions.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while evaluating a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing reel data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ReelError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Prepend `prefix` to the message, keeping the variant.
    pub fn with_prefix(self, prefix: &str) -> Self {
        match self {
            Self::Validation(m) => Self::Validation(format!("{prefix}: {m}")),
            Self::Animation(m) => Self::Animation(format!("{prefix}: {m}")),
            Self::Evaluation(m) => Self::Evaluation(format!("{prefix}: {m}")),
            Self::Serde(m) => Self::Serde(format!("{prefix}: {m}")),
            Self::Other(e) => Self::Other(e.context(prefix.to_string())),
        }
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
