/// Convenience result type used across Splitshot.
pub type SplitshotResult<T> = Result<T, SplitshotError>;

/// Top-level error taxonomy used by export and rendering APIs.
///
/// Alignment itself never fails: missing or low-confidence pose data degrades through fallback
/// constants instead of surfacing here.
#[derive(thiserror::Error, Debug)]
pub enum SplitshotError {
    /// Invalid caller-provided request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A source image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A drawing surface could not be acquired.
    #[error("surface error: {0}")]
    Surface(String),

    /// The frame encoder reported a failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// The frame encoder did not complete before the export deadline.
    #[error(
        "encode error: gif encoder did not finish within {secs}s; the encoder may have failed to initialize"
    )]
    EncoderTimeout {
        /// Deadline that elapsed, in whole seconds.
        secs: u64,
    },

    /// The export was cancelled cooperatively by the caller.
    #[error("export cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SplitshotError {
    /// Build a [`SplitshotError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SplitshotError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SplitshotError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`SplitshotError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
