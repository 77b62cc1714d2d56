/// Convenience alias used throughout the crate.
pub type StitchResult<T> = Result<T, StitchError>;

/// Processing failure raised anywhere between parameter resolution and the final draw.
///
/// The variants describe the cause; callers generally treat every variant the same way (the
/// stitch is rolled back and the error is reported once).
#[derive(thiserror::Error, Debug)]
pub enum StitchError {
    /// Invalid input parameters or source bounds (zero-sized image, non-positive scale, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// A source image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Drawing onto the canvas failed.
    #[error("draw error: {0}")]
    Draw(String),

    /// Arithmetic or memory limits were exceeded.
    #[error("resource error: {0}")]
    Resource(String),

    /// Preferences could not be loaded or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// The image source is no longer owned by the stitcher.
    #[error("image source unavailable: {0}")]
    SourceUnavailable(String),

    /// Anything else, with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StitchError {
    /// Build a [`StitchError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StitchError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`StitchError::Draw`].
    pub fn draw(msg: impl Into<String>) -> Self {
        Self::Draw(msg.into())
    }

    /// Build a [`StitchError::Resource`].
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`StitchError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`StitchError::SourceUnavailable`].
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }
}
