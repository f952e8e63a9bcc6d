/// Convenience result type used across overlog.
pub type OverlogResult<T> = Result<T, OverlogError>;

/// Top-level error taxonomy used by engine APIs.
///
/// `Config` and `Load` are always fatal and surface before any output is produced. `Decode` is
/// recoverable at the stream level (the pipeline truncates the failing stream and keeps going).
/// `Render` and `Encode` abort the run, since a malformed overlay or output frame would
/// silently corrupt the result otherwise.
#[derive(thiserror::Error, Debug)]
pub enum OverlogError {
    /// Invalid run configuration (sync anchors, chart placement, dimensions, empty inputs).
    #[error("config error: {0}")]
    Config(String),

    /// Failure to load or parse an input (log file, stream metadata).
    #[error("load error: {0}")]
    Load(String),

    /// Failure to decode a frame from an input stream.
    #[error("decode error: {0}")]
    Decode(String),

    /// Failure while rasterizing or compositing the chart overlay.
    #[error("render error: {0}")]
    Render(String),

    /// Failure while encoding or writing output frames.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OverlogError {
    /// Build an [`OverlogError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an [`OverlogError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build an [`OverlogError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build an [`OverlogError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`OverlogError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
