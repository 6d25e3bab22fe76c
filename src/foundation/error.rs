/// Convenience result type used across shapeclip.
pub type ShapeClipResult<T> = Result<T, ShapeClipError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ShapeClipError {
    /// Target dimensions were zero and the original-size sentinel was not requested.
    #[error("invalid dimensions: {width}x{height} (width and height must be > 0)")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A mask stencil or path definition could not be loaded.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// A pixel buffer could not be allocated.
    #[error("out of memory: failed to allocate {width}x{height} pixel buffer")]
    OutOfMemory {
        /// Requested buffer width.
        width: u32,
        /// Requested buffer height.
        height: u32,
    },

    /// Invalid user-provided shape configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShapeClipError {
    /// Build a [`ShapeClipError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShapeClipError::ResourceUnavailable`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::ResourceUnavailable(msg.into())
    }

    /// Build a [`ShapeClipError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`ShapeClipError::OutOfMemory`] value.
    pub fn out_of_memory(width: u32, height: u32) -> Self {
        Self::OutOfMemory { width, height }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
