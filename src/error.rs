//! Error types
//!
//! Rendering failures are local to one render call and never retried, so the
//! core only distinguishes bad arguments from unsupported image layouts. The
//! batch layer wraps those together with file and manifest problems.

use thiserror::Error;

/// Errors raised by the rendering core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A caller passed something the operation cannot work with,
    /// e.g. an affine draw without exactly three destination points.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Image sizes that the operation does not support together,
    /// e.g. a mask that doesn't match the image it is applied to.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),
}

/// Errors raised while running a batch manifest.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// A manifest referenced a cell the sliced sheet doesn't have.
    #[error("tile ({row}, {col}) is outside the sliced sheet")]
    TileOutOfRange { row: usize, col: usize },

    #[error(transparent)]
    Render(#[from] RenderError),
}
