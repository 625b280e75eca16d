//! Error types for ridge detection.

use common::Buffer2;
use thiserror::Error;

/// Errors returned by the pipeline and the public stage entry points.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Image has no pixels: {width}x{height}")]
    EmptyImage { width: usize, height: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rejects images with a zero dimension.
pub(crate) fn ensure_non_empty<P>(image: &Buffer2<P>) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(Error::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(())
}
