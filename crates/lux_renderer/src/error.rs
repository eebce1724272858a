//! Errors raised at the edges of the renderer.
//!
//! Tracing itself never fails: a miss or an absorbed ray is reported through
//! `bool`/`Option`. Only I/O, image decoding and configuration parsing
//! produce a [`RenderError`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading inputs or writing output.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
