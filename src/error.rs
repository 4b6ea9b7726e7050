//! Error types for config processing.

use std::path::PathBuf;
use thiserror::Error;

pub type ProcessResult<T> = Result<T, ProcessError>;

/// Everything that can go wrong between being handed a path and having both
/// output artifacts on disk. Each variant ends up in front of the user as an
/// error notification; none of them escapes as a panic or a nonzero exit.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("File '{0}' does not exist.")]
    NotFound(PathBuf),

    #[error("File '{0}' must have .conf extension.")]
    BadExtension(PathBuf),

    #[error("Cannot read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot encode config as a QR code: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("Cannot save QR image '{path}': {source}")]
    QrImage {
        path: PathBuf,
        source: image::ImageError,
    },
}
