//! Error types for QR image generation.
//!
//! A missing logo file is deliberately absent from this enum: it is reported
//! through [`crate::LogoOutcome::Missing`] and the QR code is still produced.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for QR image generation.
#[derive(Error, Debug)]
pub enum Error {
    /// The content could not be represented as a QR symbol.
    ///
    /// Usually the payload exceeds the capacity of the largest version at
    /// the requested error correction level, or contains characters the
    /// selected charset cannot express.
    #[error(transparent)]
    Encoding(#[from] qrcode::types::QrError),

    /// The logo file exists but could not be decoded.
    #[error("Failed to read logo {path:?}: {source}")]
    LogoRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serializing the finished bitmap failed.
    #[error(transparent)]
    Codec(#[from] image::ImageError),

    #[error("Invalid configuration parameter: {0}")]
    InvalidConfig(String),
}
