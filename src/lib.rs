//! QR code images with a centred logo
//!
//! This crate renders a text payload to a QR code bitmap, optionally pastes a
//! small logo at its centre framed by a rounded outline, and writes the result
//! as a JPEG (or PNG).
//!
//! # Example
//!
//! ```rust,no_run
//! use qr_logo::{Config, EncodingRequest, QrImageComposer};
//!
//! let composer = QrImageComposer::new(Config::new()).unwrap();
//! let request = EncodingRequest::new("https://example.com")
//!     .logo("logo.png")
//!     .compress_logo(true);
//! let image = composer.create_image(&request).unwrap();
//!
//! let file = std::fs::File::create("qr.jpg").unwrap();
//! composer.write_image(&image, file).unwrap();
//! ```

mod composer;
mod config;
mod error;
mod logo;
mod matrix;
mod raster;

use image::RgbImage;
use std::io::Write;
use std::path::Path;

pub use crate::{
    composer::{EncodingRequest, QrImageComposer},
    config::{Charset, Config, EncodeHints, ErrorCorrection, OutputFormat},
    error::Error,
    logo::{LogoOutcome, LogoPlacement},
    matrix::{BitMatrix, MatrixEncoder, QrMatrixEncoder},
};

/// Width and height requested from the encoder, in pixels.
///
/// The logo is centred against this value even when the encoder hands back
/// a larger matrix.
pub const QR_SIZE: u32 = 300;

/// Maximum logo width once compression is applied.
pub const LOGO_WIDTH: u32 = 60;

/// Maximum logo height once compression is applied.
pub const LOGO_HEIGHT: u32 = 60;

/// Build a QR bitmap with the default configuration.
///
/// `None` or an empty `logo_path` produces a plain QR code.
pub fn create_image(
    content: &str,
    logo_path: Option<&Path>,
    compress_logo: bool,
) -> Result<RgbImage, Error> {
    let mut request = EncodingRequest::new(content).compress_logo(compress_logo);
    if let Some(path) = logo_path {
        request = request.logo(path);
    }
    QrImageComposer::default().create_image(&request)
}

/// Render `content` with an optional logo and write it to `output` as JPEG.
pub fn encode_with_logo<W: Write>(
    content: &str,
    logo_path: Option<&Path>,
    output: W,
    compress_logo: bool,
) -> Result<(), Error> {
    QrImageComposer::default().encode_with_logo(content, logo_path, output, compress_logo)
}

/// Render `content` without a logo and write it to `output` as JPEG.
pub fn encode<W: Write>(content: &str, output: W) -> Result<(), Error> {
    QrImageComposer::default().encode(content, output)
}
