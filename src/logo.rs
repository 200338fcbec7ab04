//! Logo overlay.
//!
//! The logo is decoded from disk, optionally shrunk, pasted at the centre of
//! the QR bitmap and framed with a rounded outline.

use image::{imageops::FilterType, DynamicImage, ImageError, ImageReader, RgbImage};
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::{
    config::Config,
    error::Error,
    raster::{blit, stroke_round_rect, RoundRect},
};

/// Where the logo and its outline ended up on the bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoPlacement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    pub outline_width: u32,
    pub outline_height: u32,
}

/// Result of a logo insertion that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoOutcome {
    Inserted(LogoPlacement),
    /// The path does not exist; the bitmap was left untouched.
    Missing(PathBuf),
}

impl LogoOutcome {
    pub fn placement(&self) -> Option<&LogoPlacement> {
        match self {
            Self::Inserted(placement) => Some(placement),
            Self::Missing(_) => None,
        }
    }
}

/// Decoded logo with the size it will be drawn at.
struct LogoAsset {
    image: DynamicImage,
    width: u32,
    height: u32,
}

impl LogoAsset {
    fn load(path: &Path) -> Result<Self, Error> {
        let image = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(ImageError::IoError)
            .and_then(|reader| reader.decode())
            .map_err(|source| Error::LogoRead {
                path: path.to_path_buf(),
                source,
            })?;
        let (width, height) = (image.width(), image.height());
        debug!("loaded logo {:?}: {}x{}", path, width, height);
        Ok(LogoAsset {
            image,
            width,
            height,
        })
    }

    /// Shrink each side independently to its cap. Never enlarges.
    fn compress(self, max_width: u32, max_height: u32) -> Self {
        let width = self.width.min(max_width);
        let height = self.height.min(max_height);
        debug!(
            "compress logo {}x{} -> {}x{}",
            self.width, self.height, width, height
        );
        LogoAsset {
            image: self.image.resize_exact(width, height, FilterType::Triangle),
            width,
            height,
        }
    }
}

/// Paste the logo at `logo_path` into the centre of `image`.
///
/// A path that does not exist is reported with `warn!` and yields
/// [`LogoOutcome::Missing`]; a file that exists but cannot be decoded is an
/// [`Error::LogoRead`].
///
/// The centre is computed from the configured QR size rather than the
/// bitmap's own width, and the outline is a square whose side is the logo
/// width.
pub fn insert_logo(
    image: &mut RgbImage,
    logo_path: &Path,
    compress: bool,
    config: &Config,
) -> Result<LogoOutcome, Error> {
    if !logo_path.exists() {
        warn!("{:?} does not exist, logo skipped", logo_path);
        return Ok(LogoOutcome::Missing(logo_path.to_path_buf()));
    }

    let mut logo = LogoAsset::load(logo_path)?;
    if compress {
        let (max_width, max_height) = config.get_logo_max();
        logo = logo.compress(max_width, max_height);
    }

    let size = config.get_qr_size() as i64;
    let x = (size - logo.width as i64) / 2;
    let y = (size - logo.height as i64) / 2;
    blit(image, &logo.image, x, y);

    let outline = RoundRect {
        x: x as f32,
        y: y as f32,
        width: logo.width as f32,
        height: logo.width as f32,
        arc: config.get_corner_arc(),
    };
    stroke_round_rect(
        image,
        &outline,
        config.get_stroke_width(),
        config.get_outline_color(),
    );

    let placement = LogoPlacement {
        x,
        y,
        width: logo.width,
        height: logo.height,
        outline_width: logo.width,
        outline_height: logo.width,
    };
    debug!("logo placed at {:?}", placement);
    Ok(LogoOutcome::Inserted(placement))
}
