use image::{
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
    ExtendedColorType, ImageEncoder, RgbImage,
};
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{
    config::{Config, OutputFormat},
    error::Error,
    logo::{self, LogoOutcome},
    matrix::{MatrixEncoder, QrMatrixEncoder},
    raster,
};

/// One rendering job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingRequest {
    content: String,
    logo_path: Option<PathBuf>,
    compress_logo: bool,
}

impl EncodingRequest {
    pub fn new(content: impl Into<String>) -> Self {
        EncodingRequest {
            content: content.into(),
            logo_path: None,
            compress_logo: false,
        }
    }

    pub fn logo(self, path: impl Into<PathBuf>) -> Self {
        EncodingRequest {
            logo_path: Some(path.into()),
            ..self
        }
    }

    /// Shrink the logo to the configured maximum before pasting it.
    pub fn compress_logo(self, flag: bool) -> Self {
        EncodingRequest {
            compress_logo: flag,
            ..self
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The logo path, with an empty path treated as no logo.
    pub fn logo_path(&self) -> Option<&Path> {
        self.logo_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// Renders QR bitmaps with an optional centred logo.
#[derive(Debug, Clone)]
pub struct QrImageComposer<E = QrMatrixEncoder> {
    config: Config,
    encoder: E,
}

impl QrImageComposer<QrMatrixEncoder> {
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_encoder(config, QrMatrixEncoder::new())
    }
}

impl Default for QrImageComposer<QrMatrixEncoder> {
    fn default() -> Self {
        QrImageComposer {
            config: Config::default(),
            encoder: QrMatrixEncoder::new(),
        }
    }
}

impl<E: MatrixEncoder> QrImageComposer<E> {
    pub fn with_encoder(config: Config, encoder: E) -> Result<Self, Error> {
        config.validate()?;
        Ok(QrImageComposer { config, encoder })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the QR bitmap for `request`.
    ///
    /// The bitmap takes the dimensions reported by the encoder. A logo path
    /// that does not exist only produces a warning; an unreadable logo fails
    /// the whole call.
    pub fn create_image(&self, request: &EncodingRequest) -> Result<RgbImage, Error> {
        let size = self.config.get_qr_size();
        let matrix =
            self.encoder
                .encode(request.content(), size, size, self.config.get_hints())?;
        let mut image = raster::rasterize(&matrix);
        debug!("rasterized {}x{} bitmap", image.width(), image.height());

        if let Some(path) = request.logo_path() {
            self.insert_logo(&mut image, path, request.compress_logo)?;
        }
        Ok(image)
    }

    pub fn insert_logo(
        &self,
        image: &mut RgbImage,
        logo_path: &Path,
        compress: bool,
    ) -> Result<LogoOutcome, Error> {
        logo::insert_logo(image, logo_path, compress, &self.config)
    }

    /// Serialize `image` in the configured output format.
    pub fn write_image<W: Write>(&self, image: &RgbImage, mut output: W) -> Result<(), Error> {
        let (width, height) = image.dimensions();
        match self.config.get_format() {
            OutputFormat::Jpeg { quality } => {
                JpegEncoder::new_with_quality(&mut output, quality).write_image(
                    image.as_raw(),
                    width,
                    height,
                    ExtendedColorType::Rgb8,
                )?;
            }
            OutputFormat::Png => {
                PngEncoder::new(&mut output).write_image(
                    image.as_raw(),
                    width,
                    height,
                    ExtendedColorType::Rgb8,
                )?;
            }
        }
        output.flush()?;
        info!(
            "wrote {}x{} QR image as {:?}",
            width,
            height,
            self.config.get_format()
        );
        Ok(())
    }

    pub fn encode_with_logo<W: Write>(
        &self,
        content: &str,
        logo_path: Option<&Path>,
        output: W,
        compress_logo: bool,
    ) -> Result<(), Error> {
        let mut request = EncodingRequest::new(content).compress_logo(compress_logo);
        if let Some(path) = logo_path {
            request = request.logo(path);
        }
        let image = self.create_image(&request)?;
        self.write_image(&image, output)
    }

    /// Same as [`Self::encode_with_logo`] without a logo.
    pub fn encode<W: Write>(&self, content: &str, output: W) -> Result<(), Error> {
        self.encode_with_logo(content, None, output, false)
    }
}
