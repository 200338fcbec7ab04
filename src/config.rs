use image::Rgb;
use qrcode::EcLevel;

use crate::error::Error;

/// QR error correction tier.
///
/// Higher tiers trade capacity for the ability to lose modules under a logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    High,
}

impl ErrorCorrection {
    pub fn ec_level(&self) -> EcLevel {
        match self {
            Self::Low => EcLevel::L,
            Self::Medium => EcLevel::M,
            Self::Quartile => EcLevel::Q,
            Self::High => EcLevel::H,
        }
    }
}

/// Character set used to turn the text payload into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Iso8859_1,
}

impl Charset {
    /// ECI assignment number announced in the symbol, if any.
    pub fn eci_designator(&self) -> u32 {
        match self {
            Self::Utf8 => 26,
            Self::Iso8859_1 => 3,
        }
    }
}

/// Hints handed to the matrix encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeHints {
    pub error_correction: ErrorCorrection,
    pub charset: Charset,
    /// Quiet zone in modules.
    pub margin: u32,
}

impl Default for EncodeHints {
    fn default() -> Self {
        EncodeHints {
            error_correction: ErrorCorrection::High,
            charset: Charset::Utf8,
            margin: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg { quality: u8 },
    Png,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Jpeg { quality: 75 }
    }
}

/// Config
///
/// Fixed sizes and styling applied by [`crate::QrImageComposer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    qr_size: u32,
    logo_max_width: u32,
    logo_max_height: u32,
    hints: EncodeHints,
    corner_arc: f32,
    stroke_width: f32,
    outline_color: Rgb<u8>,
    format: OutputFormat,
}

impl Config {
    /// Initialize configuration data with default values.
    ///
    /// 300x300 symbol, logo capped at 60x60, error correction `High`, UTF-8,
    /// one module of quiet zone, a white outline with a 6 unit corner arc and
    /// a 3 unit stroke, written as JPEG.
    ///
    /// # Example
    ///
    /// ```
    /// use qr_logo::{Config, OutputFormat};
    ///
    /// let config = Config::new().qr_size(400).format(OutputFormat::Png);
    /// assert_eq!(config.get_qr_size(), 400);
    /// ```
    ///
    pub fn new() -> Config {
        Config {
            qr_size: crate::QR_SIZE,
            logo_max_width: crate::LOGO_WIDTH,
            logo_max_height: crate::LOGO_HEIGHT,
            hints: EncodeHints::default(),
            corner_arc: 6.0,
            stroke_width: 3.0,
            outline_color: Rgb([255, 255, 255]),
            format: OutputFormat::default(),
        }
    }

    /// Requested width and height of the symbol, in pixels.
    pub fn qr_size(self, size: u32) -> Self {
        Config {
            qr_size: size,
            ..self
        }
    }

    /// Upper bound applied to the logo when compression is requested.
    pub fn logo_max(self, width: u32, height: u32) -> Self {
        Config {
            logo_max_width: width,
            logo_max_height: height,
            ..self
        }
    }

    pub fn error_correction(self, level: ErrorCorrection) -> Self {
        Config {
            hints: EncodeHints {
                error_correction: level,
                ..self.hints
            },
            ..self
        }
    }

    pub fn charset(self, charset: Charset) -> Self {
        Config {
            hints: EncodeHints {
                charset,
                ..self.hints
            },
            ..self
        }
    }

    pub fn margin(self, margin: u32) -> Self {
        Config {
            hints: EncodeHints {
                margin,
                ..self.hints
            },
            ..self
        }
    }

    /// Diameter of the outline's corner arcs.
    pub fn corner_arc(self, arc: f32) -> Self {
        Config {
            corner_arc: arc,
            ..self
        }
    }

    pub fn stroke_width(self, width: f32) -> Self {
        Config {
            stroke_width: width,
            ..self
        }
    }

    pub fn outline_color(self, color: Rgb<u8>) -> Self {
        Config {
            outline_color: color,
            ..self
        }
    }

    pub fn format(self, format: OutputFormat) -> Self {
        Config { format, ..self }
    }

    pub fn get_qr_size(&self) -> u32 {
        self.qr_size
    }

    pub fn get_logo_max(&self) -> (u32, u32) {
        (self.logo_max_width, self.logo_max_height)
    }

    pub fn get_hints(&self) -> &EncodeHints {
        &self.hints
    }

    pub fn get_corner_arc(&self) -> f32 {
        self.corner_arc
    }

    pub fn get_stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn get_outline_color(&self) -> Rgb<u8> {
        self.outline_color
    }

    pub fn get_format(&self) -> OutputFormat {
        self.format
    }

    /// Reject values that would make rendering meaningless.
    pub fn validate(&self) -> Result<(), Error> {
        if self.qr_size == 0 {
            return Err(Error::InvalidConfig("qr_size must be positive".into()));
        }
        if self.logo_max_width == 0 || self.logo_max_height == 0 {
            return Err(Error::InvalidConfig(format!(
                "logo_max must be positive, got {}x{}",
                self.logo_max_width, self.logo_max_height
            )));
        }
        if !(self.stroke_width >= 0.0) || !(self.corner_arc >= 0.0) {
            return Err(Error::InvalidConfig(
                "stroke_width and corner_arc must be non-negative".into(),
            ));
        }
        if let OutputFormat::Jpeg { quality } = self.format {
            if quality == 0 || quality > 100 {
                return Err(Error::InvalidConfig(format!(
                    "jpeg quality must be within 1..=100, got {}",
                    quality
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
