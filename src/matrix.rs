//! Module matrix produced by the QR encoder.
//!
//! The matrix is already laid out at the requested output size: each QR
//! module is blown up to a square block of cells and centred, with the quiet
//! zone included.

use log::debug;
use std::convert::TryFrom;
use qrcode::{bits::Bits, types::QrError, Color, EcLevel, QrCode, Version};

use crate::{
    config::{Charset, EncodeHints},
    error::Error,
};

/// Square-ish grid of set/unset cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BitMatrix {
    pub fn new(width: u32, height: u32) -> Self {
        BitMatrix {
            width,
            height,
            bits: vec![false; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Out of range coordinates read as unset.
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32) {
        let i = self.index(x, y);
        self.bits[i] = true;
    }

    /// Set every cell of the `width` x `height` block starting at (`left`, `top`).
    pub fn set_region(&mut self, left: u32, top: u32, width: u32, height: u32) {
        for y in top..(top + height).min(self.height) {
            for x in left..(left + width).min(self.width) {
                self.set(x, y);
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

/// Turns text into a [`BitMatrix`] of (at least) the requested size.
pub trait MatrixEncoder {
    fn encode(
        &self,
        content: &str,
        width: u32,
        height: u32,
        hints: &EncodeHints,
    ) -> Result<BitMatrix, Error>;
}

/// [`MatrixEncoder`] backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrMatrixEncoder;

impl QrMatrixEncoder {
    pub fn new() -> Self {
        QrMatrixEncoder
    }

    fn symbol(content: &str, hints: &EncodeHints) -> Result<QrCode, Error> {
        let ec_level = hints.error_correction.ec_level();
        let code = match hints.charset {
            Charset::Utf8 if content.is_ascii() => {
                QrCode::with_error_correction_level(content.as_bytes(), ec_level)?
            }
            Charset::Utf8 => Self::with_eci(
                content.as_bytes(),
                hints.charset.eci_designator(),
                ec_level,
            )?,
            Charset::Iso8859_1 => {
                let bytes = content
                    .chars()
                    .map(|c| {
                        u8::try_from(u32::from(c)).map_err(|_| QrError::UnsupportedCharacterSet)
                    })
                    .collect::<Result<Vec<u8>, QrError>>()?;
                QrCode::with_error_correction_level(bytes, ec_level)?
            }
        };
        Ok(code)
    }

    /// Encode `data` behind an ECI header, picking the smallest version that fits.
    fn with_eci(data: &[u8], eci: u32, ec_level: EcLevel) -> Result<QrCode, QrError> {
        for v in 1..=40 {
            let mut bits = Bits::new(Version::Normal(v));
            if Self::push_eci_data(&mut bits, data, eci, ec_level).is_ok() {
                return QrCode::with_bits(bits, ec_level);
            }
        }
        Err(QrError::DataTooLong)
    }

    fn push_eci_data(
        bits: &mut Bits,
        data: &[u8],
        eci: u32,
        ec_level: EcLevel,
    ) -> Result<(), QrError> {
        bits.push_eci_designator(eci)?;
        bits.push_optimal_data(data)?;
        bits.push_terminator(ec_level)
    }
}

impl MatrixEncoder for QrMatrixEncoder {
    fn encode(
        &self,
        content: &str,
        width: u32,
        height: u32,
        hints: &EncodeHints,
    ) -> Result<BitMatrix, Error> {
        let code = Self::symbol(content, hints)?;
        let modules = code.width() as u32;
        let colors = code.to_colors();
        debug!(
            "encoded {} bytes into {}x{} modules ({:?})",
            content.len(),
            modules,
            modules,
            code.version()
        );

        let quiet = modules + hints.margin * 2;
        let output_width = width.max(quiet);
        let output_height = height.max(quiet);
        let scale = (output_width / quiet).min(output_height / quiet);
        let left = (output_width - modules * scale) / 2;
        let top = (output_height - modules * scale) / 2;
        debug!(
            "matrix {}x{}: scale {} padding ({}, {})",
            output_width, output_height, scale, left, top
        );

        let mut matrix = BitMatrix::new(output_width, output_height);
        for (i, color) in colors.iter().enumerate() {
            if *color == Color::Dark {
                let mx = i as u32 % modules;
                let my = i as u32 / modules;
                matrix.set_region(left + mx * scale, top + my * scale, scale, scale);
            }
        }
        Ok(matrix)
    }
}
