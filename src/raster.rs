//! Pixel level drawing on the QR bitmap.

use image::{DynamicImage, Rgb, RgbImage};

use crate::matrix::BitMatrix;

pub const BLACK: Rgb<u8> = Rgb([0x00, 0x00, 0x00]);
pub const WHITE: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

/// Convert a module matrix to an RGB bitmap of the same dimensions.
///
/// Set cells become black, everything else white.
pub fn rasterize(matrix: &BitMatrix) -> RgbImage {
    let mut image = RgbImage::new(matrix.width(), matrix.height());
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        *pixel = if matrix.get(x, y) { BLACK } else { WHITE };
    }
    image
}

/// Paint `top` onto `base` with its top-left corner at (`x`, `y`).
///
/// Source-over alpha blending; parts falling outside `base` are dropped.
pub fn blit(base: &mut RgbImage, top: &DynamicImage, x: i64, y: i64) {
    let top = top.to_rgba8();
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let tx = x + dx as i64;
        let ty = y + dy as i64;
        if tx < 0 || ty < 0 || tx >= base.width() as i64 || ty >= base.height() as i64 {
            continue;
        }
        let (tx, ty) = (tx as u32, ty as u32);
        let alpha = pixel[3];
        if alpha == 0xFF {
            base.put_pixel(tx, ty, Rgb([pixel[0], pixel[1], pixel[2]]));
        } else if alpha > 0 {
            let bg = *base.get_pixel(tx, ty);
            base.put_pixel(tx, ty, blend(bg, [pixel[0], pixel[1], pixel[2]], alpha));
        }
    }
}

fn blend(bg: Rgb<u8>, fg: [u8; 3], alpha: u8) -> Rgb<u8> {
    let a = alpha as u32;
    let mix = |f: u8, b: u8| ((f as u32 * a + b as u32 * (255 - a) + 127) / 255) as u8;
    Rgb([mix(fg[0], bg[0]), mix(fg[1], bg[1]), mix(fg[2], bg[2])])
}

/// Outline of a rounded rectangle, no fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Diameter of the corner arcs, as in the usual 2D graphics APIs.
    pub arc: f32,
}

impl RoundRect {
    /// Signed distance from (`px`, `py`) to the outline path; negative inside.
    fn distance(&self, px: f32, py: f32) -> f32 {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        let r = (self.arc / 2.0).min(hw).min(hh).max(0.0);
        let qx = (px - (self.x + hw)).abs() - hw + r;
        let qy = (py - (self.y + hh)).abs() - hh + r;
        let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
        outside + qx.max(qy).min(0.0) - r
    }
}

/// Stroke `rect` with a pen of `stroke` width centred on the path.
///
/// A pixel is painted when its centre lies within half the stroke of the
/// outline. Pixels outside `image` are clipped.
pub fn stroke_round_rect(image: &mut RgbImage, rect: &RoundRect, stroke: f32, color: Rgb<u8>) {
    if image.width() == 0 || image.height() == 0 || stroke <= 0.0 {
        return;
    }
    let half = stroke / 2.0;
    let max_x = image.width() as f32 - 1.0;
    let max_y = image.height() as f32 - 1.0;
    let x0 = (rect.x - half).floor().max(0.0).min(max_x) as u32;
    let y0 = (rect.y - half).floor().max(0.0).min(max_y) as u32;
    let x1 = (rect.x + rect.width + half).ceil().max(0.0).min(max_x) as u32;
    let y1 = (rect.y + rect.height + half).ceil().max(0.0).min(max_y) as u32;

    for py in y0..=y1 {
        for px in x0..=x1 {
            let d = rect.distance(px as f32 + 0.5, py as f32 + 0.5);
            if d.abs() <= half {
                image.put_pixel(px, py, color);
            }
        }
    }
}
