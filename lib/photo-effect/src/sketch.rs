//! Dodge-blend pencil sketch and preview zoom.
//!
//! The sketch is built in five fixed steps:
//! 1. BT.601 grayscale
//! 2. invert
//! 3. 15x15 Gaussian blur, sigma derived from the kernel size
//! 4. invert again
//! 5. dodge blend: `min(255, gray * 256 / inverted_blur)`, a zero divisor
//!    gives 255
//!
//! Zooming only produces a preview. Exports should use the native sketch.

use crate::{
    Effect, ImageEffectError, ImageEffectResult, Raster, blur_effect::gaussian_blur_sized,
    raster::rgb_to_gray,
};
use image::{GrayImage, Luma};

/// Blur kernel width and height used by the sketch. Not configurable.
pub const SKETCH_KERNEL_SIZE: u32 = 15;

/// Scale applied to the gray value before dividing by the blur mask.
pub const DODGE_SCALE: f32 = 256.0;

pub const ZOOM_MIN: f32 = 0.5;
pub const ZOOM_MAX: f32 = 3.0;
pub const ZOOM_DEFAULT: f32 = 1.0;

/// `Effect` wrapper around [`generate_sketch`] for rasters of unknown
/// layout. Fails on anything but 3-channel input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PencilSketch;

impl Effect for PencilSketch {
    fn apply(&self, image: Raster) -> ImageEffectResult<Raster> {
        match image {
            Raster::Rgb(img) => Ok(Raster::Gray(generate_sketch(&img))),
            other => Err(ImageEffectError::ShapeMismatch {
                expected: 3,
                actual: other.channels(),
            }),
        }
    }
}

fn dodge(gray: u8, mask: u8) -> u8 {
    if mask == 0 {
        return u8::MAX;
    }

    (gray as f32 * DODGE_SCALE / mask as f32)
        .round()
        .min(255.0) as u8
}

/// Render `image` as a pencil sketch with the same dimensions.
pub fn generate_sketch(image: &image::RgbImage) -> GrayImage {
    let gray = rgb_to_gray(image);

    let mut inverted = gray.clone();
    image::imageops::invert(&mut inverted);

    let mut mask = gaussian_blur_sized(&inverted, SKETCH_KERNEL_SIZE);
    image::imageops::invert(&mut mask);

    let mut sketch = gray;
    for (v, m) in sketch.pixels_mut().zip(mask.pixels()) {
        *v = Luma([dodge(v[0], m[0])]);
    }

    log::info!(
        "generated {}x{} pencil sketch",
        sketch.width(),
        sketch.height()
    );

    sketch
}

/// Target size for `zoom`: each side rounded, never below one pixel for a
/// non-empty side. Fails when a side leaves `u32` or the pixel count cannot
/// be allocated.
pub fn zoomed_dimensions(
    width: u32,
    height: u32,
    factor: f32,
) -> ImageEffectResult<(u32, u32)> {
    let too_large = || {
        ImageEffectError::InvalidParameter(format!(
            "zoom factor {factor} is too large for a {width}x{height} image"
        ))
    };

    let scale = |side: u32| -> ImageEffectResult<u32> {
        if side == 0 {
            return Ok(0);
        }

        let scaled = (side as f64 * factor as f64).round();
        if scaled > u32::MAX as f64 {
            return Err(too_large());
        }
        Ok((scaled as u32).max(1))
    };

    let (w, h) = (scale(width)?, scale(height)?);
    (w as usize)
        .checked_mul(h as usize)
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or_else(too_large)?;

    Ok((w, h))
}

/// Bilinear resample of `sketch` by `factor` along both axes.
///
/// Pixel centers are aligned (`src = (dst + 0.5) / scale - 0.5`) and samples
/// past the edge are clamped. A factor of exactly 1.0 returns a copy.
pub fn zoom(sketch: &GrayImage, factor: f32) -> ImageEffectResult<GrayImage> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(ImageEffectError::InvalidParameter(format!(
            "zoom factor must be a finite, positive number, got {factor}"
        )));
    }

    if factor == ZOOM_DEFAULT {
        return Ok(sketch.clone());
    }

    let (src_w, src_h) = sketch.dimensions();
    let (dst_w, dst_h) = zoomed_dimensions(src_w, src_h, factor)?;
    if dst_w == 0 || dst_h == 0 {
        return Ok(GrayImage::new(dst_w, dst_h));
    }

    log::debug!("zoom {src_w}x{src_h} -> {dst_w}x{dst_h}");

    let x_ratio = src_w as f32 / dst_w as f32;
    let y_ratio = src_h as f32 / dst_h as f32;

    Ok(GrayImage::from_fn(dst_w, dst_h, |x, y| {
        let src_x = ((x as f32 + 0.5) * x_ratio - 0.5).max(0.0);
        let src_y = ((y as f32 + 0.5) * y_ratio - 0.5).max(0.0);

        let x1 = (src_x.floor() as u32).min(src_w - 1);
        let x2 = (x1 + 1).min(src_w - 1);
        let y1 = (src_y.floor() as u32).min(src_h - 1);
        let y2 = (y1 + 1).min(src_h - 1);

        let fx = src_x - x1 as f32;
        let fy = src_y - y1 as f32;

        let c11 = sketch.get_pixel(x1, y1)[0] as f32;
        let c12 = sketch.get_pixel(x2, y1)[0] as f32;
        let c21 = sketch.get_pixel(x1, y2)[0] as f32;
        let c22 = sketch.get_pixel(x2, y2)[0] as f32;

        let result = c11 * (1.0 - fx) * (1.0 - fy)
            + c12 * fx * (1.0 - fy)
            + c21 * (1.0 - fx) * fy
            + c22 * fx * fy;

        Luma([result.round().clamp(0.0, 255.0) as u8])
    }))
}
