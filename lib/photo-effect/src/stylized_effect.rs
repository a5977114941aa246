use crate::{
    Effect, ImageEffectResult, Raster,
    base_effect::{blend, check_factor},
};
use derivative::Derivative;
use derive_setters::Setters;

const SMOOTH_KERNEL: [i32; 9] = [1, 1, 1, 1, 5, 1, 1, 1, 1];
const SMOOTH_DIVISOR: i32 = 13;

const FIND_EDGES_KERNEL: [i32; 9] = [-1, -1, -1, -1, 8, -1, -1, -1, -1];

/// Per-channel 3x3 convolution over interleaved samples. The outer ring of
/// pixels keeps its source value; images under 3x3 come back unchanged.
fn convolve3x3(image: &Raster, kernel: &[i32; 9], divisor: i32) -> Raster {
    let mut result = image.clone();
    let (width, height) = image.dimensions();
    if width < 3 || height < 3 {
        return result;
    }

    let channels = image.channels() as usize;
    let stride = width as usize * channels;
    let src = image.as_raw();
    let dst = result.as_raw_mut();

    for y in 1..height as usize - 1 {
        for x in 1..width as usize - 1 {
            for c in 0..channels {
                let mut sum = 0i32;

                for ky in 0..3 {
                    for kx in 0..3 {
                        let idx = (y + ky - 1) * stride + (x + kx - 1) * channels + c;
                        sum += src[idx] as i32 * kernel[ky * 3 + kx];
                    }
                }

                let val = (sum as f32 / divisor as f32).round();
                dst[y * stride + x * channels + c] = val.clamp(0.0, 255.0) as u8;
            }
        }
    }

    result
}

/// Sharpness configuration
///
/// Blends between a smoothed copy (`factor = 0`) and the input
/// (`factor = 1`); larger factors over-sharpen.
#[derive(Debug, Clone, PartialEq, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SharpnessConfig {
    #[derivative(Default(value = "1.0"))]
    factor: f32,
}

impl SharpnessConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for SharpnessConfig {
    fn apply(&self, image: Raster) -> ImageEffectResult<Raster> {
        check_factor("sharpness", self.factor)?;

        let smoothed = convolve3x3(&image, &SMOOTH_KERNEL, SMOOTH_DIVISOR);
        let mut result = image;
        for (v, &s) in result.as_raw_mut().iter_mut().zip(smoothed.as_raw()) {
            *v = blend(s, *v, self.factor);
        }

        Ok(result)
    }
}

/// Edge detection: 8-neighbour Laplacian, applied per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeDetection;

impl Effect for EdgeDetection {
    fn apply(&self, image: Raster) -> ImageEffectResult<Raster> {
        Ok(convolve3x3(&image, &FIND_EDGES_KERNEL, 1))
    }
}
