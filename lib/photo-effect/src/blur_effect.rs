use crate::{Effect, ImageEffectResult, Raster, base_effect::check_factor};
use derivative::Derivative;
use derive_setters::Setters;
use image::{GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;

/// Gaussian blur configuration (imageproc)
///
/// `radius` is the standard deviation of the kernel. A radius of 0 returns
/// the input untouched.
#[derive(Debug, Clone, PartialEq, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GaussianBlurConfig {
    #[derivative(Default(value = "2.0"))]
    radius: f32,
}

impl GaussianBlurConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for GaussianBlurConfig {
    fn apply(&self, image: Raster) -> ImageEffectResult<Raster> {
        check_factor("blur radius", self.radius)?;

        // imageproc panics on a zero sigma
        if self.radius == 0.0 || image.is_empty() {
            return Ok(image);
        }

        Ok(match image {
            Raster::Gray(img) => Raster::Gray(gaussian_blur_f32(&img, self.radius)),
            Raster::Rgb(img) => Raster::Rgb(gaussian_blur_f32(&img, self.radius)),
        })
    }
}

/// Sigma for a kernel of `kernel_size` taps when none is given:
/// `0.3 * ((size - 1) / 2 - 1) + 0.8`.
pub fn sigma_for_kernel_size(kernel_size: u32) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1D Gaussian kernel with exactly `kernel_size` taps.
pub fn gaussian_kernel(kernel_size: u32, sigma: f32) -> Vec<f32> {
    let half = (kernel_size / 2) as f32;
    let mut kernel: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let x = i as f32 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    kernel.iter_mut().for_each(|v| *v /= sum);
    kernel
}

/// Mirror an out-of-range index without repeating the edge sample
/// (`gfedcb|abcdefgh|gfedcba`).
fn reflect_101(index: isize, len: isize) -> usize {
    if len == 1 {
        return 0;
    }

    let period = 2 * (len - 1);
    let i = index.rem_euclid(period);
    (if i >= len { period - i } else { i }) as usize
}

/// Separable Gaussian blur with a fixed, odd `kernel_size` and the sigma
/// derived from it. Borders are mirrored.
pub fn gaussian_blur_sized(image: &GrayImage, kernel_size: u32) -> GrayImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let kernel = gaussian_kernel(kernel_size, sigma_for_kernel_size(kernel_size));
    let half = (kernel.len() / 2) as isize;
    let (w, h) = (width as isize, height as isize);
    let src = image.as_raw();

    // Horizontal pass
    let mut temp = vec![0.0f32; src.len()];
    for y in 0..h {
        let row = (y * w) as usize;
        for x in 0..w {
            let mut sum = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx = reflect_101(x + ki as isize - half, w);
                sum += src[row + sx] as f32 * kv;
            }
            temp[row + x as usize] = sum;
        }
    }

    // Vertical pass
    GrayImage::from_fn(width, height, |x, y| {
        let mut sum = 0.0f32;
        for (ki, &kv) in kernel.iter().enumerate() {
            let sy = reflect_101(y as isize + ki as isize - half, h);
            sum += temp[sy * width as usize + x as usize] * kv;
        }
        Luma([sum.round().clamp(0.0, 255.0) as u8])
    })
}
