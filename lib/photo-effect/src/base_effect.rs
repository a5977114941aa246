use crate::{Effect, ImageEffectError, ImageEffectResult, Raster};
use derivative::Derivative;
use derive_setters::Setters;

/// Linear blend `degenerate + factor * (value - degenerate)`, rounded and
/// saturated to a u8. A factor of 1.0 returns `value`.
pub(crate) fn blend(degenerate: u8, value: u8, factor: f32) -> u8 {
    let degenerate = degenerate as f32;
    (degenerate + factor * (value as f32 - degenerate))
        .round()
        .clamp(0.0, 255.0) as u8
}

pub(crate) fn check_factor(name: &str, factor: f32) -> ImageEffectResult<()> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(ImageEffectError::InvalidParameter(format!(
            "{name} must be a finite, non-negative number, got {factor}"
        )));
    }

    Ok(())
}

/// Invert the colors of an image. Gray input is expanded to RGB first.
pub fn invert(image: Raster) -> Raster {
    Raster::Rgb(image.into_rgb()).map_samples(|v| 255 - v)
}

/// Convert to single-channel luma when `enabled`, otherwise pass through.
pub fn grayscale(image: Raster, enabled: bool) -> Raster {
    if enabled {
        Raster::Gray(image.into_gray())
    } else {
        image
    }
}

/// Grayscale toggle configuration
#[derive(Debug, Clone, PartialEq, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GrayscaleConfig {
    #[derivative(Default(value = "true"))]
    enabled: bool,
}

impl GrayscaleConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for GrayscaleConfig {
    fn apply(&self, image: Raster) -> ImageEffectResult<Raster> {
        Ok(grayscale(image, self.enabled))
    }
}

/// Brightness adjustment configuration
///
/// Blends against black, so every sample is scaled by `factor`.
#[derive(Debug, Clone, PartialEq, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct BrightnessConfig {
    #[derivative(Default(value = "1.0"))]
    factor: f32,
}

impl BrightnessConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for BrightnessConfig {
    fn apply(&self, image: Raster) -> ImageEffectResult<Raster> {
        check_factor("brightness", self.factor)?;
        let factor = self.factor;
        Ok(image.map_samples(|v| blend(0, v, factor)))
    }
}

/// Contrast adjustment configuration
///
/// Blends against a flat image filled with the mean luma.
#[derive(Debug, Clone, PartialEq, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ContrastConfig {
    #[derivative(Default(value = "1.0"))]
    factor: f32,
}

impl ContrastConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for ContrastConfig {
    fn apply(&self, image: Raster) -> ImageEffectResult<Raster> {
        check_factor("contrast", self.factor)?;
        let (factor, mean) = (self.factor, image.mean_luma());
        Ok(image.map_samples(|v| blend(mean, v, factor)))
    }
}
