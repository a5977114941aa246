//! Adjustment pipeline: seven independent filters in a fixed order.

use crate::{
    Effect, ImageEffect, ImageEffectError, ImageEffectResult, Raster,
    base_effect::{BrightnessConfig, ContrastConfig, GrayscaleConfig},
    blur_effect::GaussianBlurConfig,
    stylized_effect::{EdgeDetection, SharpnessConfig},
};
use derivative::Derivative;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Brightness, contrast and sharpness leave the image untouched at this value.
pub const IDENTITY_FACTOR: f32 = 1.0;

/// Blur leaves the image untouched at this radius.
pub const IDENTITY_BLUR: f32 = 0.0;

pub const ENHANCE_RANGE: RangeInclusive<f32> = 0.0..=2.0;
pub const BLUR_RANGE: RangeInclusive<f32> = 0.0..=10.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Derivative, Setters)]
#[derivative(Default)]
#[serde(default, deny_unknown_fields)]
#[setters(prefix = "with_")]
pub struct FilterParams {
    #[derivative(Default(value = "IDENTITY_FACTOR"))]
    pub brightness: f32,

    #[derivative(Default(value = "IDENTITY_FACTOR"))]
    pub contrast: f32,

    #[derivative(Default(value = "IDENTITY_FACTOR"))]
    pub sharpness: f32,

    #[derivative(Default(value = "IDENTITY_BLUR"))]
    pub blur: f32,

    pub edge_detection: bool,
    pub invert_colors: bool,
    pub grayscale: bool,
}

fn check_range(name: &str, value: f32, range: &RangeInclusive<f32>) -> ImageEffectResult<()> {
    if !range.contains(&value) {
        return Err(ImageEffectError::InvalidParameter(format!(
            "{name} must be within {}..={}, got {value}",
            range.start(),
            range.end()
        )));
    }

    Ok(())
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects NaN and values outside the documented ranges.
    pub fn validate(&self) -> ImageEffectResult<()> {
        check_range("brightness", self.brightness, &ENHANCE_RANGE)?;
        check_range("contrast", self.contrast, &ENHANCE_RANGE)?;
        check_range("sharpness", self.sharpness, &ENHANCE_RANGE)?;
        check_range("blur", self.blur, &BLUR_RANGE)?;
        Ok(())
    }

    /// True when running the pipeline would return the input unchanged.
    pub fn is_identity(&self) -> bool {
        self.brightness == IDENTITY_FACTOR
            && self.contrast == IDENTITY_FACTOR
            && self.sharpness == IDENTITY_FACTOR
            && self.blur == IDENTITY_BLUR
            && !self.edge_detection
            && !self.invert_colors
            && !self.grayscale
    }

    /// The effects the pipeline runs, in order. Continuous stages at their
    /// identity value are left out; the grayscale stage is always last and
    /// always present, carrying the flag.
    pub fn stages(&self) -> Vec<ImageEffect> {
        let mut stages = Vec::with_capacity(7);

        if self.brightness != IDENTITY_FACTOR {
            stages.push(ImageEffect::Brightness(
                BrightnessConfig::new().with_factor(self.brightness),
            ));
        }

        if self.contrast != IDENTITY_FACTOR {
            stages.push(ImageEffect::Contrast(
                ContrastConfig::new().with_factor(self.contrast),
            ));
        }

        if self.sharpness != IDENTITY_FACTOR {
            stages.push(ImageEffect::Sharpness(
                SharpnessConfig::new().with_factor(self.sharpness),
            ));
        }

        if self.blur != IDENTITY_BLUR {
            stages.push(ImageEffect::GaussianBlur(
                GaussianBlurConfig::new().with_radius(self.blur),
            ));
        }

        if self.edge_detection {
            stages.push(ImageEffect::EdgeDetection(EdgeDetection));
        }

        if self.invert_colors {
            stages.push(ImageEffect::Invert);
        }

        stages.push(ImageEffect::Grayscale(
            GrayscaleConfig::new().with_enabled(self.grayscale),
        ));

        stages
    }
}

/// Validate `params` and run every stage over `image` in order.
pub fn apply_adjustments(image: Raster, params: &FilterParams) -> ImageEffectResult<Raster> {
    params.validate()?;

    let (width, height) = image.dimensions();
    let mut image = image;

    for stage in params.stages() {
        log::debug!("apply {} to {width}x{height} image", stage.name());
        image = stage.apply(image)?;
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(params: &FilterParams) -> Vec<&'static str> {
        params.stages().iter().map(|s| s.name()).collect()
    }

    #[test]
    fn test_default_params() {
        let params = FilterParams::default();
        assert_eq!(params.brightness, 1.0);
        assert_eq!(params.contrast, 1.0);
        assert_eq!(params.sharpness, 1.0);
        assert_eq!(params.blur, 0.0);
        assert!(!params.edge_detection && !params.invert_colors && !params.grayscale);
        assert!(params.is_identity());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_identity_stages_only_grayscale_passthrough() {
        let stages = FilterParams::new().stages();
        assert_eq!(stages.len(), 1);
        assert_eq!(
            stages[0],
            ImageEffect::Grayscale(GrayscaleConfig::new().with_enabled(false))
        );
    }

    #[test]
    fn test_stage_order() {
        let params = FilterParams::new()
            .with_brightness(1.2)
            .with_contrast(0.8)
            .with_sharpness(2.0)
            .with_blur(3.0)
            .with_edge_detection(true)
            .with_invert_colors(true)
            .with_grayscale(true);

        assert_eq!(
            names(&params),
            [
                "brightness",
                "contrast",
                "sharpness",
                "gaussian blur",
                "edge detection",
                "invert",
                "grayscale"
            ]
        );
        assert!(!params.is_identity());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let cases = [
            FilterParams::new().with_brightness(2.5),
            FilterParams::new().with_contrast(-0.1),
            FilterParams::new().with_sharpness(f32::NAN),
            FilterParams::new().with_blur(-1.0),
            FilterParams::new().with_blur(10.5),
        ];

        for params in cases {
            assert!(
                matches!(params.validate(), Err(ImageEffectError::InvalidParameter(_))),
                "{params:?} should be rejected"
            );
        }

        assert!(FilterParams::new().with_blur(10.0).validate().is_ok());
        assert!(FilterParams::new().with_brightness(0.0).validate().is_ok());
    }

    #[test]
    fn test_params_from_toml() {
        let params: FilterParams = toml::from_str("brightness = 1.5\ngrayscale = true\n").unwrap();
        assert_eq!(
            params,
            FilterParams::new().with_brightness(1.5).with_grayscale(true)
        );

        assert!(toml::from_str::<FilterParams>("brightnes = 1.5\n").is_err());
    }
}
