//! Photo filters and pencil sketch compositing.
//!
//! Two independent pure components operate on a [`Raster`]:
//! - [`pipeline::apply_adjustments`] runs brightness, contrast, sharpness,
//!   blur, edge detection, inversion and grayscale in a fixed order.
//! - [`sketch::generate_sketch`] turns a color photo into a dodge-blend
//!   pencil sketch, and [`sketch::zoom`] resamples it for preview.
//!
//! Decoding and PNG export live in [`codec`].

pub mod base_effect;
pub mod blur_effect;
pub mod codec;
pub mod pipeline;
pub mod raster;
pub mod sketch;
pub mod stylized_effect;

pub use pipeline::{FilterParams, apply_adjustments};
pub use raster::Raster;
pub use sketch::{PencilSketch, generate_sketch, zoom};

pub type ImageEffectResult<T> = Result<T, ImageEffectError>;

#[derive(thiserror::Error, Debug)]
pub enum ImageEffectError {
    #[error("Decode error: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("Encode error: {0}")]
    Encode(#[source] image::ImageError),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Shape mismatch: expected {expected} channel(s), got {actual}")]
    ShapeMismatch { expected: u8, actual: u8 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait Effect {
    fn apply(&self, image: Raster) -> ImageEffectResult<Raster>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageEffect {
    // Tone effects
    Brightness(base_effect::BrightnessConfig),
    Contrast(base_effect::ContrastConfig),
    Invert,
    Grayscale(base_effect::GrayscaleConfig),

    // Blur effects
    GaussianBlur(blur_effect::GaussianBlurConfig),

    // Stylized effects
    Sharpness(stylized_effect::SharpnessConfig),
    EdgeDetection(stylized_effect::EdgeDetection),

    // Compositing
    PencilSketch(sketch::PencilSketch),
}

impl ImageEffect {
    pub fn name(&self) -> &'static str {
        match self {
            ImageEffect::Brightness(_) => "brightness",
            ImageEffect::Contrast(_) => "contrast",
            ImageEffect::Invert => "invert",
            ImageEffect::Grayscale(_) => "grayscale",
            ImageEffect::GaussianBlur(_) => "gaussian blur",
            ImageEffect::Sharpness(_) => "sharpness",
            ImageEffect::EdgeDetection(_) => "edge detection",
            ImageEffect::PencilSketch(_) => "pencil sketch",
        }
    }
}

impl Effect for ImageEffect {
    fn apply(&self, image: Raster) -> ImageEffectResult<Raster> {
        match self {
            ImageEffect::Brightness(config) => config.apply(image),
            ImageEffect::Contrast(config) => config.apply(image),
            ImageEffect::Invert => Ok(base_effect::invert(image)),
            ImageEffect::Grayscale(config) => config.apply(image),
            ImageEffect::GaussianBlur(config) => config.apply(image),
            ImageEffect::Sharpness(config) => config.apply(image),
            ImageEffect::EdgeDetection(config) => config.apply(image),
            ImageEffect::PencilSketch(config) => config.apply(image),
        }
    }
}
