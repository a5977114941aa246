use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

/// An 8-bit raster with either one (gray) or three (RGB) channels.
#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
    Gray(GrayImage),
    Rgb(RgbImage),
}

/// BT.601 luma with round-half-up: `(299 R + 587 G + 114 B) / 1000`.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
}

impl Raster {
    /// Normalize a decoded image. Luma variants become `Gray`, everything
    /// else becomes `Rgb`. Alpha is dropped and deep samples are reduced to
    /// 8 bits.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        match image {
            DynamicImage::ImageLuma8(img) => Raster::Gray(img),
            DynamicImage::ImageRgb8(img) => Raster::Rgb(img),
            other @ (DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_)) => Raster::Gray(other.to_luma8()),
            other => Raster::Rgb(other.to_rgb8()),
        }
    }

    /// Build a raster from interleaved samples. Returns `None` if `channels`
    /// is not 1 or 3 or the buffer length does not match.
    pub fn from_raw(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Option<Self> {
        match channels {
            1 => GrayImage::from_raw(width, height, data).map(Raster::Gray),
            3 => RgbImage::from_raw(width, height, data).map(Raster::Rgb),
            _ => None,
        }
    }

    pub fn width(&self) -> u32 {
        self.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.dimensions().1
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Raster::Gray(img) => img.dimensions(),
            Raster::Rgb(img) => img.dimensions(),
        }
    }

    pub fn channels(&self) -> u8 {
        match self {
            Raster::Gray(_) => 1,
            Raster::Rgb(_) => 3,
        }
    }

    pub fn is_empty(&self) -> bool {
        let (width, height) = self.dimensions();
        width == 0 || height == 0
    }

    pub fn as_raw(&self) -> &[u8] {
        match self {
            Raster::Gray(img) => img.as_raw(),
            Raster::Rgb(img) => img.as_raw(),
        }
    }

    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        match self {
            Raster::Gray(img) => &mut **img,
            Raster::Rgb(img) => &mut **img,
        }
    }

    /// Apply `f` to every sample, keeping the channel layout.
    pub fn map_samples(self, f: impl Fn(u8) -> u8) -> Self {
        match self {
            Raster::Gray(mut img) => {
                img.iter_mut().for_each(|v| *v = f(*v));
                Raster::Gray(img)
            }
            Raster::Rgb(mut img) => {
                img.iter_mut().for_each(|v| *v = f(*v));
                Raster::Rgb(img)
            }
        }
    }

    /// Three-channel copy. Gray samples are replicated into R, G and B.
    pub fn to_rgb(&self) -> RgbImage {
        match self {
            Raster::Rgb(img) => img.clone(),
            Raster::Gray(img) => RgbImage::from_fn(img.width(), img.height(), |x, y| {
                let v = img.get_pixel(x, y)[0];
                Rgb([v, v, v])
            }),
        }
    }

    pub fn into_rgb(self) -> RgbImage {
        match self {
            Raster::Rgb(img) => img,
            gray => gray.to_rgb(),
        }
    }

    /// Single-channel BT.601 luma.
    pub fn into_gray(self) -> GrayImage {
        match self {
            Raster::Gray(img) => img,
            Raster::Rgb(img) => rgb_to_gray(&img),
        }
    }

    /// Rounded mean luma over the whole image, 0 for an empty image.
    pub fn mean_luma(&self) -> u8 {
        if self.is_empty() {
            return 0;
        }

        let sum: u64 = match self {
            Raster::Gray(img) => img.iter().map(|&v| v as u64).sum(),
            Raster::Rgb(img) => img.pixels().map(|p| luma(p[0], p[1], p[2]) as u64).sum(),
        };
        let count = self.width() as u64 * self.height() as u64;

        ((sum + count / 2) / count) as u8
    }
}

pub(crate) fn rgb_to_gray(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let p = image.get_pixel(x, y);
        Luma([luma(p[0], p[1], p[2])])
    })
}

impl From<GrayImage> for Raster {
    fn from(image: GrayImage) -> Self {
        Raster::Gray(image)
    }
}

impl From<RgbImage> for Raster {
    fn from(image: RgbImage) -> Self {
        Raster::Rgb(image)
    }
}
