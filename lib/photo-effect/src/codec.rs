//! Decoding uploaded bytes and lossless PNG export.

use crate::{ImageEffectError, ImageEffectResult, Raster};
use image::ImageFormat;
use std::{io::Cursor, path::Path};

/// Input formats accepted by [`decode`].
pub const SUPPORTED_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Bmp,
    ImageFormat::Gif,
];

/// Decode JPEG, PNG, BMP or GIF bytes. The format is guessed from the
/// content, not from a file name. GIF input yields the first frame.
pub fn decode(bytes: &[u8]) -> ImageEffectResult<Raster> {
    let format = image::guess_format(bytes).map_err(ImageEffectError::Decode)?;
    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(ImageEffectError::UnsupportedFormat(format!("{format:?}")));
    }

    let image =
        image::load_from_memory_with_format(bytes, format).map_err(ImageEffectError::Decode)?;
    let raster = Raster::from_dynamic(image);

    log::debug!(
        "decoded {format:?} {}x{} with {} channel(s)",
        raster.width(),
        raster.height(),
        raster.channels()
    );

    Ok(raster)
}

/// Encode `raster` as PNG, keeping its channel layout.
pub fn encode_png(raster: &Raster) -> ImageEffectResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());

    match raster {
        Raster::Gray(img) => img.write_to(&mut buf, ImageFormat::Png),
        Raster::Rgb(img) => img.write_to(&mut buf, ImageFormat::Png),
    }
    .map_err(ImageEffectError::Encode)?;

    Ok(buf.into_inner())
}

pub fn load(path: impl AsRef<Path>) -> ImageEffectResult<Raster> {
    let bytes = std::fs::read(path.as_ref())?;
    decode(&bytes)
}

/// Encode first, then write, so a failed encode leaves `path` untouched.
pub fn save_png(raster: &Raster, path: impl AsRef<Path>) -> ImageEffectResult<()> {
    let bytes = encode_png(raster)?;
    std::fs::write(path.as_ref(), bytes)?;
    log::info!("saved {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn gradient() -> RgbImage {
        RgbImage::from_fn(7, 5, |x, y| Rgb([(x * 30) as u8, (y * 50) as u8, 99]))
    }

    #[test]
    fn test_png_export_is_lossless() {
        let rgb = Raster::Rgb(gradient());
        assert_eq!(decode(&encode_png(&rgb).unwrap()).unwrap(), rgb);

        let gray = Raster::Gray(GrayImage::from_fn(3, 9, |x, y| Luma([(x * y * 9) as u8])));
        assert_eq!(decode(&encode_png(&gray).unwrap()).unwrap(), gray);
    }

    #[test]
    fn test_decode_bmp() {
        let mut buf = Cursor::new(Vec::new());
        gradient().write_to(&mut buf, ImageFormat::Bmp).unwrap();
        let raster = decode(buf.get_ref()).unwrap();
        assert_eq!(raster, Raster::Rgb(gradient()));
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ImageEffectError::Decode(_)));
    }

    #[test]
    fn test_decode_unsupported_format() {
        let err = decode(b"RIFF\x24\x00\x00\x00WEBPVP8 ").unwrap_err();
        assert!(matches!(err, ImageEffectError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let raster = Raster::Rgb(gradient());

        save_png(&raster, &path).unwrap();
        assert_eq!(load(&path).unwrap(), raster);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("/nonexistent/photo.png").unwrap_err();
        assert!(matches!(err, ImageEffectError::Io(_)));
    }
}
