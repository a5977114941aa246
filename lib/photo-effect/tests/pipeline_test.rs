// cargo test -p photo-effect --test pipeline_test

use image::{GrayImage, Luma, Rgb, RgbImage};
use photo_effect::{
    Effect, FilterParams, ImageEffectError, Raster, apply_adjustments,
    base_effect::invert,
    blur_effect::GaussianBlurConfig,
    stylized_effect::EdgeDetection,
};

fn noisy_photo(width: u32, height: u32) -> Raster {
    // deterministic pseudo-random texture
    let mut seed = 0x2545_f491_u32;
    Raster::Rgb(RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            (seed >> 24) as u8
        };
        Rgb([next(), next(), next()])
    }))
}

#[test]
fn test_default_params_return_input_unchanged() {
    for image in [
        noisy_photo(31, 17),
        Raster::Gray(GrayImage::from_fn(8, 8, |x, y| Luma([(x * 31 + y) as u8]))),
    ] {
        let out = apply_adjustments(image.clone(), &FilterParams::default()).unwrap();
        assert_eq!(out, image);
    }
}

#[test]
fn test_zero_blur_short_circuits() {
    let image = noisy_photo(12, 12);
    let params = FilterParams::new()
        .with_blur(0.0)
        .with_brightness(1.0)
        .with_contrast(1.0)
        .with_sharpness(1.0);
    assert_eq!(apply_adjustments(image.clone(), &params).unwrap(), image);
}

#[test]
fn test_brightness_on_mid_gray() {
    let image = Raster::Rgb(RgbImage::from_pixel(100, 100, Rgb([128, 128, 128])));
    let out = apply_adjustments(image, &FilterParams::new().with_brightness(1.5)).unwrap();

    assert_eq!(out.dimensions(), (100, 100));
    assert_eq!(out.channels(), 3);
    assert!(out.as_raw().iter().all(|&v| v == 192));
}

#[test]
fn test_grayscale_is_idempotent() {
    let params = FilterParams::new().with_grayscale(true);
    let once = apply_adjustments(noisy_photo(9, 6), &params).unwrap();
    let twice = apply_adjustments(once.clone(), &params).unwrap();

    assert_eq!(once.channels(), 1);
    assert_eq!(once, twice);
}

#[test]
fn test_invert_twice_restores_image() {
    let image = noisy_photo(10, 10);
    let params = FilterParams::new().with_invert_colors(true);
    let once = apply_adjustments(image.clone(), &params).unwrap();
    assert_ne!(once, image);
    assert_eq!(apply_adjustments(once, &params).unwrap(), image);
    assert_eq!(invert(invert(image.clone())), image);
}

#[test]
fn test_edge_detection_runs_after_blur() {
    let image = noisy_photo(20, 20);
    let params = FilterParams::new().with_blur(2.0).with_edge_detection(true);

    let blurred = GaussianBlurConfig::new()
        .with_radius(2.0)
        .apply(image.clone())
        .unwrap();
    let expected = EdgeDetection.apply(blurred).unwrap();
    let unordered = EdgeDetection.apply(image.clone()).unwrap();

    let out = apply_adjustments(image, &params).unwrap();
    assert_eq!(out, expected);
    assert_ne!(out, unordered);
}

#[test]
fn test_invert_then_grayscale() {
    let image = Raster::Rgb(RgbImage::from_pixel(4, 4, Rgb([255, 0, 0])));
    let params = FilterParams::new()
        .with_invert_colors(true)
        .with_grayscale(true);

    let out = apply_adjustments(image, &params).unwrap();
    // inverted red is cyan (0, 255, 255)
    assert_eq!(out, Raster::Gray(GrayImage::from_pixel(4, 4, Luma([179]))));
}

#[test]
fn test_gray_input_inverts_to_rgb() {
    let image = Raster::Gray(GrayImage::from_pixel(3, 3, Luma([10])));
    let out = apply_adjustments(image, &FilterParams::new().with_invert_colors(true)).unwrap();
    assert_eq!(out, Raster::Rgb(RgbImage::from_pixel(3, 3, Rgb([245, 245, 245]))));
}

#[test]
fn test_invalid_params_rejected_before_processing() {
    let err = apply_adjustments(noisy_photo(2, 2), &FilterParams::new().with_blur(-3.0))
        .unwrap_err();
    assert!(matches!(err, ImageEffectError::InvalidParameter(_)));
}

#[test]
fn test_empty_image_passes_every_stage() {
    let image = Raster::Rgb(RgbImage::new(0, 0));
    let params = FilterParams::new()
        .with_brightness(0.5)
        .with_contrast(2.0)
        .with_sharpness(0.0)
        .with_blur(4.0)
        .with_edge_detection(true)
        .with_invert_colors(true)
        .with_grayscale(true);

    let out = apply_adjustments(image, &params).unwrap();
    assert_eq!(out.dimensions(), (0, 0));
    assert_eq!(out.channels(), 1);
}
