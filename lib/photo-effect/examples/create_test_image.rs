use image::{Rgb, RgbImage};
use photo_effect::{Raster, codec};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Gradient background with a dark rectangle, so the sketch has edges to trace
    let img = RgbImage::from_fn(800, 600, |x, y| {
        if (300..500).contains(&x) && (200..400).contains(&y) {
            return Rgb([40, 50, 70]);
        }

        let r = (x * 255 / 800) as u8;
        let g = (y * 255 / 600) as u8;
        let b = ((x + y) * 255 / 1400) as u8;
        Rgb([r, g, b])
    });

    std::fs::create_dir_all("data")?;
    codec::save_png(&Raster::Rgb(img), "data/test.png")?;
    println!("Created data/test.png");

    Ok(())
}
