/// Adjustment pipeline example
/// Runs a few parameter sets over a test image and saves each result

use photo_effect::{FilterParams, apply_adjustments, codec};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = codec::load("data/test.png")?;

    let presets = [
        ("bright", FilterParams::new().with_brightness(1.5)),
        ("punchy", FilterParams::new().with_contrast(1.6).with_sharpness(2.0)),
        ("soft", FilterParams::new().with_blur(4.0)),
        ("edges", FilterParams::new().with_blur(1.0).with_edge_detection(true)),
        ("negative", FilterParams::new().with_invert_colors(true)),
        ("mono", FilterParams::new().with_contrast(1.3).with_grayscale(true)),
    ];

    for (name, params) in presets {
        let out = apply_adjustments(img.clone(), &params)?;

        let filename = format!("adjust_{name}.png");
        codec::save_png(&out, output_dir.join(&filename))?;
        println!("✓ Generated {}", filename);
    }

    println!("\n✓ All adjustments applied successfully!");
    println!("  Images saved to: tmp/");

    Ok(())
}
