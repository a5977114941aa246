/// Pencil sketch example
/// Saves the native sketch plus zoomed previews

use photo_effect::{Raster, codec, generate_sketch, zoom};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = codec::load("data/test.png")?.into_rgb();
    let sketch = generate_sketch(&img);

    codec::save_png(&Raster::Gray(sketch.clone()), output_dir.join("pencil_sketch.png"))?;
    println!("✓ Generated pencil_sketch.png");

    for factor in [0.5, 2.0, 3.0] {
        let preview = zoom(&sketch, factor)?;
        let filename = format!("pencil_sketch_x{factor}.png");
        codec::save_png(&Raster::Gray(preview), output_dir.join(&filename))?;
        println!("✓ Generated {}", filename);
    }

    println!("\n✓ Sketch and previews saved to: tmp/");

    Ok(())
}
