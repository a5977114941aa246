use crate::{AdjustArgs, SketchArgs, config};
use anyhow::{Context, Result};
use log::{debug, info};
use photo_effect::{Raster, apply_adjustments, codec, generate_sketch, sketch::ZOOM_DEFAULT, zoom};

pub fn adjust(args: &AdjustArgs) -> Result<()> {
    let params = config::resolve(args)?;

    let image = codec::load(&args.input)
        .with_context(|| format!("load image {}", args.input.display()))?;
    info!(
        "adjust {} ({}x{}, {} channel(s))",
        args.input.display(),
        image.width(),
        image.height(),
        image.channels()
    );

    if params.is_identity() {
        debug!("all filters at identity, writing the input back unchanged");
    }

    let processed = apply_adjustments(image, &params).context("apply filters")?;

    codec::save_png(&processed, &args.output)
        .with_context(|| format!("save {}", args.output.display()))?;

    Ok(())
}

pub fn sketch(args: &SketchArgs) -> Result<()> {
    let image = codec::load(&args.input)
        .with_context(|| format!("load image {}", args.input.display()))?;

    // The sketch expects color input, gray photos are expanded first
    let sketch = generate_sketch(&image.into_rgb());

    codec::save_png(&Raster::Gray(sketch.clone()), &args.output)
        .with_context(|| format!("save {}", args.output.display()))?;

    if args.zoom != ZOOM_DEFAULT {
        let preview = zoom(&sketch, args.zoom)?;
        let path = args.preview_path();
        info!(
            "preview at {}x zoom: {}x{}",
            args.zoom,
            preview.width(),
            preview.height()
        );

        codec::save_png(&Raster::Gray(preview), &path)
            .with_context(|| format!("save {}", path.display()))?;
    }

    Ok(())
}
