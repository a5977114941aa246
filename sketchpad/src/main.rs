//! Command line front end for the photo filters and the pencil sketch
//! generator.
//!
//! - `sketchpad adjust` decodes a photo, runs the adjustment pipeline and
//!   writes `processed_image.png`.
//! - `sketchpad sketch` writes the native-resolution `pencil_sketch.png`
//!   and, when zoomed, a separate preview.

mod commands;
mod config;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use photo_effect::sketch::{ZOOM_DEFAULT, ZOOM_MAX, ZOOM_MIN};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sketchpad", version, about = "Photo filters and pencil sketch generator")]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply brightness, contrast, sharpness, blur and filter toggles
    Adjust(AdjustArgs),

    /// Convert a photo into a pencil sketch
    Sketch(SketchArgs),
}

#[derive(Args, Debug)]
pub struct AdjustArgs {
    /// JPEG, PNG, BMP or GIF image
    pub input: PathBuf,

    #[arg(short, long, default_value = "processed_image.png")]
    pub output: PathBuf,

    /// TOML file with filter parameters; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 0.0 - 2.0, 1.0 leaves the image unchanged
    #[arg(long)]
    pub brightness: Option<f32>,

    /// 0.0 - 2.0, 1.0 leaves the image unchanged
    #[arg(long)]
    pub contrast: Option<f32>,

    /// 0.0 - 2.0, 1.0 leaves the image unchanged
    #[arg(long)]
    pub sharpness: Option<f32>,

    /// Gaussian radius 0.0 - 10.0, 0.0 leaves the image unchanged
    #[arg(long)]
    pub blur: Option<f32>,

    #[arg(long)]
    pub edge_detection: bool,

    #[arg(long)]
    pub invert_colors: bool,

    #[arg(long)]
    pub grayscale: bool,
}

#[derive(Args, Debug)]
pub struct SketchArgs {
    /// JPEG, PNG, BMP or GIF image
    pub input: PathBuf,

    /// Native-resolution sketch, never zoomed
    #[arg(short, long, default_value = "pencil_sketch.png")]
    pub output: PathBuf,

    /// Preview zoom level, 0.5 - 3.0
    #[arg(short, long, default_value_t = ZOOM_DEFAULT, value_parser = parse_zoom)]
    pub zoom: f32,

    /// Where to write the zoomed preview [default: <OUTPUT>_preview.png]
    #[arg(long)]
    pub preview: Option<PathBuf>,
}

impl SketchArgs {
    pub fn preview_path(&self) -> PathBuf {
        if let Some(path) = &self.preview {
            return path.clone();
        }

        let stem = self
            .output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "pencil_sketch".to_string());
        self.output.with_file_name(format!("{stem}_preview.png"))
    }
}

fn parse_zoom(s: &str) -> std::result::Result<f32, String> {
    let factor: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if !(ZOOM_MIN..=ZOOM_MAX).contains(&factor) {
        return Err(format!("zoom must be within {ZOOM_MIN}..={ZOOM_MAX}"));
    }

    Ok(factor)
}

fn init_logger(verbose: bool) {
    use std::io::Write;

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    log::debug!("start...");

    match &cli.command {
        Command::Adjust(args) => commands::adjust(args)?,
        Command::Sketch(args) => commands::sketch(args)?,
    }

    log::debug!("exit...");
    Ok(())
}
