use crate::AdjustArgs;
use anyhow::{Context, Result};
use log::debug;
use photo_effect::FilterParams;
use std::{fs, path::Path};

/// Read filter parameters from a TOML file. Missing keys keep their
/// defaults, unknown keys are an error.
pub fn load(path: &Path) -> Result<FilterParams> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let params: FilterParams =
        toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))?;

    debug!("loaded {}: {params:?}", path.display());
    Ok(params)
}

/// Defaults, then the config file, then command line flags.
pub fn resolve(args: &AdjustArgs) -> Result<FilterParams> {
    let mut params = match &args.config {
        Some(path) => load(path)?,
        None => FilterParams::default(),
    };

    if let Some(v) = args.brightness {
        params.brightness = v;
    }
    if let Some(v) = args.contrast {
        params.contrast = v;
    }
    if let Some(v) = args.sharpness {
        params.sharpness = v;
    }
    if let Some(v) = args.blur {
        params.blur = v;
    }

    params.edge_detection |= args.edge_detection;
    params.invert_colors |= args.invert_colors;
    params.grayscale |= args.grayscale;

    params.validate()?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(config: Option<PathBuf>) -> AdjustArgs {
        AdjustArgs {
            input: PathBuf::from("in.png"),
            output: PathBuf::from("out.png"),
            config,
            brightness: None,
            contrast: None,
            sharpness: None,
            blur: None,
            edge_detection: false,
            invert_colors: false,
            grayscale: false,
        }
    }

    #[test]
    fn test_resolve_defaults() {
        assert_eq!(resolve(&args(None)).unwrap(), FilterParams::default());
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.toml");
        fs::write(&path, "brightness = 0.5\nblur = 2.0\ninvert_colors = true\n").unwrap();

        let mut args = args(Some(path));
        args.brightness = Some(1.5);
        args.grayscale = true;

        let params = resolve(&args).unwrap();
        assert_eq!(
            params,
            FilterParams::new()
                .with_brightness(1.5)
                .with_blur(2.0)
                .with_invert_colors(true)
                .with_grayscale(true)
        );
    }

    #[test]
    fn test_resolve_rejects_out_of_range() {
        let mut args = args(None);
        args.blur = Some(11.0);
        assert!(resolve(&args).is_err());
    }

    #[test]
    fn test_bad_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.toml");
        fs::write(&path, "sharpen = 2.0\n").unwrap();

        assert!(load(&path).is_err());
        assert!(load(&dir.path().join("missing.toml")).is_err());
    }
}
