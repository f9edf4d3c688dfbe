// Configuration file handling for hue-swap.
//
// Loads configuration from `<config dir>/hue-swap/config.toml` or a custom path.
// Every field has a default, so a missing file or a partial one is fine.

use crate::color::ColorParseError;
use crate::types::Rgb;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub effect: EffectConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub index: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { index: 0, width: 640, height: 480 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EffectConfig {
    /// `#rrggbb` color whose hue gets replaced.
    pub mask: String,
    /// `#rrggbb` color whose hue is rotated to.
    pub replace: String,
    /// Circular hue distance cutoff; 0.5 matches everything.
    pub threshold: f32,
    /// Spread each frame's rows across all cores.
    pub parallel: bool,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            mask: "#ff0000".to_string(),
            replace: "#00ff00".to_string(),
            threshold: 0.1,
            parallel: true,
        }
    }
}

impl EffectConfig {
    pub fn mask_color(&self) -> Result<Rgb, ConfigError> {
        Ok(self.mask.parse()?)
    }

    pub fn replace_color(&self) -> Result<Rgb, ConfigError> {
        Ok(self.replace.parse()?)
    }
}

impl Config {
    /// Load configuration from a file path (or the default path).
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            log::warn!("No config at '{}', using defaults", path.display());
            return Ok(Config::default());
        }

        log::info!("Loading config from '{}'", path.display());
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        let config = Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse { path: path.clone(), source },
            other => other,
        })?;
        Ok(config)
    }

    /// Parse TOML text and check the colors and threshold.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            source: e,
        })?;
        config.effect.mask_color()?;
        config.effect.replace_color()?;
        // same range the --threshold flag accepts; NaN fails too
        if !(0.0..=1.0).contains(&config.effect.threshold) {
            return Err(ConfigError::Threshold(config.effect.threshold));
        }
        Ok(config)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error(transparent)]
    Color(#[from] ColorParseError),
    #[error("Invalid effect.threshold {0}: must be between 0.0 and 1.0")]
    Threshold(f32),
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("hue-swap").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("hue-swap.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.effect.mask_color().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(config.effect.replace_color().unwrap(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::parse(
            r##"
            [camera]
            index = 2

            [effect]
            mask = "#0000ff"
            threshold = 0.25
            "##,
        )
        .unwrap();
        assert_eq!(config.camera.index, 2);
        assert_eq!(config.camera.width, 640);
        assert_eq!(config.effect.mask_color().unwrap(), Rgb::new(0, 0, 255));
        assert_eq!(config.effect.replace, "#00ff00");
        assert_eq!(config.effect.threshold, 0.25);
        assert!(config.effect.parallel);
    }

    #[test]
    fn bad_color_is_rejected() {
        let err = Config::parse("[effect]\nmask = \"red\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Color(_)), "{err}");
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        for bad in ["nan", "1.5", "-0.1", "inf"] {
            let err = Config::parse(&format!("[effect]\nthreshold = {bad}\n")).unwrap_err();
            assert!(matches!(err, ConfigError::Threshold(_)), "{bad}: {err}");
        }
        assert_eq!(Config::parse("[effect]\nthreshold = 1.0\n").unwrap().effect.threshold, 1.0);
        assert_eq!(Config::parse("[effect]\nthreshold = 0.0\n").unwrap().effect.threshold, 0.0);
    }

    #[test]
    fn load_rejects_nan_threshold() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[effect]\nthreshold = nan").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Threshold(t) if t.is_nan()), "{err}");
    }

    #[test]
    fn bad_toml_is_rejected() {
        let err = Config::parse("[effect\nmask = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("nope.toml").as_path())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_reads_file_and_reports_its_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[effect]\nparallel = false").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert!(!config.effect.parallel);

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "[effect]\nthreshold = \"high\"").unwrap();
        match Config::load(Some(broken.path())).unwrap_err() {
            ConfigError::Parse { path, .. } => assert_eq!(path, broken.path()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
