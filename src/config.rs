use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Upper bound on middle source folders per run
pub const MAX_MIDDLE_FOLDERS: usize = 5;

/// Main configuration for a mixcut batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Global run settings
    pub global: GlobalConfig,

    /// Fixed opening clip, played first in every output video
    #[serde(default)]
    pub hook: BookendConfig,

    /// Fixed closing clip, played last in every output video
    #[serde(default)]
    pub code: BookendConfig,

    /// Middle footage pools, consumed in declaration order
    pub middles: Vec<MiddleConfig>,

    /// Output normalization settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Global run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Number of output videos to assemble
    pub num_videos: u32,
}

/// A fixed clip attached to the start (hook) or end (code) of every video
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookendConfig {
    /// Whether this bookend is included at all
    #[serde(default)]
    pub enabled: bool,

    /// Path to the clip; required when enabled
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// One middle footage source folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddleConfig {
    /// Folder scanned (non-recursively) for source videos
    pub path: PathBuf,

    /// Length in seconds of every segment cut from this folder's videos
    #[serde(alias = "intervals")]
    pub interval: f64,

    /// Segments drawn from this folder per output video
    pub count: u32,
}

/// Output normalization settings applied to every clip before concatenation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Target frame width
    pub width: u32,

    /// Target frame height
    pub height: u32,

    /// Target frame rate
    pub fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        // Vertical short-form format
        Self {
            width: 1080,
            height: 1920,
            fps: 30,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string(),
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    ///
    /// Folder existence is deliberately not checked here; that happens at
    /// pool-build time so the error points at the folder that failed.
    pub fn validate(&self) -> Result<()> {
        if self.global.num_videos == 0 {
            return Err(ConfigError::InvalidValue {
                key: "global.num_videos".to_string(),
                value: self.global.num_videos.to_string(),
            }
            .into());
        }

        if self.middles.is_empty() {
            return Err(ConfigError::MissingKey { key: "middles".to_string() }.into());
        }

        if self.middles.len() > MAX_MIDDLE_FOLDERS {
            return Err(ConfigError::InvalidValue {
                key: "middles".to_string(),
                value: format!("{} entries (max {})", self.middles.len(), MAX_MIDDLE_FOLDERS),
            }
            .into());
        }

        for (i, middle) in self.middles.iter().enumerate() {
            if middle.path.as_os_str().is_empty() {
                return Err(ConfigError::MissingKey {
                    key: format!("middles[{}].path", i),
                }
                .into());
            }

            if middle.interval <= 0.0 || !middle.interval.is_finite() {
                return Err(ConfigError::InvalidValue {
                    key: format!("middles[{}].interval", i),
                    value: middle.interval.to_string(),
                }
                .into());
            }

            if middle.count == 0 {
                return Err(ConfigError::InvalidValue {
                    key: format!("middles[{}].count", i),
                    value: middle.count.to_string(),
                }
                .into());
            }
        }

        self.hook.validate("hook")?;
        self.code.validate("code")?;
        self.render.validate()?;

        Ok(())
    }
}

impl BookendConfig {
    fn validate(&self, section: &str) -> Result<()> {
        if self.enabled && self.path.is_none() {
            return Err(ConfigError::MissingKey {
                key: format!("{}.path", section),
            }
            .into());
        }
        Ok(())
    }
}

impl RenderConfig {
    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidValue {
                key: "render.resolution".to_string(),
                value: format!("{}x{}", self.width, self.height),
            }
            .into());
        }

        if self.fps == 0 {
            return Err(ConfigError::InvalidValue {
                key: "render.fps".to_string(),
                value: self.fps.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_config() -> Config {
        Config {
            global: GlobalConfig { num_videos: 3 },
            hook: BookendConfig {
                enabled: true,
                path: Some(PathBuf::from("media/hook.mp4")),
            },
            code: BookendConfig {
                enabled: false,
                path: None,
            },
            middles: vec![MiddleConfig {
                path: PathBuf::from("media/middle1"),
                interval: 2.0,
                count: 4,
            }],
            render: RenderConfig::default(),
        }
    }

    #[test]
    fn test_sample_config_is_valid() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("run.toml");

        let original = sample_config();
        original.save_to_file(&file_path).unwrap();
        let loaded = Config::from_file(&file_path).unwrap();

        assert_eq!(original.global.num_videos, loaded.global.num_videos);
        assert_eq!(original.middles.len(), loaded.middles.len());
        assert_eq!(original.middles[0].interval, loaded.middles[0].interval);
        assert_eq!(original.hook.path, loaded.hook.path);
        assert_eq!(original.render.fps, loaded.render.fps);
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file("does/not/exist.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_videos_rejected() {
        let mut config = sample_config();
        config.global.num_videos = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_no_middles_rejected() {
        let mut config = sample_config();
        config.middles.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_too_many_middles_rejected() {
        let mut config = sample_config();
        let middle = config.middles[0].clone();
        config.middles = vec![middle; MAX_MIDDLE_FOLDERS + 1];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let mut config = sample_config();
        config.middles[0].interval = 0.0;
        assert!(config.validate().is_err());

        config.middles[0].interval = -1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enabled_bookend_requires_path() {
        let mut config = sample_config();
        config.code.enabled = true;
        config.code.path = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bookend_defaults_to_disabled() {
        let toml_str = r#"
            [global]
            num_videos = 1

            [[middles]]
            path = "media/middle1"
            interval = 2.0
            count = 1
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(!config.hook.enabled);
        assert!(!config.code.enabled);
        assert!(config.validate().is_ok());
    }
}
