//! Configuration file support.
//!
//! A config file bundles the widget options with the log verbosity, so the
//! demo binary and the browser embedding can both be tuned without a rebuild.
//! Options are checked when a file is read and before it is written.

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;
use std::path::PathBuf;

use scrollbars_core::{Dimension, ScrollbarsConfig};
use serde::{Deserialize, Serialize};

/// How much the widget logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Nothing, not even failures
    Off,
    /// Failures of the browser embedding
    Error,
    /// Dropped events and style writes the page rejected
    Warn,
    /// Config loading and widget creation
    #[default]
    Info,
    /// Mount, unmount, drag sessions and scrollbar width changes
    Debug,
    /// Every frame sync with its timing
    Trace,
}

impl LogLevel {
    /// Level for loggers that take a single `log::Level`; `None` when off.
    pub fn level(self) -> Option<log::Level> {
        log::LevelFilter::from(self).to_level()
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(name.to_ascii_lowercase())).map_err(|_| {
            ConfigError::InvalidOption {
                option: "logLevel",
                reason: format!("unknown level {:?}", name),
            }
        })
    }
}

/// Current configuration file format version.
pub const CONFIG_VERSION: u32 = 1;

/// Contents of a scrollbars configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub version: u32,

    #[serde(default)]
    pub log_level: LogLevel,

    /// Options for every widget created without explicit ones
    #[serde(default)]
    pub scrollbars: ScrollbarsConfig,
}

impl ConfigFile {
    pub fn new(scrollbars: ScrollbarsConfig) -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            scrollbars,
        }
    }

    pub fn default_filename() -> &'static str {
        "scrollbars.json"
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and check a config file. Files written by a newer release are
    /// rejected rather than partially understood.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_VERSION,
            });
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject widget options that would produce broken geometry or markup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_options(&self.scrollbars)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Like [`load`](Self::load), with defaults for a missing or broken file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Ignoring config file: {}", e);
            Self::default()
        })
    }

    /// Write the file, creating parent directories.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        let io = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io)?;
        }
        std::fs::write(path, json).map_err(io)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "scrollbars-config";

    /// Read the page's stored config. `None` when nothing usable is stored.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let json = match local_storage().and_then(|storage| {
            storage
                .get_item(Self::STORAGE_KEY)
                .map_err(|e| ConfigError::Storage(format!("{:?}", e)))
        }) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("{}", e);
                return None;
            }
        };
        Self::from_json(&json)
            .inspect_err(|e| log::warn!("Ignoring stored configuration: {}", e))
            .ok()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save_to_local_storage(&self) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        local_storage()?
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| ConfigError::Storage(format!("{:?}", e)))?;
        log::debug!("Stored configuration under {}", Self::STORAGE_KEY);
        Ok(())
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new(ScrollbarsConfig::default())
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, ConfigError> {
    web_sys::window()
        .ok_or_else(|| ConfigError::Storage("no window".to_string()))?
        .local_storage()
        .map_err(|e| ConfigError::Storage(format!("{:?}", e)))?
        .ok_or_else(|| ConfigError::Storage("localStorage unavailable".to_string()))
}

fn invalid(option: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidOption {
        option,
        reason: reason.into(),
    }
}

fn validate_options(options: &ScrollbarsConfig) -> Result<(), ConfigError> {
    let tag = options.tag_name.as_str();
    let mut chars = tag.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        || !chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(invalid("tagName", format!("{:?} is not an element name", tag)));
    }
    if !options.thumb_min_size.is_finite() || options.thumb_min_size < 0.0 {
        return Err(invalid("thumbMinSize", "must be a length of zero or more pixels"));
    }
    if let Some(size) = options.thumb_size {
        if !size.is_finite() || size <= 0.0 {
            return Err(invalid("thumbSize", "must be a positive length"));
        }
    }
    if let (Dimension::Px(min), Dimension::Px(max)) =
        (&options.auto_height_min, &options.auto_height_max)
    {
        if min > max {
            return Err(invalid(
                "autoHeightMin",
                format!("{}px is above autoHeightMax {}px", min, max),
            ));
        }
    }
    Ok(())
}

/// Why a configuration could not be read, checked or written.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration version {found} is newer than the supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Invalid option {option}: {reason}")]
    InvalidOption { option: &'static str, reason: String },

    #[error("Cannot access {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// localStorage missing, blocked or full
    #[error("Configuration storage unavailable: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_keeps_options() {
        let mut file = ConfigFile::new(ScrollbarsConfig::new().auto_hide(500, 150).tag_name("section"));
        file.log_level = LogLevel::Debug;
        let json = file.to_json().unwrap();
        assert!(json.contains("\"logLevel\": \"debug\""));
        assert!(json.contains("\"autoHideTimeout\": 500"));
        assert!(json.contains("\"tagName\": \"section\""));
        assert_eq!(ConfigFile::from_json(&json).unwrap(), file);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let file = ConfigFile::from_json(r#"{ "version": 1 }"#).unwrap();
        assert_eq!(file.log_level, LogLevel::Info);
        assert_eq!(file.scrollbars, ScrollbarsConfig::default());
    }

    #[test]
    fn test_css_auto_height_bounds() {
        let json = r#"{
            "version": 1,
            "scrollbars": { "autoHeight": true, "autoHeightMin": 40, "autoHeightMax": "50vh" }
        }"#;
        let file = ConfigFile::from_json(json).unwrap();
        assert!(file.scrollbars.auto_height);
        assert_eq!(file.scrollbars.auto_height_min, Dimension::Px(40.0));
        assert_eq!(
            file.scrollbars.auto_height_max,
            Dimension::Css("50vh".to_string())
        );
    }

    #[test]
    fn test_newer_version_rejected() {
        let result = ConfigFile::from_json(r#"{ "version": 99 }"#);
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion {
                found: 99,
                supported: CONFIG_VERSION
            })
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ConfigFile::from_json("{ version: "),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let cases = [
            (r#"{ "tagName": "" }"#, "tagName"),
            (r#"{ "tagName": "my div" }"#, "tagName"),
            (r#"{ "thumbMinSize": -4 }"#, "thumbMinSize"),
            (r#"{ "thumbSize": 0 }"#, "thumbSize"),
            (r#"{ "autoHeightMin": 300, "autoHeightMax": 200 }"#, "autoHeightMin"),
        ];
        for (options, expected) in cases {
            let json = format!(r#"{{ "version": 1, "scrollbars": {} }}"#, options);
            match ConfigFile::from_json(&json) {
                Err(ConfigError::InvalidOption { option, .. }) => assert_eq!(option, expected),
                other => panic!("{} should be rejected, got {:?}", options, other),
            }
        }

        let file = ConfigFile::new(ScrollbarsConfig::new().thumb_size(-1.0));
        assert!(matches!(file.to_json(), Err(ConfigError::InvalidOption { option: "thumbSize", .. })));
    }

    #[test]
    fn test_css_bounds_are_not_compared() {
        let file = ConfigFile::new(ScrollbarsConfig::new().auto_height(300.0, "10vh"));
        assert!(file.validate().is_ok());
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(log::LevelFilter::from(LogLevel::Warn), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Trace.level(), Some(log::Level::Trace));
        assert_eq!(LogLevel::Off.level(), None);
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!(matches!(
            "loud".parse::<LogLevel>(),
            Err(ConfigError::InvalidOption { option: "logLevel", .. })
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("scrollbars-config-{}", std::process::id()));
        let path = dir.join("nested").join(ConfigFile::default_filename());
        let file = ConfigFile::new(ScrollbarsConfig::new().thumb_size(20.0));
        file.save(&path).unwrap();
        assert_eq!(ConfigFile::load(&path).unwrap(), file);
        assert_eq!(
            ConfigFile::load_or_default(&dir.join("missing.json")),
            ConfigFile::default()
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_error_names_path() {
        let path = std::env::temp_dir().join("scrollbars-no-such-dir").join("scrollbars.json");
        match ConfigFile::load(&path) {
            Err(ConfigError::Io { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected an I/O error, got {:?}", other),
        }
    }
}
