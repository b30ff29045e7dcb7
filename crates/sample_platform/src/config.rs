//! Shim configuration (`sample.toml`)
//!
//! Every field has a default that reproduces the built-in behavior, so an
//! empty file (or no file) is a valid configuration. The activity itself
//! always runs with the defaults; the file feeds build tooling.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlatformError, Result};
use crate::immersive::ImmersivePolicy;
use crate::insets::{InsetTypes, SystemBarsBehavior};
use crate::library::{LibraryName, MULTIPLATFORM_SAMPLE};

/// Top-level shim configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ShimConfig {
    /// Bare name of the native library the activity launches
    #[serde(default = "default_library")]
    pub library: String,
    /// Tag attached to platform log output
    #[serde(default = "default_library")]
    pub log_tag: String,
    /// Maximum log level (`error`, `warn`, `info`, `debug`, `trace`)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub android: AndroidConfig,
    #[serde(default)]
    pub immersive: ImmersiveConfig,
}

fn default_library() -> String {
    MULTIPLATFORM_SAMPLE.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            library: default_library(),
            log_tag: default_library(),
            log_level: default_log_level(),
            android: AndroidConfig::default(),
            immersive: ImmersiveConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AndroidConfig {
    #[serde(default = "default_package")]
    pub package: String,
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(default = "default_min_sdk")]
    pub min_sdk: u32,
    #[serde(default = "default_target_sdk")]
    pub target_sdk: u32,
}

fn default_package() -> String {
    "com.example.multiplatformsample".to_string()
}

fn default_label() -> String {
    MULTIPLATFORM_SAMPLE.to_string()
}

fn default_min_sdk() -> u32 {
    24
}

fn default_target_sdk() -> u32 {
    34
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            package: default_package(),
            label: default_label(),
            min_sdk: default_min_sdk(),
            target_sdk: default_target_sdk(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImmersiveConfig {
    #[serde(default = "default_true")]
    pub hide_status_bars: bool,
    #[serde(default = "default_true")]
    pub hide_navigation_bars: bool,
    /// Reveal hidden bars transiently on an inward swipe
    #[serde(default = "default_true")]
    pub transient_swipe: bool,
    #[serde(default)]
    pub decor_fits_system_windows: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ImmersiveConfig {
    fn default() -> Self {
        Self {
            hide_status_bars: true,
            hide_navigation_bars: true,
            transient_swipe: true,
            decor_fits_system_windows: false,
        }
    }
}

impl ShimConfig {
    /// Parse from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ShimConfig =
            toml::from_str(content).map_err(|e| PlatformError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, or from `sample.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("sample.toml")
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path).map_err(|e| {
            PlatformError::Config(format!("Failed to read {}: {}", config_path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PlatformError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        self.library_name()?;
        if self.android.min_sdk > self.android.target_sdk {
            return Err(PlatformError::Config(format!(
                "min_sdk {} exceeds target_sdk {}",
                self.android.min_sdk, self.android.target_sdk
            )));
        }
        if self.log_level.parse::<tracing::Level>().is_err() {
            return Err(PlatformError::Config(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn library_name(&self) -> Result<LibraryName> {
        LibraryName::new(self.library.as_str())
    }

    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }

    pub fn immersive_policy(&self) -> ImmersivePolicy {
        let mut hide = InsetTypes::NONE;
        if self.immersive.hide_status_bars {
            hide |= InsetTypes::STATUS_BARS;
        }
        if self.immersive.hide_navigation_bars {
            hide |= InsetTypes::NAVIGATION_BARS;
        }
        ImmersivePolicy {
            hide,
            behavior: if self.immersive.transient_swipe {
                SystemBarsBehavior::ShowTransientBarsBySwipe
            } else {
                SystemBarsBehavior::Default
            },
            decor_fits_system_windows: self.immersive.decor_fits_system_windows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_matches_builtin_behavior() {
        let config = ShimConfig::from_toml_str("").unwrap();
        assert_eq!(config, ShimConfig::default());
        assert_eq!(config.library_name().unwrap(), LibraryName::multiplatform_sample());
        assert_eq!(config.immersive_policy(), ImmersivePolicy::default());
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = ShimConfig::from_toml_str(
            r#"
            log_level = "debug"

            [android]
            package = "org.sample.app"

            [immersive]
            hide_navigation_bars = false
            "#,
        )
        .unwrap();

        assert_eq!(config.android.package, "org.sample.app");
        assert_eq!(config.android.min_sdk, 24);
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
        assert_eq!(config.immersive_policy().hide, InsetTypes::STATUS_BARS);
    }

    #[test]
    fn rejects_inconsistent_values() {
        assert!(ShimConfig::from_toml_str(r#"library = "lib/x.so""#).is_err());
        assert!(ShimConfig::from_toml_str(r#"log_level = "loud""#).is_err());
        assert!(ShimConfig::from_toml_str("[android]\nmin_sdk = 40").is_err());
    }

    #[test]
    fn serialized_config_parses_back() {
        let text = ShimConfig::default().to_toml().unwrap();
        assert_eq!(
            ShimConfig::from_toml_str(&text).unwrap(),
            ShimConfig::default()
        );
    }
}
