//! `sample.toml` handling for the CLI

use anyhow::{Context, Result};
use sample_platform::ShimConfig;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load configuration from a file or directory; a missing file means defaults
pub fn load_config(path: Option<&Path>) -> Result<ShimConfig> {
    let Some(path) = path else {
        let default_path = Path::new("sample.toml");
        if default_path.exists() {
            return ShimConfig::load(default_path)
                .with_context(|| format!("Failed to load {}", default_path.display()));
        }
        tracing::debug!("No sample.toml found, using defaults");
        return Ok(ShimConfig::default());
    };

    ShimConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Write a default `sample.toml` into `dir`
pub fn write_default_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join("sample.toml");
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it.",
            config_path.display()
        );
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let content = ShimConfig::default().to_toml()?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(())
}

/// What `sample info` reports
#[derive(Debug, Serialize)]
pub struct LibraryInfo {
    pub library: String,
    pub file_name: String,
    pub meta_data: String,
    pub package: String,
    pub log_tag: String,
}

impl LibraryInfo {
    pub fn from_config(config: &ShimConfig) -> Result<Self> {
        let library = config.library_name()?;
        let (key, value) = library.manifest_meta_data();
        Ok(Self {
            library: library.to_string(),
            file_name: library.file_name(),
            meta_data: format!("{}={}", key, value),
            package: config.android.package.clone(),
            log_tag: config.log_tag.clone(),
        })
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize library info")
    }
}
