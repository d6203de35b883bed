use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default package name when none is given
pub const DEFAULT_PACKAGE: &str = "Siconos";

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "srcml-to-mse.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub conversion: ConversionConfig,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Name of the FAMIX package owning every class
    pub package: String,
}

/// Conversion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Remove `'` from every emitted string instead of failing
    pub strip_quotes: bool,
    /// Leading qualifier tokens for which a field type is reduced to its last component
    pub type_prefix_markers: Vec<String>,
    /// Free functions whose name starts with this character are skipped
    pub template_sigil: char,
    /// Read srcML position attributes into file anchors
    pub source_lines: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
        }
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            strip_quotes: false,
            type_prefix_markers: vec!["SP".to_string()],
            template_sigil: '$',
            source_lines: true,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from an explicit path, else the default file if present, else defaults
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(&mut self, package: Option<String>, strip_quotes: bool) {
        if let Some(name) = package {
            self.project.package = name;
        }

        if strip_quotes {
            self.conversion.strip_quotes = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.project.package.trim().is_empty() {
            return Err(Error::config_validation("package name must not be empty"));
        }

        if self.project.package.contains('\'') && !self.conversion.strip_quotes {
            return Err(Error::config_validation("package name must not contain \"'\""));
        }

        if self.conversion.type_prefix_markers.iter().any(|m| m.is_empty()) {
            return Err(Error::config_validation("type prefix markers must not be empty"));
        }

        Ok(())
    }
}
