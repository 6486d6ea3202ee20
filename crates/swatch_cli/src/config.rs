//! Swatch configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use swatch_theme::{DarkStrategy, EmitOptions};

pub const CONFIG_FILE: &str = "swatch.toml";

/// Top-level Swatch configuration (swatch.toml)
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SwatchConfig {
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub selector: SelectorConfig,
}

/// Build configuration
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Directory holding theme files (relative to the config file)
    #[serde(default = "default_themes")]
    pub themes: String,
    /// Generated stylesheet
    #[serde(default = "default_output")]
    pub output: String,
    /// Optional JSON manifest for runtime switching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,
    /// Register the built-in presets before the theme directory
    #[serde(default = "default_true")]
    pub presets: bool,
    /// Theme also applied on `:root`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_theme: Option<String>,
    /// Emit the generated banner and description comments
    #[serde(default = "default_true")]
    pub header: bool,
}

fn default_themes() -> String {
    "themes".to_string()
}

fn default_output() -> String {
    "dist/themes.css".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            themes: default_themes(),
            output: default_output(),
            manifest: None,
            presets: true,
            default_theme: None,
            header: true,
        }
    }
}

/// How the dark scheme is selected
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    #[default]
    Class,
    Attribute,
    Media,
}

/// Selector configuration
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct SelectorConfig {
    /// Attribute carrying the theme name
    #[serde(default = "default_attribute")]
    pub attribute: String,
    #[serde(default)]
    pub dark: DarkMode,
    /// Attribute set to `dark` when `dark = "attribute"`
    #[serde(default = "default_dark_attribute")]
    pub dark_attribute: String,
}

fn default_attribute() -> String {
    "data-theme".to_string()
}

fn default_dark_attribute() -> String {
    "data-mode".to_string()
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            attribute: default_attribute(),
            dark: DarkMode::default(),
            dark_attribute: default_dark_attribute(),
        }
    }
}

impl SwatchConfig {
    /// Load configuration from a directory (looks for swatch.toml)
    ///
    /// Returns the config together with the directory its relative paths
    /// are resolved against.
    pub fn load_from_dir(path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found in {}. Run `swatch init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: SwatchConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok((config, root))
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn emit_options(&self) -> EmitOptions {
        let dark = match self.selector.dark {
            DarkMode::Class => DarkStrategy::Class,
            DarkMode::Attribute => DarkStrategy::Attribute(self.selector.dark_attribute.clone()),
            DarkMode::Media => DarkStrategy::Media,
        };
        EmitOptions {
            attribute: self.selector.attribute.clone(),
            dark,
            default_theme: self.build.default_theme.clone(),
            header: self.build.header,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_uses_defaults() {
        let config: SwatchConfig = toml::from_str("").unwrap();
        assert_eq!(config, SwatchConfig::default());
        assert_eq!(config.emit_options(), EmitOptions::default());
    }

    #[test]
    fn parses_sections() {
        let config: SwatchConfig = toml::from_str(
            r#"
[build]
themes = "design/themes"
manifest = "dist/themes.json"
default_theme = "acrobi"

[selector]
dark = "attribute"
dark_attribute = "data-scheme"
"#,
        )
        .unwrap();

        assert_eq!(config.build.themes, "design/themes");
        assert_eq!(config.build.output, "dist/themes.css");
        assert!(config.build.presets);

        let options = config.emit_options();
        assert_eq!(options.dark, DarkStrategy::Attribute("data-scheme".to_string()));
        assert_eq!(options.default_theme.as_deref(), Some("acrobi"));
    }

    #[test]
    fn load_from_dir_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SwatchConfig::load_from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("swatch init"));
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SwatchConfig::default();
        config.selector.dark = DarkMode::Media;
        fs::write(dir.path().join(CONFIG_FILE), config.to_toml().unwrap()).unwrap();

        let (loaded, root) = SwatchConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(root, dir.path());
    }
}
