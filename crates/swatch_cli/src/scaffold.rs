//! Project and theme scaffolding

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

use swatch_theme::{ThemeDef, TokenPath, TokenSet, TokenValue};

use crate::config::{SwatchConfig, CONFIG_FILE};
use crate::project::Project;

/// A `--set category.token=value` argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenOverride {
    pub path: TokenPath,
    pub value: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OverrideError {
    #[error("expected `category.token=value`, got `{0}`")]
    MissingValue(String),
    #[error("`{0}` is not a `category.token` path")]
    InvalidPath(String),
}

impl FromStr for TokenOverride {
    type Err = OverrideError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (path, value) = s
            .split_once('=')
            .ok_or_else(|| OverrideError::MissingValue(s.to_string()))?;
        let value = value.trim();
        if value.is_empty() {
            return Err(OverrideError::MissingValue(s.to_string()));
        }
        let path = path
            .trim()
            .parse::<TokenPath>()
            .map_err(|_| OverrideError::InvalidPath(path.trim().to_string()))?;
        Ok(Self {
            path,
            value: value.to_string(),
        })
    }
}

/// Create `swatch.toml` and a starter theme in `path`.
pub fn init_project(path: &Path) -> Result<()> {
    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    let config = SwatchConfig::default();
    let themes_dir = path.join(&config.build.themes);
    fs::create_dir_all(&themes_dir)
        .with_context(|| format!("Failed to create {}", themes_dir.display()))?;
    fs::write(&config_path, config.to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    let starter = themes_dir.join("brand.toml");
    if !starter.exists() {
        fs::write(&starter, STARTER_THEME)
            .with_context(|| format!("Failed to write {}", starter.display()))?;
    }

    info!("initialized swatch project in {}", path.display());
    Ok(())
}

const STARTER_THEME: &str = r#"name = "brand"
extends = "neutral"

[metadata]
description = "Starter brand theme"

[tokens.colors]
primary = { light = "37 99 235", dark = "96 165 250" }
ring = { light = "37 99 235", dark = "96 165 250" }
"#;

/// Scaffold a new theme file extending `parent`. The theme is checked
/// against the project registry before anything is written.
pub fn new_theme(
    project: &Project,
    name: &str,
    parent: &str,
    overrides: &[TokenOverride],
    description: Option<&str>,
) -> Result<PathBuf> {
    let registry = project.registry()?;

    let mut tokens = TokenSet::new();
    for set in overrides {
        tokens.insert(
            set.path.category.clone(),
            set.path.token.clone(),
            TokenValue::from(set.value.as_str()),
        );
    }
    let mut def = ThemeDef::new(name).extends(parent).tokens(tokens);
    if let Some(description) = description {
        def = def.description(description);
    }

    registry
        .check_new_theme(&def)
        .with_context(|| format!("Cannot create theme `{name}`"))?;

    let path = project.themes_dir().join(format!("{name}.toml"));
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    fs::create_dir_all(project.themes_dir())?;
    let source = def.to_toml().context("Failed to serialize theme")?;
    fs::write(&path, source).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("created {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_overrides() {
        let set: TokenOverride = "colors.primary = 59 130 246".parse().unwrap();
        assert_eq!(set.path, TokenPath::new("colors", "primary"));
        assert_eq!(set.value, "59 130 246");

        assert_eq!(
            "colors.primary".parse::<TokenOverride>(),
            Err(OverrideError::MissingValue("colors.primary".to_string()))
        );
        assert_eq!(
            "primary=1 2 3".parse::<TokenOverride>(),
            Err(OverrideError::InvalidPath("primary".to_string()))
        );
    }

    #[test]
    fn init_then_build_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        init_project(dir.path()).unwrap();
        assert!(init_project(dir.path()).is_err());

        let project = Project::load(dir.path()).unwrap();
        let sheet = project.stylesheet().unwrap();
        assert!(sheet.theme_names().any(|name| name == "brand"));
    }

    #[test]
    fn new_theme_writes_a_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        init_project(dir.path()).unwrap();
        let project = Project::load(dir.path()).unwrap();

        let overrides = vec!["spacing.4=18px".parse().unwrap()];
        let path = new_theme(&project, "brand-dense", "brand", &overrides, Some("Dense")).unwrap();
        assert_eq!(path, dir.path().join("themes/brand-dense.toml"));

        let sheet = project.stylesheet().unwrap();
        let vars = sheet.variables("brand-dense").unwrap();
        assert_eq!(vars.light["--space-4"], "18px");
        assert_eq!(vars.light["--color--primary"], "37 99 235");
    }

    #[test]
    fn new_theme_rejects_unknown_parent_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        init_project(dir.path()).unwrap();
        let project = Project::load(dir.path()).unwrap();

        assert!(new_theme(&project, "orphan", "ghost", &[], None).is_err());
        assert!(!dir.path().join("themes/orphan.toml").exists());
    }
}
