//! A loaded swatch project: config plus the directory it lives in

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use swatch_theme::{Registry, Stylesheet};

use crate::config::SwatchConfig;

pub struct Project {
    pub config: SwatchConfig,
    pub root: PathBuf,
}

impl Project {
    pub fn load(path: &Path) -> Result<Self> {
        let (config, root) = SwatchConfig::load_from_dir(path)?;
        debug!("loaded project config from {}", root.display());
        Ok(Self { config, root })
    }

    pub fn themes_dir(&self) -> PathBuf {
        self.root.join(&self.config.build.themes)
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.config.build.output)
    }

    pub fn manifest_path(&self) -> Option<PathBuf> {
        self.config.build.manifest.as_ref().map(|m| self.root.join(m))
    }

    /// Presets (if enabled) followed by every theme file of the project.
    pub fn registry(&self) -> Result<Registry> {
        let mut registry = if self.config.build.presets {
            Registry::with_presets().context("Failed to load built-in presets")?
        } else {
            Registry::new()
        };

        let dir = self.themes_dir();
        if dir.is_dir() {
            registry
                .load_dir(&dir)
                .with_context(|| format!("Failed to load themes from {}", dir.display()))?;
        } else {
            warn!("theme directory {} does not exist", dir.display());
        }

        if registry.is_empty() {
            anyhow::bail!("No themes found in {}", dir.display());
        }
        Ok(registry)
    }

    /// Load, resolve and validate every theme.
    pub fn stylesheet(&self) -> Result<Stylesheet> {
        let registry = self.registry()?;
        let sheet = Stylesheet::build(&registry, &self.config.emit_options())?;
        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE;
    use std::fs;

    #[test]
    fn presets_alone_make_a_valid_project() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "").unwrap();

        let project = Project::load(dir.path()).unwrap();
        let sheet = project.stylesheet().unwrap();
        assert_eq!(sheet.theme_names().count(), 3);
    }

    #[test]
    fn no_presets_and_no_themes_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[build]\npresets = false\n").unwrap();

        let project = Project::load(dir.path()).unwrap();
        assert!(project.registry().is_err());
    }

    #[test]
    fn project_themes_extend_presets() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "").unwrap();
        fs::create_dir(dir.path().join("themes")).unwrap();
        fs::write(
            dir.path().join("themes/brand.toml"),
            "name = \"brand\"\nextends = \"slate\"\n\n[tokens.colors]\nprimary = \"#2563eb\"\n",
        )
        .unwrap();

        let project = Project::load(dir.path()).unwrap();
        let sheet = project.stylesheet().unwrap();
        let vars = sheet.variables("brand").unwrap();
        assert_eq!(vars.light["--color--primary"], "#2563eb");
        assert_eq!(vars.light["--radius-md"], "10px");
    }
}
