//! The set of known theme definitions

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Result, ThemeError};
use crate::presets::ThemePreset;
use crate::resolver::{resolve, ResolvedTheme};
use crate::theme::{check_theme_name, ThemeDef};

/// Name -> definition, in registration order.
///
/// The registry is a plain snapshot: resolution never mutates it, so any
/// number of resolutions against the same registry agree.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    themes: IndexMap<String, ThemeDef>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with every built-in preset.
    pub fn with_presets() -> Result<Self> {
        let mut registry = Self::new();
        for preset in ThemePreset::all() {
            registry.insert(preset.definition()?)?;
        }
        Ok(registry)
    }

    /// Register a theme. Names must be unique.
    pub fn insert(&mut self, def: ThemeDef) -> Result<()> {
        check_theme_name(&def.name)?;
        if self.themes.contains_key(&def.name) {
            return Err(ThemeError::DuplicateTheme { name: def.name });
        }
        debug!("Registry::insert - {}", def.name);
        self.themes.insert(def.name.clone(), def);
        Ok(())
    }

    /// Parse one theme file's contents and register it.
    pub fn insert_str(&mut self, src: &str, origin: &str) -> Result<()> {
        self.insert(ThemeDef::parse(src, origin)?)
    }

    /// Register every `*.toml` file in `dir`, in file name order.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(io_err(dir))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        files.sort();

        for path in &files {
            let src = fs::read_to_string(path).map_err(io_err(path))?;
            self.insert_str(&src, &path.display().to_string())?;
        }
        debug!("Registry::load_dir - {} theme(s) from {}", files.len(), dir.display());
        Ok(files.len())
    }

    pub fn get(&self, name: &str) -> Option<&ThemeDef> {
        self.themes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemeDef> {
        self.themes.values()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Pre-flight for scaffolding a new theme file: the name must be valid and
    /// unused, the parent must exist, and adding the theme must not close an
    /// inheritance cycle.
    pub fn check_new_theme(&self, def: &ThemeDef) -> Result<ResolvedTheme> {
        let mut candidate = self.clone();
        candidate.insert(def.clone())?;
        let resolved = resolve(&candidate, &def.name)?;
        resolved.tokens.validate(&def.name)?;
        Ok(resolved)
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ThemeError {
    let path = path.to_path_buf();
    move |source| ThemeError::Io { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenSet;

    #[test]
    fn rejects_duplicate_names() {
        let mut registry = Registry::new();
        registry.insert(ThemeDef::new("acrobi")).unwrap();
        let err = registry.insert(ThemeDef::new("acrobi")).unwrap_err();
        assert!(matches!(err, ThemeError::DuplicateTheme { name } if name == "acrobi"));
    }

    #[test]
    fn load_dir_reads_toml_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.toml"), "name = \"beta\"\nextends = \"alpha\"\n").unwrap();
        fs::write(dir.path().join("a.toml"), "name = \"alpha\"\n").unwrap();
        fs::write(dir.path().join("notes.md"), "not a theme").unwrap();

        let mut registry = Registry::new();
        assert_eq!(registry.load_dir(dir.path()).unwrap(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["alpha", "beta"]);
    }

    #[test]
    fn load_dir_names_the_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.toml"), "name = ").unwrap();

        let err = Registry::new().load_dir(dir.path()).unwrap_err();
        match err {
            ThemeError::Parse { origin, .. } => assert!(origin.ends_with("broken.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_dir_is_an_io_error() {
        let err = Registry::new()
            .load_dir(Path::new("/definitely/not/here"))
            .unwrap_err();
        assert!(matches!(err, ThemeError::Io { .. }));
    }

    #[test]
    fn check_new_theme_requires_existing_parent() {
        let registry = Registry::new();
        let err = registry
            .check_new_theme(&ThemeDef::new("brand").extends("nope"))
            .unwrap_err();
        assert!(matches!(err, ThemeError::NotFound { name, .. } if name == "nope"));
    }

    #[test]
    fn check_new_theme_validates_overrides() {
        let mut registry = Registry::new();
        registry.insert(ThemeDef::new("base")).unwrap();
        let def = ThemeDef::new("brand")
            .extends("base")
            .tokens(TokenSet::new().with("colors", "primary", "not-a-color"));
        assert!(matches!(
            registry.check_new_theme(&def),
            Err(ThemeError::InvalidTokenValue { .. })
        ));
    }

    #[test]
    fn check_new_theme_leaves_registry_untouched() {
        let mut registry = Registry::new();
        registry.insert(ThemeDef::new("base")).unwrap();
        registry
            .check_new_theme(&ThemeDef::new("brand").extends("base"))
            .unwrap();
        assert!(!registry.contains("brand"));
    }
}
