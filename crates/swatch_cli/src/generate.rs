//! Stylesheet generation and rebuild-on-change

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, error, info};

use swatch_theme::Stylesheet;

use crate::config::CONFIG_FILE;
use crate::project::Project;

/// Quiet period used to coalesce editor save bursts.
const DEBOUNCE: Duration = Duration::from_millis(150);

/// Build the project stylesheet and write it (and the manifest, if
/// configured). Nothing is written unless every theme validates.
pub fn build(project: &Project, out: Option<&Path>) -> Result<Stylesheet> {
    let sheet = project.stylesheet()?;

    let css_path = out.map(Path::to_path_buf).unwrap_or_else(|| project.output_path());
    write_atomic(&css_path, sheet.to_css().as_bytes())?;
    info!("wrote {}", css_path.display());

    if let Some(manifest_path) = project.manifest_path() {
        let json = serde_json::to_string_pretty(&sheet.manifest())
            .context("Failed to serialize theme manifest")?;
        write_atomic(&manifest_path, json.as_bytes())?;
        info!("wrote {}", manifest_path.display());
    }
    Ok(sheet)
}

/// Write through a sibling temp file and rename it into place, so readers
/// never observe a partial file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let file_name = path
        .file_name()
        .with_context(|| format!("{} is not a file path", path.display()))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, contents).with_context(|| format!("Failed to write {}", tmp.display()))?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("Failed to replace {}", path.display()));
    }
    Ok(())
}

/// Rebuild whenever a theme file or the config changes. Runs until the
/// watcher channel closes.
pub fn watch(project_dir: &Path, out: Option<&Path>) -> Result<()> {
    let project = Project::load(project_dir)?;
    let themes_dir = ensure_themes_dir(&project)?;
    let config_path = project.root.join(CONFIG_FILE);

    rebuild(project_dir, out);

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to start file watcher")?;
    watcher
        .watch(&themes_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", themes_dir.display()))?;
    if config_path.is_file() {
        watcher
            .watch(&config_path, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", config_path.display()))?;
    }
    info!("watching {} for changes", themes_dir.display());

    while let Ok(event) = rx.recv() {
        let mut changed = is_relevant(&event, &config_path);
        // Drain the burst that usually follows a single save.
        while let Ok(next) = rx.recv_timeout(DEBOUNCE) {
            changed |= is_relevant(&next, &config_path);
        }
        if changed {
            rebuild(project_dir, out);
        }
    }
    Ok(())
}

/// The watched theme directory, created if missing so a presets-only
/// project can pick up its first theme file.
fn ensure_themes_dir(project: &Project) -> Result<PathBuf> {
    let dir = project.themes_dir();
    if !dir.is_dir() {
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        info!("created {}", dir.display());
    }
    Ok(dir)
}

fn rebuild(project_dir: &Path, out: Option<&Path>) {
    let result = Project::load(project_dir).and_then(|project| build(&project, out));
    match result {
        Ok(sheet) => info!("rebuilt {} theme(s)", sheet.theme_names().count()),
        Err(err) => error!("build failed, keeping previous output: {err:#}"),
    }
}

fn is_relevant(event: &notify::Result<Event>, config_path: &Path) -> bool {
    let event = match event {
        Ok(event) => event,
        Err(err) => {
            error!("watch error: {err}");
            return false;
        }
    };
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    let relevant = event
        .paths
        .iter()
        .any(|path| is_theme_file(path) || path.as_path() == config_path);
    debug!("watch event {:?} on {:?}: relevant={relevant}", event.kind, event.paths);
    relevant
}

fn is_theme_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn project_with(dir: &Path, config: &str) -> Project {
        fs::write(dir.join(CONFIG_FILE), config).unwrap();
        Project::load(dir).unwrap()
    }

    #[test]
    fn build_writes_css_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let project = project_with(
            dir.path(),
            "[build]\nmanifest = \"dist/themes.json\"\ndefault_theme = \"zinc\"\n",
        );

        build(&project, None).unwrap();

        let css = fs::read_to_string(dir.path().join("dist/themes.css")).unwrap();
        assert!(css.contains(":root:not([data-theme]),\n[data-theme=\"zinc\"] {\n"));

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("dist/themes.json")).unwrap())
                .unwrap();
        assert_eq!(manifest["themes"][0], "zinc");
        assert_eq!(manifest["attribute"], "data-theme");
    }

    #[test]
    fn failed_build_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let project = project_with(dir.path(), "");
        let out = dir.path().join("out.css");
        fs::write(&out, "previous").unwrap();

        fs::create_dir(dir.path().join("themes")).unwrap();
        fs::write(
            dir.path().join("themes/loop.toml"),
            "name = \"loop\"\nextends = \"loop\"\n",
        )
        .unwrap();

        assert!(build(&project, Some(&out)).is_err());
        assert_eq!(fs::read_to_string(&out).unwrap(), "previous");
    }

    #[test]
    fn watch_creates_missing_theme_dir() {
        let dir = tempfile::tempdir().unwrap();
        let project = project_with(dir.path(), "[build]\nthemes = \"design/themes\"\n");
        assert!(!dir.path().join("design/themes").exists());

        let watched = ensure_themes_dir(&project).unwrap();
        assert_eq!(watched, dir.path().join("design/themes"));
        assert!(watched.is_dir());
        assert!(ensure_themes_dir(&project).is_ok());
    }

    #[test]
    fn write_atomic_replaces_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/themes.css");
        write_atomic(&path, b"one").unwrap();
        write_atomic(&path, b"two").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
        let entries: Vec<_> = fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("themes.css")]);
    }
}
