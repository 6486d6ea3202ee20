//! Runtime theme switching
//!
//! All themes' CSS is emitted up front, so switching is nothing more than
//! changing the theme attribute (and the dark-mode marker) on the element that
//! scopes the theme. A [`ThemeScope`] owns that element handle and the current
//! selection. It is plain state passed around explicitly: several scopes (the
//! document root plus themed sub-trees) coexist without sharing anything.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use tracing::debug;

use crate::css::{DarkStrategy, ThemeManifest};
use crate::scheme::ColorScheme;

/// The element a scope writes to: the document root or a scoping element.
pub trait ThemeTarget {
    fn set_attribute(&mut self, name: &str, value: &str);
    fn remove_attribute(&mut self, name: &str);
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
}

/// In-memory element, e.g. for rendering the initial markup on a server.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementAttributes {
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
}

impl ElementAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// `class="..." data-theme="..."`, sorted by attribute name.
    pub fn to_html(&self) -> String {
        let mut attributes = self.attributes.clone();
        if !self.classes.is_empty() {
            attributes.insert("class".to_string(), self.classes.join(" "));
        }
        attributes
            .iter()
            .map(|(name, value)| format!("{name}=\"{}\"", value.replace('"', "&quot;")))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ThemeTarget for ElementAttributes {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }
}

/// A theme present in the emitted CSS.
///
/// Only obtainable from a [`ThemeScope`], which only knows themes listed in
/// the manifest, so switching to a theme never needs a runtime check.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ThemeId(String);

impl ThemeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ThemeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The active theme and scheme of a scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub theme: Option<ThemeId>,
    pub scheme: ColorScheme,
}

type ChangeListener = Box<dyn FnMut(&Selection)>;

/// Active theme state for one element.
pub struct ThemeScope<T: ThemeTarget> {
    target: T,
    attribute: String,
    dark: DarkStrategy,
    themes: Vec<ThemeId>,
    selection: Selection,
    listener: Option<ChangeListener>,
}

impl<T: ThemeTarget> ThemeScope<T> {
    /// Create a scope for the themes listed in `manifest`, applying the
    /// manifest's default theme (if any) in the light scheme.
    pub fn new(target: T, manifest: &ThemeManifest) -> Self {
        let themes: Vec<ThemeId> = manifest.themes.iter().cloned().map(ThemeId).collect();
        let initial = manifest
            .default_theme
            .as_deref()
            .and_then(|name| themes.iter().find(|id| id.as_str() == name).cloned());

        let mut scope = Self {
            target,
            attribute: manifest.attribute.clone(),
            dark: manifest.dark.clone(),
            themes,
            selection: Selection {
                theme: None,
                scheme: ColorScheme::Light,
            },
            listener: None,
        };
        if let Some(theme) = initial {
            scope.apply_theme(&theme);
            scope.selection.theme = Some(theme);
        }
        scope
    }

    /// Register a callback run after every effective change.
    pub fn on_change(&mut self, listener: impl FnMut(&Selection) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Themes this scope can switch to, in manifest order.
    pub fn themes(&self) -> &[ThemeId] {
        &self.themes
    }

    /// Look up a theme by name.
    pub fn lookup(&self, name: &str) -> Option<ThemeId> {
        self.themes.iter().find(|id| id.as_str() == name).cloned()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Switch theme. A single attribute write; returns the previous theme.
    pub fn set_theme(&mut self, theme: ThemeId) -> Option<ThemeId> {
        if self.selection.theme.as_ref() == Some(&theme) {
            return self.selection.theme.clone();
        }
        debug!(
            "ThemeScope::set_theme - {:?} -> {}",
            self.selection.theme.as_ref().map(ThemeId::as_str),
            theme
        );
        self.apply_theme(&theme);
        let previous = self.selection.theme.replace(theme);
        self.notify();
        previous
    }

    /// Drop the theme attribute, falling back to the `:root` default theme.
    pub fn clear_theme(&mut self) {
        if self.selection.theme.take().is_some() {
            self.target.remove_attribute(&self.attribute);
            self.notify();
        }
    }

    pub fn scheme(&self) -> ColorScheme {
        self.selection.scheme
    }

    /// Switch scheme. With the media strategy the user agent decides, so
    /// only the recorded selection changes.
    pub fn set_scheme(&mut self, scheme: ColorScheme) {
        if self.selection.scheme == scheme {
            return;
        }
        debug!("ThemeScope::set_scheme - {} -> {}", self.selection.scheme, scheme);
        let dark = ColorScheme::Dark.name();
        match (&self.dark, scheme) {
            (DarkStrategy::Class, ColorScheme::Dark) => self.target.add_class(dark),
            (DarkStrategy::Class, ColorScheme::Light) => self.target.remove_class(dark),
            (DarkStrategy::Attribute(name), ColorScheme::Dark) => {
                self.target.set_attribute(name, dark)
            }
            (DarkStrategy::Attribute(name), ColorScheme::Light) => {
                self.target.remove_attribute(name)
            }
            (DarkStrategy::Media, _) => {}
        }
        self.selection.scheme = scheme;
        self.notify();
    }

    pub fn toggle_scheme(&mut self) {
        let next = self.selection.scheme.toggle();
        self.set_scheme(next);
    }

    pub fn into_target(self) -> T {
        self.target
    }

    fn apply_theme(&mut self, theme: &ThemeId) {
        self.target.set_attribute(&self.attribute, theme.as_str());
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.selection);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn manifest(dark: DarkStrategy, default_theme: Option<&str>) -> ThemeManifest {
        ThemeManifest {
            attribute: "data-theme".to_string(),
            dark,
            default_theme: default_theme.map(str::to_string),
            themes: vec!["neutral".to_string(), "slate".to_string()],
        }
    }

    fn scope_with(
        dark: DarkStrategy,
        default_theme: Option<&str>,
    ) -> ThemeScope<ElementAttributes> {
        ThemeScope::new(ElementAttributes::new(), &manifest(dark, default_theme))
    }

    #[test]
    fn applies_default_theme_on_creation() {
        let scope = ThemeScope::new(
            ElementAttributes::new(),
            &manifest(DarkStrategy::Class, Some("slate")),
        );
        assert_eq!(scope.target().attribute("data-theme"), Some("slate"));
        assert_eq!(scope.selection().theme.as_ref().map(ThemeId::as_str), Some("slate"));
    }

    #[test]
    fn set_theme_writes_attribute_and_returns_previous() {
        let mut scope = scope_with(DarkStrategy::Class, None);
        let neutral = scope.lookup("neutral").unwrap();
        let slate = scope.lookup("slate").unwrap();

        assert_eq!(scope.set_theme(neutral.clone()), None);
        assert_eq!(scope.set_theme(slate), Some(neutral));
        assert_eq!(scope.target().attribute("data-theme"), Some("slate"));
        assert!(scope.lookup("zinc").is_none());
    }

    #[test]
    fn class_strategy_toggles_dark_class() {
        let mut scope = scope_with(DarkStrategy::Class, None);
        scope.toggle_scheme();
        assert!(scope.target().has_class("dark"));
        scope.toggle_scheme();
        assert!(!scope.target().has_class("dark"));
    }

    #[test]
    fn attribute_strategy_sets_mode_attribute() {
        let mut scope = ThemeScope::new(
            ElementAttributes::new(),
            &manifest(DarkStrategy::Attribute("data-mode".to_string()), Some("neutral")),
        );
        scope.set_scheme(ColorScheme::Dark);
        assert_eq!(
            scope.target().to_html(),
            "data-mode=\"dark\" data-theme=\"neutral\""
        );
        scope.set_scheme(ColorScheme::Light);
        assert_eq!(scope.target().attribute("data-mode"), None);
    }

    #[test]
    fn media_strategy_leaves_element_alone() {
        let mut scope = scope_with(DarkStrategy::Media, None);
        scope.set_scheme(ColorScheme::Dark);
        assert_eq!(scope.target(), &ElementAttributes::new());
        assert_eq!(scope.scheme(), ColorScheme::Dark);
    }

    #[test]
    fn listener_only_sees_effective_changes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut scope = scope_with(DarkStrategy::Class, None);
        let sink = Rc::clone(&seen);
        scope.on_change(move |selection| sink.borrow_mut().push(selection.clone()));

        let slate = scope.lookup("slate").unwrap();
        scope.set_theme(slate.clone());
        scope.set_theme(slate);
        scope.set_scheme(ColorScheme::Light);
        scope.set_scheme(ColorScheme::Dark);
        scope.clear_theme();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[2].theme, None);
        assert_eq!(seen[2].scheme, ColorScheme::Dark);
    }

    #[test]
    fn independent_scopes_do_not_interfere() {
        let mut root = scope_with(DarkStrategy::Class, Some("neutral"));
        let mut panel = scope_with(DarkStrategy::Class, None);
        let slate = panel.lookup("slate").unwrap();
        panel.set_theme(slate);
        panel.set_scheme(ColorScheme::Dark);

        assert_eq!(root.target().attribute("data-theme"), Some("neutral"));
        assert!(!root.target().has_class("dark"));
        root.clear_theme();
        assert_eq!(panel.target().attribute("data-theme"), Some("slate"));
    }
}
