//! CSS custom property emission
//!
//! Every theme becomes one rule block of custom properties selected by a theme
//! attribute (`[data-theme="acrobi"]`), plus a dark-mode block holding only the
//! properties whose value changes in the dark scheme. Semantic role variables
//! are emitted next to the tokens as `var()` references, so switching theme or
//! scheme is left entirely to the cascade.
//!
//! Output depends only on the registry contents and the options: the same
//! input always yields byte-identical CSS.

use std::fmt::Write;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bridge::SemanticBridge;
use crate::error::{Result, ThemeError};
use crate::registry::Registry;
use crate::resolver::{resolve_all, ResolvedTheme};
use crate::scheme::ColorScheme;
use crate::tokens::TokenCategory;

/// How the dark scheme is selected in the emitted CSS.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "strategy", content = "name")]
pub enum DarkStrategy {
    /// A `dark` class on the themed element
    #[default]
    Class,
    /// An attribute with the value `dark`, e.g. `data-mode="dark"`
    Attribute(String),
    /// The user agent's `prefers-color-scheme`
    Media,
}

/// Emission options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitOptions {
    /// Attribute carrying the active theme name
    pub attribute: String,
    pub dark: DarkStrategy,
    /// Theme also applied on a `:root` that has no theme attribute
    pub default_theme: Option<String>,
    /// Emit the "generated" banner and theme description comments
    pub header: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            attribute: "data-theme".to_string(),
            dark: DarkStrategy::Class,
            default_theme: None,
            header: true,
        }
    }
}

impl EmitOptions {
    fn theme_selector(&self, theme: &str) -> String {
        format!("[{}=\"{}\"]", self.attribute, theme)
    }

    fn light_selectors(&self, theme: &str, is_default: bool) -> Vec<String> {
        let mut selectors = Vec::with_capacity(2);
        if is_default {
            // Only matches a root without a theme attribute, so the default
            // theme never competes with a selected theme's blocks.
            selectors.push(format!(":root:not([{}])", self.attribute));
        }
        selectors.push(self.theme_selector(theme));
        selectors
    }

    fn dark_selectors(&self, theme: &str, is_default: bool) -> Vec<String> {
        let qualify = |selector: String| match &self.dark {
            DarkStrategy::Class => format!("{selector}.{}", ColorScheme::Dark.name()),
            DarkStrategy::Attribute(name) => {
                format!("{selector}[{name}=\"{}\"]", ColorScheme::Dark.name())
            }
            DarkStrategy::Media => selector,
        };
        self.light_selectors(theme, is_default)
            .into_iter()
            .map(qualify)
            .collect()
    }
}

/// Custom properties of one theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CssVariables {
    pub theme: String,
    /// Every token and semantic variable, light values
    pub light: IndexMap<String, String>,
    /// Only the properties whose dark value differs
    pub dark: Option<IndexMap<String, String>>,
}

impl CssVariables {
    /// Flatten a resolved theme and its validated bridge into properties.
    ///
    /// Fails when two tokens, or a token and a semantic role, would emit the
    /// same custom property.
    pub fn from_theme(theme: &ResolvedTheme, bridge: &SemanticBridge) -> Result<Self> {
        let mut light = IndexMap::new();
        let mut dark = IndexMap::new();
        // property -> what emits it
        let mut sources: IndexMap<String, String> = IndexMap::new();
        let mut claim = |property: &str, source: String| match sources.get(property) {
            Some(first) => Err(ThemeError::DuplicateProperty {
                theme: theme.name.clone(),
                property: property.to_string(),
                first: first.clone(),
                second: source,
            }),
            None => {
                sources.insert(property.to_string(), source);
                Ok(())
            }
        };

        for (category, token, value) in theme.tokens.iter() {
            let property = TokenCategory::from_key(category).property(token);
            claim(&property, format!("{category}.{token}"))?;
            if let Some(v) = value.for_scheme(ColorScheme::Light) {
                light.insert(property.clone(), v.trim().to_string());
            }
            if value.differs_by_scheme() {
                if let Some(v) = value.for_scheme(ColorScheme::Dark) {
                    dark.insert(property, v.trim().to_string());
                }
            }
        }

        let light_roles: Vec<(String, String)> = bridge.declarations(ColorScheme::Light).collect();
        for ((variable, light_ref), (_, dark_ref)) in light_roles
            .iter()
            .zip(bridge.declarations(ColorScheme::Dark))
        {
            claim(variable, format!("semantic role `{}`", variable.trim_start_matches('-')))?;
            light.insert(variable.clone(), light_ref.clone());
            if *light_ref != dark_ref {
                dark.insert(variable.clone(), dark_ref);
            }
        }

        Ok(Self {
            theme: theme.name.clone(),
            light,
            dark: (!dark.is_empty()).then_some(dark),
        })
    }

    /// Values in effect for `scheme`, dark overrides applied.
    pub fn for_scheme(&self, scheme: ColorScheme) -> IndexMap<String, String> {
        let mut values = self.light.clone();
        if scheme.is_dark() {
            if let Some(dark) = &self.dark {
                for (property, value) in dark {
                    values.insert(property.clone(), value.clone());
                }
            }
        }
        values
    }

    /// Render the light block and, if present, the dark block.
    pub fn to_css(&self, options: &EmitOptions, is_default: bool) -> String {
        let mut out = String::new();
        write_rule(
            &mut out,
            &options.light_selectors(&self.theme, is_default),
            &self.light,
            "",
        );

        if let Some(dark) = &self.dark {
            out.push('\n');
            let selectors = options.dark_selectors(&self.theme, is_default);
            match options.dark {
                DarkStrategy::Media => {
                    out.push_str("@media (prefers-color-scheme: dark) {\n");
                    write_rule(&mut out, &selectors, dark, "  ");
                    out.push_str("}\n");
                }
                _ => write_rule(&mut out, &selectors, dark, ""),
            }
        }
        out
    }
}

fn write_rule(
    out: &mut String,
    selectors: &[String],
    declarations: &IndexMap<String, String>,
    indent: &str,
) {
    let last = selectors.len().saturating_sub(1);
    for (i, selector) in selectors.iter().enumerate() {
        let sep = if i == last { " {" } else { "," };
        let _ = writeln!(out, "{indent}{selector}{sep}");
    }
    for (property, value) in declarations {
        let _ = writeln!(out, "{indent}  {property}: {value};");
    }
    let _ = writeln!(out, "{indent}}}");
}

/// Attribute names are emitted inside selectors (`[data-theme="..."]`).
fn check_attribute_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(ThemeError::InvalidAttributeName {
            name: name.to_string(),
        })
    }
}

/// What a runtime needs to drive theme switching against the emitted CSS.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeManifest {
    pub attribute: String,
    pub dark: DarkStrategy,
    pub default_theme: Option<String>,
    pub themes: Vec<String>,
}

/// A fully validated set of themes ready to render.
#[derive(Clone, Debug)]
pub struct Stylesheet {
    options: EmitOptions,
    themes: Vec<(ResolvedTheme, CssVariables)>,
}

impl Stylesheet {
    /// Resolve, validate and flatten every theme in `registry`.
    ///
    /// Nothing is produced unless every theme passes: inheritance, token
    /// values and semantic bindings are all checked before any CSS exists.
    pub fn build(registry: &Registry, options: &EmitOptions) -> Result<Self> {
        check_attribute_name(&options.attribute)?;
        if let DarkStrategy::Attribute(name) = &options.dark {
            check_attribute_name(name)?;
        }
        if let Some(default) = &options.default_theme {
            if !registry.contains(default) {
                return Err(ThemeError::NotFound {
                    name: default.clone(),
                    referenced_by: None,
                });
            }
        }

        let mut themes = Vec::with_capacity(registry.len());
        for resolved in resolve_all(registry)? {
            resolved.tokens.validate(&resolved.name)?;
            let bridge = SemanticBridge::build(&resolved)?;
            let variables = CssVariables::from_theme(&resolved, &bridge)?;
            debug!(
                "Stylesheet::build - {}: {} light, {} dark properties",
                resolved.name,
                variables.light.len(),
                variables.dark.as_ref().map_or(0, IndexMap::len)
            );
            themes.push((resolved, variables));
        }

        // Default theme first, next to the `:root` fallback it provides.
        if let Some(default) = &options.default_theme {
            if let Some(pos) = themes.iter().position(|(theme, _)| &theme.name == default) {
                let entry = themes.remove(pos);
                themes.insert(0, entry);
            }
        }

        info!("built stylesheet with {} theme(s)", themes.len());
        Ok(Self {
            options: options.clone(),
            themes,
        })
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Theme names in emission order.
    pub fn theme_names(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|(theme, _)| theme.name.as_str())
    }

    pub fn variables(&self, theme: &str) -> Option<&CssVariables> {
        self.themes
            .iter()
            .find(|(resolved, _)| resolved.name == theme)
            .map(|(_, variables)| variables)
    }

    pub fn manifest(&self) -> ThemeManifest {
        ThemeManifest {
            attribute: self.options.attribute.clone(),
            dark: self.options.dark.clone(),
            default_theme: self.options.default_theme.clone(),
            themes: self.theme_names().map(str::to_string).collect(),
        }
    }

    /// Render the whole stylesheet.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        if self.options.header {
            out.push_str("/* Generated by swatch. Do not edit by hand. */\n");
        }

        for (resolved, variables) in &self.themes {
            if !out.is_empty() {
                out.push('\n');
            }
            if self.options.header {
                if let Some(description) = &resolved.metadata.description {
                    let _ = writeln!(
                        out,
                        "/* {}: {} */",
                        resolved.name,
                        description.replace("*/", "* /")
                    );
                }
            }
            let is_default = self.options.default_theme.as_deref() == Some(resolved.name.as_str());
            out.push_str(&variables.to_css(&self.options, is_default));
        }
        out
    }
}
