//! Theme definitions as authored in theme files
//!
//! ```toml
//! name = "acrobi-dark"
//! extends = "acrobi"
//!
//! [metadata]
//! description = "Acrobi on a dark canvas"
//!
//! [tokens.colors]
//! background = { light = "17 17 17" }
//!
//! [bridge]
//! ring = { light = "colors.primary", dark = "colors.accent" }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};
use crate::tokens::{TokenSet, TokenValue};

/// Descriptive fields. Not inherited by child themes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Any other keys, kept for tooling
    #[serde(flatten)]
    pub extra: IndexMap<String, toml::Value>,
}

/// One theme file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub metadata: ThemeMetadata,
    #[serde(default)]
    pub tokens: TokenSet,
    /// Semantic role -> token reference (`colors.primary`) or a light/dark
    /// pair of references. Roles not listed inherit, then fall back to
    /// `colors.<role>`.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub bridge: IndexMap<String, TokenValue>,
}

impl ThemeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: None,
            metadata: ThemeMetadata::default(),
            tokens: TokenSet::new(),
            bridge: IndexMap::new(),
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn tokens(mut self, tokens: TokenSet) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn bridge_entry(
        mut self,
        role: impl Into<String>,
        reference: impl Into<TokenValue>,
    ) -> Self {
        self.bridge.insert(role.into(), reference.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = Some(description.into());
        self
    }

    /// Parse a theme from TOML source. `origin` names the source in errors.
    pub fn parse(src: &str, origin: &str) -> Result<Self> {
        let def: ThemeDef = toml::from_str(src).map_err(|source| ThemeError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        check_theme_name(&def.name)?;
        Ok(def)
    }

    /// Serialize back to TOML, used when scaffolding theme files.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Theme names are emitted inside `[data-theme="..."]`.
pub fn check_theme_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(ThemeError::InvalidThemeName {
            name: name.to_string(),
        })
    }
}
