//! Design tokens
//!
//! A [`TokenSet`] is a two-level map: category (`colors`, `spacing`,
//! `fontFamily`, ...) to token name to [`TokenValue`]. Authored order is kept
//! so emitted CSS follows the order of the theme files.

mod category;
mod value;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};

pub use category::TokenCategory;
pub(crate) use category::{is_valid_category_key, is_valid_token_name};
pub use value::{ModePair, TokenValue};

/// Tokens of one category, in authored order.
pub type CategoryTokens = IndexMap<String, TokenValue>;

/// Category -> token -> value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSet(IndexMap<String, CategoryTokens>);

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a token, creating the category if needed.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        token: impl Into<String>,
        value: impl Into<TokenValue>,
    ) {
        self.0
            .entry(category.into())
            .or_default()
            .insert(token.into(), value.into());
    }

    /// Builder form of [`TokenSet::insert`].
    pub fn with(
        mut self,
        category: impl Into<String>,
        token: impl Into<String>,
        value: impl Into<TokenValue>,
    ) -> Self {
        self.insert(category, token, value);
        self
    }

    pub fn get(&self, category: &str, token: &str) -> Option<&TokenValue> {
        self.0.get(category)?.get(token)
    }

    pub fn get_path(&self, path: &TokenPath) -> Option<&TokenValue> {
        self.get(&path.category, &path.token)
    }

    pub fn category(&self, category: &str) -> Option<&CategoryTokens> {
        self.0.get(category)
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    /// Category keys in order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Every `(category, token, value)` triple in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &TokenValue)> {
        self.0.iter().flat_map(|(category, tokens)| {
            tokens
                .iter()
                .map(move |(token, value)| (category.as_str(), token.as_str(), value))
        })
    }

    /// Total number of tokens across all categories.
    pub fn len(&self) -> usize {
        self.0.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply a descendant's tokens on top of this (inherited) set.
    ///
    /// Merging is per token, never per category: a category the descendant
    /// does not mention is kept as is, and tokens it does not mention keep the
    /// inherited value. Inherited tokens keep their position; new ones are
    /// appended.
    pub fn overlay(&mut self, child: &TokenSet) {
        for (category, tokens) in &child.0 {
            let inherited = self.0.entry(category.clone()).or_default();
            for (token, value) in tokens {
                match inherited.get_mut(token) {
                    Some(existing) => *existing = value.merge_over(existing),
                    None => {
                        inherited.insert(token.clone(), value.clone());
                    }
                }
            }
        }
    }

    /// Check names and values against their category rules.
    pub fn validate(&self, theme: &str) -> Result<()> {
        for (category, tokens) in &self.0 {
            if !is_valid_category_key(category) {
                return Err(ThemeError::InvalidTokenName {
                    theme: theme.to_string(),
                    name: category.clone(),
                });
            }
            let kind = TokenCategory::from_key(category);
            for (token, value) in tokens {
                if !is_valid_token_name(token) {
                    return Err(ThemeError::InvalidTokenName {
                        theme: theme.to_string(),
                        name: format!("{category}.{token}"),
                    });
                }
                value
                    .check(&kind)
                    .map_err(|reason| ThemeError::InvalidTokenValue {
                        theme: theme.to_string(),
                        path: format!("{category}.{token}"),
                        reason,
                    })?;
            }
        }
        Ok(())
    }
}

/// A `category.token` reference, e.g. `colors.primary`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TokenPath {
    pub category: String,
    pub token: String,
}

impl TokenPath {
    pub fn new(category: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            token: token.into(),
        }
    }

    /// Custom property backing this token.
    pub fn property(&self) -> String {
        TokenCategory::from_key(&self.category).property(&self.token)
    }
}

impl FromStr for TokenPath {
    type Err = ThemeError;

    /// Splits on the first `.` only so `spacing.0.5` keeps its token name.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('.') {
            Some((category, token)) if !category.is_empty() && !token.is_empty() => {
                Ok(Self::new(category, token))
            }
            _ => Err(ThemeError::InvalidTokenPath {
                reference: s.to_string(),
            }),
        }
    }
}

impl Display for TokenPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.category, self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::ColorScheme;
    use pretty_assertions::assert_eq;

    #[test]
    fn overlay_merges_at_token_level() {
        let mut base = TokenSet::new()
            .with("colors", "primary", "25 117 240")
            .with("colors", "background", "255 255 255")
            .with("spacing", "1", "4px");
        let child = TokenSet::new().with("colors", "background", "17 17 17");

        base.overlay(&child);

        assert_eq!(base.get("colors", "primary"), Some(&TokenValue::from("25 117 240")));
        assert_eq!(base.get("colors", "background"), Some(&TokenValue::from("17 17 17")));
        assert_eq!(base.get("spacing", "1"), Some(&TokenValue::from("4px")));
    }

    #[test]
    fn overlay_keeps_inherited_order_and_appends_new_tokens() {
        let mut base = TokenSet::new()
            .with("colors", "a", "1 1 1")
            .with("colors", "b", "2 2 2");
        let child = TokenSet::new()
            .with("colors", "c", "3 3 3")
            .with("colors", "a", "9 9 9");

        base.overlay(&child);

        let names: Vec<&str> = base.iter().map(|(_, token, _)| token).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn overlay_merges_pair_sides() {
        let mut base =
            TokenSet::new().with("colors", "bg", TokenValue::pair("255 255 255", "0 0 0"));
        base.overlay(&TokenSet::new().with("colors", "bg", TokenValue::dark("17 17 17")));

        let bg = base.get("colors", "bg").unwrap();
        assert_eq!(bg.for_scheme(ColorScheme::Light), Some("255 255 255"));
        assert_eq!(bg.for_scheme(ColorScheme::Dark), Some("17 17 17"));
    }

    #[test]
    fn token_path_splits_on_first_dot() {
        let path: TokenPath = "spacing.0.5".parse().unwrap();
        assert_eq!(path, TokenPath::new("spacing", "0.5"));
        assert_eq!(path.property(), "--space-0_5");
        assert_eq!(path.to_string(), "spacing.0.5");
    }

    #[test]
    fn token_path_rejects_missing_parts() {
        for bad in ["primary", ".primary", "colors.", ""] {
            assert!(matches!(
                bad.parse::<TokenPath>(),
                Err(ThemeError::InvalidTokenPath { .. })
            ));
        }
    }

    #[test]
    fn validate_reports_offending_path() {
        let set = TokenSet::new().with("spacing", "4", "wide");
        let err = set.validate("acrobi").unwrap_err();
        match err {
            ThemeError::InvalidTokenValue { theme, path, .. } => {
                assert_eq!(theme, "acrobi");
                assert_eq!(path, "spacing.4");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn validate_rejects_bad_names() {
        let set = TokenSet::new().with("colors", "primary color", "1 2 3");
        assert!(matches!(
            set.validate("t"),
            Err(ThemeError::InvalidTokenName { .. })
        ));
    }
}
