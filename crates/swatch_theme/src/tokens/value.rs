//! Token values and per-category value checks

use serde::{Deserialize, Deserializer, Serialize};

use crate::scheme::ColorScheme;

use super::TokenCategory;

/// A single token value: one value for every scheme, or a light/dark pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Single(String),
    Modes(ModePair),
}

/// Per-scheme values. A missing side falls back to the other side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModePair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,
}

/// Accepted source shapes; numbers are stringified so `4 = 16` works in TOML.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTokenValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Pair(ModePair),
}

impl<'de> Deserialize<'de> for TokenValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawTokenValue::deserialize(deserializer)? {
            RawTokenValue::Text(s) => TokenValue::Single(s),
            RawTokenValue::Integer(i) => TokenValue::Single(i.to_string()),
            RawTokenValue::Float(f) => TokenValue::Single(f.to_string()),
            RawTokenValue::Pair(pair) => TokenValue::Modes(pair),
        })
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Single(value.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::Single(value)
    }
}

impl TokenValue {
    /// Build a light/dark pair.
    pub fn pair(light: impl Into<String>, dark: impl Into<String>) -> Self {
        TokenValue::Modes(ModePair {
            light: Some(light.into()),
            dark: Some(dark.into()),
        })
    }

    /// Build a pair that only sets the light side.
    pub fn light(light: impl Into<String>) -> Self {
        TokenValue::Modes(ModePair {
            light: Some(light.into()),
            dark: None,
        })
    }

    /// Build a pair that only sets the dark side.
    pub fn dark(dark: impl Into<String>) -> Self {
        TokenValue::Modes(ModePair {
            light: None,
            dark: Some(dark.into()),
        })
    }

    /// The value in effect for `scheme`, or `None` for an empty pair.
    pub fn for_scheme(&self, scheme: ColorScheme) -> Option<&str> {
        match self {
            TokenValue::Single(value) => Some(value.as_str()),
            TokenValue::Modes(pair) => {
                let (own, other) = match scheme {
                    ColorScheme::Light => (&pair.light, &pair.dark),
                    ColorScheme::Dark => (&pair.dark, &pair.light),
                };
                own.as_deref().or(other.as_deref())
            }
        }
    }

    /// True when the dark scheme sees a different value than the light one.
    pub fn differs_by_scheme(&self) -> bool {
        self.for_scheme(ColorScheme::Light) != self.for_scheme(ColorScheme::Dark)
    }

    /// Overlay `self` (the descendant's value) on top of an inherited value.
    ///
    /// A single value replaces the parent outright. A pair only replaces the
    /// sides it sets; a single parent value counts as both sides.
    pub fn merge_over(&self, parent: &TokenValue) -> TokenValue {
        match self {
            TokenValue::Single(_) => self.clone(),
            TokenValue::Modes(child) => {
                let (light, dark) = match parent {
                    TokenValue::Single(value) => (Some(value.clone()), Some(value.clone())),
                    TokenValue::Modes(pair) => (pair.light.clone(), pair.dark.clone()),
                };
                TokenValue::Modes(ModePair {
                    light: child.light.clone().or(light),
                    dark: child.dark.clone().or(dark),
                })
            }
        }
    }

    /// Check every side of the value against the rules of `category`.
    pub(crate) fn check(&self, category: &TokenCategory) -> Result<(), String> {
        match self {
            TokenValue::Single(value) => check_value(category, value),
            TokenValue::Modes(pair) => {
                if pair.light.is_none() && pair.dark.is_none() {
                    return Err("a light/dark pair must set at least one side".to_string());
                }
                for (side, value) in [("light", &pair.light), ("dark", &pair.dark)] {
                    if let Some(value) = value {
                        check_value(category, value).map_err(|reason| format!("{side}: {reason}"))?;
                    }
                }
                Ok(())
            }
        }
    }
}

const LENGTH_UNITS: &[&str] = &["px", "rem", "em", "%", "vh", "vw", "ch", "pt"];
const COLOR_FUNCTIONS: &[&str] = &["rgb(", "rgba(", "hsl(", "hsla(", "oklch(", "var("];
const COLOR_KEYWORDS: &[&str] = &["transparent", "currentcolor", "inherit"];
const LENGTH_FUNCTIONS: &[&str] = &["var(", "calc(", "clamp(", "min(", "max("];
const WEIGHT_KEYWORDS: &[&str] = &["normal", "bold", "lighter", "bolder"];

fn check_value(category: &TokenCategory, raw: &str) -> Result<(), String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("value is empty".to_string());
    }
    if let Some(c) = value.chars().find(|c| matches!(c, ';' | '{' | '}' | '\n' | '\r')) {
        return Err(format!("`{c}` is not allowed in a custom property value"));
    }

    match category {
        TokenCategory::Colors => {
            if is_color(value) {
                Ok(())
            } else {
                Err(format!(
                    "`{value}` is not a color (expected `R G B`, `#rrggbb` or a color function)"
                ))
            }
        }
        TokenCategory::Spacing | TokenCategory::BorderRadius | TokenCategory::FontSize => {
            if is_length(value) {
                Ok(())
            } else {
                Err(format!("`{value}` is not a length"))
            }
        }
        TokenCategory::FontWeight => {
            if is_font_weight(value) {
                Ok(())
            } else {
                Err(format!("`{value}` is not a font weight (1-1000 or a keyword)"))
            }
        }
        TokenCategory::FontFamily
        | TokenCategory::LineHeight
        | TokenCategory::Shadow
        | TokenCategory::Other(_) => Ok(()),
    }
}

fn is_function(value: &str, prefixes: &[&str]) -> bool {
    let lower = value.to_ascii_lowercase();
    prefixes.iter().any(|p| lower.starts_with(p)) && lower.ends_with(')')
}

fn is_color(value: &str) -> bool {
    if let Some(hex) = value.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    if is_function(value, COLOR_FUNCTIONS) {
        return true;
    }
    if COLOR_KEYWORDS.contains(&value.to_ascii_lowercase().as_str()) {
        return true;
    }
    is_channel_triple(value)
}

/// `25 117 240` or `25 117 240 / 0.5`, the form consumed by `rgb(var(--x))`.
fn is_channel_triple(value: &str) -> bool {
    let (channels, alpha) = match value.split_once('/') {
        Some((channels, alpha)) => (channels, Some(alpha.trim())),
        None => (value, None),
    };

    let parts: Vec<&str> = channels.split_whitespace().collect();
    if parts.len() != 3 || !parts.iter().all(|p| p.parse::<u8>().is_ok()) {
        return false;
    }

    match alpha {
        None => true,
        Some(alpha) => match alpha.strip_suffix('%') {
            Some(pct) => pct.parse::<f32>().is_ok_and(|p| (0.0..=100.0).contains(&p)),
            None => alpha.parse::<f32>().is_ok_and(|a| (0.0..=1.0).contains(&a)),
        },
    }
}

fn is_length(value: &str) -> bool {
    if is_function(value, LENGTH_FUNCTIONS) {
        return true;
    }
    let number = LENGTH_UNITS
        .iter()
        .find_map(|unit| value.strip_suffix(unit))
        .unwrap_or(value);
    number.parse::<f64>().is_ok_and(f64::is_finite)
}

fn is_font_weight(value: &str) -> bool {
    if WEIGHT_KEYWORDS.contains(&value) || is_function(value, &["var("]) {
        return true;
    }
    value
        .parse::<u16>()
        .is_ok_and(|weight| (1..=1000).contains(&weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_value_applies_to_both_schemes() {
        let value = TokenValue::from("25 117 240");
        assert_eq!(value.for_scheme(ColorScheme::Light), Some("25 117 240"));
        assert_eq!(value.for_scheme(ColorScheme::Dark), Some("25 117 240"));
        assert!(!value.differs_by_scheme());
    }

    #[test]
    fn half_pair_falls_back_to_present_side() {
        let value = TokenValue::light("25 117 240");
        assert_eq!(value.for_scheme(ColorScheme::Dark), Some("25 117 240"));

        let value = TokenValue::dark("17 17 17");
        assert_eq!(value.for_scheme(ColorScheme::Light), Some("17 17 17"));
    }

    #[test]
    fn pair_overlays_parent_side_by_side() {
        let parent = TokenValue::pair("255 255 255", "0 0 0");
        let child = TokenValue::dark("17 17 17");
        assert_eq!(
            child.merge_over(&parent),
            TokenValue::pair("255 255 255", "17 17 17")
        );
    }

    #[test]
    fn pair_over_single_keeps_single_on_unset_side() {
        let parent = TokenValue::from("1 2 3");
        let child = TokenValue::light("4 5 6");
        let merged = child.merge_over(&parent);
        assert_eq!(merged.for_scheme(ColorScheme::Light), Some("4 5 6"));
        assert_eq!(merged.for_scheme(ColorScheme::Dark), Some("1 2 3"));
    }

    #[test]
    fn single_replaces_parent_pair() {
        let parent = TokenValue::pair("1 2 3", "4 5 6");
        let child = TokenValue::from("7 8 9");
        assert_eq!(child.merge_over(&parent), child);
    }

    #[test]
    fn deserializes_numbers_as_strings() {
        #[derive(Deserialize)]
        struct Doc {
            a: TokenValue,
            b: TokenValue,
            c: TokenValue,
        }
        let doc: Doc = toml::from_str("a = 4\nb = 1.5\nc = { dark = \"0 0 0\" }").unwrap();
        assert_eq!(doc.a, TokenValue::from("4"));
        assert_eq!(doc.b, TokenValue::from("1.5"));
        assert_eq!(doc.c, TokenValue::dark("0 0 0"));
    }

    #[test]
    fn pair_rejects_unknown_sides() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Doc {
            a: TokenValue,
        }
        assert!(toml::from_str::<Doc>("a = { dim = \"0 0 0\" }").is_err());
    }

    #[test]
    fn colors_accept_common_forms() {
        for ok in [
            "25 117 240",
            "25 117 240 / 0.5",
            "25 117 240 / 50%",
            "#fff",
            "#1e66f5",
            "#1e66f5cc",
            "rgb(1 2 3)",
            "hsl(220 90% 54%)",
            "var(--brand)",
            "transparent",
        ] {
            assert!(check_value(&TokenCategory::Colors, ok).is_ok(), "{ok}");
        }
        for bad in ["256 0 0", "1 2", "#12345", "blue-ish", "1 2 3 / 2"] {
            assert!(check_value(&TokenCategory::Colors, bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn lengths_require_numeric_values() {
        for ok in ["0", "4px", "0.25rem", "50%", "calc(1rem + 2px)", "1.5"] {
            assert!(check_value(&TokenCategory::Spacing, ok).is_ok(), "{ok}");
        }
        for bad in ["wide", "px", "4 px", "NaNpx"] {
            assert!(check_value(&TokenCategory::Spacing, bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn rejects_values_that_break_out_of_a_declaration() {
        let err = check_value(&TokenCategory::FontFamily, "Inter; color: red").unwrap_err();
        assert!(err.contains('`'));
        assert!(check_value(&TokenCategory::FontFamily, "   ").is_err());
    }

    #[test]
    fn empty_pair_is_invalid() {
        let value = TokenValue::Modes(ModePair::default());
        assert!(value.check(&TokenCategory::Colors).is_err());
    }

    #[test]
    fn font_weights() {
        assert!(check_value(&TokenCategory::FontWeight, "600").is_ok());
        assert!(check_value(&TokenCategory::FontWeight, "bold").is_ok());
        assert!(check_value(&TokenCategory::FontWeight, "0").is_err());
        assert!(check_value(&TokenCategory::FontWeight, "heavy").is_err());
    }
}
