//! Token categories and their CSS custom property naming

use std::fmt::{Display, Formatter};

/// A token category, keyed by its name in theme files.
///
/// Each category owns a fixed custom property prefix. The prefixes never depend
/// on input order so repeated builds emit identical CSS.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Colors,
    Spacing,
    FontFamily,
    FontSize,
    FontWeight,
    LineHeight,
    BorderRadius,
    Shadow,
    /// Any other category (`audio`, `zIndex`, ...), emitted verbatim
    Other(String),
}

impl TokenCategory {
    /// Map a category key from a theme file.
    pub fn from_key(key: &str) -> Self {
        match key {
            "colors" | "color" => Self::Colors,
            "spacing" | "space" => Self::Spacing,
            "fontFamily" | "font-family" | "font_family" => Self::FontFamily,
            "fontSize" | "font-size" | "font_size" => Self::FontSize,
            "fontWeight" | "font-weight" | "font_weight" => Self::FontWeight,
            "lineHeight" | "line-height" | "line_height" => Self::LineHeight,
            "borderRadius" | "border-radius" | "border_radius" | "radius" => Self::BorderRadius,
            "shadow" | "shadows" | "boxShadow" => Self::Shadow,
            other => Self::Other(other.to_string()),
        }
    }

    /// Custom property prefix, including the leading `--`.
    pub fn prefix(&self) -> String {
        match self {
            Self::Colors => "--color--".to_string(),
            Self::Spacing => "--space-".to_string(),
            Self::FontFamily => "--font-".to_string(),
            Self::FontSize => "--text-".to_string(),
            Self::FontWeight => "--font-weight-".to_string(),
            Self::LineHeight => "--leading-".to_string(),
            Self::BorderRadius => "--radius-".to_string(),
            Self::Shadow => "--shadow-".to_string(),
            Self::Other(key) => format!("--{}-", kebab_case(key)),
        }
    }

    /// Custom property name for a token in this category.
    ///
    /// `.` is not valid unescaped in a property name, so `spacing.0.5`
    /// becomes `--space-0_5`.
    pub fn property(&self, token: &str) -> String {
        format!("{}{}", self.prefix(), token.replace('.', "_"))
    }
}

impl Display for TokenCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let key = match self {
            Self::Colors => "colors",
            Self::Spacing => "spacing",
            Self::FontFamily => "fontFamily",
            Self::FontSize => "fontSize",
            Self::FontWeight => "fontWeight",
            Self::LineHeight => "lineHeight",
            Self::BorderRadius => "borderRadius",
            Self::Shadow => "shadow",
            Self::Other(key) => key.as_str(),
        };
        f.write_str(key)
    }
}

/// `zIndex` -> `z-index`, `audio_cues` -> `audio-cues`
pub(crate) fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '_' {
            out.push('-');
        } else {
            out.push(c);
        }
    }
    out
}

/// Token names end up inside custom property names.
pub(crate) fn is_valid_token_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Category keys must start with a letter so the prefix stays an identifier.
pub(crate) fn is_valid_category_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
}
