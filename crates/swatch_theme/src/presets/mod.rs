//! Built-in theme presets inspired by shadcn base color presets.
//!
//! `neutral` is a complete root theme (colors, spacing, type, radii and the
//! semantic bridge). `slate` and `zinc` extend it and only swap the palette.

use std::fmt::{Display, Formatter};

use crate::error::Result;
use crate::theme::ThemeDef;

/// Built-in preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// shadcn-inspired neutral preset.
    Neutral,
    /// shadcn-inspired slate preset.
    Slate,
    /// shadcn-inspired zinc preset.
    Zinc,
}

impl ThemePreset {
    /// Stable preset id, also the theme name.
    pub fn id(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Slate => "slate",
            Self::Zinc => "zinc",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Slate => "Slate",
            Self::Zinc => "Zinc",
        }
    }

    /// Full preset list, parents before children.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 3] =
            [ThemePreset::Neutral, ThemePreset::Slate, ThemePreset::Zinc];
        &PRESETS
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }

    /// Theme file source.
    pub fn source(self) -> &'static str {
        match self {
            Self::Neutral => include_str!("neutral.toml"),
            Self::Slate => include_str!("slate.toml"),
            Self::Zinc => include_str!("zinc.toml"),
        }
    }

    pub fn definition(self) -> Result<ThemeDef> {
        ThemeDef::parse(self.source(), &format!("preset `{}`", self.id()))
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
