//! Semantic bridge
//!
//! Components style against a fixed set of semantic roles (`--primary`,
//! `--background`, ...) and never against concrete token names. Each theme
//! binds every role to one of its tokens, per color scheme. The role set is
//! closed: it is the contract component CSS relies on, so it does not vary
//! between themes.
//!
//! Binding order for a role: the theme's (inherited) `bridge` entry, then the
//! default `colors.<role>`. A build fails if any role of any theme has no
//! defined token for either scheme.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::{Result, ThemeError};
use crate::resolver::ResolvedTheme;
use crate::scheme::ColorScheme;
use crate::tokens::TokenPath;

/// Semantic role keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum SemanticRole {
    // Surfaces
    Background,
    Foreground,
    Card,
    CardForeground,

    // Brand
    Primary,
    PrimaryForeground,
    Secondary,
    SecondaryForeground,

    // Subdued and highlighted content
    Muted,
    MutedForeground,
    Accent,
    AccentForeground,

    // Destructive actions
    Destructive,
    DestructiveForeground,

    // Outlines
    Border,
    Input,
    Ring,
}

impl SemanticRole {
    /// The full role set, in emission order.
    pub fn all() -> &'static [SemanticRole] {
        const ROLES: [SemanticRole; 17] = [
            SemanticRole::Background,
            SemanticRole::Foreground,
            SemanticRole::Card,
            SemanticRole::CardForeground,
            SemanticRole::Primary,
            SemanticRole::PrimaryForeground,
            SemanticRole::Secondary,
            SemanticRole::SecondaryForeground,
            SemanticRole::Muted,
            SemanticRole::MutedForeground,
            SemanticRole::Accent,
            SemanticRole::AccentForeground,
            SemanticRole::Destructive,
            SemanticRole::DestructiveForeground,
            SemanticRole::Border,
            SemanticRole::Input,
            SemanticRole::Ring,
        ];
        &ROLES
    }

    /// Stable kebab-case name, also the semantic variable name without `--`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Foreground => "foreground",
            Self::Card => "card",
            Self::CardForeground => "card-foreground",
            Self::Primary => "primary",
            Self::PrimaryForeground => "primary-foreground",
            Self::Secondary => "secondary",
            Self::SecondaryForeground => "secondary-foreground",
            Self::Muted => "muted",
            Self::MutedForeground => "muted-foreground",
            Self::Accent => "accent",
            Self::AccentForeground => "accent-foreground",
            Self::Destructive => "destructive",
            Self::DestructiveForeground => "destructive-foreground",
            Self::Border => "border",
            Self::Input => "input",
            Self::Ring => "ring",
        }
    }

    /// The custom property components consume, e.g. `--primary`.
    pub fn variable(self) -> String {
        format!("--{}", self.name())
    }

    /// Binding used when no theme in the chain overrides the role.
    pub fn default_reference(self) -> TokenPath {
        TokenPath::new("colors", self.name())
    }
}

impl Display for SemanticRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SemanticRole {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|role| role.name() == s)
            .ok_or(())
    }
}

/// Validated role -> token bindings of one theme, for both schemes.
#[derive(Clone, Debug, PartialEq)]
pub struct SemanticBridge {
    theme: String,
    light: IndexMap<SemanticRole, TokenPath>,
    dark: IndexMap<SemanticRole, TokenPath>,
}

impl SemanticBridge {
    /// Bind every role for both schemes, failing on the first role that has
    /// no defined backing token.
    pub fn build(theme: &ResolvedTheme) -> Result<Self> {
        for role in theme.bridge.keys() {
            if role.parse::<SemanticRole>().is_err() {
                return Err(ThemeError::UnknownSemanticRole {
                    theme: theme.name.clone(),
                    role: role.clone(),
                });
            }
        }

        Ok(Self {
            theme: theme.name.clone(),
            light: bind_all(theme, ColorScheme::Light)?,
            dark: bind_all(theme, ColorScheme::Dark)?,
        })
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn mapping(&self, scheme: ColorScheme) -> &IndexMap<SemanticRole, TokenPath> {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }

    /// The token bound to `role` under `scheme`.
    pub fn reference(&self, role: SemanticRole, scheme: ColorScheme) -> &TokenPath {
        // Both maps hold every role once `build` succeeded.
        &self.mapping(scheme)[&role]
    }

    /// The custom property that backs `role` under `scheme`.
    pub fn property(&self, role: SemanticRole, scheme: ColorScheme) -> String {
        self.reference(role, scheme).property()
    }

    /// `(--role, var(--token))` declarations for `scheme`, in role order.
    pub fn declarations(&self, scheme: ColorScheme) -> impl Iterator<Item = (String, String)> + '_ {
        self.mapping(scheme)
            .iter()
            .map(|(role, path)| (role.variable(), format!("var({})", path.property())))
    }
}

fn bind_all(
    theme: &ResolvedTheme,
    scheme: ColorScheme,
) -> Result<IndexMap<SemanticRole, TokenPath>> {
    SemanticRole::all()
        .iter()
        .map(|&role| bind(theme, role, scheme).map(|path| (role, path)))
        .collect()
}

fn bind(theme: &ResolvedTheme, role: SemanticRole, scheme: ColorScheme) -> Result<TokenPath> {
    let incomplete = |reason: String| ThemeError::IncompleteSemanticMapping {
        theme: theme.name.clone(),
        scheme,
        role: role.name().to_string(),
        reason,
    };

    let path = match theme.bridge.get(role.name()) {
        Some(reference) => {
            let reference = reference
                .for_scheme(scheme)
                .ok_or_else(|| incomplete("bridge entry sets neither light nor dark".to_string()))?;
            reference
                .parse::<TokenPath>()
                .map_err(|_| incomplete(format!("invalid token reference `{reference}`")))?
        }
        None => role.default_reference(),
    };

    if theme.value(&path, scheme).is_none() {
        return Err(incomplete(format!("token `{path}` is not defined")));
    }
    Ok(path)
}
