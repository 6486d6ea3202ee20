//! Theme error types

use std::path::PathBuf;

use thiserror::Error;

use crate::scheme::ColorScheme;

/// Errors raised while loading, resolving, validating or emitting themes.
///
/// Every variant names the offending theme so a failed build can point at the
/// file that needs fixing.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// Unknown theme name, or an `extends` parent that is not registered
    #[error("theme `{name}` not found{}", referrer_suffix(.referenced_by))]
    NotFound {
        name: String,
        /// The theme whose `extends` pointed at `name`, if any
        referenced_by: Option<String>,
    },

    /// The `extends` chain revisits a theme already in the chain
    #[error("circular theme inheritance: {}", .chain.join(" -> "))]
    CircularInheritance { chain: Vec<String> },

    /// A semantic role has no usable backing token for some theme and scheme
    #[error("theme `{theme}` ({scheme}): semantic role `{role}` is not mapped: {reason}")]
    IncompleteSemanticMapping {
        theme: String,
        scheme: ColorScheme,
        role: String,
        reason: String,
    },

    /// A token value that cannot be emitted for its category
    #[error("theme `{theme}`: invalid value for `{path}`: {reason}")]
    InvalidTokenValue {
        theme: String,
        path: String,
        reason: String,
    },

    /// A token or category name that cannot become a CSS custom property
    #[error("theme `{theme}`: invalid token name `{name}` (allowed: [A-Za-z0-9_.-])")]
    InvalidTokenName { theme: String, name: String },

    /// A theme name that cannot be used inside an attribute selector
    #[error("invalid theme name `{name}` (allowed: [A-Za-z0-9_-])")]
    InvalidThemeName { name: String },

    /// A `bridge` entry for a role outside the fixed role set
    #[error("theme `{theme}`: unknown semantic role `{role}`")]
    UnknownSemanticRole { theme: String, role: String },

    /// A token reference that is not of the form `category.token`
    #[error("invalid token reference `{reference}` (expected `category.token`)")]
    InvalidTokenPath { reference: String },

    /// Two token paths (or a token and a semantic role) map to the same
    /// custom property
    #[error("theme `{theme}`: `{first}` and `{second}` both emit `{property}`")]
    DuplicateProperty {
        theme: String,
        property: String,
        first: String,
        second: String,
    },

    /// A selector attribute name that cannot be emitted as-is
    #[error("invalid attribute name `{name}` (allowed: [A-Za-z0-9_-])")]
    InvalidAttributeName { name: String },

    /// Two theme definitions share a name
    #[error("duplicate theme `{name}`")]
    DuplicateTheme { name: String },

    /// Malformed theme source
    #[error("failed to parse theme {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    /// Failed to read a theme file or directory
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn referrer_suffix(referenced_by: &Option<String>) -> String {
    match referenced_by {
        Some(child) => format!(" (extended by `{child}`)"),
        None => String::new(),
    }
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
