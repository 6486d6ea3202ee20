//! Swatch Theme System
//!
//! Design tokens, theme inheritance and CSS custom property generation for the
//! Swatch design system.
//!
//! # Overview
//!
//! - **Theme definitions**: TOML files holding tokens (colors, spacing, type,
//!   radii, ...) with an optional `extends` parent
//! - **Resolution**: the `extends` chain is merged root-first, per token
//! - **CSS emission**: every theme becomes custom properties scoped by a theme
//!   attribute, with a dark-mode block for values that change
//! - **Semantic bridge**: a fixed set of roles (`--primary`, `--background`,
//!   ...) bound to each theme's tokens, so component CSS never names tokens
//! - **Runtime switching**: an attribute write on the scoping element
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use swatch_theme::{EmitOptions, Registry, Stylesheet};
//!
//! let mut registry = Registry::with_presets()?;
//! registry.load_dir("themes".as_ref())?;
//!
//! let sheet = Stylesheet::build(&registry, &EmitOptions::default())?;
//! std::fs::write("themes.css", sheet.to_css())?;
//! ```
//!
//! # Switching
//!
//! ```rust,ignore
//! use swatch_theme::{ColorScheme, ElementAttributes, ThemeScope};
//!
//! let mut scope = ThemeScope::new(ElementAttributes::new(), &sheet.manifest());
//! if let Some(slate) = scope.lookup("slate") {
//!     scope.set_theme(slate);
//! }
//! scope.set_scheme(ColorScheme::Dark);
//! ```

pub mod bridge;
pub mod css;
pub mod error;
pub mod presets;
pub mod registry;
pub mod resolver;
pub mod scheme;
pub mod scope;
pub mod theme;
pub mod tokens;
pub mod variants;

// Re-export commonly used types
pub use bridge::{SemanticBridge, SemanticRole};
pub use css::{CssVariables, DarkStrategy, EmitOptions, Stylesheet, ThemeManifest};
pub use error::{Result, ThemeError};
pub use presets::ThemePreset;
pub use registry::Registry;
pub use resolver::{resolve, resolve_all, ResolvedTheme};
pub use scheme::ColorScheme;
pub use scope::{ElementAttributes, Selection, ThemeId, ThemeScope, ThemeTarget};
pub use theme::{ThemeDef, ThemeMetadata};
pub use tokens::{ModePair, TokenCategory, TokenPath, TokenSet, TokenValue};
pub use variants::{Shape, Size, Tone, VariantAxis, VariantSet};
