//! Theme inheritance resolution
//!
//! Resolution walks the `extends` chain from the requested theme up to a root,
//! then merges definitions root-first so that themes closer to the requested
//! one win. The walk is iterative and tracks every visited name, so a cycle is
//! reported as soon as a name repeats instead of looping.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Result, ThemeError};
use crate::registry::Registry;
use crate::scheme::ColorScheme;
use crate::theme::{ThemeDef, ThemeMetadata};
use crate::tokens::{TokenPath, TokenSet, TokenValue};

/// A theme with its full ancestry merged in.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedTheme {
    pub name: String,
    /// Ancestry, root first, ending with this theme
    pub chain: Vec<String>,
    pub tokens: TokenSet,
    /// Merged semantic role overrides (role -> reference)
    pub bridge: IndexMap<String, TokenValue>,
    /// This theme's own metadata
    pub metadata: ThemeMetadata,
}

impl ResolvedTheme {
    /// The value of `path` as seen by `scheme`.
    pub fn value(&self, path: &TokenPath, scheme: ColorScheme) -> Option<&str> {
        self.tokens.get_path(path)?.for_scheme(scheme)
    }

    /// The theme this one extends directly, if any.
    pub fn parent(&self) -> Option<&str> {
        let len = self.chain.len();
        (len >= 2).then(|| self.chain[len - 2].as_str())
    }
}

/// Resolve `name` against `registry`.
pub fn resolve(registry: &Registry, name: &str) -> Result<ResolvedTheme> {
    let lineage = lineage(registry, name)?;

    let mut tokens = TokenSet::new();
    let mut bridge: IndexMap<String, TokenValue> = IndexMap::new();
    for def in lineage.iter().rev() {
        trace!("resolve {name}: applying `{}`", def.name);
        tokens.overlay(&def.tokens);
        for (role, reference) in &def.bridge {
            let merged = match bridge.get(role) {
                Some(inherited) => reference.merge_over(inherited),
                None => reference.clone(),
            };
            bridge.insert(role.clone(), merged);
        }
    }

    let chain: Vec<String> = lineage.iter().rev().map(|def| def.name.clone()).collect();
    debug!(
        "resolve {name}: chain {} ({} tokens)",
        chain.join(" -> "),
        tokens.len()
    );

    Ok(ResolvedTheme {
        name: name.to_string(),
        chain,
        tokens,
        bridge,
        metadata: lineage[0].metadata.clone(),
    })
}

/// Resolve every registered theme, in registration order. Stops at the first
/// failure.
pub fn resolve_all(registry: &Registry) -> Result<Vec<ResolvedTheme>> {
    registry.names().map(|name| resolve(registry, name)).collect()
}

/// The requested theme followed by its ancestors, leaf first.
fn lineage<'a>(registry: &'a Registry, name: &str) -> Result<Vec<&'a ThemeDef>> {
    let mut current = registry.get(name).ok_or_else(|| ThemeError::NotFound {
        name: name.to_string(),
        referenced_by: None,
    })?;

    let mut visited: IndexSet<&str> = IndexSet::new();
    let mut lineage = Vec::new();
    loop {
        if !visited.insert(current.name.as_str()) {
            let mut chain: Vec<String> = visited.iter().map(|n| n.to_string()).collect();
            chain.push(current.name.clone());
            return Err(ThemeError::CircularInheritance { chain });
        }
        lineage.push(current);

        let Some(parent) = current.extends.as_deref() else {
            break;
        };
        current = registry.get(parent).ok_or_else(|| ThemeError::NotFound {
            name: parent.to_string(),
            referenced_by: Some(current.name.clone()),
        })?;
    }
    Ok(lineage)
}
