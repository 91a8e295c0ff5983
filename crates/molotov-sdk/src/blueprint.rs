//! A concrete base type whose mixins record their own layering.

use std::fmt;

use molotov_compose::mixin::Mixin;
use serde::Serialize;

/// Named base plus the mixin layers wrapped around it, outermost first.
///
/// Useful wherever the composed value itself does not matter, only the
/// shape of the composition: planning, diagnostics, and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blueprint {
    base: String,
    layers: Vec<String>,
}

impl Blueprint {
    /// Creates an unwrapped blueprint for `base`.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            layers: Vec::new(),
        }
    }

    /// Label of the innermost base.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Mixin layers, outermost first.
    #[must_use]
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    /// Wraps this blueprint in a new outermost layer.
    #[must_use]
    pub fn wrap(mut self, layer: impl Into<String>) -> Self {
        self.layers.insert(0, layer.into());
        self
    }

    /// A mixin that wraps blueprints in a layer called `name`.
    #[must_use]
    pub fn mixin(name: impl Into<String>) -> Mixin<Self> {
        let name = name.into();
        Mixin::new(move |inner: Self| inner.wrap(name.clone()))
    }
}

impl fmt::Display for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for layer in &self.layers {
            write!(f, "{layer}(")?;
        }
        f.write_str(&self.base)?;
        for _ in &self.layers {
            f.write_str(")")?;
        }
        Ok(())
    }
}
