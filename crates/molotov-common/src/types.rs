//! Domain primitive types used across the Molotov workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{BASES_KEY, PLUGINS_KEY};

/// Identifier of the module whose configuration is being resolved.
///
/// All bases, mixins, and plugin definitions for one logical module are
/// grouped under a single namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Namespace(String);

impl Namespace {
    /// Creates a namespace from a string value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Namespace {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Namespace {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The section of a namespace configuration a resolver works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// The base alias map (`basesNamespace`).
    Bases,
    /// The plugin definitions (`pluginDefs`).
    Plugins,
}

impl Target {
    /// Returns the configuration key this target reads from.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Bases => BASES_KEY,
            Self::Plugins => PLUGINS_KEY,
        }
    }

    /// Returns the human label of the resolver working on this target.
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Bases => "Bases",
            Self::Plugins => "Plugins",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_displays_inner_value() {
        let ns = Namespace::new("demo");
        assert_eq!(ns.to_string(), "demo");
        assert_eq!(ns.as_str(), "demo");
    }

    #[test]
    fn target_keys_match_document_keys() {
        assert_eq!(Target::Bases.key(), "basesNamespace");
        assert_eq!(Target::Plugins.key(), "pluginDefs");
        assert_eq!(Target::Plugins.kind(), "Plugins");
    }
}
