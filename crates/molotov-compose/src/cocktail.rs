//! Extension modules ("cocktails").
//!
//! A downstream consumer bundles a configuration fragment together with any
//! bases and mixins it supplies, and hands the bundle to a host registry.
//! Resolvers only ever read from a module; they copy what they need.

use std::collections::BTreeSet;

use molotov_common::error::{MolotovError, Result};
use molotov_common::types::Namespace;

use crate::config::{BaseAliases, Configuration, PluginDefinition};
use crate::mixin::{BaseMap, MixinMap, mixin_names};

/// Downstream bundle of configuration, bases, and mixins.
#[derive(Debug, Clone)]
pub struct ExtensionModule<B> {
    config: Configuration,
    bases: BaseMap<B>,
    mixins: MixinMap<B>,
}

impl<B> ExtensionModule<B> {
    /// Creates an extension module.
    ///
    /// Empty base or mixin maps are treated the same as `None`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidExtensionConfig` if `config` declares no namespace.
    pub fn new(
        config: Configuration,
        bases: Option<BaseMap<B>>,
        mixins: Option<MixinMap<B>>,
    ) -> Result<Self> {
        if config.is_empty() {
            return Err(MolotovError::InvalidExtensionConfig {
                message: "config declares no namespace".into(),
            });
        }
        Ok(Self {
            config,
            bases: bases.unwrap_or_default(),
            mixins: mixins.unwrap_or_default(),
        })
    }

    /// The module's configuration fragment.
    #[must_use]
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// Bases supplied by the module, if any.
    #[must_use]
    pub fn bases(&self) -> Option<&BaseMap<B>> {
        (!self.bases.is_empty()).then_some(&self.bases)
    }

    /// Mixins supplied by the module, if any.
    #[must_use]
    pub fn mixins(&self) -> Option<&MixinMap<B>> {
        (!self.mixins.values().all(|m| m.is_empty())).then_some(&self.mixins)
    }

    /// Alias map this module declares for `namespace`.
    #[must_use]
    pub fn declared_aliases(&self, namespace: &Namespace) -> Option<&BaseAliases> {
        self.config.get(namespace)?.bases.as_ref()
    }

    /// Plugin definitions this module declares for `namespace`.
    #[must_use]
    pub fn plugin_definitions(&self, namespace: &Namespace) -> Option<&PluginDefinition> {
        self.config.get(namespace)?.plugins.as_ref()
    }

    /// Names of every mixin the module supplies.
    #[must_use]
    pub fn mixin_names(&self) -> BTreeSet<&str> {
        mixin_names(&self.mixins)
    }
}
