//! Fluent API for assembling a registry in code.

use molotov_common::config::ResolverSettings;
use molotov_common::error::Result;
use molotov_common::types::Namespace;
use molotov_compose::cocktail::ExtensionModule;
use molotov_compose::config::{BaseAliases, Configuration, NamespaceConfig, PluginDefinition};
use molotov_compose::mixin::{BaseMap, Mixin, MixinMap};
use molotov_compose::registry::Registry;

/// Builder for a single-namespace [`Registry`].
///
/// The built configuration always carries both the alias and plugin
/// sections, even when empty, so either resolver can run on it.
#[derive(Debug)]
pub struct RegistryBuilder<B> {
    namespace: Namespace,
    aliases: BaseAliases,
    definitions: PluginDefinition,
    bases: BaseMap<B>,
    mixins: MixinMap<B>,
    overrides: PluginDefinition,
    extensions: Vec<ExtensionModule<B>>,
    settings: ResolverSettings,
}

impl<B> RegistryBuilder<B> {
    /// Creates a new builder for `namespace`.
    #[must_use]
    pub fn new(namespace: impl Into<Namespace>) -> Self {
        Self {
            namespace: namespace.into(),
            aliases: BaseAliases::new(),
            definitions: PluginDefinition::new(),
            bases: BaseMap::new(),
            mixins: MixinMap::new(),
            overrides: PluginDefinition::new(),
            extensions: Vec::new(),
            settings: ResolverSettings::default(),
        }
    }

    /// Adds a base under `name`, aliased to itself.
    #[must_use]
    pub fn base(mut self, name: impl Into<String>, base: B) -> Self {
        let name = name.into();
        let _ = self.aliases.insert(name.clone(), name.clone());
        let _ = self.bases.insert(name, base);
        self
    }

    /// Declares `alias` as another name for `base`.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>, base: impl Into<String>) -> Self {
        let _ = self.aliases.insert(alias, base);
        self
    }

    /// Registers a mixin for `base`.
    #[must_use]
    pub fn mixin(
        mut self,
        base: impl Into<String>,
        name: impl Into<String>,
        mixin: Mixin<B>,
    ) -> Self {
        let _ = self
            .mixins
            .entry(base.into())
            .or_default()
            .insert(name.into(), mixin);
        self
    }

    /// Declares a plugin on `base` built from `mixins`, outermost first.
    #[must_use]
    pub fn plugin<I, S>(
        mut self,
        base: impl Into<String>,
        name: impl Into<String>,
        mixins: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definitions.insert(base, name, mixins);
        self
    }

    /// Declares a plugin in the override fragment.
    #[must_use]
    pub fn override_plugin<I, S>(
        mut self,
        base: impl Into<String>,
        name: impl Into<String>,
        mixins: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overrides.insert(base, name, mixins);
        self
    }

    /// Appends an extension module.
    #[must_use]
    pub fn extension(mut self, module: ExtensionModule<B>) -> Self {
        self.extensions.push(module);
        self
    }

    /// Sets resolver settings.
    #[must_use]
    pub const fn settings(mut self, settings: ResolverSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builds the registry (does not resolve it).
    ///
    /// # Errors
    ///
    /// Returns `MixinsRequired` if no mixin was registered.
    pub fn build(self) -> Result<Registry<B>> {
        let config = Configuration::single(
            self.namespace.clone(),
            NamespaceConfig::default()
                .with_bases(self.aliases)
                .with_plugins(self.definitions),
        );
        let overrides = if self.overrides.is_empty() {
            Configuration::new()
        } else {
            Configuration::single(
                self.namespace.clone(),
                NamespaceConfig::default().with_plugins(self.overrides),
            )
        };
        tracing::debug!(
            namespace = %self.namespace,
            bases = self.bases.len(),
            extensions = self.extensions.len(),
            "building registry"
        );
        Ok(Registry::new(config, self.namespace, self.bases, self.mixins)?
            .with_overrides(overrides)
            .with_extensions(self.extensions)
            .with_settings(self.settings))
    }
}
