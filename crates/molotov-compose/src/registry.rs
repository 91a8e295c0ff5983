//! The registry: one module's complete composition state.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use molotov_common::config::ResolverSettings;
use molotov_common::error::{MolotovError, Result};
use molotov_common::types::Namespace;

use crate::cocktail::ExtensionModule;
use crate::config::Configuration;
use crate::mixin::{BaseMap, ComposedMap, MixinMap};
use crate::mixologist::BaseResolver;
use crate::polttopullo::CompositionResolver;
use crate::provider::Resolver;

/// Aggregate root holding configuration, bases, mixins, overrides, and
/// extension modules for one namespace.
///
/// Resolvers mutate a registry in place, so a single instance must not be
/// resolved from two places at once. Clone it first if that is needed.
#[derive(Clone)]
pub struct Registry<B> {
    config: Configuration,
    namespace: Namespace,
    bases: BaseMap<B>,
    mixins: MixinMap<B>,
    overrides: Configuration,
    extensions: Vec<Arc<ExtensionModule<B>>>,
    plugins: ComposedMap<B>,
    settings: ResolverSettings,
}

impl<B> Registry<B> {
    /// Creates a registry with no overrides and no extension modules.
    ///
    /// # Errors
    ///
    /// - `ConfigRequired` if `config` declares no namespace.
    /// - `MixinsRequired` if `mixins` holds no mixin at all.
    pub fn new(
        config: Configuration,
        namespace: impl Into<Namespace>,
        bases: BaseMap<B>,
        mixins: MixinMap<B>,
    ) -> Result<Self> {
        if config.is_empty() {
            return Err(MolotovError::ConfigRequired {
                message: "config declares no namespace".into(),
            });
        }
        if mixins.values().all(BTreeMap::is_empty) {
            return Err(MolotovError::MixinsRequired {
                message: "no mixins supplied".into(),
            });
        }
        Ok(Self {
            config,
            namespace: namespace.into(),
            bases,
            mixins,
            overrides: Configuration::new(),
            extensions: Vec::new(),
            plugins: ComposedMap::new(),
            settings: ResolverSettings::default(),
        })
    }

    /// Sets the override fragment layered on top of the configuration.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Configuration) -> Self {
        self.overrides = overrides;
        self
    }

    /// Appends an extension module. Later modules win over earlier ones.
    #[must_use]
    pub fn with_extension(mut self, module: impl Into<Arc<ExtensionModule<B>>>) -> Self {
        self.extensions.push(module.into());
        self
    }

    /// Appends several extension modules in order.
    #[must_use]
    pub fn with_extensions<I>(mut self, modules: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arc<ExtensionModule<B>>>,
    {
        self.extensions.extend(modules.into_iter().map(Into::into));
        self
    }

    /// Sets resolver settings.
    #[must_use]
    pub const fn with_settings(mut self, settings: ResolverSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// The namespace this registry resolves.
    #[must_use]
    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Current base map.
    #[must_use]
    pub const fn bases(&self) -> &BaseMap<B> {
        &self.bases
    }

    /// Current mixin map.
    #[must_use]
    pub const fn mixins(&self) -> &MixinMap<B> {
        &self.mixins
    }

    /// Override fragment.
    #[must_use]
    pub const fn overrides(&self) -> &Configuration {
        &self.overrides
    }

    /// Extension modules in application order.
    #[must_use]
    pub fn extensions(&self) -> &[Arc<ExtensionModule<B>>] {
        &self.extensions
    }

    /// Resolver settings.
    #[must_use]
    pub const fn settings(&self) -> ResolverSettings {
        self.settings
    }

    /// Composed plugins from the last successful resolution.
    #[must_use]
    pub const fn plugins(&self) -> &ComposedMap<B> {
        &self.plugins
    }

    /// Looks up one composed plugin.
    #[must_use]
    pub fn plugin(&self, base: &str, name: &str) -> Option<&B> {
        self.plugins.get(base)?.get(name)
    }

    pub(crate) fn replace_config(&mut self, config: Configuration) {
        self.config = config;
    }

    pub(crate) fn replace_bases(&mut self, bases: BaseMap<B>) {
        self.bases = bases;
    }

    pub(crate) fn replace_mixins(&mut self, mixins: MixinMap<B>) {
        self.mixins = mixins;
    }

    pub(crate) fn replace_plugins(&mut self, plugins: ComposedMap<B>) {
        self.plugins = plugins;
    }
}

impl<B: Clone> Registry<B> {
    /// Resolves bases, folding in extension-supplied bases.
    ///
    /// # Errors
    ///
    /// See [`BaseResolver`].
    pub fn mix_bases(&mut self) -> Result<BaseMap<B>> {
        BaseResolver::new(self).resolve()
    }

    /// Resolves bases and then plugins, returning the composed plugins.
    ///
    /// Runs against a staged copy so that a failure in either pass leaves
    /// this registry exactly as it was.
    ///
    /// # Errors
    ///
    /// See [`BaseResolver`] and [`CompositionResolver`].
    pub fn resolve(&mut self) -> Result<ComposedMap<B>> {
        let mut staged = self.clone();
        let _ = staged.mix_bases()?;
        let plugins = CompositionResolver::new(&mut staged).resolve()?;
        *self = staged;
        Ok(plugins)
    }
}

impl<B> fmt::Debug for Registry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mixins: BTreeMap<&str, Vec<&str>> = self
            .mixins
            .iter()
            .map(|(base, named)| (base.as_str(), named.keys().map(String::as_str).collect()))
            .collect();
        f.debug_struct("Registry")
            .field("namespace", &self.namespace)
            .field("config", &self.config)
            .field("bases", &self.bases.keys().collect::<Vec<_>>())
            .field("mixins", &mixins)
            .field("overrides", &self.overrides)
            .field("extensions", &self.extensions.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
