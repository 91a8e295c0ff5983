//! Plugin resolution ("polttopullo").
//!
//! Merges plugin-definition overrides, validates, composes the host's
//! plugins, then folds in every extension module that brings mixins,
//! recomposing after each one so layering always reflects the full mixin
//! list of every plugin.

use molotov_common::error::{MolotovError, Result};
use molotov_common::types::{Namespace, Target};

use crate::cocktail::ExtensionModule;
use crate::config::merge::DeepMerge;
use crate::engine::compose_with;
use crate::mixin::{ComposedMap, MixinMap, merge_mixins, mixin_names};
use crate::provider::{Provider, ResolvePhase, Resolver};
use crate::registry::Registry;

/// Resolves the composed plugins of a [`Registry`].
///
/// Run this after the registry's bases have been resolved; the bases
/// currently held by the registry are the ones plugins are built on.
///
/// # Errors
///
/// - `MalformedConfiguration` if the merged configuration lacks either the
///   `basesNamespace` or the `pluginDefs` section.
/// - `NoSuperWithThisName` and `PluginCantFindMixin` from composition.
/// - `CocktailConfigUsesUndefinedMixins` if a module's plugin definitions
///   name mixins found in neither the host nor the module.
#[derive(Debug)]
pub struct CompositionResolver<'a, B> {
    registry: &'a mut Registry<B>,
    provider: Provider,
}

impl<'a, B: Clone> CompositionResolver<'a, B> {
    /// Creates a resolver over `registry`.
    pub const fn new(registry: &'a mut Registry<B>) -> Self {
        Self {
            registry,
            provider: Provider::new(Target::Plugins),
        }
    }

    /// The registry being resolved.
    #[must_use]
    pub fn registry(&self) -> &Registry<B> {
        &*self.registry
    }

    fn run(&mut self) -> Result<ComposedMap<B>> {
        let namespace = self.registry.namespace().clone();
        tracing::info!(namespace = %namespace, "resolving plugins");
        let mut config = self.provider.prepare(&*self.registry)?;

        let check = self.registry.settings().mixin_check;
        let bases = self.registry.bases();
        let mut definitions = config
            .get(&namespace)
            .and_then(|c| c.plugins.clone())
            .unwrap_or_default();
        let mut mixins = self.registry.mixins().clone();
        let mut composed = compose_with(&definitions, &mixins, bases, check)?;

        for (index, module) in self.registry.extensions().iter().enumerate() {
            let Some(module_mixins) = module.mixins() else {
                tracing::debug!(index, "extension module supplies no mixins");
                continue;
            };

            let missing = undefined_mixins(module, &mixins, &namespace);
            if !missing.is_empty() {
                return Err(MolotovError::CocktailConfigUsesUndefinedMixins { missing });
            }

            merge_mixins(&mut mixins, module_mixins);
            if let Some(fragment) = module.plugin_definitions(&namespace) {
                definitions.deep_merge(fragment);
            }
            composed = compose_with(&definitions, &mixins, bases, check)?;
            tracing::debug!(index, "applied extension mixins");
        }

        config.namespace_mut(&namespace).plugins = Some(definitions);
        self.registry.replace_config(config);
        self.registry.replace_mixins(mixins);
        self.registry.replace_plugins(composed.clone());
        Ok(composed)
    }
}

/// Mixin names a module's plugin definitions use that neither the module
/// nor `host` supplies, sorted.
fn undefined_mixins<B>(
    module: &ExtensionModule<B>,
    host: &MixinMap<B>,
    namespace: &Namespace,
) -> Vec<String> {
    let Some(fragment) = module.plugin_definitions(namespace) else {
        return Vec::new();
    };
    let supplied = module.mixin_names();
    let known = mixin_names(host);
    fragment
        .referenced_mixins()
        .into_iter()
        .filter(|name| !supplied.contains(name) && !known.contains(name))
        .map(str::to_owned)
        .collect()
}

impl<B: Clone> Resolver for CompositionResolver<'_, B> {
    type Output = ComposedMap<B>;

    fn target(&self) -> Target {
        self.provider.target()
    }

    fn phase(&self) -> ResolvePhase {
        self.provider.phase()
    }

    fn resolve(&mut self) -> Result<ComposedMap<B>> {
        let outcome = self.run();
        self.provider.finish(outcome)
    }
}
