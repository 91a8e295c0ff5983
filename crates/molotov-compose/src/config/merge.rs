//! Deep merging of configuration fragments.
//!
//! Objects merge key by key; mixin lists and alias targets are leaves, so
//! the override's value replaces the base's value wholesale.

use molotov_common::types::{Namespace, Target};

use super::{BaseAliases, Configuration, NamespaceConfig, PluginDefinition};

/// In-place deep merge where `overrides` wins on every leaf conflict.
pub trait DeepMerge {
    /// Layers `overrides` on top of `self`.
    fn deep_merge(&mut self, overrides: &Self);
}

impl DeepMerge for BaseAliases {
    fn deep_merge(&mut self, overrides: &Self) {
        for (alias, base) in overrides.iter() {
            let _ = self.insert(alias, base);
        }
    }
}

impl DeepMerge for PluginDefinition {
    fn deep_merge(&mut self, overrides: &Self) {
        for (base, plugins) in overrides.iter() {
            let entry = self.entry(base);
            for (plugin, mixins) in plugins {
                let _ = entry.insert(plugin.clone(), mixins.clone());
            }
        }
    }
}

impl<T: DeepMerge + Clone> DeepMerge for Option<T> {
    fn deep_merge(&mut self, overrides: &Self) {
        let Some(incoming) = overrides else {
            return;
        };
        match self {
            Some(current) => current.deep_merge(incoming),
            None => *self = Some(incoming.clone()),
        }
    }
}

impl DeepMerge for NamespaceConfig {
    fn deep_merge(&mut self, overrides: &Self) {
        self.bases.deep_merge(&overrides.bases);
        self.plugins.deep_merge(&overrides.plugins);
    }
}

impl DeepMerge for Configuration {
    fn deep_merge(&mut self, overrides: &Self) {
        for (namespace, config) in overrides.iter() {
            self.namespace_mut(namespace).deep_merge(config);
        }
    }
}

/// Returns `base` with `overrides` deep-merged on top.
///
/// Neither input is modified; merging an empty override returns a value
/// equal to `base`.
#[must_use]
pub fn merge(base: &Configuration, overrides: &Configuration) -> Configuration {
    let mut merged = base.clone();
    merged.deep_merge(overrides);
    merged
}

/// Merges only the `target` section of `namespace` from `overrides`.
///
/// Sections of other namespaces, and the other section of `namespace`, are
/// taken from `base` untouched.
#[must_use]
pub fn merge_target(
    base: &Configuration,
    overrides: &Configuration,
    namespace: &Namespace,
    target: Target,
) -> Configuration {
    let mut merged = base.clone();
    let Some(fragment) = overrides.get(namespace) else {
        return merged;
    };
    let scoped = match target {
        Target::Bases => NamespaceConfig {
            bases: fragment.bases.clone(),
            plugins: None,
        },
        Target::Plugins => NamespaceConfig {
            bases: None,
            plugins: fragment.plugins.clone(),
        },
    };
    if scoped != NamespaceConfig::default() {
        merged.namespace_mut(namespace).deep_merge(&scoped);
    }
    merged
}
