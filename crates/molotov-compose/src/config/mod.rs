//! Declarative composition configuration.
//!
//! A [`Configuration`] maps each namespace to a [`NamespaceConfig`] holding
//! the base alias map and the plugin definitions for that module. Override
//! fragments share the same shape and are layered on top with [`merge`].

pub mod merge;
pub mod validator;

use std::collections::{BTreeMap, BTreeSet};

use molotov_common::types::Namespace;
use serde::{Deserialize, Deserializer, Serialize};

/// Alias name to base name mapping for one namespace.
///
/// Documents may spell this either as an array of base names or as an
/// alias map. Arrays are normalised so that every name aliases itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AliasShape")]
pub struct BaseAliases(BTreeMap<String, String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum AliasShape {
    Names(Vec<String>),
    Aliases(BTreeMap<String, String>),
}

impl From<AliasShape> for BaseAliases {
    fn from(shape: AliasShape) -> Self {
        match shape {
            AliasShape::Names(names) => names.into_iter().map(|n| (n.clone(), n)).collect(),
            AliasShape::Aliases(map) => Self(map),
        }
    }
}

impl FromIterator<(String, String)> for BaseAliases {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl BaseAliases {
    /// Creates an empty alias map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Maps `alias` to `base`, returning the previous target if any.
    pub fn insert(&mut self, alias: impl Into<String>, base: impl Into<String>) -> Option<String> {
        self.0.insert(alias.into(), base.into())
    }

    /// Returns the base name an alias points at.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.0.get(alias).map(String::as_str)
    }

    /// Iterates over `(alias, base)` pairs in alias order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    /// Iterates over the base names referenced by this map.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }

    /// Returns the number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no aliases are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Base name to plugin name to ordered mixin names.
///
/// The first mixin listed for a plugin becomes its outermost layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginDefinition(BTreeMap<String, BTreeMap<String, Vec<String>>>);

impl PluginDefinition {
    /// Creates an empty set of plugin definitions.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Declares `plugin` on `base` with the given mixin order.
    pub fn insert<I, S>(&mut self, base: impl Into<String>, plugin: impl Into<String>, mixins: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let _ = self
            .0
            .entry(base.into())
            .or_default()
            .insert(plugin.into(), mixins.into_iter().map(Into::into).collect());
    }

    /// Returns the plugins declared for `base`.
    #[must_use]
    pub fn plugins(&self, base: &str) -> Option<&BTreeMap<String, Vec<String>>> {
        self.0.get(base)
    }

    /// Returns the mixin list of a single plugin.
    #[must_use]
    pub fn mixins(&self, base: &str, plugin: &str) -> Option<&[String]> {
        self.0.get(base)?.get(plugin).map(Vec::as_slice)
    }

    /// Iterates over `(base, plugins)` entries in base order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Vec<String>>)> {
        self.0.iter().map(|(b, p)| (b.as_str(), p))
    }

    /// Every mixin name referenced by any plugin.
    #[must_use]
    pub fn referenced_mixins(&self) -> BTreeSet<&str> {
        self.0
            .values()
            .flat_map(BTreeMap::values)
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Returns `true` if no base has plugin definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn entry(&mut self, base: &str) -> &mut BTreeMap<String, Vec<String>> {
        self.0.entry(base.to_owned()).or_default()
    }
}

/// Configuration of a single namespace.
///
/// Both sections are optional while fragments are being layered; a
/// configuration is only trusted once [`validator::validate`] confirms the
/// required sections are present. A key that is present with a `null`
/// value counts as present and reads as an empty section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceConfig {
    /// Base alias map (`basesNamespace`).
    #[serde(
        rename = "basesNamespace",
        alias = "supersNameSpace",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub bases: Option<BaseAliases>,
    /// Plugin definitions (`pluginDefs`).
    #[serde(
        rename = "pluginDefs",
        alias = "molotovPlugins",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub plugins: Option<PluginDefinition>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Some(Option::<T>::deserialize(deserializer)?.unwrap_or_default()))
}

impl NamespaceConfig {
    /// Sets the base alias map.
    #[must_use]
    pub fn with_bases(mut self, bases: BaseAliases) -> Self {
        self.bases = Some(bases);
        self
    }

    /// Sets the plugin definitions.
    #[must_use]
    pub fn with_plugins(mut self, plugins: PluginDefinition) -> Self {
        self.plugins = Some(plugins);
        self
    }
}

/// Namespace to [`NamespaceConfig`] mapping.
///
/// Override fragments use this same type; they simply leave out the
/// sections they do not touch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(BTreeMap<Namespace, NamespaceConfig>);

impl Configuration {
    /// Creates an empty configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Creates a configuration holding one namespace.
    #[must_use]
    pub fn single(namespace: impl Into<Namespace>, config: NamespaceConfig) -> Self {
        let mut out = Self::new();
        let _ = out.insert(namespace, config);
        out
    }

    /// Inserts or replaces the configuration of a namespace.
    pub fn insert(
        &mut self,
        namespace: impl Into<Namespace>,
        config: NamespaceConfig,
    ) -> Option<NamespaceConfig> {
        self.0.insert(namespace.into(), config)
    }

    /// Returns the configuration of a namespace.
    #[must_use]
    pub fn get(&self, namespace: &Namespace) -> Option<&NamespaceConfig> {
        self.0.get(namespace)
    }

    /// Returns the configuration of a namespace, creating an empty one.
    pub fn namespace_mut(&mut self, namespace: &Namespace) -> &mut NamespaceConfig {
        self.0.entry(namespace.clone()).or_default()
    }

    /// Iterates over namespaces in order.
    pub fn iter(&self) -> impl Iterator<Item = (&Namespace, &NamespaceConfig)> {
        self.0.iter()
    }

    /// Returns `true` if no namespace is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
