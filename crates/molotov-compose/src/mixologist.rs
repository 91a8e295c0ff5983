//! Base resolution ("super mixologist").
//!
//! Produces the final base map for a registry by merging base-alias
//! overrides, validating, and then letting each extension module replace
//! or add bases under the aliases it declares.

use molotov_common::error::{MolotovError, Result};
use molotov_common::types::Target;

use crate::config::merge::DeepMerge;
use crate::config::{BaseAliases, Configuration};
use crate::mixin::BaseMap;
use crate::provider::{Provider, ResolvePhase, Resolver};
use crate::registry::Registry;

/// Resolves the base map of a [`Registry`].
///
/// Extension modules are applied in order, so when two modules alias the
/// same name the later one wins.
///
/// # Errors
///
/// - `MalformedConfiguration` if the merged configuration has no
///   `basesNamespace` section for the registry's namespace.
/// - `CocktailBasesNotDefined` if a module aliases a base name that neither
///   the host nor the module supplies.
#[derive(Debug)]
pub struct BaseResolver<'a, B> {
    registry: &'a mut Registry<B>,
    provider: Provider,
}

impl<'a, B: Clone> BaseResolver<'a, B> {
    /// Creates a resolver over `registry`.
    pub const fn new(registry: &'a mut Registry<B>) -> Self {
        Self {
            registry,
            provider: Provider::new(Target::Bases),
        }
    }

    /// The registry being resolved.
    #[must_use]
    pub fn registry(&self) -> &Registry<B> {
        &*self.registry
    }

    fn run(&mut self) -> Result<BaseMap<B>> {
        tracing::info!(namespace = %self.registry.namespace(), "resolving bases");
        let mut config = self.provider.prepare(&*self.registry)?;
        let mut bases = self.registry.bases().clone();
        self.mix_cocktails(&mut config, &mut bases)?;

        self.registry.replace_config(config);
        self.registry.replace_bases(bases.clone());
        Ok(bases)
    }

    fn mix_cocktails(&self, config: &mut Configuration, bases: &mut BaseMap<B>) -> Result<()> {
        let namespace = self.registry.namespace();
        for (index, module) in self.registry.extensions().iter().enumerate() {
            let Some(module_bases) = module.bases() else {
                tracing::debug!(index, "extension module supplies no bases");
                continue;
            };
            let Some(declared) = module.declared_aliases(namespace) else {
                tracing::debug!(
                    index,
                    namespace = %namespace,
                    "extension module declares no aliases"
                );
                continue;
            };

            let mut missing: Vec<String> = declared
                .targets()
                .filter(|name| !bases.contains_key(*name) && !module_bases.contains_key(*name))
                .map(str::to_owned)
                .collect();
            if !missing.is_empty() {
                missing.sort();
                missing.dedup();
                return Err(MolotovError::CocktailBasesNotDefined { missing });
            }

            config
                .namespace_mut(namespace)
                .bases
                .get_or_insert_with(BaseAliases::new)
                .deep_merge(declared);

            for (alias, name) in declared.iter() {
                if let Some(base) = module_bases.get(name) {
                    let _ = bases.insert(alias.to_owned(), base.clone());
                }
            }
            tracing::debug!(index, aliases = declared.len(), "applied extension bases");
        }
        Ok(())
    }
}

impl<B: Clone> Resolver for BaseResolver<'_, B> {
    type Output = BaseMap<B>;

    fn target(&self) -> Target {
        self.provider.target()
    }

    fn phase(&self) -> ResolvePhase {
        self.provider.phase()
    }

    fn resolve(&mut self) -> Result<BaseMap<B>> {
        let outcome = self.run();
        self.provider.finish(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use molotov_common::error::ErrorCode;
    use molotov_common::types::Namespace;

    use super::*;
    use crate::cocktail::ExtensionModule;
    use crate::config::{NamespaceConfig, PluginDefinition};
    use crate::mixin::{Mixin, MixinMap};

    const NS: &str = "testMolotovImplementer";

    fn host_config() -> Configuration {
        let mut aliases = BaseAliases::new();
        let _ = aliases.insert("testSuper", "testSuper");
        let mut defs = PluginDefinition::new();
        defs.insert("testSuper", "onlyPluginOne", ["mixinOne"]);
        Configuration::single(
            NS,
            NamespaceConfig::default()
                .with_bases(aliases)
                .with_plugins(defs),
        )
    }

    fn host_mixins() -> MixinMap<String> {
        let mut mixins = MixinMap::new();
        let _ = mixins
            .entry("testSuper".to_string())
            .or_default()
            .insert("mixinOne".into(), Mixin::new(|s: String| s + "+one"));
        mixins
    }

    fn registry() -> Registry<String> {
        Registry::new(
            host_config(),
            NS,
            BaseMap::from([("testSuper".to_string(), "host".to_string())]),
            host_mixins(),
        )
        .expect("registry")
    }

    fn cocktail(aliases: &[(&str, &str)], bases: &[(&str, &str)]) -> ExtensionModule<String> {
        let aliases: BaseAliases = aliases
            .iter()
            .map(|(a, b)| ((*a).to_string(), (*b).to_string()))
            .collect();
        let bases: BaseMap<String> = bases
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ExtensionModule::new(
            Configuration::single(NS, NamespaceConfig::default().with_bases(aliases)),
            Some(bases),
            None,
        )
        .expect("cocktail")
    }

    #[test]
    fn resolver_reports_target_and_kind() {
        let mut registry = registry();
        let resolver = BaseResolver::new(&mut registry);
        assert_eq!(resolver.target(), Target::Bases);
        assert_eq!(resolver.kind(), "Bases");
        assert_eq!(resolver.phase(), ResolvePhase::Unresolved);
    }

    #[test]
    fn resolves_host_bases_without_extensions() {
        let mut registry = registry();
        let mut resolver = BaseResolver::new(&mut registry);
        let bases = resolver.resolve().expect("resolve");
        assert_eq!(resolver.phase(), ResolvePhase::ExtensionsApplied);
        assert_eq!(bases["testSuper"], "host");
    }

    #[test]
    fn missing_bases_section_fails() {
        let config = Configuration::single(
            NS,
            NamespaceConfig::default().with_plugins(PluginDefinition::new()),
        );
        let mut registry =
            Registry::new(config, NS, BaseMap::new(), host_mixins()).expect("registry");
        let mut resolver = BaseResolver::new(&mut registry);
        let err = resolver.resolve().unwrap_err();
        assert_eq!(err.code(), ErrorCode::MalformedConfiguration);
        assert!(err.to_string().contains(NS));
        assert_eq!(resolver.phase(), ResolvePhase::Failed);
    }

    #[test]
    fn unknown_namespace_fails() {
        let mut registry = Registry::new(
            host_config(),
            "someoneElse",
            BaseMap::new(),
            host_mixins(),
        )
        .expect("registry");
        let err = registry.mix_bases().unwrap_err();
        assert_eq!(err.code(), ErrorCode::MalformedConfiguration);
    }

    #[test]
    fn extension_overrides_and_adds_bases() {
        let mut registry = registry().with_extension(cocktail(
            &[("testSuper", "testSuper"), ("testSuperTwo", "testSuperTwo")],
            &[("testSuper", "guest"), ("testSuperTwo", "guestTwo")],
        ));
        let bases = registry.mix_bases().expect("resolve");
        assert_eq!(bases["testSuper"], "guest");
        assert_eq!(bases["testSuperTwo"], "guestTwo");
        assert_eq!(registry.bases(), &bases);

        let ns = Namespace::new(NS);
        let aliases = registry
            .config()
            .get(&ns)
            .and_then(|c| c.bases.as_ref())
            .expect("aliases");
        assert_eq!(aliases.get("testSuperTwo"), Some("testSuperTwo"));
    }

    #[test]
    fn alias_to_host_base_keeps_host_value() {
        let mut registry = registry().with_extension(cocktail(
            &[("testSuper", "testSuper")],
            &[("unrelated", "x")],
        ));
        let bases = registry.mix_bases().expect("resolve");
        assert_eq!(bases["testSuper"], "host");
        assert!(!bases.contains_key("unrelated"));
    }

    #[test]
    fn last_registered_extension_wins() {
        let first = cocktail(&[("testSuper", "testSuper")], &[("testSuper", "first")]);
        let second = cocktail(&[("testSuper", "testSuper")], &[("testSuper", "second")]);
        let mut registry = registry().with_extensions([first, second]);
        let bases = registry.mix_bases().expect("resolve");
        assert_eq!(bases["testSuper"], "second");
    }

    #[test]
    fn undefined_alias_target_fails() {
        let mut registry = registry().with_extension(cocktail(
            &[("testSuper", "testSuper"), ("gumby", "notAtAllAKey")],
            &[("testSuper", "guest")],
        ));
        let before = registry.bases().clone();
        let err = registry.mix_bases().unwrap_err();
        assert_eq!(err.code(), ErrorCode::CocktailBasesNotDefined);
        assert!(err.to_string().contains("notAtAllAKey"));
        assert_eq!(registry.bases(), &before);
    }

    #[test]
    fn extension_without_bases_is_skipped() {
        let mut aliases = BaseAliases::new();
        let _ = aliases.insert("ghost", "ghost");
        let module: ExtensionModule<String> = ExtensionModule::new(
            Configuration::single(NS, NamespaceConfig::default().with_bases(aliases)),
            None,
            None,
        )
        .expect("cocktail");
        let mut registry = registry().with_extension(Arc::new(module));
        let bases = registry.mix_bases().expect("resolve");
        assert_eq!(bases.len(), 1);
    }

    #[test]
    fn base_overrides_are_merged_before_validation() {
        let overrides = Configuration::single(
            NS,
            NamespaceConfig::default().with_bases(
                [("extraAlias".to_string(), "testSuper".to_string())]
                    .into_iter()
                    .collect(),
            ),
        );
        let mut registry = registry().with_overrides(overrides);
        let _ = registry.mix_bases().expect("resolve");
        let aliases = registry
            .config()
            .get(&Namespace::new(NS))
            .and_then(|c| c.bases.as_ref())
            .expect("aliases");
        assert_eq!(aliases.get("extraAlias"), Some("testSuper"));
    }
}
