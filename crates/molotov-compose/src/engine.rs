//! Plugin composition: folds mixins onto bases.
//!
//! For a plugin declared as `[m1, m2, m3]` on base `B` the result is
//! `m1(m2(m3(B)))`: the list is applied in reverse so the first-listed
//! mixin ends up as the outermost layer and the base sits innermost.

use std::collections::BTreeMap;

use molotov_common::config::MixinCheck;
use molotov_common::error::{MolotovError, Result};

use crate::config::PluginDefinition;
use crate::mixin::{BaseMap, ComposedMap, Mixin, MixinMap};

/// Composes every plugin in `definitions` using the strict mixin check.
///
/// # Errors
///
/// See [`compose_with`].
pub fn compose<B: Clone>(
    definitions: &PluginDefinition,
    mixins: &MixinMap<B>,
    bases: &BaseMap<B>,
) -> Result<ComposedMap<B>> {
    compose_with(definitions, mixins, bases, MixinCheck::Strict)
}

/// Composes every plugin in `definitions`.
///
/// Nothing is returned unless every plugin composes.
///
/// # Errors
///
/// - `NoSuperWithThisName` if a definition names a base missing from `bases`.
/// - `PluginCantFindMixin` if a plugin lists no mixins, or if its mixins
///   are unavailable for its base: any of them under [`MixinCheck::Strict`],
///   all of them under [`MixinCheck::Intersecting`].
pub fn compose_with<B: Clone>(
    definitions: &PluginDefinition,
    mixins: &MixinMap<B>,
    bases: &BaseMap<B>,
    check: MixinCheck,
) -> Result<ComposedMap<B>> {
    let empty = BTreeMap::new();
    let mut composed = ComposedMap::new();

    for (base_name, plugins) in definitions.iter() {
        let Some(base) = bases.get(base_name) else {
            return Err(MolotovError::NoSuperWithThisName {
                base: base_name.to_owned(),
            });
        };
        let available = mixins.get(base_name).unwrap_or(&empty);

        let mut built = BTreeMap::new();
        for (plugin, names) in plugins {
            check_mixins(base_name, plugin, names, available, check)?;
            let value = fold(base, names, available);
            tracing::debug!(
                base = base_name,
                plugin = %plugin,
                layers = names.len(),
                "composed plugin"
            );
            let _ = built.insert(plugin.clone(), value);
        }
        let _ = composed.insert(base_name.to_owned(), built);
    }

    Ok(composed)
}

fn check_mixins<B>(
    base: &str,
    plugin: &str,
    names: &[String],
    available: &BTreeMap<String, Mixin<B>>,
    check: MixinCheck,
) -> Result<()> {
    let missing: Vec<String> = names
        .iter()
        .filter(|n| !available.contains_key(n.as_str()))
        .cloned()
        .collect();

    let rejected = match check {
        MixinCheck::Strict => names.is_empty() || !missing.is_empty(),
        MixinCheck::Intersecting => missing.len() == names.len(),
    };
    if rejected {
        return Err(MolotovError::PluginCantFindMixin {
            base: base.to_owned(),
            plugin: plugin.to_owned(),
            missing,
        });
    }
    if !missing.is_empty() {
        tracing::warn!(base, plugin, missing = ?missing, "skipping unresolvable mixins");
    }
    Ok(())
}

fn fold<B: Clone>(base: &B, names: &[String], available: &BTreeMap<String, Mixin<B>>) -> B {
    names
        .iter()
        .rev()
        .filter_map(|name| available.get(name))
        .fold(base.clone(), |inner, mixin| mixin.apply(inner))
}
