//! Mixin transforms and the maps that hold bases, mixins, and results.
//!
//! A base is any cloneable value `B`, typically a shared trait object. A
//! mixin wraps a `B` and returns a new `B` that delegates to the one it
//! wrapped, adding or overriding behavior along the way.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// A named capability-wrapping transform over base values.
pub struct Mixin<B> {
    transform: Arc<dyn Fn(B) -> B + Send + Sync>,
}

impl<B> Mixin<B> {
    /// Wraps a transform function.
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(B) -> B + Send + Sync + 'static,
    {
        Self {
            transform: Arc::new(transform),
        }
    }

    /// Applies this mixin around `inner`.
    pub fn apply(&self, inner: B) -> B {
        (self.transform)(inner)
    }
}

impl<B> Clone for Mixin<B> {
    fn clone(&self) -> Self {
        Self {
            transform: Arc::clone(&self.transform),
        }
    }
}

impl<B> fmt::Debug for Mixin<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mixin(..)")
    }
}

/// Base name to base value.
pub type BaseMap<B> = BTreeMap<String, B>;

/// Base name to mixin name to mixin.
pub type MixinMap<B> = BTreeMap<String, BTreeMap<String, Mixin<B>>>;

/// Base name to plugin name to composed value.
pub type ComposedMap<B> = BTreeMap<String, BTreeMap<String, B>>;

/// Every mixin name present in `mixins`, across all bases.
#[must_use]
pub fn mixin_names<B>(mixins: &MixinMap<B>) -> BTreeSet<&str> {
    mixins
        .values()
        .flat_map(BTreeMap::keys)
        .map(String::as_str)
        .collect()
}

/// Layers `incoming` over `mixins`; entries of `incoming` win.
pub fn merge_mixins<B>(mixins: &mut MixinMap<B>, incoming: &MixinMap<B>) {
    for (base, named) in incoming {
        let entry = mixins.entry(base.clone()).or_default();
        for (name, mixin) in named {
            let _ = entry.insert(name.clone(), mixin.clone());
        }
    }
}
