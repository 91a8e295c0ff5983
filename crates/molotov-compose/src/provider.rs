//! Behavior shared by the base and plugin resolvers.
//!
//! Both resolvers walk the same phases: merge the registry's overrides for
//! their target section, validate the result, then fold in extension
//! modules. Registry state is only written once every phase has succeeded.

use std::fmt;

use molotov_common::error::Result;
use molotov_common::types::Target;

use crate::config::Configuration;
use crate::config::merge::merge_target;
use crate::config::validator::require_valid;
use crate::registry::Registry;

/// Progress of a single resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvePhase {
    /// Nothing has run yet.
    Unresolved,
    /// Overrides have been merged into a working configuration.
    ConfigMerged,
    /// The working configuration passed validation.
    Validated,
    /// Extension modules were applied and results written back.
    ExtensionsApplied,
    /// A step failed; the registry was left untouched.
    Failed,
}

impl fmt::Display for ResolvePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => write!(f, "unresolved"),
            Self::ConfigMerged => write!(f, "config-merged"),
            Self::Validated => write!(f, "validated"),
            Self::ExtensionsApplied => write!(f, "extensions-applied"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// A resolution pass over one section of a registry.
pub trait Resolver {
    /// What a successful pass produces.
    type Output;

    /// Section of the namespace configuration this resolver works on.
    fn target(&self) -> Target;

    /// Current phase of the pass.
    fn phase(&self) -> ResolvePhase;

    /// Runs the pass to completion.
    ///
    /// # Errors
    ///
    /// Returns the first error hit; the registry is not modified.
    fn resolve(&mut self) -> Result<Self::Output>;

    /// Human label of this resolver ("Bases" or "Plugins").
    fn kind(&self) -> &'static str {
        self.target().kind()
    }
}

/// Phase bookkeeping plus the merge-and-validate prelude.
#[derive(Debug)]
pub(crate) struct Provider {
    target: Target,
    phase: ResolvePhase,
}

impl Provider {
    pub(crate) const fn new(target: Target) -> Self {
        Self {
            target,
            phase: ResolvePhase::Unresolved,
        }
    }

    pub(crate) const fn target(&self) -> Target {
        self.target
    }

    pub(crate) const fn phase(&self) -> ResolvePhase {
        self.phase
    }

    fn advance(&mut self, next: ResolvePhase) {
        tracing::debug!(section = %self.target, from = %self.phase, to = %next, "resolve phase");
        self.phase = next;
    }

    /// Merges overrides for this target and validates the result.
    pub(crate) fn prepare<B>(&mut self, registry: &Registry<B>) -> Result<Configuration> {
        let merged = merge_target(
            registry.config(),
            registry.overrides(),
            registry.namespace(),
            self.target,
        );
        self.advance(ResolvePhase::ConfigMerged);
        require_valid(&merged, registry.namespace(), self.target)?;
        self.advance(ResolvePhase::Validated);
        Ok(merged)
    }

    /// Records the terminal phase for `outcome` and passes it through.
    pub(crate) fn finish<T>(&mut self, outcome: Result<T>) -> Result<T> {
        match &outcome {
            Ok(_) => self.advance(ResolvePhase::ExtensionsApplied),
            Err(err) => {
                tracing::debug!(section = %self.target, code = %err.code(), "resolution failed");
                self.advance(ResolvePhase::Failed);
            }
        }
        outcome
    }
}
