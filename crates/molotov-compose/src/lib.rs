//! # molotov-compose
//!
//! Configuration-driven mixin composition.
//!
//! Handles:
//! - **Config**: Namespaced base aliases and plugin definitions, deep merge
//!   of override fragments, and shape validation.
//! - **Engine**: Folding ordered mixin lists onto bases.
//! - **Cocktails**: Extension modules that contribute bases, mixins, and
//!   configuration to a host.
//! - **Resolvers**: The base ("mixologist") and plugin ("polttopullo")
//!   passes that turn a [`registry::Registry`] into composed plugins.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod cocktail;
pub mod config;
pub mod engine;
pub mod mixin;
pub mod mixologist;
pub mod polttopullo;
pub mod provider;
pub mod registry;
