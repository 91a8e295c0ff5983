//! # molotov-sdk
//!
//! Public SDK for using Molotov as a Rust library.
//!
//! Provides three main entry points:
//! - [`RegistryBuilder`](builder::RegistryBuilder): Fluent API for assembling a registry in code.
//! - [`Manifest`](manifest::Manifest): Loads a `.molotov.json` document into a registry.
//! - [`Blueprint`](blueprint::Blueprint): An inspectable base type that records how it was layered.
//!
//! # Example
//!
//! ```rust
//! use molotov_sdk::blueprint::Blueprint;
//! use molotov_sdk::builder::RegistryBuilder;
//!
//! let mut registry = RegistryBuilder::new("demo")
//!     .base("widget", Blueprint::new("WidgetBase"))
//!     .mixin("widget", "decorateA", Blueprint::mixin("decorateA"))
//!     .mixin("widget", "decorateB", Blueprint::mixin("decorateB"))
//!     .plugin("widget", "fancy", ["decorateA", "decorateB"])
//!     .build()
//!     .expect("registry");
//!
//! let plugins = registry.resolve().expect("resolve");
//! assert_eq!(plugins["widget"]["fancy"].to_string(), "decorateA(decorateB(WidgetBase))");
//! ```

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod blueprint;
pub mod builder;
pub mod manifest;
