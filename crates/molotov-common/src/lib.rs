//! # molotov-common
//!
//! Shared error definitions, configuration keys, resolver settings, and
//! domain primitives used across the Molotov workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and provides the vocabulary that the composition core,
//! the SDK, and the CLI all speak.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
