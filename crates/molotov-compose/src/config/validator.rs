//! Shape checks for configuration before it is trusted.
//!
//! [`validate`] is the cheap readiness probe used while fragments are
//! still being layered. [`require_valid`] turns a failed probe into a
//! `MalformedConfiguration` error, and [`parse_document`] checks raw JSON
//! against the document schema.

use molotov_common::error::{MolotovError, Result};
use molotov_common::types::{Namespace, Target};
use serde_json::Value;

use super::{Configuration, NamespaceConfig};

/// Returns `true` if `namespace` declares both its base aliases and the
/// `target` section. Empty sections count as present.
#[must_use]
pub fn validate(config: &Configuration, namespace: &Namespace, target: Target) -> bool {
    missing_section(config, namespace, target).is_none()
}

/// Like [`validate`] but reports which requirement failed.
///
/// # Errors
///
/// Returns `MalformedConfiguration` naming the namespace and the missing
/// section.
pub fn require_valid(config: &Configuration, namespace: &Namespace, target: Target) -> Result<()> {
    match missing_section(config, namespace, target) {
        None => Ok(()),
        Some(message) => Err(MolotovError::MalformedConfiguration {
            namespace: namespace.to_string(),
            message,
        }),
    }
}

fn missing_section(
    config: &Configuration,
    namespace: &Namespace,
    target: Target,
) -> Option<String> {
    let Some(ns_config) = config.get(namespace) else {
        return Some("namespace is not configured".into());
    };
    if ns_config.bases.is_none() {
        return Some(format!("missing \"{}\" section", Target::Bases.key()));
    }
    if target == Target::Plugins && ns_config.plugins.is_none() {
        return Some(format!("missing \"{}\" section", Target::Plugins.key()));
    }
    None
}

/// Parses a raw JSON document into a [`Configuration`].
///
/// The document must be an object keyed by namespace, each value an object
/// whose `pluginDefs` maps base names to objects of plugin name to an array
/// of mixin names.
///
/// # Errors
///
/// Returns `MalformedConfiguration` if the document does not match that
/// shape.
pub fn parse_document(value: &Value) -> Result<Configuration> {
    let Value::Object(namespaces) = value else {
        return Err(MolotovError::MalformedConfiguration {
            namespace: String::new(),
            message: format!("expected an object keyed by namespace, got {}", json_type(value)),
        });
    };

    let mut config = Configuration::new();
    for (name, body) in namespaces {
        if !body.is_object() {
            return Err(MolotovError::MalformedConfiguration {
                namespace: name.clone(),
                message: format!("expected an object, got {}", json_type(body)),
            });
        }
        let ns_config: NamespaceConfig =
            serde_json::from_value(body.clone()).map_err(|e| {
                MolotovError::MalformedConfiguration {
                    namespace: name.clone(),
                    message: e.to_string(),
                }
            })?;
        let _ = config.insert(name.as_str(), ns_config);
    }
    tracing::debug!(namespaces = namespaces.len(), "parsed configuration document");
    Ok(config)
}

/// Names the JSON type of a value for error messages.
#[must_use]
pub const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
