//! The `.molotov.json` settings document.
//!
//! A manifest describes one registry in JSON: the namespaced configuration,
//! the bases and mixins available to it (as [`Blueprint`] labels), optional
//! overrides, and optional extension modules ("cocktails").
//!
//! ```json
//! {
//!   "namespace": "demo",
//!   "config": { "demo": { "basesNamespace": ["widget"], "pluginDefs": {} } },
//!   "bases": { "widget": "WidgetBase" },
//!   "mixins": { "widget": ["decorateA", "decorateB"] },
//!   "overrides": {},
//!   "cocktails": [],
//!   "settings": { "mixin_check": "strict" }
//! }
//! ```
//!
//! Raw JSON can carry any shape, so the construction guards a typed
//! [`Registry`] makes unrepresentable are enforced here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use molotov_common::config::ResolverSettings;
use molotov_common::constants::SETTINGS_FILE;
use molotov_common::error::{MolotovError, Result};
use molotov_common::types::Namespace;
use molotov_compose::cocktail::ExtensionModule;
use molotov_compose::config::Configuration;
use molotov_compose::config::validator::{json_type, parse_document};
use molotov_compose::mixin::{BaseMap, MixinMap};
use molotov_compose::registry::Registry;
use serde_json::{Map, Value};

use crate::blueprint::Blueprint;

/// Location of the settings file inside `dir`.
#[must_use]
pub fn settings_path(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE)
}

/// Base name to blueprint label.
type BaseLabels = BTreeMap<String, String>;

/// Base name to mixin names.
type MixinNames = BTreeMap<String, Vec<String>>;

/// One extension module as declared in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CocktailSpec {
    config: Configuration,
    bases: BaseLabels,
    mixins: MixinNames,
}

impl CocktailSpec {
    /// Configuration fragment of the module.
    #[must_use]
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    fn into_module(self) -> Result<ExtensionModule<Blueprint>> {
        ExtensionModule::new(self.config, Some(blueprints(self.bases)), Some(mixins(self.mixins)))
    }
}

/// A parsed, guard-checked manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    namespace: Namespace,
    config: Configuration,
    bases: BaseLabels,
    mixins: MixinNames,
    overrides: Configuration,
    cocktails: Vec<CocktailSpec>,
    settings: ResolverSettings,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `Serialization` if it is not
    /// JSON, and any guard error from [`Manifest::from_value`].
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "loading manifest");
        let raw = std::fs::read_to_string(path).map_err(|source| MolotovError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&raw)?;
        Self::from_value(&value)
    }

    /// Loads `.molotov.json` from `dir`.
    ///
    /// # Errors
    ///
    /// See [`Manifest::load`].
    pub fn discover(dir: &Path) -> Result<Self> {
        Self::load(&settings_path(dir))
    }

    /// Checks and converts a raw manifest document.
    ///
    /// # Errors
    ///
    /// - `ConfigRequired` if `config` is missing, not an object, or empty.
    /// - `BasesRequired` if `bases` is missing or not an object of strings.
    /// - `MixinsRequired` if `mixins` is missing, malformed, or names none.
    /// - `MalformedOverrides` if `overrides` is present but not an object.
    /// - `MalformedExtensionArray` if `cocktails` is present but not an array.
    /// - `InvalidExtensionConfig` if a cocktail lacks a usable `config`.
    /// - `MalformedConfiguration` if a configuration document has the wrong
    ///   shape or the namespace cannot be inferred.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(doc) = value else {
            return Err(MolotovError::ConfigRequired {
                message: format!("manifest must be an object, got {}", json_type(value)),
            });
        };

        let config = required_config(doc.get("config"))?;
        let bases = base_labels(doc.get("bases"))?;
        let mixins = mixin_names(doc.get("mixins"))?;
        let overrides = overrides(doc.get("overrides"))?;
        let cocktails = cocktails(doc.get("cocktails"))?;
        let settings = match doc.get("settings") {
            None | Some(Value::Null) => ResolverSettings::default(),
            Some(raw) => serde_json::from_value(raw.clone())?,
        };
        let namespace = match doc.get("namespace") {
            Some(Value::String(name)) => Namespace::new(name.as_str()),
            None | Some(Value::Null) => infer_namespace(&config)?,
            Some(other) => {
                return Err(MolotovError::MalformedConfiguration {
                    namespace: String::new(),
                    message: format!("namespace must be a string, got {}", json_type(other)),
                });
            }
        };

        tracing::debug!(
            namespace = %namespace,
            bases = bases.len(),
            cocktails = cocktails.len(),
            "parsed manifest"
        );
        Ok(Self {
            namespace,
            config,
            bases,
            mixins,
            overrides,
            cocktails,
            settings,
        })
    }

    /// The namespace the registry resolves.
    #[must_use]
    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The base configuration.
    #[must_use]
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// The override fragment, empty when none was given.
    #[must_use]
    pub const fn overrides(&self) -> &Configuration {
        &self.overrides
    }

    /// Declared extension modules in application order.
    #[must_use]
    pub fn cocktails(&self) -> &[CocktailSpec] {
        &self.cocktails
    }

    /// Resolver settings.
    #[must_use]
    pub const fn settings(&self) -> ResolverSettings {
        self.settings
    }

    /// Builds a registry of [`Blueprint`]s from this manifest.
    ///
    /// # Errors
    ///
    /// Propagates construction errors from [`Registry::new`] and
    /// [`ExtensionModule::new`].
    pub fn into_registry(self) -> Result<Registry<Blueprint>> {
        let extensions = self
            .cocktails
            .into_iter()
            .map(CocktailSpec::into_module)
            .collect::<Result<Vec<_>>>()?;
        Ok(Registry::new(
            self.config,
            self.namespace,
            blueprints(self.bases),
            mixins(self.mixins),
        )?
        .with_overrides(self.overrides)
        .with_extensions(extensions)
        .with_settings(self.settings))
    }
}

fn required_config(raw: Option<&Value>) -> Result<Configuration> {
    let Some(raw) = raw.filter(|v| !v.is_null()) else {
        return Err(MolotovError::ConfigRequired {
            message: "no \"config\" given".into(),
        });
    };
    match raw {
        Value::Object(map) if map.is_empty() => Err(MolotovError::ConfigRequired {
            message: "\"config\" declares no namespace".into(),
        }),
        Value::Object(_) => parse_document(raw),
        other => Err(MolotovError::ConfigRequired {
            message: format!("\"config\" must be an object, got {}", json_type(other)),
        }),
    }
}

fn base_labels(raw: Option<&Value>) -> Result<BaseLabels> {
    let Some(Value::Object(map)) = raw else {
        return Err(MolotovError::BasesRequired {
            message: format!(
                "\"bases\" must be an object, got {}",
                raw.map_or("nothing", json_type)
            ),
        });
    };
    map.iter()
        .map(|(name, label)| match label {
            Value::String(label) => Ok((name.clone(), label.clone())),
            other => Err(MolotovError::BasesRequired {
                message: format!(
                    "base \"{name}\" must be a string label, got {}",
                    json_type(other)
                ),
            }),
        })
        .collect()
}

fn mixin_names(raw: Option<&Value>) -> Result<MixinNames> {
    let Some(Value::Object(map)) = raw else {
        return Err(MolotovError::MixinsRequired {
            message: format!(
                "\"mixins\" must be an object, got {}",
                raw.map_or("nothing", json_type)
            ),
        });
    };
    let names = string_lists(map).map_err(|message| MolotovError::MixinsRequired { message })?;
    if names.values().all(Vec::is_empty) {
        return Err(MolotovError::MixinsRequired {
            message: "no mixins supplied".into(),
        });
    }
    Ok(names)
}

fn string_lists(map: &Map<String, Value>) -> std::result::Result<MixinNames, String> {
    map.iter()
        .map(|(base, list)| {
            let Value::Array(items) = list else {
                return Err(format!(
                    "mixins for \"{base}\" must be an array, got {}",
                    json_type(list)
                ));
            };
            let names = items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_owned)
                        .ok_or_else(|| format!("mixin names for \"{base}\" must be strings"))
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok((base.clone(), names))
        })
        .collect()
}

fn overrides(raw: Option<&Value>) -> Result<Configuration> {
    match raw {
        None | Some(Value::Null) => Ok(Configuration::new()),
        Some(value @ Value::Object(_)) => parse_document(value),
        Some(other) => Err(MolotovError::MalformedOverrides {
            found: json_type(other).into(),
        }),
    }
}

fn cocktails(raw: Option<&Value>) -> Result<Vec<CocktailSpec>> {
    match raw {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().enumerate().map(cocktail).collect(),
        Some(other) => Err(MolotovError::MalformedExtensionArray {
            found: json_type(other).into(),
        }),
    }
}

fn cocktail((index, raw): (usize, &Value)) -> Result<CocktailSpec> {
    let invalid = |message: String| MolotovError::InvalidExtensionConfig {
        message: format!("cocktail {index}: {message}"),
    };
    let Value::Object(doc) = raw else {
        return Err(invalid(format!("expected an object, got {}", json_type(raw))));
    };
    let config = match doc.get("config") {
        Some(value @ Value::Object(map)) if !map.is_empty() => parse_document(value)?,
        Some(Value::Object(_)) => return Err(invalid("\"config\" declares no namespace".into())),
        other => {
            return Err(invalid(format!(
                "\"config\" must be an object, got {}",
                other.map_or("nothing", json_type)
            )));
        }
    };
    let bases = match doc.get("bases") {
        None | Some(Value::Null) => BaseLabels::new(),
        Some(value) => base_labels(Some(value)).map_err(|e| invalid(e.to_string()))?,
    };
    let mixins = match doc.get("mixins") {
        None | Some(Value::Null) => MixinNames::new(),
        Some(Value::Object(map)) => string_lists(map).map_err(invalid)?,
        Some(other) => {
            return Err(invalid(format!(
                "\"mixins\" must be an object, got {}",
                json_type(other)
            )));
        }
    };
    Ok(CocktailSpec {
        config,
        bases,
        mixins,
    })
}

/// Picks the only namespace that declares base aliases.
fn infer_namespace(config: &Configuration) -> Result<Namespace> {
    let mut candidates = config
        .iter()
        .filter(|(_, ns)| ns.bases.is_some())
        .map(|(name, _)| name);
    match (candidates.next(), candidates.next()) {
        (Some(only), None) => Ok(only.clone()),
        (None, _) => Err(MolotovError::MalformedConfiguration {
            namespace: String::new(),
            message: "no namespace declares basesNamespace; set \"namespace\"".into(),
        }),
        (Some(_), Some(_)) => Err(MolotovError::MalformedConfiguration {
            namespace: String::new(),
            message: "several namespaces declare basesNamespace; set \"namespace\"".into(),
        }),
    }
}

fn blueprints(labels: BaseLabels) -> BaseMap<Blueprint> {
    labels
        .into_iter()
        .map(|(name, label)| (name, Blueprint::new(label)))
        .collect()
}

fn mixins(names: MixinNames) -> MixinMap<Blueprint> {
    names
        .into_iter()
        .map(|(base, names)| {
            let named = names
                .into_iter()
                .map(|name| {
                    let mixin = Blueprint::mixin(name.as_str());
                    (name, mixin)
                })
                .collect();
            (base, named)
        })
        .collect()
}
