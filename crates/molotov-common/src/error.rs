//! Unified error types for the Molotov workspace.
//!
//! Every failure carries a stable [`ErrorCode`] so calling code can branch
//! on [`MolotovError::code`] instead of matching on message text.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Stable identifier for each kind of [`MolotovError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Configuration missing, empty, or not an object.
    ConfigRequired,
    /// Base map missing or not an object.
    BasesRequired,
    /// Mixin map missing, empty, or not an object.
    MixinsRequired,
    /// Override fragment is not an object.
    MalformedOverrides,
    /// Extension modules were not supplied as an array.
    MalformedExtensionArray,
    /// Merged configuration lacks a required key.
    MalformedConfiguration,
    /// A plugin definition names a base that was never resolved.
    NoSuperWithThisName,
    /// A plugin definition names mixins that are not available.
    PluginCantFindMixin,
    /// An extension module declares base aliases nobody supplies.
    CocktailBasesNotDefined,
    /// An extension module's plugin definitions use unknown mixins.
    CocktailConfigUsesUndefinedMixins,
    /// An extension module was built without a usable configuration.
    InvalidExtensionConfig,
    /// Reading a settings document failed.
    Io,
    /// Decoding a settings document failed.
    Serialization,
}

impl ErrorCode {
    /// Returns the stable string form of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigRequired => "MOLOTOV_CONFIG_REQUIRED",
            Self::BasesRequired => "MOLOTOV_SUPERS_REQUIRED",
            Self::MixinsRequired => "MOLOTOV_PLUGINS_REQUIRED",
            Self::MalformedOverrides => "MOLOTOV_MALFORMED_OVERRIDES",
            Self::MalformedExtensionArray => "MOLOTOV_MALFORMED_COCKTAIL_ARRAY",
            Self::MalformedConfiguration => "MOLOTOV_MALFORMED_MOLOTOV_CONFIG",
            Self::NoSuperWithThisName => "MOLOTOV_PLUGIN_MAKER_NO_SUPER_WITH_THIS_NAME",
            Self::PluginCantFindMixin => "MOLOTOV_PLUGIN_MAKER_PLUGIN_CANT_FIND_MIXIN",
            Self::CocktailBasesNotDefined => "MOLOTOV_COCKTAIL_SUPERS_NOT_DEFINED",
            Self::CocktailConfigUsesUndefinedMixins => {
                "MOLOTOV_COCKTAIL_CONFIG_USES_UNDEFINED_MIXINS"
            }
            Self::InvalidExtensionConfig => "VALID_COCKTAIL_CONFIG_REQUIRED",
            Self::Io => "MOLOTOV_IO",
            Self::Serialization => "MOLOTOV_SERIALIZATION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum MolotovError {
    /// Configuration missing, empty, or not an object.
    #[error("configuration is required and must be a non-empty object: {message}")]
    ConfigRequired {
        /// What was wrong with the supplied configuration.
        message: String,
    },

    /// Base map missing or not an object.
    #[error("bases are required and must be an object: {message}")]
    BasesRequired {
        /// What was wrong with the supplied bases.
        message: String,
    },

    /// Mixin map missing, empty, or not an object.
    #[error("mixins are required and must be a non-empty object: {message}")]
    MixinsRequired {
        /// What was wrong with the supplied mixins.
        message: String,
    },

    /// Override fragment is not an object.
    #[error("configuration overrides must be an object, got {found}")]
    MalformedOverrides {
        /// JSON type that was supplied instead.
        found: String,
    },

    /// Extension modules were not supplied as an array.
    #[error("extension modules must be passed as an array, got {found}")]
    MalformedExtensionArray {
        /// JSON type that was supplied instead.
        found: String,
    },

    /// Merged configuration lacks a required key.
    #[error("malformed configuration for namespace \"{namespace}\": {message}")]
    MalformedConfiguration {
        /// Namespace whose configuration was rejected.
        namespace: String,
        /// Which check failed.
        message: String,
    },

    /// A plugin definition names a base that was never resolved.
    #[error("plugin definitions reference base \"{base}\" which does not exist")]
    NoSuperWithThisName {
        /// Missing base name.
        base: String,
    },

    /// A plugin definition names mixins that are not available.
    #[error("plugin \"{base}.{plugin}\" cannot find mixins: {}", missing.join(crate::constants::NAME_SEPARATOR))]
    PluginCantFindMixin {
        /// Base the plugin is built on.
        base: String,
        /// Plugin name.
        plugin: String,
        /// Mixin names that could not be resolved.
        missing: Vec<String>,
    },

    /// An extension module declares base aliases nobody supplies.
    #[error("extension module declares bases that are not defined: {}", missing.join(crate::constants::NAME_SEPARATOR))]
    CocktailBasesNotDefined {
        /// Base names referenced by aliases but absent everywhere.
        missing: Vec<String>,
    },

    /// An extension module's plugin definitions use unknown mixins.
    #[error("extension module config uses undefined mixins: {}", missing.join(crate::constants::NAME_SEPARATOR))]
    CocktailConfigUsesUndefinedMixins {
        /// Mixin names absent from both host and module.
        missing: Vec<String>,
    },

    /// An extension module was built without a usable configuration.
    #[error("extension modules must at least have a fully formed config object: {message}")]
    InvalidExtensionConfig {
        /// What was wrong with the module configuration.
        message: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl MolotovError {
    /// Returns the stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::ConfigRequired { .. } => ErrorCode::ConfigRequired,
            Self::BasesRequired { .. } => ErrorCode::BasesRequired,
            Self::MixinsRequired { .. } => ErrorCode::MixinsRequired,
            Self::MalformedOverrides { .. } => ErrorCode::MalformedOverrides,
            Self::MalformedExtensionArray { .. } => ErrorCode::MalformedExtensionArray,
            Self::MalformedConfiguration { .. } => ErrorCode::MalformedConfiguration,
            Self::NoSuperWithThisName { .. } => ErrorCode::NoSuperWithThisName,
            Self::PluginCantFindMixin { .. } => ErrorCode::PluginCantFindMixin,
            Self::CocktailBasesNotDefined { .. } => ErrorCode::CocktailBasesNotDefined,
            Self::CocktailConfigUsesUndefinedMixins { .. } => {
                ErrorCode::CocktailConfigUsesUndefinedMixins
            }
            Self::InvalidExtensionConfig { .. } => ErrorCode::InvalidExtensionConfig,
            Self::Io { .. } => ErrorCode::Io,
            Self::Serialization { .. } => ErrorCode::Serialization,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, MolotovError>;
