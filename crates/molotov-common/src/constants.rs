//! Configuration keys, file names, and other fixed identifiers.

/// Key under a namespace holding the base alias map.
pub const BASES_KEY: &str = "basesNamespace";

/// Historical spelling of [`BASES_KEY`], still accepted when reading documents.
pub const LEGACY_BASES_KEY: &str = "supersNameSpace";

/// Key under a namespace holding the plugin definitions.
pub const PLUGINS_KEY: &str = "pluginDefs";

/// Historical spelling of [`PLUGINS_KEY`], still accepted when reading documents.
pub const LEGACY_PLUGINS_KEY: &str = "molotovPlugins";

/// File name of the per-module settings document.
pub const SETTINGS_FILE: &str = ".molotov.json";

/// Separator used when listing several names in an error message.
pub const NAME_SEPARATOR: &str = ", ";

