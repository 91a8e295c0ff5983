//! Settings that tune how a resolution pass behaves.

use serde::{Deserialize, Serialize};

/// How strictly a plugin's mixin list is checked against available mixins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixinCheck {
    /// Every listed mixin must exist for the plugin's base.
    #[default]
    Strict,
    /// At least one listed mixin must exist; unresolvable names are skipped.
    Intersecting,
}

/// Root settings for a resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Mixin availability check applied by the composition engine.
    #[serde(default)]
    pub mixin_check: MixinCheck,
}

impl ResolverSettings {
    /// Settings that reproduce the historical "any listed mixin" check.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            mixin_check: MixinCheck::Intersecting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict() {
        assert_eq!(ResolverSettings::default().mixin_check, MixinCheck::Strict);
    }

    #[test]
    fn deserializes_from_snake_case() {
        let settings: ResolverSettings =
            serde_json::from_str(r#"{"mixin_check":"intersecting"}"#).expect("parse");
        assert_eq!(settings, ResolverSettings::lenient());
    }

    #[test]
    fn missing_field_falls_back_to_default() {
        let settings: ResolverSettings = serde_json::from_str("{}").expect("parse");
        assert_eq!(settings.mixin_check, MixinCheck::Strict);
    }
}
