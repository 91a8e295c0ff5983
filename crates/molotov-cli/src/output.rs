//! Formatted output helpers for CLI commands.

use molotov_common::error::MolotovError;
use molotov_common::types::Namespace;
use molotov_compose::mixin::ComposedMap;
use molotov_sdk::blueprint::Blueprint;
use serde_json::{Map, Value, json};

/// Converts a library error into an `anyhow` error prefixed with its code.
pub fn coded(err: MolotovError) -> anyhow::Error {
    anyhow::anyhow!("[{}] {err}", err.code())
}

/// A title underlined with a double rule of the same width.
#[must_use]
pub fn heading(title: &str) -> String {
    let rule = "\u{2550}".repeat(title.chars().count());
    format!("{title}\n{rule}")
}

/// One plan line: `base.plugin = layering`.
#[must_use]
pub fn plan_line(base: &str, plugin: &str, blueprint: &Blueprint) -> String {
    format!("{base}.{plugin} = {blueprint}")
}

/// The plan as a JSON document keyed by base, then plugin.
#[must_use]
pub fn plan_json(namespace: &Namespace, plugins: &ComposedMap<Blueprint>) -> Value {
    let bases: Map<String, Value> = plugins
        .iter()
        .map(|(base, named)| {
            let entries: Map<String, Value> = named
                .iter()
                .map(|(plugin, blueprint)| {
                    let entry = json!({
                        "base": blueprint.base(),
                        "layers": blueprint.layers(),
                        "composed": blueprint.to_string(),
                    });
                    (plugin.clone(), entry)
                })
                .collect();
            (base.clone(), Value::Object(entries))
        })
        .collect();
    json!({ "namespace": namespace.as_str(), "plugins": bases })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn fancy() -> Blueprint {
        Blueprint::new("WidgetBase").wrap("decorateB").wrap("decorateA")
    }

    #[test]
    fn heading_rule_matches_title_width() {
        let rendered = heading("Plan");
        assert_eq!(rendered, "Plan\n\u{2550}\u{2550}\u{2550}\u{2550}");
    }

    #[test]
    fn plan_line_shows_layering() {
        assert_eq!(
            plan_line("widget", "fancy", &fancy()),
            "widget.fancy = decorateA(decorateB(WidgetBase))"
        );
    }

    #[test]
    fn plan_json_nests_base_and_plugin() {
        let mut plugins = ComposedMap::new();
        let _ = plugins.insert(
            "widget".to_string(),
            BTreeMap::from([("fancy".to_string(), fancy())]),
        );
        let plan = plan_json(&Namespace::new("demo"), &plugins);
        assert_eq!(plan["namespace"], "demo");
        assert_eq!(
            plan["plugins"]["widget"]["fancy"]["layers"],
            json!(["decorateA", "decorateB"])
        );
        assert_eq!(
            plan["plugins"]["widget"]["fancy"]["composed"],
            "decorateA(decorateB(WidgetBase))"
        );
    }

    #[test]
    fn coded_prefixes_error_code() {
        let err = coded(MolotovError::NoSuperWithThisName {
            base: "widget".into(),
        });
        assert!(err.to_string().starts_with("[MOLOTOV_PLUGIN_MAKER_NO_SUPER_WITH_THIS_NAME]"));
    }
}
