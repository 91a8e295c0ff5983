//! Integration tests for loading manifests from disk and resolving them.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use molotov_common::error::ErrorCode;
use molotov_sdk::manifest::{Manifest, settings_path};
use serde_json::{Value, json};

fn write_manifest(dir: &Path, doc: &Value) {
    fs::write(settings_path(dir), doc.to_string()).expect("write manifest");
}

fn demo() -> Value {
    json!({
        "namespace": "demo",
        "config": {
            "demo": {
                "basesNamespace": { "widget": "widget" },
                "pluginDefs": { "widget": { "fancy": ["decorateA", "decorateB"] } }
            }
        },
        "bases": { "widget": "WidgetBase" },
        "mixins": { "widget": ["decorateA", "decorateB"] }
    })
}

fn cocktail_fixture() -> Value {
    json!({
        "config": {
            "testMolotovImplementer": {
                "basesNamespace": ["testSuper"],
                "pluginDefs": {
                    "testSuper": {
                        "onlyPluginOne": ["mixinOne"],
                        "pluginAll": ["mixinOne", "mixinTwo", "mixinThree"]
                    }
                }
            }
        },
        "bases": { "testSuper": "TestSuper" },
        "mixins": { "testSuper": ["mixinOne", "mixinTwo", "mixinThree"] },
        "cocktails": [
            {
                "config": {
                    "testMolotovImplementer": {
                        "basesNamespace": ["testSuper", "testSuperTwo"],
                        "pluginDefs": {
                            "testSuperTwo": { "pluginSeven": ["mixinSeven"] },
                            "testSuper": { "pluginAll": ["mixinFour", "mixinOne"] }
                        }
                    }
                },
                "bases": { "testSuper": "GuestSuper", "testSuperTwo": "TestSuperTwo" },
                "mixins": {
                    "testSuper": ["mixinFour"],
                    "testSuperTwo": ["mixinSeven"]
                }
            }
        ]
    })
}

// ── Loading ──────────────────────────────────────────────────────────

#[test]
fn discover_loads_settings_file_and_resolves() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_manifest(dir.path(), &demo());

    let mut registry = Manifest::discover(dir.path())
        .expect("manifest")
        .into_registry()
        .expect("registry");
    let plugins = registry.resolve().expect("resolve");
    assert_eq!(
        plugins["widget"]["fancy"].to_string(),
        "decorateA(decorateB(WidgetBase))"
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = Manifest::discover(dir.path()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::Io);
    assert!(err.to_string().contains(".molotov.json"));
}

#[test]
fn invalid_json_is_a_serialization_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(settings_path(dir.path()), "{ not json").expect("write");
    let err = Manifest::discover(dir.path()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::Serialization);
}

// ── Overrides and cocktails ──────────────────────────────────────────

#[test]
fn overrides_add_extra_plugin() {
    let mut doc = demo();
    doc["overrides"] =
        json!({ "demo": { "pluginDefs": { "widget": { "extra": ["decorateA"] } } } });

    let mut registry = Manifest::from_value(&doc)
        .expect("manifest")
        .into_registry()
        .expect("registry");
    let plugins = registry.resolve().expect("resolve");
    assert_eq!(plugins["widget"].len(), 2);
    assert_eq!(plugins["widget"]["extra"].to_string(), "decorateA(WidgetBase)");
}

#[test]
fn cocktail_contributes_bases_mixins_and_plugins() {
    let manifest = Manifest::from_value(&cocktail_fixture()).expect("manifest");
    assert_eq!(manifest.namespace().as_str(), "testMolotovImplementer");
    assert_eq!(manifest.cocktails().len(), 1);
    let cocktail_plugins = manifest.cocktails()[0]
        .config()
        .get(manifest.namespace())
        .and_then(|c| c.plugins.as_ref())
        .expect("cocktail plugin definitions");
    assert_eq!(
        cocktail_plugins.mixins("testSuper", "pluginAll"),
        Some(&["mixinFour".to_string(), "mixinOne".to_string()][..])
    );

    let mut registry = manifest.into_registry().expect("registry");
    let plugins = registry.resolve().expect("resolve");

    assert_eq!(
        plugins["testSuperTwo"]["pluginSeven"].to_string(),
        "mixinSeven(TestSuperTwo)"
    );
    assert_eq!(
        plugins["testSuper"]["pluginAll"].to_string(),
        "mixinFour(mixinOne(GuestSuper))"
    );
    assert_eq!(
        plugins["testSuper"]["onlyPluginOne"].to_string(),
        "mixinOne(GuestSuper)"
    );
}

#[test]
fn cocktail_aliasing_unknown_base_fails() {
    let mut doc = cocktail_fixture();
    doc["cocktails"][0]["config"]["testMolotovImplementer"]["basesNamespace"] =
        json!({ "testSuper": "testSuper", "gumby": "notAtAllAKey" });

    let mut registry = Manifest::from_value(&doc)
        .expect("manifest")
        .into_registry()
        .expect("registry");
    let err = registry.resolve().unwrap_err();
    assert_eq!(err.code(), ErrorCode::CocktailBasesNotDefined);
}

#[test]
fn cocktail_using_unknown_mixin_fails() {
    let mut doc = cocktail_fixture();
    doc["cocktails"][0]["config"]["testMolotovImplementer"]["pluginDefs"]["testSuper"]
        ["pluginGhost"] = json!(["mixinNine"]);

    let mut registry = Manifest::from_value(&doc)
        .expect("manifest")
        .into_registry()
        .expect("registry");
    let err = registry.resolve().unwrap_err();
    assert_eq!(err.code(), ErrorCode::CocktailConfigUsesUndefinedMixins);
    assert!(err.to_string().contains("mixinNine"));
}

#[test]
fn lenient_settings_skip_missing_mixins() {
    let mut doc = demo();
    doc["config"]["demo"]["pluginDefs"]["widget"]["partial"] = json!(["decorateA", "ghost"]);
    doc["settings"] = json!({ "mixin_check": "intersecting" });

    let mut registry = Manifest::from_value(&doc)
        .expect("manifest")
        .into_registry()
        .expect("registry");
    let plugins = registry.resolve().expect("resolve");
    assert_eq!(plugins["widget"]["partial"].to_string(), "decorateA(WidgetBase)");
}

// ── Guards ───────────────────────────────────────────────────────────

fn guard_code(mutate: impl FnOnce(&mut Value)) -> ErrorCode {
    let mut doc = demo();
    mutate(&mut doc);
    Manifest::from_value(&doc).unwrap_err().code()
}

#[test]
fn guards_map_to_error_codes() {
    assert_eq!(
        guard_code(|d| d["config"] = json!({})),
        ErrorCode::ConfigRequired
    );
    assert_eq!(
        guard_code(|d| d["config"] = json!([1, 2])),
        ErrorCode::ConfigRequired
    );
    assert_eq!(
        guard_code(|d| d["bases"] = json!("not-an-object")),
        ErrorCode::BasesRequired
    );
    assert_eq!(
        guard_code(|d| d["bases"] = json!({ "widget": 3 })),
        ErrorCode::BasesRequired
    );
    assert_eq!(
        guard_code(|d| d["mixins"] = json!({})),
        ErrorCode::MixinsRequired
    );
    assert_eq!(
        guard_code(|d| d["mixins"] = json!({ "widget": "decorateA" })),
        ErrorCode::MixinsRequired
    );
    assert_eq!(
        guard_code(|d| d["overrides"] = json!("nope")),
        ErrorCode::MalformedOverrides
    );
    assert_eq!(
        guard_code(|d| d["cocktails"] = json!({ "config": {} })),
        ErrorCode::MalformedExtensionArray
    );
    assert_eq!(
        guard_code(|d| d["cocktails"] = json!([{ "config": "x" }])),
        ErrorCode::InvalidExtensionConfig
    );
    assert_eq!(
        guard_code(|d| d["config"]["demo"]["pluginDefs"] = json!({ "widget": { "fancy": "x" } })),
        ErrorCode::MalformedConfiguration
    );
}

#[test]
fn overrides_error_names_found_type() {
    let mut doc = demo();
    doc["overrides"] = json!([]);
    let err = Manifest::from_value(&doc).unwrap_err();
    assert!(err.to_string().contains("array"), "got: {err}");
}
