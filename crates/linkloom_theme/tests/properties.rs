use linkloom_core::{DocumentRoot, MemoryRoot, MemoryStorage, SharedRoot};
use linkloom_theme::sanitize::{LOCKED_SEMANTIC_GROUPS, PROTECTED_COMPONENT_KEYS};
use linkloom_theme::{
    merge, project_bundle, sanitize, sanitize_bundle, AdminThemeTokens, BundleOverride,
    ChromeMode, EditorSession, Layer, StaticSource, TokenSchema, TokenStore,
};
use pretty_assertions::assert_eq;
use rustc_hash::FxHashSet;
use serde_json::{json, Value};
use std::sync::Arc;

/// A spread of hostile and ordinary overrides
fn overrides() -> Vec<Value> {
    let mut all = vec![
        json!({}),
        json!(null),
        json!({"core": null, "semantic": null, "component": null}),
        json!({"core": {"color": {"brand": {"primary": "#e11d48"}}}}),
        json!({"core": {"typography": {"family": {"sans": ["Georgia", "serif"]}}}}),
        json!({"semantic": {"surface": "none", "divider": {"default": "red"}}}),
        json!({"semantic": {"text": {"accent": "#ff0000", "primary": "#fff", "muted": null}}}),
        json!({"semantic": {"focus": [1, 2, 3], "density": {"control-height": "9rem"}}}),
        json!({"component": "flat"}),
        json!({"component": {"unknown.widget": {"background": "#000"}}}),
        json!({"semantic": {"made-up": {"x": "y"}}, "extra": {"a": 1}}),
    ];

    // Every protected component attacked on every protected key
    let mut attack = serde_json::Map::new();
    for id in TokenSchema::builtin().protected_components() {
        let mut styles = serde_json::Map::new();
        for key in PROTECTED_COMPONENT_KEYS {
            styles.insert(key.to_string(), json!("transparent"));
        }
        styles.insert("color".to_string(), json!("#123456"));
        attack.insert(id.to_string(), Value::Object(styles));
    }
    all.push(json!({"component": attack.clone()}));

    let mut flattened = serde_json::Map::new();
    for id in TokenSchema::builtin().protected_components() {
        flattened.insert(id.to_string(), json!("none"));
    }
    all.push(json!({"component": flattened}));
    all
}

fn decode(value: Value) -> Option<BundleOverride> {
    BundleOverride::from_payload(Some(value)).unwrap()
}

#[test]
fn merge_without_override_is_identity() {
    let base = TokenSchema::builtin().defaults();
    let merged = merge(base, None);
    assert_eq!(&merged, base);
    assert!(!std::ptr::eq(&merged, base));
}

#[test]
fn merge_never_adds_keys() {
    let base = TokenSchema::builtin().defaults();
    let merged = merge(
        base,
        Some(&BundleOverride::from_json(json!({
            "core": {"color": {"neon": {"pink": "#f0f"}}, "sound": {"beep": 1}},
            "component": {"carousel.slide": {"gap": "2px"}}
        }))
        .unwrap()),
    );
    assert!(merged.lookup(Layer::Core, &["color", "neon"]).is_none());
    assert!(merged.lookup(Layer::Core, &["sound"]).is_none());
    assert!(merged.component("carousel.slide").is_none());
    assert_eq!(&merged, base);
}

#[test]
fn null_leaves_base_value() {
    let base = TokenSchema::builtin().defaults();
    let merged = merge(
        base,
        Some(&BundleOverride::from_json(json!({
            "core": {"spacing": {"4": null}, "color": null}
        }))
        .unwrap()),
    );
    assert_eq!(&merged, base);
}

#[test]
fn sanitizer_is_idempotent() {
    for value in overrides() {
        let once = sanitize(decode(value.clone()).as_ref());
        let twice = sanitize_bundle(&once);
        assert_eq!(twice, once, "override {}", value);
    }
}

#[test]
fn protected_fields_always_match_defaults() {
    let schema = TokenSchema::builtin();
    let defaults = schema.defaults();
    for value in overrides() {
        let bundle = sanitize(decode(value.clone()).as_ref());
        for id in schema.protected_components() {
            let expected = defaults.component(id).unwrap();
            let actual = bundle.component(id).unwrap();
            for key in PROTECTED_COMPONENT_KEYS {
                assert_eq!(actual.get(key), expected.get(key), "{}.{} for {}", id, key, value);
            }
        }
    }
}

#[test]
fn semantic_lockdown_holds() {
    let defaults = TokenSchema::builtin().defaults();
    for value in overrides() {
        let bundle = sanitize(decode(value.clone()).as_ref());
        for group in LOCKED_SEMANTIC_GROUPS {
            assert_eq!(
                bundle.lookup(Layer::Semantic, &[group]),
                defaults.lookup(Layer::Semantic, &[group]),
                "semantic.{} for {}",
                group,
                value
            );
        }

        let supplied = value
            .pointer("/semantic/text/accent")
            .filter(|accent| !accent.is_null());
        let accent = bundle
            .lookup(Layer::Semantic, &["text", "accent"])
            .map(|node| node.to_json());
        match supplied {
            Some(supplied) => assert_eq!(accent.as_ref(), Some(supplied)),
            None => assert_eq!(
                accent,
                defaults
                    .lookup(Layer::Semantic, &["text", "accent"])
                    .map(|node| node.to_json())
            ),
        }
    }
}

#[test]
fn chrome_and_token_namespaces_never_collide() {
    let chrome: FxHashSet<String> = [ChromeMode::Light, ChromeMode::Dark]
        .into_iter()
        .flat_map(|mode| AdminThemeTokens::for_mode(mode).to_css_variables().into_keys())
        .collect();

    for value in overrides() {
        let projection = project_bundle(&sanitize(decode(value).as_ref()));
        for name in projection.variables.keys() {
            assert!(!chrome.contains(name), "{} emitted by both pipelines", name);
        }
    }
}

fn snapshot(host: &MemoryRoot, prefix: &str) -> Vec<(String, String)> {
    let mut props: Vec<_> = host
        .properties()
        .into_iter()
        .filter(|(name, _)| name.starts_with(prefix))
        .collect();
    props.sort();
    props
}

#[test]
fn both_pipelines_share_one_root() {
    let host = Arc::new(MemoryRoot::new());
    let root = SharedRoot::new(host.clone());
    let session = EditorSession::mount(
        StaticSource::new(Some(json!({"semantic": {"text": {"accent": "#7c3aed"}}}))),
        Arc::new(TokenStore::new()),
        &root,
        Arc::new(MemoryStorage::new()),
    )
    .unwrap();
    pollster::block_on(session.load()).unwrap();

    let tokens_before = snapshot(&host, "--tk-");
    assert!(!tokens_before.is_empty());

    // chrome switch leaves page tokens alone
    session.chrome().toggle_mode();
    let tokens_after = snapshot(&host, "--tk-");
    assert_eq!(tokens_after, tokens_before);

    // live edit leaves chrome alone
    let chrome_before = snapshot(&host, "--chrome-");
    let editor = session.editor();
    editor.apply(
        &BundleOverride::from_json(json!({"core": {"shape": {"radius": {"md": "0"}}}})).unwrap(),
    );
    let chrome_after = snapshot(&host, "--chrome-");
    assert_eq!(chrome_after, chrome_before);
    assert_eq!(
        host.property("--tk-semantic-text-accent").as_deref(),
        Some("#7c3aed")
    );
}
