use indexmap::IndexMap;
use linkloom_core::{CoreError, DocumentRoot, MemoryRoot, Namespace, SharedRoot};
use std::sync::Arc;

fn vars(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn projectors_cannot_touch_each_other() {
    let host = Arc::new(MemoryRoot::new());
    let root = SharedRoot::new(host.clone());
    let tokens = root.claim(Namespace::new("--tk-")).unwrap();
    let chrome = root
        .claim(Namespace::new("--chrome-").with_attribute("data-admin-theme"))
        .unwrap();

    tokens.replace_all(&vars(&[("--tk-core-spacing-4", "1rem")]));
    chrome.replace_all(&vars(&[
        ("--chrome-bg-app", "#0b1120"),
        ("--tk-core-spacing-4", "0"),
    ]));

    assert_eq!(host.property("--tk-core-spacing-4").as_deref(), Some("1rem"));
    assert_eq!(host.property("--chrome-bg-app").as_deref(), Some("#0b1120"));
    assert_eq!(chrome.property("--tk-core-spacing-4"), None);
    assert!(!tokens.set_attribute("light"));
    assert!(chrome.set_attribute("light"));

    // clearing one namespace leaves the other in place
    tokens.clear();
    assert_eq!(host.property("--tk-core-spacing-4"), None);
    assert_eq!(host.property("--chrome-bg-app").as_deref(), Some("#0b1120"));
}

#[test]
fn overlapping_claims_are_rejected_until_released() {
    let root = SharedRoot::new(Arc::new(MemoryRoot::new()));
    let tokens = root.claim(Namespace::new("--tk-")).unwrap();

    let err = root.claim(Namespace::new("--tk-chrome-")).err().unwrap();
    assert!(matches!(err, CoreError::NamespaceConflict { .. }));

    drop(tokens);
    assert!(root.claim(Namespace::new("--tk-chrome-")).is_ok());
}
