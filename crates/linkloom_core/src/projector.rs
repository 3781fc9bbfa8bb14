//! Scoped root projection
//!
//! Both theming pipelines write custom properties onto the same document root.
//! A [`SharedRoot`] hands out at most one [`ScopedProjector`] per namespace and
//! refuses overlapping prefixes, so a pipeline can neither read nor write the
//! other pipeline's properties.

use crate::error::{CoreError, Result};
use crate::root::{DocumentRoot, StyleBatch};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

/// A custom-property namespace plus the optional root attribute it owns
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Namespace {
    prefix: String,
    attribute: Option<String>,
}

impl Namespace {
    /// Create a namespace from a prefix such as `"--tk-"`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            attribute: None,
        }
    }

    /// Also claim exclusive ownership of a root attribute
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attribute = Some(name.into());
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Whether `name` is a property inside this namespace
    pub fn contains(&self, name: &str) -> bool {
        name.len() > self.prefix.len() && name.starts_with(&self.prefix)
    }

    /// Whether two namespaces could ever produce the same property name
    pub fn overlaps(&self, other: &Namespace) -> bool {
        self.prefix.starts_with(&other.prefix) || other.prefix.starts_with(&self.prefix)
    }

    /// Check the prefix has the shape `--name-`
    pub fn validate(&self) -> Result<()> {
        let body = self
            .prefix
            .strip_prefix("--")
            .and_then(|rest| rest.strip_suffix('-'));
        match body {
            Some(body)
                if !body.is_empty()
                    && body
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-') =>
            {
                Ok(())
            }
            _ => Err(CoreError::InvalidNamespace(self.prefix.clone())),
        }
    }
}

struct Claim {
    id: u64,
    namespace: Namespace,
}

struct RootInner {
    host: Arc<dyn DocumentRoot>,
    claims: Mutex<(u64, Vec<Claim>)>,
}

/// Document root shared between theming pipelines
#[derive(Clone)]
pub struct SharedRoot {
    inner: Arc<RootInner>,
}

impl SharedRoot {
    pub fn new(host: Arc<dyn DocumentRoot>) -> Self {
        Self {
            inner: Arc::new(RootInner {
                host,
                claims: Mutex::new((0, Vec::new())),
            }),
        }
    }

    /// Claim a namespace and get the projector that writes it
    ///
    /// Fails if the prefix overlaps an active claim or the attribute is already
    /// owned. The claim is released when the projector is dropped.
    pub fn claim(&self, namespace: Namespace) -> Result<ScopedProjector> {
        namespace.validate()?;

        let mut claims = self.inner.claims.lock().unwrap();
        for claim in &claims.1 {
            if claim.namespace.overlaps(&namespace) {
                return Err(CoreError::NamespaceConflict {
                    requested: namespace.prefix.clone(),
                    claimed: claim.namespace.prefix.clone(),
                });
            }
            if let (Some(ours), Some(theirs)) =
                (namespace.attribute(), claim.namespace.attribute())
            {
                if ours == theirs {
                    return Err(CoreError::AttributeConflict(ours.to_string()));
                }
            }
        }

        claims.0 += 1;
        let id = claims.0;
        claims.1.push(Claim {
            id,
            namespace: namespace.clone(),
        });
        tracing::debug!("SharedRoot::claim - {} (claim #{})", namespace.prefix, id);

        Ok(ScopedProjector {
            root: self.inner.clone(),
            claim_id: id,
            namespace,
            written: Mutex::new(FxHashSet::default()),
        })
    }

    /// Number of active namespace claims
    pub fn claim_count(&self) -> usize {
        self.inner.claims.lock().unwrap().1.len()
    }
}

/// Exclusive writer for one namespace of the document root
pub struct ScopedProjector {
    root: Arc<RootInner>,
    claim_id: u64,
    namespace: Namespace,
    /// Property names written by the last `replace_all`
    written: Mutex<FxHashSet<String>>,
}

impl ScopedProjector {
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Replace every property of this namespace with `vars` in one batch
    ///
    /// Properties written previously but missing from `vars` are removed.
    /// Names outside the namespace are dropped. Returns the number of
    /// properties set.
    pub fn replace_all(&self, vars: &IndexMap<String, String>) -> usize {
        self.project(vars, StyleBatch::new())
    }

    /// Like [`replace_all`](Self::replace_all), but also sets the owned root
    /// attribute in the same batch
    ///
    /// The attribute is skipped with a warning when the namespace owns none.
    pub fn replace_all_with_attribute(
        &self,
        vars: &IndexMap<String, String>,
        value: &str,
    ) -> usize {
        let mut batch = StyleBatch::new();
        match self.namespace.attribute() {
            Some(name) => batch.set_attribute(name, value),
            None => tracing::warn!(
                "ScopedProjector: namespace '{}' owns no attribute",
                self.namespace.prefix
            ),
        }
        self.project(vars, batch)
    }

    fn project(&self, vars: &IndexMap<String, String>, mut batch: StyleBatch) -> usize {
        let mut written = self.written.lock().unwrap();
        let mut next = FxHashSet::default();

        for (name, value) in vars {
            if !self.namespace.contains(name) {
                tracing::warn!(
                    "ScopedProjector: dropping '{}' outside namespace '{}'",
                    name,
                    self.namespace.prefix
                );
                continue;
            }
            batch.set(name.clone(), value.clone());
            next.insert(name.clone());
        }

        for stale in written.iter().filter(|name| !next.contains(*name)) {
            batch.remove(stale.clone());
        }

        let count = batch.set.len();
        self.root.host.apply_batch(&batch);
        *written = next;
        count
    }

    /// Remove every property this projector wrote
    pub fn clear(&self) {
        let mut written = self.written.lock().unwrap();
        if written.is_empty() {
            return;
        }
        let mut batch = StyleBatch::new();
        for name in written.drain() {
            batch.remove(name);
        }
        self.root.host.apply_batch(&batch);
    }

    /// Set the root attribute owned by this namespace
    ///
    /// Returns false when the namespace owns no attribute.
    pub fn set_attribute(&self, value: &str) -> bool {
        match self.namespace.attribute() {
            Some(name) => {
                self.root.host.set_attribute(name, value);
                true
            }
            None => false,
        }
    }

    /// Read a property of this namespace back from the root
    pub fn property(&self, name: &str) -> Option<String> {
        if !self.namespace.contains(name) {
            tracing::warn!(
                "ScopedProjector: refusing to read '{}' outside namespace '{}'",
                name,
                self.namespace.prefix
            );
            return None;
        }
        self.root.host.property(name)
    }
}

impl fmt::Debug for ScopedProjector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedProjector")
            .field("namespace", &self.namespace)
            .field("claim_id", &self.claim_id)
            .finish_non_exhaustive()
    }
}

impl Drop for ScopedProjector {
    fn drop(&mut self) {
        let mut claims = self.root.claims.lock().unwrap();
        claims.1.retain(|claim| claim.id != self.claim_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::root::MemoryRoot;

    fn vars(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_overlapping_claims_are_rejected() {
        let root = SharedRoot::new(Arc::new(MemoryRoot::new()));
        let _tokens = root.claim(Namespace::new("--tk-")).unwrap();

        let err = root.claim(Namespace::new("--tk-admin-")).err().unwrap();
        assert!(matches!(err, CoreError::NamespaceConflict { .. }));
        assert!(root.claim(Namespace::new("--chrome-")).is_ok());
    }

    #[test]
    fn test_claim_released_on_drop() {
        let root = SharedRoot::new(Arc::new(MemoryRoot::new()));
        {
            let _p = root.claim(Namespace::new("--tk-")).unwrap();
            assert_eq!(root.claim_count(), 1);
        }
        assert_eq!(root.claim_count(), 0);
        assert!(root.claim(Namespace::new("--tk-")).is_ok());
    }

    #[test]
    fn test_invalid_prefix() {
        let root = SharedRoot::new(Arc::new(MemoryRoot::new()));
        for bad in ["tk-", "--tk", "--", "--t k-"] {
            assert!(
                matches!(
                    root.claim(Namespace::new(bad)),
                    Err(CoreError::InvalidNamespace(_))
                ),
                "prefix {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_attribute_conflict() {
        let root = SharedRoot::new(Arc::new(MemoryRoot::new()));
        let _a = root
            .claim(Namespace::new("--a-").with_attribute("data-mode"))
            .unwrap();
        let err = root
            .claim(Namespace::new("--b-").with_attribute("data-mode"))
            .err()
            .unwrap();
        assert!(matches!(err, CoreError::AttributeConflict(_)));
    }

    #[test]
    fn test_replace_all_is_one_batch_and_removes_stale() {
        let host = Arc::new(MemoryRoot::new());
        let root = SharedRoot::new(host.clone());
        let projector = root.claim(Namespace::new("--tk-")).unwrap();

        projector.replace_all(&vars(&[("--tk-a", "1"), ("--tk-b", "2")]));
        projector.replace_all(&vars(&[("--tk-b", "3")]));

        assert_eq!(host.batch_count(), 2);
        assert_eq!(host.property("--tk-a"), None);
        assert_eq!(host.property("--tk-b").as_deref(), Some("3"));
    }

    #[test]
    fn test_foreign_names_are_neither_written_nor_read() {
        let host = Arc::new(MemoryRoot::new());
        let root = SharedRoot::new(host.clone());
        let tokens = root.claim(Namespace::new("--tk-")).unwrap();
        let chrome = root.claim(Namespace::new("--chrome-")).unwrap();

        chrome.replace_all(&vars(&[("--chrome-bg", "#000")]));
        let set = tokens.replace_all(&vars(&[("--chrome-bg", "#fff"), ("--tk-bg", "#eee")]));

        assert_eq!(set, 1);
        assert_eq!(host.property("--chrome-bg").as_deref(), Some("#000"));
        assert_eq!(tokens.property("--chrome-bg"), None);
        assert_eq!(chrome.property("--chrome-bg").as_deref(), Some("#000"));
    }

    #[test]
    fn test_clear() {
        let host = Arc::new(MemoryRoot::new());
        let root = SharedRoot::new(host.clone());
        let projector = root.claim(Namespace::new("--tk-")).unwrap();
        projector.replace_all(&vars(&[("--tk-a", "1")]));
        projector.clear();
        assert!(host.properties().is_empty());
    }

    #[test]
    fn test_properties_and_attribute_in_one_batch() {
        let host = Arc::new(MemoryRoot::new());
        let root = SharedRoot::new(host.clone());
        let chrome = root
            .claim(Namespace::new("--chrome-").with_attribute("data-mode"))
            .unwrap();

        chrome.replace_all_with_attribute(&vars(&[("--chrome-bg", "#fff")]), "light");

        assert_eq!(host.batch_count(), 1);
        assert_eq!(host.attribute("data-mode").as_deref(), Some("light"));
        assert_eq!(host.property("--chrome-bg").as_deref(), Some("#fff"));
    }

    #[test]
    fn test_attribute_skipped_without_ownership() {
        let host = Arc::new(MemoryRoot::new());
        let root = SharedRoot::new(host.clone());
        let tokens = root.claim(Namespace::new("--tk-")).unwrap();

        let set = tokens.replace_all_with_attribute(&vars(&[("--tk-a", "1")]), "light");

        assert_eq!(set, 1);
        assert_eq!(host.attribute("data-mode"), None);
    }

    #[test]
    fn test_debug_shows_namespace() {
        let root = SharedRoot::new(Arc::new(MemoryRoot::new()));
        let projector = root.claim(Namespace::new("--tk-")).unwrap();
        let debug = format!("{:?}", projector);
        assert!(debug.contains("--tk-"));
        assert!(debug.contains("claim_id"));
    }
}
