//! Document root
//!
//! The document root is the single global style target shared by every
//! theming pipeline. Hosts implement [`DocumentRoot`]; the pipelines never
//! touch it directly and go through a [`ScopedProjector`](crate::ScopedProjector).

use indexmap::IndexMap;
use std::sync::RwLock;

/// One atomic update of root custom properties
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleBatch {
    /// Properties to set, in application order
    pub set: IndexMap<String, String>,
    /// Properties to remove
    pub remove: Vec<String>,
    /// Root attributes to set alongside the properties
    pub attributes: IndexMap<String, String>,
}

impl StyleBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: impl Into<String>) {
        self.remove.push(name.into());
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.remove.is_empty() && self.attributes.is_empty()
    }
}

/// Host style target (the document's root element)
pub trait DocumentRoot: Send + Sync {
    /// Apply every change in `batch` so that no partial state is observable
    fn apply_batch(&self, batch: &StyleBatch);

    /// Set an attribute on the root element
    fn set_attribute(&self, name: &str, value: &str);

    /// Read the current value of a custom property
    fn property(&self, name: &str) -> Option<String>;

    /// Read the current value of a root attribute
    fn attribute(&self, name: &str) -> Option<String>;
}

#[derive(Default)]
struct RootState {
    properties: IndexMap<String, String>,
    attributes: IndexMap<String, String>,
    batches: usize,
}

/// In-memory document root for headless hosts and tests
#[derive(Default)]
pub struct MemoryRoot {
    state: RwLock<RootState>,
}

impl MemoryRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every property currently set
    pub fn properties(&self) -> IndexMap<String, String> {
        self.state.read().unwrap().properties.clone()
    }

    /// Number of batches applied so far
    pub fn batch_count(&self) -> usize {
        self.state.read().unwrap().batches
    }
}

impl DocumentRoot for MemoryRoot {
    fn apply_batch(&self, batch: &StyleBatch) {
        let mut state = self.state.write().unwrap();
        for name in &batch.remove {
            state.properties.shift_remove(name);
        }
        for (name, value) in &batch.set {
            state.properties.insert(name.clone(), value.clone());
        }
        for (name, value) in &batch.attributes {
            state.attributes.insert(name.clone(), value.clone());
        }
        state.batches += 1;
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.state
            .write()
            .unwrap()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn property(&self, name: &str) -> Option<String> {
        self.state.read().unwrap().properties.get(name).cloned()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.state.read().unwrap().attributes.get(name).cloned()
    }
}
