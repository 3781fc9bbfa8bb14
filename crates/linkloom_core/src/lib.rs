//! Linkloom Core
//!
//! Host-side primitives shared by the theming pipelines:
//!
//! - **Document root**: the live style target ([`DocumentRoot`], [`MemoryRoot`])
//! - **Scoped projection**: the only way to write the root ([`SharedRoot`], [`ScopedProjector`])
//! - **Local storage**: persisted key/value state ([`KeyValueStore`])
//! - **Listeners**: synchronous change notification ([`Listeners`])
//!
//! # Example
//!
//! ```rust
//! use linkloom_core::{DocumentRoot, MemoryRoot, Namespace, SharedRoot};
//! use indexmap::IndexMap;
//! use std::sync::Arc;
//!
//! let host = Arc::new(MemoryRoot::new());
//! let root = SharedRoot::new(host.clone());
//!
//! let projector = root.claim(Namespace::new("--tk-")).unwrap();
//! let mut vars = IndexMap::new();
//! vars.insert("--tk-core-color-brand".to_string(), "#4f46e5".to_string());
//! projector.replace_all(&vars);
//!
//! assert_eq!(host.property("--tk-core-color-brand").as_deref(), Some("#4f46e5"));
//! ```

pub mod error;
pub mod listeners;
pub mod projector;
pub mod root;
pub mod storage;

pub use error::{CoreError, Result};
pub use listeners::{ListenerId, Listeners};
pub use projector::{Namespace, ScopedProjector, SharedRoot};
pub use root::{DocumentRoot, MemoryRoot, StyleBatch};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
