//! Linkloom Theme
//!
//! Design-token engine for the page editor.
//!
//! # Overview
//!
//! - **Layered tokens**: `core` primitives, `semantic` roles, `component` styles
//! - **Sanitizing merge**: partial overrides merged onto compiled-in defaults,
//!   with structural tokens re-asserted afterwards
//! - **Observable store**: one current bundle, synchronous subscribers
//! - **CSS projection**: bundles become `--tk-*` custom properties on the root
//! - **Admin chrome**: an independent light/dark theme under `--chrome-*`
//!
//! # Quick Start
//!
//! ```rust
//! use linkloom_core::{DocumentRoot, MemoryRoot, MemoryStorage, SharedRoot};
//! use linkloom_theme::{EditorSession, StaticSource, SyncState, TokenStore};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let host = Arc::new(MemoryRoot::new());
//! let root = SharedRoot::new(host.clone());
//! let source = StaticSource::new(Some(json!({
//!     "semantic": { "text": { "accent": "#db2777" } }
//! })));
//!
//! let session = EditorSession::mount(
//!     source,
//!     Arc::new(TokenStore::new()),
//!     &root,
//!     Arc::new(MemoryStorage::new()),
//! )
//! .unwrap();
//! pollster::block_on(session.load()).unwrap();
//!
//! assert_eq!(session.state(), SyncState::Success);
//! assert_eq!(host.property("--tk-semantic-text-accent").as_deref(), Some("#db2777"));
//! assert_eq!(host.attribute("data-admin-theme").as_deref(), Some("dark"));
//! ```
//!
//! # Data flow
//!
//! ```text
//! BundleSource -> merge -> sanitize -> TokenStore -> StoreBinding -> root (--tk-)
//! local storage -> ChromeMode -> AdminThemeTokens ---------------> root (--chrome-)
//! ```

pub mod binding;
pub mod chrome;
pub mod config;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod merge;
pub mod preview;
pub mod projection;
pub mod reference;
pub mod sanitize;
pub mod session;
pub mod store;
pub mod sync;
pub mod tokens;

// Re-export commonly used types
pub use binding::StoreBinding;
pub use chrome::{AdminChromeTheme, AdminThemeTokens, ChromeMode, CHROME_PREFIX};
pub use config::ThemeConfig;
pub use error::{ConfigError, ProjectionError, Result, SyncError, ThemeError, UnresolvedReason};
#[cfg(feature = "http")]
pub use http::HttpBundleSource;
pub use merge::{merge, merge_map};
pub use preview::LiveEditor;
pub use projection::{project_bundle, Projection, TOKEN_PREFIX};
pub use reference::TokenRef;
pub use sanitize::{sanitize, sanitize_bundle, Sanitizer};
pub use session::{open_storage, EditorSession};
pub use store::TokenStore;
pub use sync::{BundleSource, BundleSynchronizer, StaticSource, SyncOutcome, SyncState};
pub use tokens::{BundleOverride, Layer, TokenBundle, TokenMap, TokenNode, TokenSchema, TokenValue};
