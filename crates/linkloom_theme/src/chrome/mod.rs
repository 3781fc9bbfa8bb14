//! Admin chrome theme
//!
//! The editor's own light/dark theme. Independent of the page tokens: it has
//! its own storage key, its own property namespace and its own root
//! attribute, and it never touches `--tk-` properties.

mod tokens;

pub use tokens::*;

use crate::error::Result;
use linkloom_core::{KeyValueStore, ListenerId, Listeners, Namespace, ScopedProjector, SharedRoot};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

/// Local storage key holding the persisted mode
pub const MODE_STORAGE_KEY: &str = "linkloom-admin-theme";

/// Root attribute recording the active mode for stylesheet selectors
pub const MODE_ATTRIBUTE: &str = "data-admin-theme";

/// Admin chrome mode
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChromeMode {
    Light,
    #[default]
    Dark,
}

impl ChromeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ChromeMode::Light => "light",
            ChromeMode::Dark => "dark",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ChromeMode::Light => ChromeMode::Dark,
            ChromeMode::Dark => ChromeMode::Light,
        }
    }
}

impl fmt::Display for ChromeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChromeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(ChromeMode::Light),
            "dark" => Ok(ChromeMode::Dark),
            other => Err(format!("unknown admin theme mode '{other}'")),
        }
    }
}

/// Provider of the admin chrome theme for one page session
pub struct AdminChromeTheme {
    mode: RwLock<ChromeMode>,
    storage: Arc<dyn KeyValueStore>,
    projector: ScopedProjector,
    listeners: Listeners<ChromeMode>,
}

impl AdminChromeTheme {
    /// Claim the chrome namespace, restore the persisted mode and apply it
    pub fn new(storage: Arc<dyn KeyValueStore>, root: &SharedRoot) -> Result<Self> {
        Self::with_prefix(storage, root, CHROME_PREFIX)
    }

    pub fn with_prefix(
        storage: Arc<dyn KeyValueStore>,
        root: &SharedRoot,
        prefix: &str,
    ) -> Result<Self> {
        let projector = root.claim(Namespace::new(prefix).with_attribute(MODE_ATTRIBUTE))?;
        let mode = restore_mode(storage.as_ref());

        let theme = Self {
            mode: RwLock::new(mode),
            storage,
            projector,
            listeners: Listeners::new(),
        };
        theme.apply(mode);
        Ok(theme)
    }

    pub fn mode(&self) -> ChromeMode {
        *self.mode.read().unwrap()
    }

    /// Tokens of the active mode
    pub fn tokens(&self) -> &'static AdminThemeTokens {
        AdminThemeTokens::for_mode(self.mode())
    }

    /// Switch mode, apply, and persist. No-op if already active.
    pub fn set_mode(&self, mode: ChromeMode) {
        {
            let mut current = self.mode.write().unwrap();
            if *current == mode {
                return;
            }
            tracing::debug!("AdminChromeTheme::set_mode - {} -> {}", *current, mode);
            *current = mode;
        }

        self.apply(mode);
        if let Err(err) = self.storage.set(MODE_STORAGE_KEY, mode.as_str()) {
            tracing::warn!("AdminChromeTheme: failed to persist mode: {}", err);
        }
        self.listeners.notify(&mode);
    }

    /// Flip between light and dark; returns the new mode
    pub fn toggle_mode(&self) -> ChromeMode {
        let next = self.mode().toggle();
        self.set_mode(next);
        next
    }

    pub fn subscribe<F>(&self, f: F) -> ListenerId
    where
        F: Fn(&ChromeMode) + Send + Sync + 'static,
    {
        self.listeners.subscribe(f)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn apply(&self, mode: ChromeMode) {
        let prefix = self.projector.namespace().prefix();
        let vars = AdminThemeTokens::for_mode(mode).to_css_variables_with(prefix);
        self.projector.replace_all_with_attribute(&vars, mode.as_str());
    }
}

fn restore_mode(storage: &dyn KeyValueStore) -> ChromeMode {
    match storage.get(MODE_STORAGE_KEY) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|err: String| {
            tracing::debug!("AdminChromeTheme: {}, using default", err);
            ChromeMode::default()
        }),
        Ok(None) => ChromeMode::default(),
        Err(err) => {
            tracing::warn!("AdminChromeTheme: failed to read persisted mode: {}", err);
            ChromeMode::default()
        }
    }
}
