//! Headless editor session
//!
//! Mounts an editor session against an in-memory document root, loads a
//! stored page theme, then exercises the admin chrome toggle and a live edit.
//!
//! Run with:
//! `RUST_LOG=debug cargo run -p linkloom_theme --example headless_session`

use linkloom_core::{MemoryRoot, SharedRoot};
use linkloom_theme::{
    open_storage, BundleOverride, EditorSession, StaticSource, ThemeConfig, TokenStore,
};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ThemeConfig::load_from_dir(Path::new("."))?;
    let storage = open_storage(&config.admin);

    let host = Arc::new(MemoryRoot::new());
    let root = SharedRoot::new(host.clone());
    let source = StaticSource::new(Some(json!({
        "core": { "color": { "brand": { "primary": "#0d9488" } } },
        "semantic": { "surface": { "canvas": "#000000" } },
        "component": { "button.primary": { "background": "hotpink", "radius": "shape.radius.full" } }
    })));

    let session = EditorSession::mount_with(
        source,
        Arc::new(TokenStore::new()),
        &root,
        storage,
        &config.css,
    )?;

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let outcome = runtime.block_on(async { session.spawn_load().await })??;
    println!("load: {:?} ({:?})", outcome, session.state());

    println!("\nroot after load:");
    for (name, value) in host.properties() {
        println!("  {}: {}", name, value);
    }

    let mode = session.chrome().toggle_mode();
    println!("\nadmin chrome switched to {}", mode);

    let editor = session.editor();
    editor.apply(&BundleOverride::from_json(json!({
        "semantic": { "text": { "accent": "#f97316" } }
    }))?);
    println!("preview dirty: {}", editor.is_dirty());
    editor.revert();
    println!("after revert dirty: {}", editor.is_dirty());

    session.unmount();
    println!("\nunmounted; {} claims left on root", root.claim_count());
    Ok(())
}
