//! Design tokens
//!
//! A bundle has three layers:
//! - `core`: primitive scales
//! - `semantic`: named roles, literal or referencing `core`
//! - `component`: per-component style maps, literal or referencing `core`/`semantic`

mod bundle;
mod schema;
mod value;

pub use bundle::*;
pub use schema::*;
pub use value::*;
