//! transcript-report — Transcript rendering.
//!
//! Renders compiled student results as Markdown and persists them as JSON.

pub mod json;
pub mod markdown;

pub use json::{load_json, save_json};
pub use markdown::render_markdown;
