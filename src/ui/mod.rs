//! User interface module
//!
//! Contains the filter bar contract and terminal rendering

pub mod reconciler;
pub mod render;

// Re-export main types
pub use reconciler::{dispatch_click, render_bar, render_bars, Click, FilterBar, FilterButton};
pub use render::{format_bar, format_compact, format_json, format_text, RenderOptions};
