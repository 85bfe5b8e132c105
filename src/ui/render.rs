//! Terminal rendering of filter bars and the filtered file list

use anyhow::Result;
use serde::Serialize;

use crate::core::{Item, ToggleEngine, ALL_LABEL};
use super::reconciler::FilterBar;

const GREEN: &str = "\x1b[32m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Render options shared by the text formats
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub color: bool,
    pub show_counts: bool,
    pub show_hidden: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            show_counts: true,
            show_hidden: false,
        }
    }
}

/// `Filter file folder: [«all»] [src (2)] ...`, selected buttons highlighted
pub fn format_bar(bar: &FilterBar, options: &RenderOptions) -> String {
    let mut line = format!("{}: {}", bar.caption, button(ALL_LABEL, None, bar.all_selected, options));

    for b in &bar.buttons {
        let count = options.show_counts.then_some(b.count);
        line.push(' ');
        line.push_str(&button(&b.label, count, b.selected, options));
    }
    line
}

fn button(label: &str, count: Option<usize>, selected: bool, options: &RenderOptions) -> String {
    let text = match count {
        Some(count) => format!("{} ({})", label, count),
        None => label.to_string(),
    };

    match (options.color, selected) {
        (true, true) => format!("{}[{}]{}", GREEN, text, RESET),
        (true, false) => format!("{}[{}]{}", DIM, text, RESET),
        (false, true) => format!("[{}]", text),
        (false, false) => format!("( {} )", text),
    }
}

/// Bars followed by the file list
pub fn format_text(bars: &[FilterBar], items: &[Item], engine: &ToggleEngine, options: &RenderOptions) -> String {
    let mut out = String::new();

    for bar in bars {
        out.push_str(&format_bar(bar, options));
        out.push('\n');
    }
    if !bars.is_empty() {
        out.push_str("---\n");
    }

    for item in items {
        let visible = engine.is_visible(&item.id);
        if visible {
            out.push_str(&format!("  {}\n", item.text()));
        } else if options.show_hidden {
            if options.color {
                out.push_str(&format!("{}- {}{}\n", DIM, item.text(), RESET));
            } else {
                out.push_str(&format!("- {}\n", item.text()));
            }
        }
    }
    out
}

/// One visible path per line, for piping
pub fn format_compact(items: &[Item], engine: &ToggleEngine) -> String {
    items
        .iter()
        .filter(|item| engine.is_visible(&item.id))
        .map(|item| format!("{}\n", item.text()))
        .collect()
}

#[derive(Serialize)]
struct JsonItem<'a> {
    #[serde(flatten)]
    item: &'a Item,
    visible: bool,
}

#[derive(Serialize)]
struct JsonView<'a> {
    bars: &'a [FilterBar],
    items: Vec<JsonItem<'a>>,
}

pub fn format_json(bars: &[FilterBar], items: &[Item], engine: &ToggleEngine) -> Result<String> {
    let view = JsonView {
        bars,
        items: items
            .iter()
            .map(|item| JsonItem {
                item,
                visible: engine.is_visible(&item.id),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}
