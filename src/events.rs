use serde::{Deserialize, Serialize};

use crate::core::{FacetKind, Item, VisibilityChange};
use crate::ui::FilterBar;

/// Messages a host sends to a [`crate::core::FilterSession`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum FilterCommand {
    /// New or changed diff content
    Rebuild { items: Vec<Item> },
    ToggleGroup {
        kind: FacetKind,
        label: String,
        selected: bool,
    },
    ToggleAll {
        kind: FacetKind,
        selected: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "output", content = "data", rename_all = "snake_case")]
pub enum FilterOutput {
    /// Full bar listing for the initial render
    Rebuilt(Vec<FilterBar>),
    /// Items whose overall visibility changed
    VisibilityChanged(Vec<VisibilityChange>),
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The watched input settled after a change
    ContentChanged,
}
