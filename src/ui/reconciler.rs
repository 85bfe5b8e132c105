//! Filter bar model and click dispatch
//!
//! A filter bar is one row of toggle buttons for a facet: an aggregate
//! "all" button followed by one button per non-empty group. Rendering the
//! bar and applying visibility to the page belong to the host.

use serde::{Deserialize, Serialize};

use crate::core::{FacetKind, FacetStore, FilterSession, VisibilityChange, ALL_LABEL};

/// One group button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterButton {
    pub label: String,
    /// Number of items in the group
    pub count: usize,
    pub selected: bool,
}

/// Buttons of a single facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterBar {
    pub kind: FacetKind,
    pub caption: String,
    pub all_selected: bool,
    pub buttons: Vec<FilterButton>,
}

impl FilterBar {
    pub fn all_label(&self) -> &'static str {
        ALL_LABEL
    }

    pub fn button(&self, label: &str) -> Option<&FilterButton> {
        self.buttons.iter().find(|b| b.label == label)
    }
}

/// Build the bar of one facet, or `None` when it has fewer than `min_groups` non-empty groups
pub fn render_bar(store: &FacetStore, kind: FacetKind, min_groups: usize) -> Option<FilterBar> {
    let buttons: Vec<FilterButton> = store
        .groups_of(kind)
        .iter()
        .filter(|g| !g.is_empty())
        .map(|g| FilterButton {
            label: g.label.clone(),
            count: g.len(),
            selected: g.selected,
        })
        .collect();

    if buttons.is_empty() || buttons.len() < min_groups {
        return None;
    }

    Some(FilterBar {
        kind,
        caption: kind.caption().to_string(),
        all_selected: store.all_selected(kind),
        buttons,
    })
}

/// Bars for every facet that has enough groups, folder bar first
pub fn render_bars(store: &FacetStore, min_groups: usize) -> Vec<FilterBar> {
    FacetKind::ALL
        .iter()
        .filter_map(|&kind| render_bar(store, kind, min_groups))
        .collect()
}

/// A button activation coming from the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "button", rename_all = "lowercase")]
pub enum Click {
    Group { kind: FacetKind, label: String },
    All { kind: FacetKind },
}

impl Click {
    /// Parse a button by its text, the way a host reports it
    pub fn from_button(kind: FacetKind, text: &str) -> Self {
        let text = text.trim();
        if text == ALL_LABEL {
            Click::All { kind }
        } else {
            Click::Group {
                kind,
                label: text.to_string(),
            }
        }
    }
}

/// Flip the clicked control and forward it to the session
pub fn dispatch_click(session: &mut FilterSession, click: &Click) -> Vec<VisibilityChange> {
    let Some(engine) = session.engine() else {
        return Vec::new();
    };

    match click {
        Click::Group { kind, label } => {
            let selected = !engine.store().is_selected(*kind, label);
            session.toggle_group(*kind, label, selected)
        }
        Click::All { kind } => {
            let selected = !engine.all_selected(*kind);
            session.toggle_all(*kind, selected)
        }
    }
}
