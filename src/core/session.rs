use crate::events::{FilterCommand, FilterOutput};
use crate::ui::reconciler::{render_bars, FilterBar};

use super::classifier::Classifier;
use super::item::{FacetKind, Item};
use super::toggle::{ToggleEngine, VisibilityChange};

/// Synchronous state machine behind the `rebuild` / `toggle` messages.
///
/// A rebuild always replaces the whole engine, so selections reset and no
/// toggle ever sees state from a previous item list.
#[derive(Debug, Clone)]
pub struct FilterSession {
    engine: Option<ToggleEngine>,
    min_groups: usize,
}

impl Default for FilterSession {
    fn default() -> Self {
        Self::new(2)
    }
}

impl FilterSession {
    /// `min_groups` is the number of non-empty groups a facet needs to get a bar
    pub fn new(min_groups: usize) -> Self {
        Self {
            engine: None,
            min_groups,
        }
    }

    pub fn engine(&self) -> Option<&ToggleEngine> {
        self.engine.as_ref()
    }

    pub fn handle(&mut self, command: FilterCommand) -> FilterOutput {
        match command {
            FilterCommand::Rebuild { items } => FilterOutput::Rebuilt(self.rebuild(&items)),
            FilterCommand::ToggleGroup { kind, label, selected } => {
                FilterOutput::VisibilityChanged(self.toggle_group(kind, &label, selected))
            }
            FilterCommand::ToggleAll { kind, selected } => {
                FilterOutput::VisibilityChanged(self.toggle_all(kind, selected))
            }
        }
    }

    pub fn rebuild(&mut self, items: &[Item]) -> Vec<FilterBar> {
        let engine = ToggleEngine::new(Classifier::classify(items));
        let bars = render_bars(engine.store(), self.min_groups);
        tracing::debug!("Rebuilt filters for {} items, {} bars", items.len(), bars.len());
        self.engine = Some(engine);
        bars
    }

    pub fn toggle_group(&mut self, kind: FacetKind, label: &str, selected: bool) -> Vec<VisibilityChange> {
        match self.engine.as_mut() {
            Some(engine) => engine.toggle_group(kind, label, selected),
            None => Vec::new(),
        }
    }

    pub fn toggle_all(&mut self, kind: FacetKind, selected: bool) -> Vec<VisibilityChange> {
        match self.engine.as_mut() {
            Some(engine) => engine.toggle_all(kind, selected),
            None => Vec::new(),
        }
    }

    /// Current bars, reflecting the latest selection state
    pub fn bars(&self) -> Vec<FilterBar> {
        self.engine
            .as_ref()
            .map(|engine| render_bars(engine.store(), self.min_groups))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Item> {
        vec![
            Item::new("a", "src/x.ts"),
            Item::new("b", "README"),
            Item::new("c", "docs/y.md"),
        ]
    }

    #[test]
    fn test_toggle_before_rebuild_is_noop() {
        let mut session = FilterSession::default();
        let output = session.handle(FilterCommand::ToggleAll {
            kind: FacetKind::Folder,
            selected: false,
        });
        assert_eq!(output, FilterOutput::VisibilityChanged(Vec::new()));
        assert!(session.bars().is_empty());
    }

    #[test]
    fn test_rebuild_resets_selection() {
        let mut session = FilterSession::default();
        session.handle(FilterCommand::Rebuild { items: items() });

        let output = session.handle(FilterCommand::ToggleGroup {
            kind: FacetKind::Extension,
            label: "md".to_string(),
            selected: false,
        });
        match output {
            FilterOutput::VisibilityChanged(changes) => assert_eq!(changes.len(), 1),
            other => panic!("Expected visibility changes, got {:?}", other),
        }

        match session.handle(FilterCommand::Rebuild { items: items() }) {
            FilterOutput::Rebuilt(bars) => {
                assert_eq!(bars.len(), 2);
                assert!(bars.iter().all(|bar| bar.all_selected));
            }
            other => panic!("Expected rebuilt bars, got {:?}", other),
        }
        let engine = session.engine().unwrap();
        assert_eq!(engine.visible_items().len(), 3);
    }

    #[test]
    fn test_rebuild_with_no_items_has_no_bars() {
        let mut session = FilterSession::default();
        assert_eq!(
            session.handle(FilterCommand::Rebuild { items: Vec::new() }),
            FilterOutput::Rebuilt(Vec::new())
        );
    }
}
