//! Selection toggles and per-item visibility
//!
//! Each item carries one "hidden" flag per facet. A toggle writes the flag
//! for the members of the groups it applies, so when folder groups overlap
//! the group applied last decides. An item is visible when no facet hides it.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use super::item::{FacetKind, ItemId};
use super::store::FacetStore;

/// Hidden-by-facet flags of one item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityFlags {
    pub hidden_by_extension: bool,
    pub hidden_by_folder: bool,
}

impl VisibilityFlags {
    pub fn is_visible(&self) -> bool {
        !(self.hidden_by_extension || self.hidden_by_folder)
    }

    pub fn hidden_by(&self, kind: FacetKind) -> bool {
        match kind {
            FacetKind::Extension => self.hidden_by_extension,
            FacetKind::Folder => self.hidden_by_folder,
        }
    }

    fn set_hidden(&mut self, kind: FacetKind, hidden: bool) {
        match kind {
            FacetKind::Extension => self.hidden_by_extension = hidden,
            FacetKind::Folder => self.hidden_by_folder = hidden,
        }
    }
}

/// An item whose overall visibility changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityChange {
    pub id: ItemId,
    pub visible: bool,
}

/// Owns the facet store of one rendered item list and its visibility flags
#[derive(Debug, Clone)]
pub struct ToggleEngine {
    store: FacetStore,
    flags: HashMap<ItemId, VisibilityFlags>,
}

impl ToggleEngine {
    /// Start with every item visible
    pub fn new(store: FacetStore) -> Self {
        let flags = store
            .item_ids()
            .iter()
            .map(|id| (id.clone(), VisibilityFlags::default()))
            .collect();
        Self { store, flags }
    }

    pub fn store(&self) -> &FacetStore {
        &self.store
    }

    pub fn all_selected(&self, kind: FacetKind) -> bool {
        self.store.all_selected(kind)
    }

    /// Unknown ids read as hidden
    pub fn is_visible(&self, id: &ItemId) -> bool {
        self.flags.get(id).map_or(false, |f| f.is_visible())
    }

    pub fn is_hidden_by(&self, id: &ItemId, kind: FacetKind) -> bool {
        self.flags.get(id).map_or(false, |f| f.hidden_by(kind))
    }

    pub fn flags(&self, id: &ItemId) -> Option<VisibilityFlags> {
        self.flags.get(id).copied()
    }

    /// Visible items in input order
    pub fn visible_items(&self) -> Vec<&ItemId> {
        self.store
            .item_ids()
            .iter()
            .filter(|id| self.is_visible(id))
            .collect()
    }

    /// Select or deselect one group and update its members.
    ///
    /// Only the toggled group's members are written, even for folders, so an
    /// item in several folder groups follows the group toggled most recently.
    /// Unknown labels and groups without members are ignored.
    pub fn toggle_group(
        &mut self,
        kind: FacetKind,
        label: &str,
        selected: bool,
    ) -> Vec<VisibilityChange> {
        match self.store.group(kind, label) {
            Some(group) if !group.is_empty() => {}
            _ => {
                tracing::debug!("Ignoring toggle of unknown {} group {:?}", kind, label);
                return Vec::new();
            }
        }

        let before = self.snapshot();
        self.store.set_selected(kind, label, selected);
        self.apply_groups(kind, |group| group == label);

        tracing::debug!(
            "Toggled {} group {:?} to {} (all selected: {})",
            kind,
            label,
            selected,
            self.store.all_selected(kind)
        );
        self.changes_since(&before)
    }

    /// Select or deselect every non-empty group of a facet at once
    pub fn toggle_all(&mut self, kind: FacetKind, selected: bool) -> Vec<VisibilityChange> {
        let before = self.snapshot();

        let labels: Vec<String> = self
            .store
            .groups_of(kind)
            .iter()
            .filter(|g| !g.is_empty())
            .map(|g| g.label.clone())
            .collect();
        for label in &labels {
            self.store.set_selected(kind, label, selected);
        }
        self.apply_groups(kind, |_| true);

        tracing::debug!("Toggled all {} groups to {}", kind, selected);
        self.changes_since(&before)
    }

    /// Write each matching non-empty group's state to its members, in store order
    fn apply_groups<F>(&mut self, kind: FacetKind, matches: F)
    where
        F: Fn(&str) -> bool,
    {
        for group in self.store.groups_of(kind) {
            if group.is_empty() || !matches(&group.label) {
                continue;
            }
            for id in &group.members {
                if let Some(flags) = self.flags.get_mut(id) {
                    flags.set_hidden(kind, !group.selected);
                }
            }
        }
    }

    fn snapshot(&self) -> Vec<bool> {
        self.store
            .item_ids()
            .iter()
            .map(|id| self.is_visible(id))
            .collect()
    }

    fn changes_since(&self, before: &[bool]) -> Vec<VisibilityChange> {
        self.store
            .item_ids()
            .iter()
            .zip(before)
            .filter_map(|(id, &was_visible)| {
                let visible = self.is_visible(id);
                (visible != was_visible).then(|| VisibilityChange {
                    id: id.clone(),
                    visible,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::Classifier;
    use crate::core::item::{Item, NO_EXT_LABEL, ROOT_LABEL};

    fn engine(items: &[Item]) -> ToggleEngine {
        ToggleEngine::new(Classifier::classify(items))
    }

    fn id(s: &str) -> ItemId {
        ItemId::from(s)
    }

    fn sample() -> Vec<Item> {
        vec![
            Item::new("a", "src/x.ts"),
            Item::new("b", "README"),
            Item::new("c", "src/y.ts"),
            Item::new("d", "docs/guide.md"),
        ]
    }

    #[test]
    fn test_everything_visible_after_build() {
        let engine = engine(&sample());
        assert_eq!(engine.visible_items().len(), 4);
        assert!(engine.all_selected(FacetKind::Extension));
        assert!(engine.all_selected(FacetKind::Folder));
    }

    #[test]
    fn test_extension_toggle_reports_changes() {
        let mut engine = engine(&sample());

        let changes = engine.toggle_group(FacetKind::Extension, "ts", false);
        assert_eq!(
            changes,
            vec![
                VisibilityChange { id: id("a"), visible: false },
                VisibilityChange { id: id("c"), visible: false },
            ]
        );
        assert!(engine.is_hidden_by(&id("a"), FacetKind::Extension));
        assert!(!engine.is_hidden_by(&id("a"), FacetKind::Folder));
        assert!(!engine.all_selected(FacetKind::Extension));

        let changes = engine.toggle_group(FacetKind::Extension, "ts", true);
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| c.visible));
        assert!(engine.all_selected(FacetKind::Extension));
    }

    #[test]
    fn test_toggle_is_idempotent() {
        let mut engine = engine(&sample());

        engine.toggle_group(FacetKind::Extension, "md", false);
        let flags = engine.flags(&id("d"));
        let changes = engine.toggle_group(FacetKind::Extension, "md", false);

        assert!(changes.is_empty());
        assert_eq!(engine.flags(&id("d")), flags);
        assert!(!engine.store().is_selected(FacetKind::Extension, "md"));
    }

    #[test]
    fn test_item_hidden_by_either_facet() {
        let mut engine = engine(&sample());

        engine.toggle_group(FacetKind::Folder, "src", false);
        let changes = engine.toggle_group(FacetKind::Extension, "ts", false);
        // already hidden by folder
        assert!(changes.is_empty());

        let changes = engine.toggle_group(FacetKind::Folder, "src", true);
        assert!(changes.is_empty());
        assert!(!engine.is_visible(&id("a")));

        let changes = engine.toggle_group(FacetKind::Extension, "ts", true);
        assert_eq!(changes.len(), 2);
        assert!(engine.is_visible(&id("a")));
    }

    #[test]
    fn test_unknown_and_empty_groups_are_ignored() {
        let mut engine = engine(&sample());

        assert!(engine.toggle_group(FacetKind::Folder, "nowhere", false).is_empty());
        assert!(engine.toggle_group(FacetKind::Extension, "\u{00AB}renamed\u{00BB}", false).is_empty());
        assert!(engine.store().is_selected(FacetKind::Extension, "\u{00AB}renamed\u{00BB}"));
        assert!(engine.all_selected(FacetKind::Extension));
    }

    #[test]
    fn test_overlapping_folders_last_write_wins() {
        let mut engine = engine(&[
            Item::new("d", "lib/a/f1.js"),
            Item::new("e", "lib/b/f2.js"),
        ]);

        engine.toggle_group(FacetKind::Folder, "lib", false);
        assert!(engine.is_hidden_by(&id("d"), FacetKind::Folder));
        assert!(engine.is_hidden_by(&id("e"), FacetKind::Folder));

        let changes = engine.toggle_group(FacetKind::Folder, "a", true);
        assert_eq!(changes, vec![VisibilityChange { id: id("d"), visible: true }]);
        assert!(!engine.is_hidden_by(&id("d"), FacetKind::Folder));
        assert!(engine.is_hidden_by(&id("e"), FacetKind::Folder));
        // "lib" itself stays deselected
        assert!(!engine.store().is_selected(FacetKind::Folder, "lib"));
    }

    #[test]
    fn test_duplicate_ids_reported_once() {
        let mut engine = engine(&[
            Item::new("a", "src/a.rs"),
            Item::new("a", "src/a.rs"),
            Item::new("b", "src/b.rs"),
        ]);

        let changes = engine.toggle_group(FacetKind::Folder, "src", false);
        assert_eq!(
            changes,
            vec![
                VisibilityChange { id: id("a"), visible: false },
                VisibilityChange { id: id("b"), visible: false },
            ]
        );
    }

    #[test]
    fn test_toggle_all_round_trip() {
        let mut engine = engine(&sample());
        engine.toggle_group(FacetKind::Folder, "docs", false);

        let changes = engine.toggle_all(FacetKind::Folder, false);
        assert_eq!(changes.len(), 3);
        assert!(engine.visible_items().is_empty());
        assert_eq!(engine.store().selected_non_empty_group_count(FacetKind::Folder), 0);

        let changes = engine.toggle_all(FacetKind::Folder, true);
        assert_eq!(changes.len(), 4);
        for item in sample() {
            assert!(!engine.is_hidden_by(&item.id, FacetKind::Folder));
        }
        assert!(engine.all_selected(FacetKind::Folder));
        assert!(engine.store().is_selected(FacetKind::Folder, ROOT_LABEL));
    }

    #[test]
    fn test_toggle_all_leaves_empty_groups_alone() {
        let mut engine = engine(&[Item::new("a", "src/x.ts"), Item::new("b", "src/y.rs")]);

        engine.toggle_all(FacetKind::Extension, false);
        assert!(engine.store().is_selected(FacetKind::Extension, NO_EXT_LABEL));
        assert!(!engine.all_selected(FacetKind::Extension));
    }

    #[test]
    fn test_empty_list() {
        let mut engine = engine(&[]);
        assert!(engine.toggle_all(FacetKind::Extension, false).is_empty());
        assert!(engine.all_selected(FacetKind::Folder));
        assert!(!engine.is_visible(&id("missing")));
    }
}
