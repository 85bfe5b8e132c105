//! Facet groups and their selection state
//!
//! The store is a plain data holder: it knows which items belong to which
//! group and which groups are selected. Visibility of items is derived by
//! the toggle engine, never here.

use std::collections::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use super::item::{FacetKind, ItemId};

/// Named subset of items under one facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub label: String,
    pub members: Vec<ItemId>,
    pub selected: bool,
}

impl Group {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            members: Vec::new(),
            selected: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.members.contains(id)
    }
}

/// Groups of a single facet, kept in first-seen order
#[derive(Debug, Clone, Default)]
struct Facet {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
    /// Member sets parallel to `groups`, for constant-time dedup
    member_sets: Vec<HashSet<ItemId>>,
}

impl Facet {
    fn with_reserved(kind: FacetKind) -> Self {
        let mut facet = Self::default();
        for label in kind.reserved_labels() {
            facet.group_index(label);
        }
        facet
    }

    fn group_index(&mut self, label: &str) -> usize {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.groups.len();
        self.groups.push(Group::new(label));
        self.member_sets.push(HashSet::new());
        self.index.insert(label.to_string(), idx);
        idx
    }

    fn get(&self, label: &str) -> Option<&Group> {
        self.index.get(label).map(|&idx| &self.groups[idx])
    }

    fn get_mut(&mut self, label: &str) -> Option<&mut Group> {
        match self.index.get(label) {
            Some(&idx) => self.groups.get_mut(idx),
            None => None,
        }
    }
}

/// Per-facet mapping from group label to member ids, plus selection state
#[derive(Debug, Clone)]
pub struct FacetStore {
    extension: Facet,
    folder: Facet,
    items: Vec<ItemId>,
    seen: HashSet<ItemId>,
}

impl Default for FacetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FacetStore {
    /// Empty store holding only the reserved groups, all selected
    pub fn new() -> Self {
        Self {
            extension: Facet::with_reserved(FacetKind::Extension),
            folder: Facet::with_reserved(FacetKind::Folder),
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn facet(&self, kind: FacetKind) -> &Facet {
        match kind {
            FacetKind::Extension => &self.extension,
            FacetKind::Folder => &self.folder,
        }
    }

    fn facet_mut(&mut self, kind: FacetKind) -> &mut Facet {
        match kind {
            FacetKind::Extension => &mut self.extension,
            FacetKind::Folder => &mut self.folder,
        }
    }

    /// Register an item so it takes part in visibility tracking.
    ///
    /// Returns `false` for an id that is already registered.
    pub(crate) fn push_item(&mut self, id: ItemId) -> bool {
        if !self.seen.insert(id.clone()) {
            return false;
        }
        self.items.push(id);
        true
    }

    /// Add `id` to the group `label`, creating the group on first sight
    pub(crate) fn add_member(&mut self, kind: FacetKind, label: &str, id: &ItemId) {
        let facet = self.facet_mut(kind);
        let idx = facet.group_index(label);
        if facet.member_sets[idx].insert(id.clone()) {
            facet.groups[idx].members.push(id.clone());
        }
    }

    /// All groups of a facet, reserved labels first, then first-seen order
    pub fn groups_of(&self, kind: FacetKind) -> &[Group] {
        &self.facet(kind).groups
    }

    pub fn group(&self, kind: FacetKind, label: &str) -> Option<&Group> {
        self.facet(kind).get(label)
    }

    /// Unknown labels read as not selected
    pub fn is_selected(&self, kind: FacetKind, label: &str) -> bool {
        self.group(kind, label).map_or(false, |g| g.selected)
    }

    /// Returns `false` when the label is unknown, leaving the store untouched
    pub fn set_selected(&mut self, kind: FacetKind, label: &str, selected: bool) -> bool {
        match self.facet_mut(kind).get_mut(label) {
            Some(group) => {
                group.selected = selected;
                true
            }
            None => false,
        }
    }

    pub fn non_empty_group_count(&self, kind: FacetKind) -> usize {
        self.groups_of(kind).iter().filter(|g| !g.is_empty()).count()
    }

    pub fn selected_non_empty_group_count(&self, kind: FacetKind) -> usize {
        self.groups_of(kind)
            .iter()
            .filter(|g| !g.is_empty() && g.selected)
            .count()
    }

    pub fn all_selected(&self, kind: FacetKind) -> bool {
        self.selected_non_empty_group_count(kind) == self.non_empty_group_count(kind)
    }

    /// Classified items in input order
    pub fn item_ids(&self) -> &[ItemId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
