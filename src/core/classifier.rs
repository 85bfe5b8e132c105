//! Partitioning of diff entries into extension and folder groups

use super::item::{
    FacetKind, Item, DOT_FILES_LABEL, NO_EXT_LABEL, RENAMED_LABEL, ROOT_LABEL,
};
use super::store::FacetStore;

/// Builds a fresh [`FacetStore`] from the items of the current diff view
pub struct Classifier;

impl Classifier {
    /// Classify `items` in order. Every group starts out selected.
    pub fn classify(items: &[Item]) -> FacetStore {
        let mut store = FacetStore::new();

        for item in items {
            if !store.push_item(item.id.clone()) {
                tracing::debug!("Skipping duplicate item {}", item.id);
                continue;
            }

            let ext = extension_label(item);
            store.add_member(FacetKind::Extension, &ext, &item.id);

            let folders = folder_labels(item.text());
            if folders.is_empty() {
                store.add_member(FacetKind::Folder, ROOT_LABEL, &item.id);
            } else {
                for folder in folders {
                    store.add_member(FacetKind::Folder, folder, &item.id);
                }
            }
        }

        tracing::debug!(
            "Classified {} items into {} extension and {} folder groups",
            items.len(),
            store.non_empty_group_count(FacetKind::Extension),
            store.non_empty_group_count(FacetKind::Folder)
        );

        store
    }
}

/// Extension group an item belongs to
pub fn extension_label(item: &Item) -> String {
    let filename = item.filename();

    if item.is_rename() {
        return RENAMED_LABEL.to_string();
    }
    if !filename.contains('.') {
        return NO_EXT_LABEL.to_string();
    }

    let ext = filename
        .rsplit(|c: char| matches!(c, '.' | '/' | '\\'))
        .next()
        .unwrap_or_default();
    if ext.is_empty() {
        // "name." has nothing after the dot
        NO_EXT_LABEL.to_string()
    } else if filename.get(1..) == Some(ext) {
        DOT_FILES_LABEL.to_string()
    } else {
        ext.to_string()
    }
}

/// Directory segments of a display path; empty for root-level files
pub fn folder_labels(text: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = text.split('/').collect();
    if segments.len() <= 1 {
        return Vec::new();
    }
    segments.pop();
    segments
}
