//! Core functionality module
//!
//! Contains item classification, facet state and visibility toggling

pub mod item;
pub mod classifier;
pub mod store;
pub mod toggle;
pub mod session;

// Re-export main types
pub use item::{FacetKind, Item, ItemId};
pub use item::{ALL_LABEL, DOT_FILES_LABEL, NO_EXT_LABEL, RENAMED_LABEL, RENAME_ARROW, ROOT_LABEL};
pub use classifier::{extension_label, folder_labels, Classifier};
pub use store::{FacetStore, Group};
pub use toggle::{ToggleEngine, VisibilityChange, VisibilityFlags};
pub use session::FilterSession;
