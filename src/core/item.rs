use std::fmt;
use serde::{Deserialize, Serialize};

/// Label of the aggregate button of a filter bar
pub const ALL_LABEL: &str = "\u{00AB}all\u{00BB}";
/// Folder group for items without a directory component
pub const ROOT_LABEL: &str = "\u{00AB}root\u{00BB}";
/// Extension group for filenames without a dot
pub const NO_EXT_LABEL: &str = "\u{00AB}no-ext\u{00BB}";
/// Extension group for dotfiles such as `.gitignore`
pub const DOT_FILES_LABEL: &str = "\u{00AB}dot-files\u{00BB}";
/// Extension group for renamed files
pub const RENAMED_LABEL: &str = "\u{00AB}renamed\u{00BB}";

/// Separator GitHub puts between the old and new path of a renamed file
pub const RENAME_ARROW: &str = " \u{2192} ";

/// Stable identifier of a diff entry (the anchor name of the file block)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One file entry of a diff view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Full display text, `/` separated. Renames read `old → new`.
    pub display_path: String,
    #[serde(default)]
    pub is_renamed: bool,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, display_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_path: display_path.into(),
            is_renamed: false,
        }
    }

    /// Build a renamed entry, displayed as `from → to`
    pub fn renamed(id: impl Into<ItemId>, from: &str, to: &str) -> Self {
        Self {
            id: id.into(),
            display_path: format!("{}{}{}", from, RENAME_ARROW, to),
            is_renamed: true,
        }
    }

    pub fn with_renamed(mut self, is_renamed: bool) -> Self {
        self.is_renamed = is_renamed;
        self
    }

    /// Display text with surrounding whitespace removed
    pub fn text(&self) -> &str {
        self.display_path.trim()
    }

    pub fn is_rename(&self) -> bool {
        self.is_renamed || self.display_path.contains(RENAME_ARROW)
    }

    /// Last `/` separated segment of the display text
    pub fn filename(&self) -> &str {
        self.text().rsplit('/').next().unwrap_or_default()
    }
}

/// Classification dimension over items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
    Extension,
    Folder,
}

impl FacetKind {
    /// Facets in the order their filter bars are rendered
    pub const ALL: [FacetKind; 2] = [FacetKind::Folder, FacetKind::Extension];

    pub fn name(&self) -> &'static str {
        match self {
            FacetKind::Extension => "extension",
            FacetKind::Folder => "folder",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            FacetKind::Extension => "Filter file extension",
            FacetKind::Folder => "Filter file folder",
        }
    }

    /// Labels that always lead the group listing of this facet
    pub fn reserved_labels(&self) -> &'static [&'static str] {
        match self {
            FacetKind::Extension => &[NO_EXT_LABEL, DOT_FILES_LABEL, RENAMED_LABEL],
            FacetKind::Folder => &[ROOT_LABEL],
        }
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
