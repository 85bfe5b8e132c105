//! Turning diff output into filterable items
//!
//! The scanner plays the part of the page observer: it reads whatever
//! describes the current diff (raw `git diff` output, a list of paths or a
//! JSON array) and produces the item descriptors a rebuild consumes.

use std::io::Read;
use std::path::Path;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::cli::InputFormat;
use crate::config::ScannerConfig;
use crate::core::{Item, ItemId, RENAME_ARROW};

pub struct DiffScanner {
    id_prefix: String,
    header: Regex,
}

#[derive(Deserialize)]
struct JsonEntry {
    id: Option<String>,
    display_path: String,
    #[serde(default)]
    is_renamed: bool,
}

/// Entry being collected while walking a diff
struct PendingEntry {
    old_path: String,
    new_path: String,
    renamed: bool,
}

impl DiffScanner {
    pub fn new(config: &ScannerConfig) -> Result<Self> {
        let header = Regex::new(r"^diff --git a/(.+) b/(.+)$")
            .context("Failed to compile diff header pattern")?;
        Ok(Self {
            id_prefix: config.id_prefix.clone(),
            header,
        })
    }

    /// Anchor id of a file: prefix plus the hex SHA-256 of its path
    pub fn item_id(&self, path: &str) -> ItemId {
        let digest = Sha256::digest(path.as_bytes());
        ItemId::new(format!("{}{}", self.id_prefix, hex::encode(digest)))
    }

    pub fn scan(&self, input: &str, format: InputFormat) -> Result<Vec<Item>> {
        let items = match format {
            InputFormat::Diff => self.scan_diff(input),
            InputFormat::Paths => self.scan_paths(input),
            InputFormat::Json => self.scan_json(input)?,
        };
        tracing::debug!("Scanned {} items from {:?} input", items.len(), format);
        Ok(items)
    }

    pub fn scan_file<P: AsRef<Path>>(&self, path: P, format: InputFormat) -> Result<Vec<Item>> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display()))?;
        self.scan(&input, format)
    }

    /// One item per `diff --git` header; `rename from` / `rename to` mark renames
    pub fn scan_diff(&self, input: &str) -> Vec<Item> {
        let mut items = Vec::new();
        let mut pending: Option<PendingEntry> = None;

        for line in input.lines() {
            if let Some(caps) = self.header.captures(line) {
                if let Some(entry) = pending.take() {
                    items.push(self.finish(entry));
                }
                pending = Some(PendingEntry {
                    old_path: caps[1].to_string(),
                    new_path: caps[2].to_string(),
                    renamed: false,
                });
            } else if let Some(entry) = pending.as_mut() {
                if let Some(from) = line.strip_prefix("rename from ") {
                    entry.old_path = from.to_string();
                    entry.renamed = true;
                } else if let Some(to) = line.strip_prefix("rename to ") {
                    entry.new_path = to.to_string();
                    entry.renamed = true;
                }
            } else if line.starts_with("diff --git") {
                tracing::warn!("Skipping unparsable diff header: {}", line);
            }
        }

        if let Some(entry) = pending.take() {
            items.push(self.finish(entry));
        }
        items
    }

    fn finish(&self, entry: PendingEntry) -> Item {
        let id = self.item_id(&entry.new_path);
        if entry.renamed && entry.old_path != entry.new_path {
            Item::renamed(id, &entry.old_path, &entry.new_path)
        } else {
            Item::new(id, entry.new_path)
        }
    }

    /// One path per line, or `git diff --name-status` lines
    pub fn scan_paths(&self, input: &str) -> Vec<Item> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                if line.contains('\t') {
                    return self.name_status_item(line);
                }
                match line.split_once(RENAME_ARROW) {
                    Some((from, to)) => Item::renamed(self.item_id(to.trim()), from.trim(), to.trim()),
                    None => Item::new(self.item_id(line), line),
                }
            })
            .collect()
    }

    fn name_status_item(&self, line: &str) -> Item {
        let fields: Vec<&str> = line.split('\t').collect();
        match fields.as_slice() {
            [status, from, to] if status.starts_with('R') => {
                Item::renamed(self.item_id(to), from, to)
            }
            [.., path] => Item::new(self.item_id(path), *path),
            [] => Item::new(self.item_id(line), line),
        }
    }

    /// JSON array of `{id?, display_path, is_renamed?}`
    pub fn scan_json(&self, input: &str) -> Result<Vec<Item>> {
        let entries: Vec<JsonEntry> =
            serde_json::from_str(input).context("Failed to parse JSON item list")?;

        Ok(entries
            .into_iter()
            .map(|entry| {
                let id = match entry.id {
                    Some(id) => ItemId::new(id),
                    None => self.item_id(entry.display_path.trim()),
                };
                Item::new(id, entry.display_path).with_renamed(entry.is_renamed)
            })
            .collect())
    }
}

/// Read the whole input, `-` meaning stdin
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        Ok(input)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display()))
    }
}
