//! Configuration management for diff-facets
//!
//! This module provides configuration structures and defaults for filter bar
//! display, diff scanning and input watching.

use std::path::Path;
use std::time::Duration;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Global configuration for diff-facets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetsConfig {
    /// Filter bar display configuration
    pub display: DisplayConfig,
    /// Diff scanning configuration
    pub scanner: ScannerConfig,
    /// Input watcher configuration
    pub watcher: WatcherConfig,
}

/// Configuration for filter bar display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Non-empty groups a facet needs before its bar is shown
    pub min_groups: usize,
    /// Show member counts next to group labels
    pub show_counts: bool,
    /// List filtered-out files as well, dimmed
    pub show_hidden: bool,
}

/// Configuration for turning diffs into items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Prefix of generated item ids
    pub id_prefix: String,
}

/// Configuration for watching the input file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Debounce duration for file events in milliseconds
    pub event_debounce_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            min_groups: 2,
            show_counts: true,
            show_hidden: false,
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            id_prefix: "diff-".to_string(),
        }
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            event_debounce_ms: 100,
        }
    }
}

impl WatcherConfig {
    /// Get event debounce duration
    pub fn event_debounce_duration(&self) -> Duration {
        Duration::from_millis(self.event_debounce_ms)
    }
}

/// Configuration loading and management
impl FacetsConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path` when given, else defaults; environment overrides apply to both
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        // Override with environment variables if present
        if let Ok(val) = std::env::var("DIFF_FACETS_MIN_GROUPS") {
            if let Ok(min) = val.parse::<usize>() {
                self.display.min_groups = min;
            }
        }

        if let Ok(val) = std::env::var("DIFF_FACETS_SHOW_COUNTS") {
            if let Ok(show) = val.parse::<bool>() {
                self.display.show_counts = show;
            }
        }

        if let Ok(val) = std::env::var("DIFF_FACETS_ID_PREFIX") {
            self.scanner.id_prefix = val;
        }

        if let Ok(val) = std::env::var("DIFF_FACETS_EVENT_DEBOUNCE_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                self.watcher.event_debounce_ms = ms;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.display.min_groups == 0 {
            return Err("min_groups must be greater than 0".to_string());
        }

        if self.scanner.id_prefix.chars().any(char::is_whitespace) {
            return Err("id_prefix must not contain whitespace".to_string());
        }

        Ok(())
    }
}
