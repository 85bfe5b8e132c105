use std::path::PathBuf;
use clap::{Parser, ValueEnum};

use crate::core::FacetKind;

#[derive(Parser)]
#[command(name = "diff-facets")]
#[command(version)]
#[command(about = "Filter the files of a diff by extension and folder")]
#[command(long_about = "diff-facets reads a diff (or a list of changed paths), groups its files by extension and by folder, and prints filter bars together with the files left visible by the selected groups.")]
pub struct Cli {
    /// Diff or path list to read
    #[arg(value_name = "INPUT", default_value = "-", help = "Input file (defaults to stdin)")]
    pub input: PathBuf,

    /// How to interpret the input
    #[arg(short, long, default_value = "diff", help = "Input format")]
    pub format: InputFormat,

    /// Output format
    #[arg(short, long, default_value = "text", help = "Output format")]
    pub output: OutputFormat,

    /// Extension groups to deselect
    #[arg(long, value_delimiter = ',', help = "Extension groups to hide (e.g., ts,md)")]
    pub hide_extension: Option<Vec<String>>,

    /// Folder groups to deselect
    #[arg(long, value_delimiter = ',', help = "Folder groups to hide (e.g., docs,tests)")]
    pub hide_folder: Option<Vec<String>>,

    /// Rebuild whenever the input file changes
    #[arg(short, long, help = "Watch the input file and re-render on change")]
    pub watch: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Disable colors in output
    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Output of `git diff`
    Diff,
    /// One path per line, or `git diff --name-status`
    Paths,
    /// JSON array of items
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Filter bars and file list (default)
    Text,
    /// JSON output for scripting
    Json,
    /// Visible paths only, one per line
    Compact,
}

impl Cli {
    pub fn reads_stdin(&self) -> bool {
        self.input == PathBuf::from("-")
    }

    /// Groups to deselect after every rebuild
    pub fn hidden_groups(&self) -> Vec<(FacetKind, String)> {
        let extensions = self
            .hide_extension
            .iter()
            .flatten()
            .map(|label| (FacetKind::Extension, label.trim().to_string()));
        let folders = self
            .hide_folder
            .iter()
            .flatten()
            .map(|label| (FacetKind::Folder, label.trim().to_string()));
        extensions.chain(folders).collect()
    }

    pub fn setup_logging(&self) {
        let level = if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.watch && self.reads_stdin() {
            return Err("--watch needs an input file, not stdin".to_string());
        }

        if !self.reads_stdin() && !self.input.is_file() {
            return Err(format!("Input is not a file: {}", self.input.display()));
        }

        if let Some(ref config) = self.config {
            if !config.is_file() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }

        Ok(())
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            input: PathBuf::from("-"),
            format: InputFormat::Diff,
            output: OutputFormat::Text,
            hide_extension: None,
            hide_folder: None,
            watch: false,
            config: None,
            verbose: false,
            no_color: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hidden_groups() {
        let cli = Cli::parse_from([
            "diff-facets",
            "changes.diff",
            "--hide-extension",
            "ts, md",
            "--hide-folder",
            "docs",
        ]);

        assert_eq!(
            cli.hidden_groups(),
            vec![
                (FacetKind::Extension, "ts".to_string()),
                (FacetKind::Extension, "md".to_string()),
                (FacetKind::Folder, "docs".to_string()),
            ]
        );
        assert_eq!(cli.format, InputFormat::Diff);
    }

    #[test]
    fn test_watch_requires_file() {
        let cli = Cli {
            watch: true,
            ..Cli::default()
        };
        assert!(cli.validate().is_err());
        assert!(Cli::default().validate().is_ok());
    }

    #[test]
    fn test_missing_input_fails_validation() {
        let cli = Cli::parse_from(["diff-facets", "/definitely/not/here.diff", "-f", "paths"]);
        assert_eq!(cli.format, InputFormat::Paths);
        assert!(cli.validate().is_err());
    }
}
