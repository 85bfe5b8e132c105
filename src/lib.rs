pub mod cli;
pub mod config;
pub mod core;
pub mod events;
pub mod scanner;
pub mod ui;
pub mod watcher;

pub use config::FacetsConfig;
pub use crate::core::*;
pub use events::*;
pub use scanner::DiffScanner;
pub use ui::{Click, FilterBar, FilterButton};
pub use watcher::InputWatcher;
