//! Core types for wayfile.
//!
//! This crate provides the data structures shared by the navigation engine,
//! the status engine and the terminal UI: directory entries, project paths,
//! breadcrumbs, view modes and the activity signals fed to the status line.

mod entry;
mod error;
pub mod format;
pub mod path;
mod project;
mod signal;
mod version;
mod view_mode;

pub use entry::{DirectoryEntry, EntryKind, FileCategory};
pub use error::{ListingError, PreferenceError};
pub use project::{Breadcrumb, Project};
pub use signal::{ActiveTool, ColorTag, ExplicitStatus, StatusSignal, TokenUsage};
pub use version::{is_newer_version, Version};
pub use view_mode::ViewMode;
