//! Directory navigation over a remote project workspace.
//!
//! This crate provides:
//! - [`Navigator`]: location, listing merge, breadcrumbs and filtering
//! - [`ListingService`] with HTTP and in-memory implementations
//! - [`FileOpener`] and [`PreferenceStore`] collaborators

mod config;
mod http;
mod listing;
mod navigator;
mod opener;
mod prefs;

pub use config::{
    ClientConfig, ClientConfigBuilder, ConfigError, DEFAULT_TIMEOUT, NavigatorConfig,
    NavigatorConfigBuilder, StalePolicy,
};
pub use http::HttpListingService;
pub use listing::{ListingRequest, ListingResponse, ListingService, StaticListingService, Ticket};
pub use navigator::{NavigationState, Navigator};
pub use opener::{ChannelOpener, FileOpener, NoopOpener, OpenRequest, OpenTarget};
pub use prefs::{MemoryPreferenceStore, PreferenceStore, TomlPreferenceStore};
