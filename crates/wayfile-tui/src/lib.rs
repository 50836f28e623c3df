//! Terminal user interface for wayfile.
//!
//! An interactive browser for a remote project workspace, built with
//! ratatui on top of [`wayfile_nav::Navigator`]. An optional status feed
//! drives an activity line through [`wayfile_status::StatusDriver`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use wayfile_core::Project;
//! use wayfile_nav::{ClientConfig, HttpListingService};
//! use wayfile_tui::TuiConfig;
//!
//! let client = ClientConfig::builder()
//!     .base_url("http://localhost:3001")
//!     .build()
//!     .unwrap();
//! let listing = HttpListingService::new(client).unwrap();
//! let config = TuiConfig::new(Arc::new(listing)).with_project(Project::new("site", "/srv/site"));
//! wayfile_tui::run_with_config(config).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `j`/`k` - Move down/up
//! - `Enter`/`l` - Open directory or file
//! - `Backspace`/`h`/`-` - Go to parent
//! - `1`-`9` - Jump to breadcrumb
//! - `/` - Search, `Esc` to clear
//! - `v` - Cycle view mode
//! - `?` - Help
//! - `q` - Quit

pub mod app;
mod event;
mod theme;
mod ui;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::mpsc;
use wayfile_core::{Project, StatusSignal};
use wayfile_nav::{ListingService, MemoryPreferenceStore, NavigatorConfig, PreferenceStore};
use wayfile_status::StatusConfig;

pub use app::state::UserSettings;
pub use app::{App, AppResult};
pub use theme::{Theme, ThemeVariant};

/// Status signals for the activity line and the task producing them.
pub struct StatusFeed {
    pub(crate) signals: mpsc::Receiver<StatusSignal>,
    pub(crate) producer: BoxFuture<'static, ()>,
    pub(crate) config: StatusConfig,
}

impl StatusFeed {
    /// `producer` is spawned on the TUI runtime and should send into the
    /// channel `signals` receives from.
    pub fn new(
        signals: mpsc::Receiver<StatusSignal>,
        producer: impl Future<Output = ()> + Send + 'static,
    ) -> Self {
        Self {
            signals,
            producer: Box::pin(producer),
            config: StatusConfig::default(),
        }
    }

    pub fn with_config(mut self, config: StatusConfig) -> Self {
        self.config = config;
        self
    }
}

/// Configuration for a TUI session.
pub struct TuiConfig {
    pub(crate) listing: Arc<dyn ListingService>,
    pub(crate) project: Option<Project>,
    pub(crate) prefs: Box<dyn PreferenceStore>,
    pub(crate) navigator: NavigatorConfig,
    pub(crate) settings: UserSettings,
    pub(crate) settings_path: Option<PathBuf>,
    pub(crate) status_feed: Option<StatusFeed>,
}

impl TuiConfig {
    /// Start from a listing service, in-memory preferences and default
    /// settings saved to the standard config location.
    pub fn new(listing: Arc<dyn ListingService>) -> Self {
        Self {
            listing,
            project: None,
            prefs: Box::new(MemoryPreferenceStore::new()),
            navigator: NavigatorConfig::default(),
            settings: UserSettings::default(),
            settings_path: UserSettings::config_path(),
            status_feed: None,
        }
    }

    /// Project opened on startup.
    pub fn with_project(mut self, project: Project) -> Self {
        self.project = Some(project);
        self
    }

    pub fn with_preferences(mut self, prefs: impl PreferenceStore + 'static) -> Self {
        self.prefs = Box::new(prefs);
        self
    }

    pub fn with_navigator_config(mut self, config: NavigatorConfig) -> Self {
        self.navigator = config;
        self
    }

    pub fn with_settings(mut self, settings: UserSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Where settings changes are written. `None` keeps them in memory.
    pub fn with_settings_path(mut self, path: Option<PathBuf>) -> Self {
        self.settings_path = path;
        self
    }

    pub fn with_status_feed(mut self, feed: StatusFeed) -> Self {
        self.status_feed = Some(feed);
        self
    }
}

/// Run the TUI application with the given configuration.
pub fn run_with_config(config: TuiConfig) -> AppResult<()> {
    let rt = tokio::runtime::Runtime::new()?;

    let terminal = ratatui::init();
    let result = rt.block_on(App::new(config).run(terminal));
    ratatui::restore();

    // Shutdown runtime immediately to cancel background tasks
    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}
