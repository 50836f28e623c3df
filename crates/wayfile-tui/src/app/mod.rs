//! Main application state and event loop.

mod constants;
mod input;
mod render;
mod selection;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use wayfile_core::{DirectoryEntry, Project};
use wayfile_nav::{ChannelOpener, ListingRequest, ListingResponse, Navigator, OpenRequest, OpenTarget};
use wayfile_status::{StatusDriver, StatusView};

use crate::theme::Theme;
use crate::{StatusFeed, TuiConfig};

use self::constants::{MESSAGE_TIMEOUT_MS, TICK_INTERVAL_MS};
use self::selection::{ListNavigator, ListSelection};
use self::state::{AppMode, Message, UserSettings};

/// Result type for the TUI.
pub type AppResult<T> = color_eyre::Result<T>;

/// Main application state.
pub struct App {
    navigator: Navigator,
    selection: ListSelection,
    mode: AppMode,
    theme: Theme,
    settings: UserSettings,
    settings_path: Option<PathBuf>,
    message: Option<Message>,
    /// Path of the listing currently on screen.
    shown_path: Option<String>,
    initial_project: Option<Project>,

    listings_tx: mpsc::UnboundedSender<ListingResponse>,
    listings_rx: mpsc::UnboundedReceiver<ListingResponse>,
    opened_rx: mpsc::UnboundedReceiver<OpenRequest>,

    status_feed: Option<StatusFeed>,
    status: Option<watch::Receiver<StatusView>>,
    status_view: StatusView,

    needs_redraw: bool,
}

impl App {
    /// Create the application from a configuration.
    pub fn new(config: TuiConfig) -> Self {
        let TuiConfig {
            listing,
            project,
            prefs,
            navigator,
            settings,
            settings_path,
            status_feed,
        } = config;

        let (opener, opened_rx) = ChannelOpener::new();
        let navigator = Navigator::new(navigator, listing, Arc::new(opener), prefs);
        let (listings_tx, listings_rx) = mpsc::unbounded_channel();

        Self {
            navigator,
            selection: ListSelection::default(),
            mode: AppMode::Normal,
            theme: Theme::from_variant(settings.theme),
            settings,
            settings_path,
            message: None,
            shown_path: None,
            initial_project: project,
            listings_tx,
            listings_rx,
            opened_rx,
            status_feed,
            status: None,
            status_view: StatusView::hidden(),
            needs_redraw: true,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    /// Run the application until the user quits.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        self.start();

        let period = Duration::from_millis(TICK_INTERVAL_MS);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();

        while self.mode != AppMode::Quit {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(Ok(event)) = events.next() => {
                    match event {
                        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                            self.handle_key(key_event);
                        }
                        Event::Resize(..) => {}
                        _ => continue,
                    }
                    self.needs_redraw = true;
                }

                Some(response) = self.listings_rx.recv() => {
                    self.handle_listing(response);
                    self.needs_redraw = true;
                }

                Some(request) = self.opened_rx.recv() => {
                    self.handle_open_request(request);
                    self.needs_redraw = true;
                }

                view = status_changed(&mut self.status) => {
                    match view {
                        Some(view) => self.status_view = view,
                        None => {
                            debug!("Status feed closed");
                            self.status = None;
                            self.status_view = StatusView::hidden();
                        }
                    }
                    self.needs_redraw = true;
                }

                _ = interval.tick() => {
                    self.expire_message();
                }
            }
        }

        info!("Exiting");
        Ok(())
    }

    /// Spawn the status feed and open the initial project.
    ///
    /// Must be called from within the runtime.
    fn start(&mut self) {
        if let Some(feed) = self.status_feed.take() {
            tokio::spawn(feed.producer);
            let (driver, views) = StatusDriver::new(feed.config, feed.signals);
            tokio::spawn(driver.run());
            self.status = Some(views);
        }

        if let Some(project) = self.initial_project.take() {
            self.open_project(project);
        }
    }

    fn open_project(&mut self, project: Project) {
        info!(project = %project.name, "Opening project");
        if self.settings.last_project.as_deref() != Some(project.name.as_str()) {
            self.settings.last_project = Some(project.name.clone());
            self.persist_settings();
        }
        let request = self.navigator.select_project(project);
        self.dispatch(Some(request));
    }

    /// Fetch a listing on a background task. The response comes back
    /// through the listings channel.
    fn dispatch(&mut self, request: Option<ListingRequest>) {
        let Some(request) = request else { return };
        let service = self.navigator.listing_service();
        let tx = self.listings_tx.clone();
        tokio::spawn(async move {
            let response = request.fetch(service.as_ref()).await;
            let _ = tx.send(response);
        });
    }

    fn handle_listing(&mut self, response: ListingResponse) {
        let path = response.path.clone();
        if !self.navigator.apply_listing(response) {
            return;
        }
        let count = self.navigator.filtered_entries().len();
        if self.shown_path.as_deref() == Some(path.as_str()) {
            self.selection.set_count(count);
        } else {
            self.selection.reset(count);
            self.shown_path = Some(path);
        }
    }

    fn handle_open_request(&mut self, request: OpenRequest) {
        let viewer = match request.target {
            OpenTarget::Image => "image viewer",
            OpenTarget::Document => "editor",
        };
        info!(path = %request.full_path(), viewer, "Open requested");
        self.message = Some(Message::info(format!(
            "Opening {} in {viewer}",
            request.full_path()
        )));
    }

    fn expire_message(&mut self) {
        let timeout = Duration::from_millis(MESSAGE_TIMEOUT_MS);
        if self.message.as_ref().is_some_and(|m| m.is_expired(timeout)) {
            self.message = None;
            self.needs_redraw = true;
        }
    }

    /// Entry under the cursor, after filtering.
    fn selected_entry(&self) -> Option<DirectoryEntry> {
        self.navigator
            .filtered_entries()
            .get(self.selection.selected())
            .map(|entry| (*entry).clone())
    }

    fn persist_settings(&mut self) {
        let Some(path) = &self.settings_path else { return };
        if let Err(err) = self.settings.save_to(path) {
            warn!(path = %path.display(), error = %err, "Failed to save settings");
            self.message = Some(Message::warning(format!("Failed to save settings: {err}")));
        }
    }
}

async fn status_changed(status: &mut Option<watch::Receiver<StatusView>>) -> Option<StatusView> {
    match status {
        Some(rx) => match rx.changed().await {
            Ok(()) => Some(rx.borrow_and_update().clone()),
            Err(_) => None,
        },
        None => std::future::pending().await,
    }
}
