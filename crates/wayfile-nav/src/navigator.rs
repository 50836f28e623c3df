//! Directory navigation engine.
//!
//! The [`Navigator`] owns the current location inside a project and the
//! entries shown for it. Commands update the location synchronously and
//! hand back a [`ListingRequest`]; the listing arrives later through
//! [`Navigator::apply_listing`]. Listing failures never escape: they turn
//! into a single error placeholder entry.

use std::sync::Arc;

use tracing::{debug, warn};
use wayfile_core::path::{join, normalize, parent_of};
use wayfile_core::{Breadcrumb, DirectoryEntry, EntryKind, PreferenceError, Project, ViewMode};

use crate::config::{NavigatorConfig, StalePolicy};
use crate::listing::{ListingRequest, ListingResponse, ListingService, Ticket};
use crate::opener::{FileOpener, OpenRequest};
use crate::prefs::PreferenceStore;

/// Everything the presentation layer reads from the navigator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub project: Option<Project>,
    /// Project-relative location; `""` is the project root.
    pub current_path: String,
    pub entries: Vec<DirectoryEntry>,
    pub search_query: String,
    pub view_mode: ViewMode,
}

/// Client-side navigation over a remote project.
pub struct Navigator {
    config: NavigatorConfig,
    listing: Arc<dyn ListingService>,
    opener: Arc<dyn FileOpener>,
    prefs: Box<dyn PreferenceStore>,
    state: NavigationState,
    last_ticket: u64,
    /// Ticket of the most recent request while it is still outstanding.
    pending: Option<Ticket>,
}

impl Navigator {
    /// Create a navigator with no project selected.
    ///
    /// The view mode is restored from `prefs`; unknown stored values are
    /// ignored.
    pub fn new(
        config: NavigatorConfig,
        listing: Arc<dyn ListingService>,
        opener: Arc<dyn FileOpener>,
        prefs: Box<dyn PreferenceStore>,
    ) -> Self {
        let view_mode = prefs
            .get(&config.preference_key)
            .and_then(|value| ViewMode::from_preference(&value))
            .unwrap_or_default();

        Self {
            config,
            listing,
            opener,
            prefs,
            state: NavigationState {
                view_mode,
                ..Default::default()
            },
            last_ticket: 0,
            pending: None,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn project(&self) -> Option<&Project> {
        self.state.project.as_ref()
    }

    pub fn current_path(&self) -> &str {
        &self.state.current_path
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.state.entries
    }

    pub fn search_query(&self) -> &str {
        &self.state.search_query
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Shared handle to the listing service, for fetching on another task.
    pub fn listing_service(&self) -> Arc<dyn ListingService> {
        Arc::clone(&self.listing)
    }

    /// Whether the most recent listing request is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Switch to `project` and load its root.
    pub fn select_project(&mut self, project: Project) -> ListingRequest {
        debug!(project = %project.name, "Selecting project");
        self.state.current_path.clear();
        self.state.entries.clear();
        self.state.search_query.clear();
        let request = self.issue(project.clone(), String::new());
        self.state.project = Some(project);
        request
    }

    /// Move to `path` and request its listing.
    ///
    /// Returns `None` when no project is selected.
    pub fn load_directory(&mut self, path: &str) -> Option<ListingRequest> {
        let project = self.state.project.clone()?;
        let path = normalize(path);
        self.state.current_path.clone_from(&path);
        Some(self.issue(project, path))
    }

    /// Activate an entry.
    ///
    /// Directories and parent links navigate. Files are handed to the
    /// opener and leave the location unchanged. Error placeholders do
    /// nothing.
    pub fn enter(&mut self, entry: &DirectoryEntry) -> Option<ListingRequest> {
        match &entry.kind {
            EntryKind::ParentLink => self.load_directory(&entry.path),
            EntryKind::Directory => {
                let target = join(&self.state.current_path, &entry.name);
                self.load_directory(&target)
            }
            EntryKind::File { .. } => {
                if let Some(project) = &self.state.project {
                    self.opener.open(OpenRequest::for_entry(project, entry));
                }
                None
            }
            EntryKind::ErrorPlaceholder { .. } => None,
        }
    }

    /// Go to the parent of the current location. `None` at the root.
    pub fn go_up(&mut self) -> Option<ListingRequest> {
        if self.state.current_path.is_empty() {
            return None;
        }
        let parent = parent_of(&self.state.current_path);
        self.load_directory(&parent)
    }

    /// Jump to a breadcrumb path. Reloads even when already there.
    pub fn jump_to_breadcrumb(&mut self, path: &str) -> Option<ListingRequest> {
        self.load_directory(path)
    }

    /// Reissue the listing of the current location.
    pub fn refresh(&mut self) -> Option<ListingRequest> {
        let path = self.state.current_path.clone();
        self.load_directory(&path)
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
    }

    /// Entries matching the search query, in listing order.
    ///
    /// Matching is a case-insensitive substring test on the name. Parent
    /// links and error placeholders are always kept.
    pub fn filtered_entries(&self) -> Vec<&DirectoryEntry> {
        let query = self.state.search_query.trim();
        if query.is_empty() {
            return self.state.entries.iter().collect();
        }
        let needle = self.state.search_query.to_lowercase();
        self.state
            .entries
            .iter()
            .filter(|entry| entry.is_synthetic() || entry.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Breadcrumb trail for the current location. Never empty.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let label = self.state.project.as_ref().map_or("", Project::label);
        Breadcrumb::trail(label, &self.state.current_path)
    }

    /// Change the view mode and persist it.
    ///
    /// The in-memory mode changes even when persisting fails.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> Result<(), PreferenceError> {
        self.state.view_mode = mode;
        self.prefs
            .set(&self.config.preference_key, mode.as_preference())
            .inspect_err(|err| warn!(error = %err, "Failed to persist view mode"))
    }

    /// Merge a listing response into the state.
    ///
    /// Returns whether the response was applied. Under
    /// [`StalePolicy::DropStale`] responses for anything but the latest
    /// request are discarded.
    pub fn apply_listing(&mut self, response: ListingResponse) -> bool {
        let latest = Ticket(self.last_ticket);
        if response.ticket != latest && self.config.stale_policy == StalePolicy::DropStale {
            debug!(
                ticket = response.ticket.0,
                latest = latest.0,
                path = %response.path,
                "Dropping stale listing"
            );
            return false;
        }
        if self.pending == Some(response.ticket) {
            self.pending = None;
        }

        self.state.entries = match response.result {
            Ok(entries) => {
                debug!(path = %response.path, count = entries.len(), "Applying listing");
                let mut merged = Vec::with_capacity(entries.len() + 1);
                if !response.path.is_empty() {
                    merged.push(DirectoryEntry::parent_link(parent_of(&response.path)));
                }
                merged.extend(entries.into_iter().filter(|e| !e.is_synthetic()));
                merged
            }
            Err(err) => {
                warn!(path = %response.path, error = %err, "Listing failed");
                vec![DirectoryEntry::error(err.to_string())]
            }
        };
        true
    }

    /// Fetch `request` inline and apply the result.
    pub async fn resolve(&mut self, request: ListingRequest) -> bool {
        let service = self.listing_service();
        let response = request.fetch(service.as_ref()).await;
        self.apply_listing(response)
    }

    fn issue(&mut self, project: Project, path: String) -> ListingRequest {
        self.last_ticket += 1;
        let ticket = Ticket(self.last_ticket);
        self.pending = Some(ticket);
        debug!(ticket = ticket.0, project = %project.name, path = %path, "Issuing listing request");
        ListingRequest {
            ticket,
            project,
            path,
        }
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("last_ticket", &self.last_ticket)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::StaticListingService;
    use crate::opener::NoopOpener;
    use crate::prefs::MemoryPreferenceStore;

    fn navigator(prefs: MemoryPreferenceStore) -> Navigator {
        Navigator::new(
            NavigatorConfig::default(),
            Arc::new(StaticListingService::new()),
            Arc::new(NoopOpener),
            Box::new(prefs),
        )
    }

    fn ok(ticket: u64, path: &str, entries: Vec<DirectoryEntry>) -> ListingResponse {
        ListingResponse {
            ticket: Ticket(ticket),
            path: path.to_string(),
            result: Ok(entries),
        }
    }

    #[test]
    fn test_view_mode_restored() {
        let nav = navigator(MemoryPreferenceStore::new().with("file-tree-view-mode", "simple"));
        assert_eq!(nav.view_mode(), ViewMode::Simple);

        let nav = navigator(MemoryPreferenceStore::new().with("file-tree-view-mode", "grid"));
        assert_eq!(nav.view_mode(), ViewMode::Detailed);
    }

    #[test]
    fn test_commands_need_project() {
        let mut nav = navigator(MemoryPreferenceStore::new());
        assert!(nav.load_directory("src").is_none());
        assert!(nav.refresh().is_none());
        assert_eq!(nav.breadcrumbs().len(), 1);
    }

    #[test]
    fn test_select_project_resets_state() {
        let mut nav = navigator(MemoryPreferenceStore::new());
        nav.select_project(Project::new("a", "/a"));
        nav.load_directory("src/app");
        nav.set_search_query("foo");

        let request = nav.select_project(Project::new("b", "/b"));
        assert_eq!(request.path, "");
        assert_eq!(request.project.name, "b");
        assert_eq!(nav.current_path(), "");
        assert_eq!(nav.search_query(), "");
        assert!(nav.entries().is_empty());
        assert!(nav.is_loading());
    }

    #[test]
    fn test_load_normalizes_path() {
        let mut nav = navigator(MemoryPreferenceStore::new());
        nav.select_project(Project::new("a", "/a"));
        let request = nav.load_directory("/src/../lib//").unwrap();
        assert_eq!(request.path, "lib");
        assert_eq!(nav.current_path(), "lib");
    }

    #[test]
    fn test_non_root_listing_gets_parent_link() {
        let mut nav = navigator(MemoryPreferenceStore::new());
        nav.select_project(Project::new("a", "/a"));
        let request = nav.load_directory("src/app").unwrap();

        assert!(nav.apply_listing(ok(
            request.ticket.0,
            "src/app",
            vec![DirectoryEntry::file("mod.rs", "src/app/mod.rs")]
        )));
        let entries = nav.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_parent_link());
        assert_eq!(entries[0].path, "src");
        assert!(!nav.is_loading());
    }

    #[test]
    fn test_root_listing_has_no_parent_link() {
        let mut nav = navigator(MemoryPreferenceStore::new());
        let request = nav.select_project(Project::new("a", "/a"));
        nav.apply_listing(ok(request.ticket.0, "", vec![DirectoryEntry::directory("src", "src")]));
        assert!(nav.entries().iter().all(|e| !e.is_parent_link()));
    }

    #[test]
    fn test_failure_becomes_single_placeholder() {
        let mut nav = navigator(MemoryPreferenceStore::new());
        let request = nav.select_project(Project::new("a", "/a"));
        nav.apply_listing(ListingResponse {
            ticket: request.ticket,
            path: String::new(),
            result: Err(wayfile_core::ListingError::rejected(500, "")),
        });
        assert_eq!(nav.entries().len(), 1);
        assert_eq!(
            nav.entries()[0].error_message(),
            Some("Failed to load files (500)")
        );
    }

    #[test]
    fn test_stale_response_dropped() {
        let mut nav = navigator(MemoryPreferenceStore::new());
        nav.select_project(Project::new("a", "/a"));
        let first = nav.load_directory("one").unwrap();
        let second = nav.load_directory("two").unwrap();

        assert!(nav.apply_listing(ok(second.ticket.0, "two", vec![])));
        assert!(!nav.apply_listing(ok(first.ticket.0, "one", vec![])));
        assert_eq!(nav.entries()[0].path, "");
    }

    #[test]
    fn test_last_completed_wins_policy() {
        let config = NavigatorConfig::builder()
            .stale_policy(StalePolicy::LastCompletedWins)
            .build()
            .unwrap();
        let mut nav = Navigator::new(
            config,
            Arc::new(StaticListingService::new()),
            Arc::new(NoopOpener),
            Box::new(MemoryPreferenceStore::new()),
        );
        nav.select_project(Project::new("a", "/a"));
        let first = nav.load_directory("x/one").unwrap();
        let second = nav.load_directory("two").unwrap();

        assert!(nav.apply_listing(ok(second.ticket.0, "two", vec![])));
        assert!(nav.apply_listing(ok(first.ticket.0, "x/one", vec![])));
        assert_eq!(nav.entries()[0].path, "x");
        assert_eq!(nav.current_path(), "two");
    }

    #[test]
    fn test_filter_keeps_synthetic_entries() {
        let mut nav = navigator(MemoryPreferenceStore::new());
        nav.select_project(Project::new("a", "/a"));
        let request = nav.load_directory("docs").unwrap();
        nav.apply_listing(ok(
            request.ticket.0,
            "docs",
            vec![
                DirectoryEntry::file("Readme.md", "docs/Readme.md"),
                DirectoryEntry::file("index.js", "docs/index.js"),
            ],
        ));

        nav.set_search_query("zzz");
        let names: Vec<&str> = nav.filtered_entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec![".."]);

        nav.set_search_query("   ");
        assert_eq!(nav.filtered_entries().len(), 3);
    }

    #[test]
    fn test_enter_error_placeholder_is_noop() {
        let mut nav = navigator(MemoryPreferenceStore::new());
        nav.select_project(Project::new("a", "/a"));
        nav.load_directory("src");
        assert!(nav.enter(&DirectoryEntry::error("boom")).is_none());
        assert_eq!(nav.current_path(), "src");
    }

    #[test]
    fn test_go_up() {
        let mut nav = navigator(MemoryPreferenceStore::new());
        nav.select_project(Project::new("a", "/a"));
        assert!(nav.go_up().is_none());
        nav.load_directory("a/b");
        assert_eq!(nav.go_up().unwrap().path, "a");
    }

    #[test]
    fn test_set_view_mode_persists() {
        let mut nav = navigator(MemoryPreferenceStore::new());
        nav.set_view_mode(ViewMode::Compact).unwrap();
        assert_eq!(nav.view_mode(), ViewMode::Compact);
        assert_eq!(
            nav.prefs.get("file-tree-view-mode").as_deref(),
            Some("compact")
        );
    }
}
