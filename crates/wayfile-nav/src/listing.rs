//! Listing service abstraction and request plumbing.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use wayfile_core::path::normalize;
use wayfile_core::{DirectoryEntry, ListingError, Project};

/// Source of directory listings for a project.
#[async_trait]
pub trait ListingService: Send + Sync {
    /// List the entries of `path` within `project`. The root is `""`.
    async fn list(&self, project: &Project, path: &str)
    -> Result<Vec<DirectoryEntry>, ListingError>;
}

/// Identifies one issued listing request. Later requests have larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

/// A listing the navigator wants fetched.
///
/// Requests are plain data so the caller decides where the fetch runs:
/// inline via [`Navigator::resolve`](crate::Navigator::resolve), or on a
/// spawned task whose [`ListingResponse`] is fed back later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub ticket: Ticket,
    pub project: Project,
    pub path: String,
}

impl ListingRequest {
    /// Fetch this listing from `service`.
    pub async fn fetch(self, service: &dyn ListingService) -> ListingResponse {
        let result = service.list(&self.project, &self.path).await;
        ListingResponse {
            ticket: self.ticket,
            path: self.path,
            result,
        }
    }
}

/// Outcome of a [`ListingRequest`].
#[derive(Debug)]
pub struct ListingResponse {
    pub ticket: Ticket,
    pub path: String,
    pub result: Result<Vec<DirectoryEntry>, ListingError>,
}

/// In-memory listing service keyed by project name and path.
///
/// Paths without a listing answer with [`ListingError::NotFound`].
#[derive(Debug, Default)]
pub struct StaticListingService {
    listings: HashMap<(String, String), Vec<DirectoryEntry>>,
    failures: Mutex<HashMap<(String, String), String>>,
}

impl StaticListingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the entries of `path` in `project`.
    pub fn with_listing(
        mut self,
        project: &str,
        path: &str,
        entries: impl IntoIterator<Item = DirectoryEntry>,
    ) -> Self {
        self.listings.insert(
            (project.to_string(), normalize(path)),
            entries.into_iter().collect(),
        );
        self
    }

    /// Make the next fetch of `path` fail with `message`.
    pub fn fail_next(&self, project: &str, path: &str, message: impl Into<String>) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.insert((project.to_string(), normalize(path)), message.into());
        }
    }
}

#[async_trait]
impl ListingService for StaticListingService {
    async fn list(
        &self,
        project: &Project,
        path: &str,
    ) -> Result<Vec<DirectoryEntry>, ListingError> {
        let key = (project.name.clone(), normalize(path));
        let failure = self
            .failures
            .lock()
            .ok()
            .and_then(|mut failures| failures.remove(&key));
        if let Some(message) = failure {
            return Err(ListingError::rejected(500, message));
        }
        self.listings
            .get(&key)
            .cloned()
            .ok_or_else(|| ListingError::NotFound { path: key.1 })
    }
}
