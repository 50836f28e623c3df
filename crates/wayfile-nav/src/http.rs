//! HTTP listing service.
//!
//! Talks to the project server's file API:
//! `GET {base}/api/projects/{name}/files[?path=...]` with a bearer token,
//! answering a JSON array of entries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client as ReqwestClient, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;
use wayfile_core::{DirectoryEntry, ListingError, Project};

use crate::config::{ClientConfig, ConfigError};
use crate::listing::ListingService;

/// Entry as sent by the server.
#[derive(Debug, Deserialize)]
struct RemoteEntry {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: RemoteKind,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    modified: Option<String>,
}

/// Anything that is not a directory is listed as a file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RemoteKind {
    File,
    Directory,
    #[serde(other)]
    Other,
}

impl From<RemoteEntry> for DirectoryEntry {
    fn from(remote: RemoteEntry) -> Self {
        match remote.kind {
            RemoteKind::Directory => DirectoryEntry::directory(remote.name, remote.path),
            RemoteKind::File | RemoteKind::Other => {
                let mut entry = DirectoryEntry::file(remote.name, remote.path);
                if let Some(size) = remote.size {
                    entry = entry.with_size(size);
                }
                if let Some(modified) = remote.modified.as_deref().and_then(parse_timestamp) {
                    entry = entry.with_modified(modified);
                }
                entry
            }
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

/// Listing service backed by the project server's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpListingService {
    config: ClientConfig,
    http: ReqwestClient,
}

impl HttpListingService {
    /// Create a service from validated client configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let http = ReqwestClient::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// URL of the file listing endpoint for `project` and `path`.
    pub fn listing_url(&self, project: &Project, path: &str) -> Result<Url, ListingError> {
        let mut url = Url::parse(self.config.origin())
            .map_err(|e| ListingError::transport(format!("Invalid server URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ListingError::transport("Invalid server URL"))?
            .pop_if_empty()
            .extend(["api", "projects", project.name.as_str(), "files"]);
        if !path.is_empty() {
            url.query_pairs_mut().append_pair("path", path);
        }
        Ok(url)
    }
}

#[async_trait]
impl ListingService for HttpListingService {
    async fn list(
        &self,
        project: &Project,
        path: &str,
    ) -> Result<Vec<DirectoryEntry>, ListingError> {
        let url = self.listing_url(project, path)?;
        debug!(%url, "Fetching listing");

        let mut request = self.http.get(url);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ListingError::transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ListingError::transport(e.to_string()))?;

        if !status.is_success() {
            return Err(status_error(status, body, path));
        }

        let remote: Vec<RemoteEntry> =
            serde_json::from_str(&body).map_err(|e| ListingError::Decode {
                message: e.to_string(),
            })?;
        Ok(remote.into_iter().map(DirectoryEntry::from).collect())
    }
}

/// Map a non-success response to an error. A non-empty body is always the
/// message shown to the user.
fn status_error(status: StatusCode, body: String, path: &str) -> ListingError {
    let code = status.as_u16();
    if !body.trim().is_empty() {
        return ListingError::rejected(code, body);
    }
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ListingError::Unauthorized { status: code }
        }
        StatusCode::NOT_FOUND => ListingError::NotFound {
            path: path.to_string(),
        },
        _ => ListingError::rejected(code, body),
    }
}
