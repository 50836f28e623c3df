//! File open requests.

use serde::Serialize;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::warn;
use wayfile_core::{DirectoryEntry, Project};

/// Where an opened file should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenTarget {
    Image,
    Document,
}

/// Request to open a file, emitted when a file entry is entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenRequest {
    pub name: String,
    /// Project-relative path of the file.
    pub path: String,
    pub project_path: String,
    pub project_name: String,
    pub target: OpenTarget,
}

impl OpenRequest {
    /// Build a request for a file entry of `project`.
    pub fn for_entry(project: &Project, entry: &DirectoryEntry) -> Self {
        let target = if entry.is_image() {
            OpenTarget::Image
        } else {
            OpenTarget::Document
        };
        Self {
            name: entry.name.to_string(),
            path: entry.path.clone(),
            project_path: project.path.clone(),
            project_name: project.name.clone(),
            target,
        }
    }

    /// Path of the file on the server, joining the project root and the
    /// relative path.
    pub fn full_path(&self) -> String {
        let root = self.project_path.trim_end_matches('/');
        let rel = self.path.trim_start_matches('/');
        match (root.is_empty(), rel.is_empty()) {
            (true, _) => rel.to_string(),
            (false, true) => root.to_string(),
            (false, false) => format!("{root}/{rel}"),
        }
    }
}

/// Collaborator that opens files in an editor or viewer.
pub trait FileOpener: Send + Sync {
    fn open(&self, request: OpenRequest);
}

/// Forwards open requests over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelOpener {
    tx: UnboundedSender<OpenRequest>,
}

impl ChannelOpener {
    /// Create an opener and the receiver its requests arrive on.
    pub fn new() -> (Self, UnboundedReceiver<OpenRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl FileOpener for ChannelOpener {
    fn open(&self, request: OpenRequest) {
        if let Err(err) = self.tx.send(request) {
            warn!(path = %err.0.path, "Open request dropped, receiver closed");
        }
    }
}

/// Ignores open requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopOpener;

impl FileOpener for NoopOpener {
    fn open(&self, _request: OpenRequest) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project::new("site", "/home/me/site/")
    }

    #[test]
    fn test_image_target() {
        let entry = DirectoryEntry::file("logo.png", "assets/logo.png");
        let request = OpenRequest::for_entry(&project(), &entry);
        assert_eq!(request.target, OpenTarget::Image);
        assert_eq!(request.full_path(), "/home/me/site/assets/logo.png");
    }

    #[test]
    fn test_document_target() {
        let entry = DirectoryEntry::file("index.html", "index.html");
        let request = OpenRequest::for_entry(&project(), &entry);
        assert_eq!(request.target, OpenTarget::Document);
        assert_eq!(request.project_name, "site");
    }

    #[tokio::test]
    async fn test_channel_opener_forwards() {
        let (opener, mut rx) = ChannelOpener::new();
        let entry = DirectoryEntry::file("a.md", "docs/a.md");
        opener.open(OpenRequest::for_entry(&project(), &entry));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.path, "docs/a.md");
    }

    #[test]
    fn test_channel_opener_closed_receiver() {
        let (opener, rx) = ChannelOpener::new();
        drop(rx);
        let entry = DirectoryEntry::file("a.md", "a.md");
        opener.open(OpenRequest::for_entry(&project(), &entry));
    }
}
