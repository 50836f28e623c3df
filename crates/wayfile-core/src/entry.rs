//! Directory entry types.

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Extensions routed to the image viewer instead of the editor.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "bmp"];

/// Extensions shown with the code icon.
const CODE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "py", "java", "cpp", "c", "php", "rb", "go", "rs",
];

/// Extensions shown with the document icon.
const DOC_EXTENSIONS: &[&str] = &["md", "txt", "doc", "pdf"];

/// Kind of listing entry and its kind-specific metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    /// Regular file.
    File {
        /// Size in bytes, when the server reports it.
        #[serde(default)]
        size: Option<u64>,
        /// Last modification time, when the server reports it.
        #[serde(default)]
        modified: Option<DateTime<Utc>>,
    },
    /// Directory that can be entered.
    Directory,
    /// Synthetic "go up" entry; the owning entry's `path` is the target.
    ParentLink,
    /// Stands in for a listing that failed to load.
    ErrorPlaceholder {
        /// Human-readable failure message.
        message: String,
    },
}

/// A single entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Base name within the parent directory.
    pub name: CompactString,
    /// Path relative to the project root. For a parent link this is the
    /// directory to navigate to.
    pub path: String,
    /// Entry kind and metadata.
    #[serde(flatten)]
    pub kind: EntryKind,
}

impl DirectoryEntry {
    /// Create a file entry without size or timestamp.
    pub fn file(name: impl Into<CompactString>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::File {
                size: None,
                modified: None,
            },
        }
    }

    /// Create a directory entry.
    pub fn directory(name: impl Into<CompactString>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::Directory,
        }
    }

    /// Create the synthetic entry leading to `target`.
    pub fn parent_link(target: impl Into<String>) -> Self {
        Self {
            name: CompactString::from(".."),
            path: target.into(),
            kind: EntryKind::ParentLink,
        }
    }

    /// Create the placeholder shown in place of a failed listing.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            name: CompactString::default(),
            path: String::new(),
            kind: EntryKind::ErrorPlaceholder {
                message: message.into(),
            },
        }
    }

    /// Set the size of a file entry. Other kinds are returned unchanged.
    pub fn with_size(mut self, bytes: u64) -> Self {
        if let EntryKind::File { size, .. } = &mut self.kind {
            *size = Some(bytes);
        }
        self
    }

    /// Set the modification time of a file entry. Other kinds are returned unchanged.
    pub fn with_modified(mut self, at: DateTime<Utc>) -> Self {
        if let EntryKind::File { modified, .. } = &mut self.kind {
            *modified = Some(at);
        }
        self
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File { .. })
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    pub fn is_parent_link(&self) -> bool {
        matches!(self.kind, EntryKind::ParentLink)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, EntryKind::ErrorPlaceholder { .. })
    }

    /// Synthetic entries are never produced by the server and are exempt
    /// from name filtering.
    pub fn is_synthetic(&self) -> bool {
        self.is_parent_link() || self.is_error()
    }

    /// File size, for file entries that carry one.
    pub fn size(&self) -> Option<u64> {
        match self.kind {
            EntryKind::File { size, .. } => size,
            _ => None,
        }
    }

    /// Modification time, for file entries that carry one.
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        match self.kind {
            EntryKind::File { modified, .. } => modified,
            _ => None,
        }
    }

    /// Failure message of an error placeholder.
    pub fn error_message(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::ErrorPlaceholder { message } => Some(message),
            _ => None,
        }
    }

    /// Lowercased extension of the entry name, if any.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name)
    }

    /// Whether the entry is a file that should open in the image viewer.
    pub fn is_image(&self) -> bool {
        self.is_file()
            && self
                .extension()
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
    }

    /// Icon category of a file entry.
    pub fn category(&self) -> FileCategory {
        FileCategory::from_name(&self.name)
    }
}

/// Presentation category of a file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Code,
    Document,
    Image,
    Other,
}

impl FileCategory {
    /// Categorize a file name by its extension.
    pub fn from_name(name: &str) -> Self {
        match extension_of(name) {
            Some(ext) if CODE_EXTENSIONS.contains(&ext.as_str()) => Self::Code,
            Some(ext) if DOC_EXTENSIONS.contains(&ext.as_str()) => Self::Document,
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => Self::Image,
            _ => Self::Other,
        }
    }
}

fn extension_of(name: &str) -> Option<String> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kinds() {
        assert!(DirectoryEntry::file("a.txt", "a.txt").is_file());
        assert!(DirectoryEntry::directory("src", "src").is_dir());
        assert!(DirectoryEntry::parent_link("").is_parent_link());
        assert!(DirectoryEntry::error("boom").is_error());
        assert!(DirectoryEntry::error("boom").is_synthetic());
        assert!(!DirectoryEntry::directory("src", "src").is_synthetic());
    }

    #[test]
    fn test_size_only_applies_to_files() {
        let file = DirectoryEntry::file("a.txt", "a.txt").with_size(12);
        assert_eq!(file.size(), Some(12));

        let dir = DirectoryEntry::directory("src", "src").with_size(12);
        assert_eq!(dir.size(), None);
    }

    #[test]
    fn test_image_detection() {
        assert!(DirectoryEntry::file("logo.PNG", "logo.PNG").is_image());
        assert!(DirectoryEntry::file("icon.svg", "assets/icon.svg").is_image());
        assert!(!DirectoryEntry::file("main.rs", "main.rs").is_image());
        assert!(!DirectoryEntry::directory("img.png", "img.png").is_image());
    }

    #[test]
    fn test_file_category() {
        assert_eq!(FileCategory::from_name("lib.rs"), FileCategory::Code);
        assert_eq!(FileCategory::from_name("README.md"), FileCategory::Document);
        assert_eq!(FileCategory::from_name("photo.jpeg"), FileCategory::Image);
        assert_eq!(FileCategory::from_name("Makefile"), FileCategory::Other);
        assert_eq!(FileCategory::from_name("archive."), FileCategory::Other);
    }

    #[test]
    fn test_error_message() {
        let entry = DirectoryEntry::error("Failed to load files (500)");
        assert_eq!(entry.error_message(), Some("Failed to load files (500)"));
        assert_eq!(DirectoryEntry::parent_link("").error_message(), None);
    }
}
