//! Projects and breadcrumb trails.

use serde::{Deserialize, Serialize};

use crate::path;

/// A project workspace exposed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Identifier used by the listing service.
    pub name: String,
    /// Optional human-friendly name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Project root path on the server.
    #[serde(default)]
    pub path: String,
}

impl Project {
    /// Create a project with no display name.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            path: path.into(),
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Label shown as the first breadcrumb.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }

    /// Breadcrumb trail from this project's root to `current_path`.
    pub fn breadcrumbs(&self, current_path: &str) -> Vec<Breadcrumb> {
        Breadcrumb::trail(self.label(), current_path)
    }
}

/// One clickable element of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Segment name, or the project label for the root crumb.
    pub label: String,
    /// Cumulative project-relative path.
    pub path: String,
}

impl Breadcrumb {
    /// Build the trail for a path. Always contains the root crumb.
    pub fn trail(root_label: &str, current_path: &str) -> Vec<Self> {
        let mut crumbs = vec![Self {
            label: root_label.to_string(),
            path: String::new(),
        }];
        crumbs.extend(
            path::prefixes(current_path)
                .into_iter()
                .map(|(label, path)| Self { label, path }),
        );
        crumbs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_prefers_display_name() {
        let project = Project::new("acme-api", "/srv/acme");
        assert_eq!(project.label(), "acme-api");

        let project = project.with_display_name("Acme API");
        assert_eq!(project.label(), "Acme API");
    }

    #[test]
    fn test_empty_display_name_falls_back() {
        let project = Project::new("acme-api", "/srv/acme").with_display_name("");
        assert_eq!(project.label(), "acme-api");
    }

    #[test]
    fn test_trail_root() {
        let crumbs = Breadcrumb::trail("acme", "");
        assert_eq!(crumbs.len(), 1);
        assert_eq!(crumbs[0].label, "acme");
        assert_eq!(crumbs[0].path, "");
    }

    #[test]
    fn test_trail_nested() {
        let crumbs = Breadcrumb::trail("acme", "src/app/ui");
        let paths: Vec<&str> = crumbs.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["", "src", "src/app", "src/app/ui"]);
        assert_eq!(crumbs[3].label, "ui");
    }
}
