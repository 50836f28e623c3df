use wayfile_core::path::{normalize, parent_of};
use wayfile_core::{
    Breadcrumb, DirectoryEntry, EntryKind, ListingError, Project, StatusSignal, ViewMode,
    is_newer_version,
};

#[test]
fn test_parent_chain_reaches_root_in_depth_steps() {
    let mut path = "a/b/c/d".to_string();
    let mut steps = 0;
    while !path.is_empty() {
        path = parent_of(&path);
        steps += 1;
    }
    assert_eq!(steps, 4);
    assert_eq!(parent_of(&path), "");
}

#[test]
fn test_normalized_paths_never_escape() {
    for raw in ["..", "../x", "/a/../../b", "./a/./", "a//b/"] {
        let normalized = normalize(raw);
        assert!(!normalized.starts_with('/'));
        assert!(!normalized.split('/').any(|s| s == ".." || s == "."));
    }
}

#[test]
fn test_breadcrumb_invariants() {
    let project = Project::new("shop", "/srv/shop").with_display_name("Shop");
    for path in ["", "src", "src/api/v1"] {
        let crumbs = project.breadcrumbs(path);
        assert_eq!(crumbs.len(), 1 + path.split('/').filter(|s| !s.is_empty()).count());
        assert_eq!(crumbs.first().map(|c| c.path.as_str()), Some(""));
        assert_eq!(crumbs.last().map(|c| c.path.as_str()), Some(path));
        assert_eq!(crumbs[0].label, "Shop");
    }
}

#[test]
fn test_breadcrumb_trail_without_project() {
    let crumbs = Breadcrumb::trail("", "docs");
    assert_eq!(crumbs.len(), 2);
    assert_eq!(crumbs[1].label, "docs");
}

#[test]
fn test_entry_json_shape() {
    let entry: DirectoryEntry = serde_json::from_str(
        r#"{"name": "main.rs", "path": "src/main.rs", "type": "file", "size": 120}"#,
    )
    .unwrap();
    assert_eq!(entry.size(), Some(120));
    assert!(matches!(entry.kind, EntryKind::File { modified: None, .. }));

    let dir: DirectoryEntry =
        serde_json::from_str(r#"{"name": "src", "path": "src", "type": "directory"}"#).unwrap();
    assert!(dir.is_dir());
}

#[test]
fn test_listing_error_becomes_placeholder_text() {
    let err = ListingError::rejected(502, "");
    let placeholder = DirectoryEntry::error(err.to_string());
    assert_eq!(
        placeholder.error_message(),
        Some("Failed to load files (502)")
    );
}

#[test]
fn test_view_mode_preference_values() {
    assert_eq!(ViewMode::from_preference("simple"), Some(ViewMode::Simple));
    assert_eq!(ViewMode::from_preference("compact"), Some(ViewMode::Compact));
    assert_eq!(ViewMode::from_preference("detailed"), Some(ViewMode::Detailed));
    assert_eq!(ViewMode::Compact.as_preference(), "compact");
}

#[test]
fn test_signal_from_ndjson_line() {
    let signal: StatusSignal = serde_json::from_str(
        r#"{"isActive": true, "activeTool": {"name": "Read", "input": {"file_path": "a.rs"}}}"#,
    )
    .unwrap();
    assert!(signal.is_active);
    assert_eq!(signal.active_tool.map(|t| t.name), Some("Read".to_string()));
}

#[test]
fn test_version_comparison() {
    assert!(is_newer_version("v0.2.0", env!("CARGO_PKG_VERSION")));
    assert!(!is_newer_version("0.0.9", "0.1.0"));
}
