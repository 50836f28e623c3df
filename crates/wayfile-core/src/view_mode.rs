//! Listing view modes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, FromRepr, IntoEnumIterator, IntoStaticStr};

/// How much detail the listing shows per entry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumIter,
    EnumString,
    FromRepr,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Icon and name only.
    Simple,
    /// Name and size.
    Compact,
    /// Name, size and modification time in columns.
    #[default]
    Detailed,
}

impl ViewMode {
    /// Preference key the view mode is persisted under.
    pub const PREFERENCE_KEY: &'static str = "file-tree-view-mode";

    /// Parse a persisted value, ignoring anything unrecognized.
    pub fn from_preference(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }

    /// Value written to the preference store.
    pub fn as_preference(self) -> &'static str {
        self.into()
    }

    /// Cycle to the next mode.
    pub fn next(self) -> Self {
        let next = (self as usize + 1) % Self::iter().count();
        Self::from_repr(next).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_round_trip() {
        for mode in ViewMode::iter() {
            assert_eq!(ViewMode::from_preference(mode.as_preference()), Some(mode));
        }
    }

    #[test]
    fn test_unknown_preference_ignored() {
        assert_eq!(ViewMode::from_preference("grid"), None);
        assert_eq!(ViewMode::from_preference(""), None);
    }

    #[test]
    fn test_cycle() {
        assert_eq!(ViewMode::Simple.next(), ViewMode::Compact);
        assert_eq!(ViewMode::Compact.next(), ViewMode::Detailed);
        assert_eq!(ViewMode::Detailed.next(), ViewMode::Simple);
    }

    #[test]
    fn test_default_is_detailed() {
        assert_eq!(ViewMode::default(), ViewMode::Detailed);
        assert_eq!(ViewMode::Detailed.to_string(), "detailed");
    }
}
