//! Preference stores.
//!
//! Preferences are a flat string-to-string map. The navigator only keeps
//! its view mode here.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use wayfile_core::PreferenceError;

/// Key-value store for user preferences.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Preferences held in memory for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences persisted as a flat TOML table.
#[derive(Debug, Clone)]
pub struct TomlPreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl TomlPreferenceStore {
    /// Default location: `<config_dir>/wayfile/preferences.toml`.
    pub fn default_path() -> Result<PathBuf, PreferenceError> {
        dirs::config_dir()
            .map(|dir| dir.join("wayfile").join("preferences.toml"))
            .ok_or(PreferenceError::NoConfigDir)
    }

    /// Open the store at the default location.
    pub fn open_default() -> Result<Self, PreferenceError> {
        Self::open(Self::default_path()?)
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| PreferenceError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(PreferenceError::io(path, err)),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PreferenceError::io(parent, e))?;
        }

        let content = toml::to_string_pretty(&self.values).map_err(|e| {
            PreferenceError::Serialize {
                message: e.to_string(),
            }
        })?;

        std::fs::write(&self.path, content).map_err(|e| PreferenceError::io(&self.path, e))
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}
