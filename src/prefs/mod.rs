//! Prefs domain: persisted key/value store for profile and settings.
//!
//! Values are written through to disk on every change, the way a player
//! profile expects. A missing file is an empty profile.

mod profile;


pub use profile::{CHARACTER_COUNT, KEY_VOL_MASTER, KEY_VOL_MUSIC, KEY_VOL_SFX};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const PREFS_PATH: &str = "save/prefs.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrefValue {
    Int(i64),
    Float(f32),
    Str(String),
}

/// Error type for reading or writing the pref file.
#[derive(Debug)]
pub struct PrefsError {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for PrefsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Prefs error at {}: {}", self.path, self.message)
    }
}

#[derive(Resource, Debug, Default)]
pub struct PrefStore {
    values: BTreeMap<String, PrefValue>,
    /// `None` keeps the store in memory only.
    path: Option<PathBuf>,
}

impl PrefStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `path`. A missing file yields an empty store bound to it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let values = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| PrefsError {
                path: path.display().to_string(),
                message: format!("IO error: {}", e),
            })?;
            serde_json::from_str(&contents).map_err(|e| PrefsError {
                path: path.display().to_string(),
                message: format!("Parse error: {}", e),
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            values,
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            Some(PrefValue::Int(v)) => *v,
            _ => default,
        }
    }

    pub fn get_float(&self, key: &str, default: f32) -> f32 {
        match self.values.get(key) {
            Some(PrefValue::Float(v)) => *v,
            _ => default,
        }
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(PrefValue::Str(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.set(key, PrefValue::Int(value));
    }

    pub fn set_float(&mut self, key: &str, value: f32) {
        self.set(key, PrefValue::Float(value));
    }

    pub fn set_string(&mut self, key: &str, value: impl Into<String>) {
        self.set(key, PrefValue::Str(value.into()));
    }

    pub fn delete_key(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.save_or_warn();
        }
    }

    fn set(&mut self, key: &str, value: PrefValue) {
        self.values.insert(key.to_string(), value);
        self.save_or_warn();
    }

    pub fn save(&self) -> Result<(), PrefsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let err = |message: String| PrefsError {
            path: path.display().to_string(),
            message,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| err(format!("IO error: {}", e)))?;
            }
        }
        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| err(format!("Serialize error: {}", e)))?;
        fs::write(path, json).map_err(|e| err(format!("IO error: {}", e)))
    }

    fn save_or_warn(&self) {
        if let Err(e) = self.save() {
            warn!("{}", e);
        }
    }
}

pub struct PrefsPlugin;

impl Plugin for PrefsPlugin {
    fn build(&self, app: &mut App) {
        let store = match PrefStore::open(PREFS_PATH) {
            Ok(store) => {
                info!("Loaded prefs from {}", PREFS_PATH);
                store
            }
            Err(e) => {
                warn!("{}; starting with an empty profile", e);
                PrefStore {
                    values: BTreeMap::new(),
                    path: Some(PathBuf::from(PREFS_PATH)),
                }
            }
        };
        app.insert_resource(store);
    }
}
