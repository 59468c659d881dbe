//! Configuration handling for the TUI
//!
//! The config file uses the same camelCase keys as a Firebase web
//! `firebaseConfig` object, so one can be pasted in directly. Keys this
//! application does not need (authDomain, storageBucket, ...) are ignored.

use anyhow::{bail, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Hosted Firestore endpoint
pub const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com";
/// Database used when none is configured
pub const DEFAULT_DATABASE_ID: &str = "(default)";

const ENV_PROJECT_ID: &str = "APPOINTMENT_TUI_PROJECT_ID";
const ENV_API_KEY: &str = "APPOINTMENT_TUI_API_KEY";
const ENV_ENDPOINT: &str = "APPOINTMENT_TUI_ENDPOINT";
/// Standard variable set by the Firebase emulator suite
const ENV_EMULATOR_HOST: &str = "FIRESTORE_EMULATOR_HOST";

/// User configuration for the TUI
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Web API key
    pub api_key: Option<String>,
    /// Firebase project id
    pub project_id: Option<String>,
    /// Firestore database id
    pub database_id: Option<String>,
    /// Base URL of the Firestore REST API
    pub endpoint: Option<String>,
}

/// Resolved connection settings for the Firestore client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirestoreSettings {
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub api_key: Option<String>,
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "appointment", "appointment-tui")
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Get the log file path
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("appointment-tui.log"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };

        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production). Empty values are treated as unset.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(project_id) = get(ENV_PROJECT_ID) {
            self.project_id = Some(project_id);
        }
        if let Some(api_key) = get(ENV_API_KEY) {
            self.api_key = Some(api_key);
        }
        if let Some(endpoint) = get(ENV_ENDPOINT) {
            self.endpoint = Some(endpoint);
        }
        if let Some(host) = get(ENV_EMULATOR_HOST) {
            self.endpoint = Some(format!("http://{host}"));
        }
        self
    }

    /// Resolve the settings needed to talk to Firestore
    pub fn firestore_settings(&self) -> Result<FirestoreSettings> {
        let Some(project_id) = self.project_id.clone().filter(|p| !p.trim().is_empty()) else {
            bail!(
                "Firestore project id is not configured; set \"projectId\" in {} or {ENV_PROJECT_ID}",
                Self::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "the config file".to_string())
            );
        };

        Ok(FirestoreSettings {
            endpoint: self
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            project_id,
            database_id: self
                .database_id
                .clone()
                .unwrap_or_else(|| DEFAULT_DATABASE_ID.to_string()),
            api_key: self.api_key.clone(),
        })
    }
}
