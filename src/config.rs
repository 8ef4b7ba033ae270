//! Application configuration.
//!
//! Settings live in `~/.tre/config.json`. Environment variables override the
//! file, and command-line flags override both.

use crate::consts::cli_consts::DEFAULT_API_URL;
use crate::roles::RoleSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

pub const API_URL_ENV: &str = "TRE_API_URL";
pub const ACCESS_TOKEN_ENV: &str = "TRE_ACCESS_TOKEN";
pub const ROLES_ENV: &str = "TRE_ROLES";
pub const DEBUG_ENV: &str = "TRE_DEBUG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine the home directory")]
    HomeDirNotFound,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the TRE API.
    pub api_url: String,

    /// Roles of the signed-in user.
    pub roles: Vec<String>,

    /// Bearer token sent with every API request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Emit debug diagnostics from the dashboard loader.
    pub debug: bool,

    /// Caps the number of throttled cost retries. Unbounded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cost_retries: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            roles: Vec::new(),
            access_token: None,
            debug: false,
            max_cost_retries: None,
        }
    }
}

/// Location of the config file under the user's home directory.
pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let home = home::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
    Ok(home.join(".tre").join("config.json"))
}

impl Config {
    pub fn role_set(&self) -> RoleSet {
        RoleSet::new(&self.roles)
    }

    /// Loads configuration from a JSON file at the given path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)?;
        Ok(config)
    }

    /// Like [`Config::load_from_file`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load_from_file(path) {
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            other => other,
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the config file. Returns `false` when there was nothing to remove.
    pub fn clear(path: &Path) -> Result<bool, ConfigError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides read through `lookup`. Blank values are ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = get(API_URL_ENV) {
            self.api_url = url.trim().to_string();
        }
        if let Some(token) = get(ACCESS_TOKEN_ENV) {
            self.access_token = Some(token.trim().to_string());
        }
        if let Some(roles) = get(ROLES_ENV) {
            self.roles = RoleSet::parse_list(&roles).iter().map(str::to_string).collect();
        }
        if let Some(debug) = get(DEBUG_ENV) {
            self.debug = matches!(
                debug.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }
}
