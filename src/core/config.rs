//! Configuration loading and resolution.
//!
//! Settings come from an optional TOML file in the platform config directory,
//! with environment variables taking precedence. The credential is read from
//! the environment only — it is pre-issued and never written to disk by us.

use directories::ProjectDirs;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://eu.inference.heroku.com";
pub const DEFAULT_MODEL: &str = "claude-4-sonnet";
pub const DEFAULT_HISTORY_FILE: &str = "conversations.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Environment override for the endpoint base URL.
pub const BASE_URL_ENV: &str = "INFERENCE_URL";
/// Environment variable holding the bearer credential (mandatory for chat).
pub const CREDENTIAL_ENV: &str = "INFERENCE_KEY";

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Endpoint base URL (overridden by INFERENCE_URL).
    pub base_url: Option<String>,
    /// Model identifier sent with every request.
    pub model: Option<String>,
    /// Path of the conversation history file.
    pub history_file: Option<PathBuf>,
    /// Overall deadline for one inference request, including the streamed body.
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        Self::load_from_path(&Self::config_path())
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn config_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("org", "permacommons", "herochat")
            .expect("Failed to determine config directory");
        proj_dirs.config_dir().join("config.toml")
    }

    pub fn base_url(&self) -> String {
        resolve(
            env::var(BASE_URL_ENV).ok(),
            self.base_url.as_deref(),
            DEFAULT_BASE_URL,
        )
    }

    pub fn model(&self) -> String {
        resolve(None, self.model.as_deref(), DEFAULT_MODEL)
    }

    pub fn history_file(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE))
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// The pre-issued bearer credential, if present in the environment.
    pub fn credential(&self) -> Option<String> {
        env::var(CREDENTIAL_ENV).ok().filter(|v| !v.is_empty())
    }
}

fn resolve(env_value: Option<String>, file_value: Option<&str>, default: &str) -> String {
    env_value
        .filter(|v| !v.is_empty())
        .or_else(|| file_value.map(str::to_string))
        .unwrap_or_else(|| default.to_string())
}
