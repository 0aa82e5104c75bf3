use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::Duration,
};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use shared::{
    domain::DEFAULT_MAX_UPLOAD_BYTES,
    protocol::{DEFAULT_HEALTH_PATH, DEFAULT_QUERY_PATH, DEFAULT_UPLOAD_PATH},
};
use thiserror::Error;
use url::Url;

pub const ENV_PREFIX: &str = "RAGBOT";
pub const LOCAL_CONFIG_FILE: &str = "ragbot.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server_url: String,
    pub upload_path: String,
    pub query_path: String,
    pub health_path: String,
    /// Unset means requests may wait forever.
    pub request_timeout_secs: Option<u64>,
    pub max_upload_bytes: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".into(),
            upload_path: DEFAULT_UPLOAD_PATH.into(),
            query_path: DEFAULT_QUERY_PATH.into(),
            health_path: DEFAULT_HEALTH_PATH.into(),
            request_timeout_secs: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Settings {
    /// Applies a `--server-url` flag; flags win over file and environment.
    /// A blank value is ignored.
    pub fn with_server_url_override(mut self, server_url: Option<String>) -> Self {
        if let Some(server_url) = server_url.filter(|url| !url.trim().is_empty()) {
            self.server_url = server_url.trim().to_string();
        }
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn endpoints(&self) -> Result<Endpoints, SettingsError> {
        let base = parse_url(self.server_url.trim())?;
        Ok(Endpoints {
            upload: join_endpoint(&base, &self.upload_path)?,
            query: join_endpoint(&base, &self.query_path)?,
            health: join_endpoint(&base, &self.health_path)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub upload: Url,
    pub query: Url,
    pub health: Url,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid endpoint url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Defaults, then the TOML file, then `RAGBOT__*` environment variables.
///
/// With an explicit path the file must exist. Without one, `./ragbot.toml` and
/// `<config dir>/ragbot/config.toml` are consulted if present.
pub fn load_settings(explicit_path: Option<&Path>) -> Result<Settings, SettingsError> {
    load_settings_from(explicit_path, None)
}

pub(crate) fn load_settings_from(
    explicit_path: Option<&Path>,
    env_override: Option<HashMap<String, String>>,
) -> Result<Settings, SettingsError> {
    let mut builder = Config::builder();

    match explicit_path {
        Some(path) => {
            builder = builder.add_source(File::new(&path.to_string_lossy(), FileFormat::Toml));
        }
        None => {
            for candidate in default_config_paths() {
                builder = builder.add_source(
                    File::new(&candidate.to_string_lossy(), FileFormat::Toml).required(false),
                );
            }
        }
    }

    let environment = Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .source(env_override);

    let settings = builder
        .add_source(environment)
        .build()?
        .try_deserialize::<Settings>()?;
    tracing::debug!(server_url = %settings.server_url, "settings loaded");
    Ok(settings)
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("ragbot").join("config.toml"));
    }
    paths.push(PathBuf::from(LOCAL_CONFIG_FILE));
    paths
}

fn parse_url(raw: &str) -> Result<Url, SettingsError> {
    Url::parse(raw).map_err(|source| SettingsError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

fn join_endpoint(base: &Url, path: &str) -> Result<Url, SettingsError> {
    base.join(path.trim()).map_err(|source| SettingsError::InvalidUrl {
        url: format!("{base}{path}"),
        source,
    })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
