//! Process configuration: optional `config.json` defaults, environment
//! variables on top. Built once in `main` and handed down by value.

use std::{env, fs};

use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

const DEFAULT_SERVER_URL: &str = "0.0.0.0:8080";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("error reading config from file {path}: {source}")]
    File {
        path: String,
        source: serde_json::Error,
    },

    #[error("error loading environment variables: {0}")]
    MissingEnv(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_url: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub log_level: String,
}

/// File-level defaults. Secrets never live here; every value can be
/// overridden from the environment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileConfig {
    pub server_url: Option<String>,
    pub log_level: Option<String>,
    pub jwt_issuer: Option<String>,
}

impl Config {
    /// Loads configuration, treating a missing file as empty defaults and a
    /// malformed one as a startup failure.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let file = match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| ConfigError::File {
                path: path.to_owned(),
                source,
            })?,
            Err(_) => FileConfig::default(),
        };

        Self::from_sources(file, |name| env::var(name).ok())
    }

    fn from_sources(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();

        let database_url = require(&env, "DATABASE_URL", &mut missing);
        let jwt_secret = require(&env, "JWT_SECRET", &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::MissingEnv(missing.join("; ")));
        }

        Ok(Self {
            server_url: env("SERVER_URL")
                .or(file.server_url)
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_owned()),
            database_url,
            jwt_secret,
            jwt_issuer: env("JWT_ISSUER").or(file.jwt_issuer),
            log_level: env("LOG_LEVEL")
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
        })
    }
}

fn require(
    env: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    missing: &mut Vec<String>,
) -> String {
    env(name).unwrap_or_else(|| {
        missing.push(format!("{name} missing"));
        String::new()
    })
}
