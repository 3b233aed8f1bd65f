//! # Configuration Module
//!
//! Loads the harness configuration from a `bookstore.toml` file and
//! environment variables.
//!
//! ## Config File Location
//!
//! 1. If the `BOOKSTORE_CONFIG` environment variable is set, load from that path
//! 2. Otherwise, load from `bookstore.toml` in the current directory
//!
//! ## Recognized keys
//!
//! ```toml
//! [api]
//! base.url = "https://fakerestapi.azurewebsites.net"
//! books.endpoint = "/api/v1/Books"
//! authors.endpoint = "/api/v1/Authors"
//! ```
//!
//! Any key can be overridden from the environment with the `BOOKSTORE_`
//! prefix: `BOOKSTORE_API_BASE_URL=http://localhost:8080` maps to
//! `api.base.url`. A `.env` file is honored at load time.

use once_cell::sync::OnceCell;
use std::{collections::HashMap, io::Read, path::Path};
use toml::Value as TomlValue;
use tracing::*;

use crate::{Error, Result};

/// Environment variable name for specifying the config file path.
const BOOKSTORE_CONFIG_ENV: &str = "BOOKSTORE_CONFIG";
/// Prefix for configuration overrides taken from the environment.
const ENV_PREFIX: &str = "BOOKSTORE_";

pub const BASE_URL_KEY: &str = "api.base.url";
pub const BOOKS_ENDPOINT_KEY: &str = "api.books.endpoint";
pub const AUTHORS_ENDPOINT_KEY: &str = "api.authors.endpoint";

static CONFIG: OnceCell<Config> = OnceCell::new();

/// The harness configuration: the parsed `bookstore.toml` table plus
/// environment overrides. Immutable once constructed.
#[derive(Debug, Clone, Default)]
pub struct Config {
    values: toml::Table,
    overrides: HashMap<String, String>,
}

impl Config {
    /// Process-wide cached configuration. Every caller within one run
    /// observes the same values; the file is read at most once.
    pub fn get() -> Result<&'static Config> {
        CONFIG.get_or_try_init(Config::load)
    }

    /// Load the harness configuration.
    ///
    /// Loading order:
    /// 1. If `BOOKSTORE_CONFIG` env var is set, load from that path
    /// 2. Otherwise, load from `bookstore.toml` in the current directory
    pub fn load() -> Result<Config> {
        let _ = dotenv::dotenv();
        match std::env::var(BOOKSTORE_CONFIG_ENV) {
            Ok(path) => {
                let path = Path::new(&path);

                // Detect misuse: if it doesn't look like a file path, error out
                if path.extension().is_none_or(|ext| ext != "toml")
                    && !path.to_string_lossy().contains(std::path::MAIN_SEPARATOR)
                    && !path.to_string_lossy().contains('/')
                {
                    return Err(Error::Load(format!(
                        "{BOOKSTORE_CONFIG_ENV} should be a path to a config file, not a config \
                         value. Got: {path:?}. Use {ENV_PREFIX}<KEY>=value for config values \
                         instead."
                    )));
                }

                if !path.exists() {
                    return Err(Error::Load(format!(
                        "config file specified by {BOOKSTORE_CONFIG_ENV} not found: {path:?}"
                    )));
                }

                debug!("Loading config from {BOOKSTORE_CONFIG_ENV}={path:?}");
                Config::load_from(path)
            }
            Err(_) => Config::load_from(Path::new("bookstore.toml")),
        }
    }

    /// Load the harness configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Config> {
        let mut file = std::fs::File::open(path)
            .map_err(|e| Error::Load(format!("failed to open {path:?}: {e}")))?;

        let mut buf = String::new();
        file.read_to_string(&mut buf)
            .map_err(|e| Error::Load(e.to_string()))?;

        let values: toml::Table = toml::from_str(&buf)
            .map_err(|e| Error::Load(format!("failed to parse {path:?}: {e}")))?;

        let mut cfg = Config {
            values,
            overrides: HashMap::new(),
        };
        cfg.load_env();

        debug!("bookstore configuration loaded: {cfg:#?}");

        Ok(cfg)
    }

    /// Collect `BOOKSTORE_*` environment variables as overrides. The
    /// remainder of the variable name is lowercased and underscores become
    /// dots, so `BOOKSTORE_API_BASE_URL` overrides `api.base.url`.
    fn load_env(&mut self) {
        self.overrides = std::env::vars()
            .filter(|(k, _)| k != BOOKSTORE_CONFIG_ENV)
            .filter_map(|(k, v)| {
                let rest = k.strip_prefix(ENV_PREFIX)?;
                Some((rest.to_lowercase().replace('_', "."), v))
            })
            .collect();
    }

    /// Look up a string value by its dotted key, e.g. `api.base.url`.
    /// Environment overrides win over file values.
    pub fn get_str(&self, key: impl AsRef<str>) -> Result<&str> {
        let key = key.as_ref();
        if let Some(value) = self.overrides.get(key) {
            return Ok(value);
        }

        let mut value: Option<&TomlValue> = None;
        let mut table = Some(&self.values);
        for part in key.split('.') {
            let Some(current) = table else {
                return Err(Error::ValueNotFound(key.to_string()));
            };
            value = current.get(part);
            table = value.and_then(TomlValue::as_table);
        }

        value
            .and_then(TomlValue::as_str)
            .ok_or_else(|| Error::ValueNotFound(key.to_string()))
    }
}

/// The three endpoint settings the client needs, extracted once from
/// [`Config`] and passed to [`crate::BookStoreClient`] explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    books_endpoint: String,
    authors_endpoint: String,
}

impl ApiConfig {
    pub fn new(
        base_url: impl Into<String>,
        books_endpoint: impl Into<String>,
        authors_endpoint: impl Into<String>,
    ) -> ApiConfig {
        ApiConfig {
            base_url: base_url.into(),
            books_endpoint: books_endpoint.into(),
            authors_endpoint: authors_endpoint.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<ApiConfig> {
        Ok(ApiConfig {
            base_url: config.get_str(BASE_URL_KEY)?.to_owned(),
            books_endpoint: config.get_str(BOOKS_ENDPOINT_KEY)?.to_owned(),
            authors_endpoint: config.get_str(AUTHORS_ENDPOINT_KEY)?.to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn books_endpoint(&self) -> &str {
        &self.books_endpoint
    }

    pub fn authors_endpoint(&self) -> &str {
        &self.authors_endpoint
    }
}
