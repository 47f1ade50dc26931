//! Configuration for the `treeline` binary.
//!
//! Provides [`TreelineConfig`], loaded from TOML files, environment
//! variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `TREELINE_CONFIG` environment variable
//! 3. XDG default: `~/.config/treeline/config.toml`
//! 4. Built-in defaults
//!
//! `TREELINE_<SECTION>_<KEY>` variables are overlaid on top of whichever
//! file was found.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use confyg::{Confygery, env};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use treeline_core::traits::ConfigProvider;
use treeline_core::{Error, Result};
use treeline_store::Neo4jSettings;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TREELINE_CONFIG";

const ENV_PREFIX: &str = "TREELINE";
const MASK: &str = "********";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the `treeline` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreelineConfig {
    /// Project name, used in log lines and default paths.
    pub project_name: String,

    /// Base directory that relative fixture paths resolve against.
    pub base_path: Option<String>,

    /// HTTP listener.
    pub server: ServerConfig,

    /// Graph store connection.
    pub store: StoreConfig,

    /// Seed dataset selection.
    pub seed: SeedConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,

    /// Port to listen on.
    #[serde(deserialize_with = "lenient_number")]
    pub port: u16,
}

/// Which [`GraphStore`](treeline_store::GraphStore) implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// A Neo4j server over bolt.
    #[default]
    Neo4j,
    /// A process-local graph, empty at startup.
    Memory,
}

/// Graph store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store implementation.
    pub backend: StoreBackend,

    /// Bolt URI.
    pub uri: String,

    /// User name.
    pub user: String,

    /// Password.
    pub password: String,

    /// Database name; empty selects the server default.
    pub database: String,

    /// Upper bound on pooled connections.
    #[serde(deserialize_with = "lenient_number")]
    pub max_connections: usize,
}

/// Seed dataset configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Fixture file (`.toml` or `.json`); empty selects the built-in dataset.
    pub fixture: String,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for TreelineConfig {
    fn default() -> Self {
        Self {
            project_name: "treeline".to_string(),
            base_path: None,
            server: ServerConfig::default(),
            store: StoreConfig::default(),
            seed: SeedConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        let neo4j = Neo4jSettings::default();
        Self {
            backend: StoreBackend::default(),
            uri: neo4j.uri,
            user: neo4j.user,
            password: neo4j.password,
            database: String::new(),
            max_connections: neo4j.max_connections,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl TreelineConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// A config path that does not exist is not an error; defaults (plus
    /// the environment overlay) apply instead.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path)
            && path.exists()
        {
            tracing::debug!("reading config from {}", path.display());
            builder
                .add_file(&path.to_string_lossy())
                .map_err(|e| Error::config(format!("config file: {e}")))?;
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("server");
        env_opts.add_section("store");
        env_opts.add_section("seed");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("treeline").join("config.toml"))
    }

    /// Bolt settings for [`treeline_store::Neo4jStore::connect`].
    pub fn neo4j_settings(&self) -> Neo4jSettings {
        let database = match self.store.database.trim() {
            "" => None,
            name => Some(name.to_string()),
        };
        Neo4jSettings {
            uri: self.store.uri.clone(),
            user: self.store.user.clone(),
            password: self.store.password.clone(),
            database,
            max_connections: self.store.max_connections,
        }
    }

    /// A copy safe to print: the store password is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.store.password.is_empty() {
            copy.store.password = MASK.to_string();
        }
        copy
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `TREELINE_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, ENV_PREFIX, &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for TreelineConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(PathBuf::from(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn fixture_path(&self) -> Result<Option<PathBuf>> {
        let fixture = self.seed.fixture.trim();
        if fixture.is_empty() {
            return Ok(None);
        }
        let path = PathBuf::from(fixture);
        if path.is_absolute() {
            Ok(Some(path))
        } else {
            Ok(Some(self.base_path()?.join(path)))
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Accept a number either as a TOML integer or as a string.
///
/// Environment overlay values always arrive as strings.
fn lenient_number<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<u64>,
    <T as FromStr>::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => T::try_from(n).map_err(|_| D::Error::custom(format!("{n} is out of range"))),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|e| D::Error::custom(format!("invalid number '{s}': {e}"))),
    }
}

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
