//! Settings for bigfield.
//!
//! [`Settings`] holds the database connections keyed by alias together with
//! the logging configuration. Database engines use the framework's engine
//! identifiers (e.g. `django_rs.db.backends.postgresql`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{BigFieldError, BigFieldResult};

/// Database connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// The database engine (e.g. `django_rs.db.backends.postgresql`).
    pub engine: String,
    /// The database name (or file path for `SQLite`).
    pub name: String,
    /// The database user.
    pub user: String,
    /// The database password.
    pub password: String,
    /// The database host.
    pub host: String,
    /// The database port.
    pub port: u16,
    /// Additional engine-specific options.
    pub options: HashMap<String, String>,
    /// Type-format templates layered over the engine's built-in table,
    /// keyed by internal type name (e.g. `"CharField" = "varchar(%(max_length)s)"`).
    #[serde(default)]
    pub data_types: HashMap<String, String>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            engine: "django_rs.db.backends.sqlite3".to_string(),
            name: "db.sqlite3".to_string(),
            user: String::new(),
            password: String::new(),
            host: String::new(),
            port: 0,
            options: HashMap::new(),
            data_types: HashMap::new(),
        }
    }
}

impl DatabaseSettings {
    /// Creates settings for the given engine with all other values defaulted.
    pub fn with_engine(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            ..Self::default()
        }
    }
}

/// The complete set of settings.
///
/// # Examples
///
/// ```
/// use bigfield_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert!(settings.databases.contains_key("default"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,
    /// The log level filter (e.g. "info", "bigfield_db=debug").
    pub log_level: String,
    /// Database configurations, keyed by alias (e.g. "default").
    pub databases: HashMap<String, DatabaseSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut databases = HashMap::new();
        databases.insert("default".to_string(), DatabaseSettings::default());

        Self {
            debug: true,
            log_level: "info".to_string(),
            databases,
        }
    }
}

impl Settings {
    /// Returns the database configured under `alias`.
    pub fn database(&self, alias: &str) -> BigFieldResult<&DatabaseSettings> {
        self.databases
            .get(alias)
            .ok_or_else(|| BigFieldError::UnknownDatabase(alias.to_string()))
    }
}
