//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `BIGFIELD_DEBUG` | `debug` |
//! | `BIGFIELD_LOG_LEVEL` | `log_level` |
//! | `BIGFIELD_DATABASE_ENGINE` | `databases.default.engine` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use bigfield_core::settings_loader;
//!
//! let settings = settings_loader::from_file_with_env("config/settings.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::BigFieldError;
use crate::settings::{DatabaseSettings, Settings};

/// Loads settings from a TOML string.
///
/// Keys missing from the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, BigFieldError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| BigFieldError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, BigFieldError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| BigFieldError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a file, choosing the format from its extension
/// (`.json` is JSON, anything else is TOML).
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub fn from_file(path: impl AsRef<Path>) -> Result<Settings, BigFieldError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        BigFieldError::ConfigurationError(format!(
            "Failed to read settings file '{}': {e}",
            path.display()
        ))
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        from_json_str(&content)
    } else {
        from_toml_str(&content)
    }
}

/// Loads settings from a file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub fn from_file_with_env(path: impl AsRef<Path>) -> Result<Settings, BigFieldError> {
    let mut settings = from_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// `BIGFIELD_DEBUG` accepts "true"/"1"/"yes"; anything else disables debug.
/// `BIGFIELD_DATABASE_ENGINE` creates the `default` alias if it is missing.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("BIGFIELD_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("BIGFIELD_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("BIGFIELD_DATABASE_ENGINE") {
        settings
            .databases
            .entry("default".to_string())
            .or_insert_with(DatabaseSettings::default)
            .engine = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn merge_over_defaults(
    value: serde_json::Value,
    format: &str,
) -> Result<Settings, BigFieldError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        BigFieldError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        BigFieldError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
///
/// A database alias that only exists in the override has no base object to
/// merge into, so it is merged over a default [`DatabaseSettings`] instead.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    if key == "databases" {
                        merge_databases(base_v, override_v)
                    } else {
                        merge_json(base_v, override_v)
                    }
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

fn merge_databases(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    let serde_json::Value::Object(mut base_map) = base else {
        return override_val;
    };
    let serde_json::Value::Object(override_map) = override_val else {
        return override_val;
    };
    for (alias, db) in override_map {
        let db_base = base_map.remove(&alias).unwrap_or_else(|| {
            serde_json::to_value(DatabaseSettings::default()).unwrap_or(serde_json::Value::Null)
        });
        base_map.insert(alias, merge_json(db_base, db));
    }
    serde_json::Value::Object(base_map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_str_basic() {
        let settings = from_toml_str(
            r#"
            debug = false
            log_level = "debug"
        "#,
        )
        .unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "debug");
        // Untouched keys keep their defaults.
        assert!(settings.databases.contains_key("default"));
    }

    #[test]
    fn test_from_toml_str_databases() {
        let settings = from_toml_str(
            r#"
            [databases.default]
            engine = "django_rs.db.backends.postgresql"
            name = "share"
            port = 5432

            [databases.default.data_types]
            UuidField = "uuid"

            [databases.gis]
            engine = "django_rs.contrib.gis.db.backends.postgis"
        "#,
        )
        .unwrap();
        let db = settings.database("default").unwrap();
        assert_eq!(db.engine, "django_rs.db.backends.postgresql");
        assert_eq!(db.name, "share");
        assert_eq!(db.port, 5432);
        assert_eq!(db.data_types["UuidField"], "uuid");

        // A new alias is filled in from the database defaults.
        let gis = settings.database("gis").unwrap();
        assert_eq!(gis.engine, "django_rs.contrib.gis.db.backends.postgis");
        assert_eq!(gis.name, "db.sqlite3");
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert!(settings.debug);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("this is [not toml");
        assert!(matches!(result, Err(BigFieldError::ConfigurationError(_))));
    }

    #[test]
    fn test_from_json_str_databases() {
        let settings = from_json_str(
            r#"{
                "debug": false,
                "databases": {
                    "default": {"engine": "django_rs.db.backends.mysql"}
                }
            }"#,
        )
        .unwrap();
        assert!(!settings.debug);
        assert_eq!(
            settings.database("default").unwrap().engine,
            "django_rs.db.backends.mysql"
        );
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{invalid json").is_err());
    }

    // ── File loading ────────────────────────────────────────────────

    #[test]
    fn test_from_file_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "log_level = \"warn\"\n").unwrap();

        let settings = from_file(&path).unwrap();
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_from_file_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"log_level": "error"}"#).unwrap();

        let settings = from_file(&path).unwrap();
        assert_eq!(settings.log_level, "error");
    }

    #[test]
    fn test_from_file_missing() {
        let result = from_file("/nonexistent/path/settings.toml");
        assert!(result.is_err());
    }

    // ── Environment variable overrides ──────────────────────────────
    //
    // All env-touching assertions live in one test so parallel tests never
    // observe each other's variables.

    #[test]
    fn test_apply_env_overrides() {
        std::env::set_var("BIGFIELD_DEBUG", "0");
        std::env::set_var("BIGFIELD_LOG_LEVEL", "trace");
        std::env::set_var("BIGFIELD_DATABASE_ENGINE", "django_rs.db.backends.postgresql");

        let mut settings = Settings::default();
        settings.databases.clear();
        apply_env_overrides(&mut settings);
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "trace");
        assert_eq!(
            settings.database("default").unwrap().engine,
            "django_rs.db.backends.postgresql"
        );

        std::env::set_var("BIGFIELD_DEBUG", "yes");
        let settings = from_env();
        assert!(settings.debug);

        std::env::remove_var("BIGFIELD_DEBUG");
        std::env::remove_var("BIGFIELD_LOG_LEVEL");
        std::env::remove_var("BIGFIELD_DATABASE_ENGINE");
    }

    // ── Helpers ─────────────────────────────────────────────────────

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"a": {"b": 1, "c": 2}});
        let over = serde_json::json!({"a": {"c": 3}});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"a": {"b": 1, "c": 3}}));
    }

    #[test]
    fn test_toml_to_json() {
        let value: toml::Value = toml::from_str("x = 1\ny = [true]").unwrap();
        assert_eq!(toml_to_json(value), serde_json::json!({"x": 1, "y": [true]}));
    }
}
