//! # bigfield
//!
//! 64-bit primary keys for django-rs models.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on
//! `bigfield` to get everything, or on individual crates for finer-grained
//! control.

/// Settings, logging, and error types.
pub use bigfield_core as core;

/// Field types, column type resolution, and DDL generation.
#[cfg(feature = "db")]
pub use bigfield_db as db;

/// Management commands (CLI).
#[cfg(feature = "cli")]
pub use bigfield_cli as cli;

/// Third-party crates used in the public API.
pub use serde;
pub use tracing;

/// The types most models need.
pub mod prelude {
    pub use bigfield_core::{BigFieldError, BigFieldResult, DatabaseSettings, Settings};

    #[cfg(feature = "db")]
    pub use bigfield_db::{
        BigAutoField, BigAutoFieldForMigrations, BigForeignKey, ConnectionDescriptor,
        DatabaseConnection, FieldDef, FieldType, FieldTypeResolver, Float16Field, ModelSchema,
        PrimaryKeyScheme,
    };
}
