//! 64-bit primary key fields and the half-precision float placeholder.
//!
//! PostgreSQL's `serial` runs out at 2^31 - 1. [`BigAutoField`] resolves to
//! `bigserial` instead, which goes to 2^63 - 1.
//!
//! `bigserial` is only valid in `CREATE TABLE`: it is shorthand for `bigint`
//! plus an owned sequence, so `ALTER COLUMN id TYPE bigserial` is rejected.
//! Existing tables are converted with [`BigAutoFieldForMigrations`], which
//! resolves to `bigint` and keeps the column's current sequence. See
//! [`PrimaryKeyScheme`](crate::model::PrimaryKeyScheme) for the procedure.

use crate::connection::ConnectionDescriptor;
use crate::fields::{FieldDef, FieldType};
use crate::resolver::{resolve, FieldKind, FieldTypeResolver};

/// Auto-incrementing 64-bit primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigAutoField {
    def: FieldDef,
}

impl BigAutoField {
    /// Creates a primary key field named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            def: FieldDef::new(name, FieldType::AutoField).primary_key(),
        }
    }
}

impl Default for BigAutoField {
    fn default() -> Self {
        Self::new("id")
    }
}

impl FieldTypeResolver for BigAutoField {
    fn field(&self) -> &FieldDef {
        &self.def
    }

    fn kind(&self) -> FieldKind {
        FieldKind::BigAutoField
    }

    fn db_type(&self, connection: &dyn ConnectionDescriptor) -> Option<String> {
        resolve(connection, true, &self.def)
    }
}

/// 64-bit primary key resolving to the plain integer type, for altering the
/// primary key column of an existing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigAutoFieldForMigrations {
    def: FieldDef,
}

impl BigAutoFieldForMigrations {
    /// Creates a primary key field named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            def: FieldDef::new(name, FieldType::AutoField).primary_key(),
        }
    }
}

impl Default for BigAutoFieldForMigrations {
    fn default() -> Self {
        Self::new("id")
    }
}

impl FieldTypeResolver for BigAutoFieldForMigrations {
    fn field(&self) -> &FieldDef {
        &self.def
    }

    fn kind(&self) -> FieldKind {
        FieldKind::BigAutoFieldForMigrations
    }

    fn db_type(&self, connection: &dyn ConnectionDescriptor) -> Option<String> {
        resolve(connection, false, &self.def)
    }
}

/// Column type of [`Float16Field`] on every connection.
pub const FLOAT16_DB_TYPE: &str = "float";

/// Half-precision float placeholder.
///
/// Always resolves to `float`, which most engines store as double precision.
/// Untested against a real half-precision column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Float16Field {
    def: FieldDef,
}

impl Float16Field {
    /// Creates a field named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            def: FieldDef::new(
                name,
                FieldType::Custom {
                    internal_type: "Float16Field".to_string(),
                },
            ),
        }
    }

    /// Allows NULL values in the database.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.def = self.def.nullable();
        self
    }
}

impl FieldTypeResolver for Float16Field {
    fn field(&self) -> &FieldDef {
        &self.def
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Float
    }

    fn db_type(&self, _connection: &dyn ConnectionDescriptor) -> Option<String> {
        Some(FLOAT16_DB_TYPE.to_string())
    }
}
