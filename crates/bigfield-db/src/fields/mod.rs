//! Field definitions and the big integer field types.
//!
//! [`FieldDef`] is the framework's own field, resolved through the
//! connection's type-format table. [`BigAutoField`],
//! [`BigAutoFieldForMigrations`], [`BigForeignKey`] and [`Float16Field`]
//! substitute for the framework's auto, foreign key, and float fields.

pub mod big;
pub mod related;
pub mod types;

pub use big::{BigAutoField, BigAutoFieldForMigrations, Float16Field, FLOAT16_DB_TYPE};
pub use related::BigForeignKey;
pub use types::{FieldDef, FieldType, OnDelete};
