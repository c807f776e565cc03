//! # bigfield-db
//!
//! Field types that give primary keys a 64-bit sequence (`bigserial`) on
//! PostgreSQL and PostGIS instead of the framework's 32-bit `serial`.
//!
//! Every field implements [`FieldTypeResolver`]; the column type is a pure
//! function of the field and a borrowed [`ConnectionDescriptor`].
//!
//! ```
//! use bigfield_db::connection::{DatabaseConnection, Vendor};
//! use bigfield_db::fields::{BigAutoField, BigForeignKey};
//! use bigfield_db::FieldTypeResolver;
//!
//! let pg = DatabaseConnection::new("django_rs.db.backends.postgresql", Vendor::PostgreSql);
//! assert_eq!(BigAutoField::default().db_type(&pg).as_deref(), Some("bigserial"));
//!
//! let owner = BigForeignKey::new("owner", "auth.User", Box::new(BigAutoField::default()));
//! assert_eq!(owner.db_type(&pg).as_deref(), Some("bigint"));
//! ```
//!
//! ## Module Overview
//!
//! - [`engine`] - The engine variants with 64-bit sequence support
//! - [`connection`] - Connection descriptors and type-format tables
//! - [`format`] - Column type template formatting
//! - [`resolver`] - The [`FieldTypeResolver`] trait and [`resolve`]
//! - [`fields`] - The framework field definition and the big field types
//! - [`model`] - Primary key schemes and model schemas
//! - [`schema`] - DDL generation

// These clippy lints are intentionally allowed:
// - struct_excessive_bools: FieldDef mirrors the framework's boolean field options
// - doc_markdown: backtick requirements for documentation items are too strict
// - missing_const_for_fn: some functions may gain runtime logic later
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]

pub mod connection;
pub mod engine;
pub mod fields;
pub mod format;
pub mod model;
pub mod resolver;
pub mod schema;

pub use connection::{ConnectionDescriptor, DataTypeTable, DatabaseConnection, Vendor};
pub use engine::EngineVariant;
pub use fields::{BigAutoField, BigAutoFieldForMigrations, BigForeignKey, FieldDef, FieldType, Float16Field};
pub use model::{ModelSchema, PrimaryKeyScheme};
pub use resolver::{resolve, FieldKind, FieldTypeResolver};
pub use schema::SchemaEditor;
