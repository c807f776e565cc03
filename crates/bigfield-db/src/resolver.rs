//! Column type resolution.
//!
//! Every field type implements [`FieldTypeResolver`]. The big integer fields
//! route through [`resolve`], which short-circuits to `bigserial`/`bigint` on
//! the supported PostgreSQL variants and otherwise falls back to the
//! framework's type-format lookup ([`default_db_type`]).
//!
//! A `None` result means the connection has no mapping for the field; the
//! caller decides what to do with it (schema generation skips the column).

use std::fmt;

use crate::connection::{type_format_table, ConnectionDescriptor};
use crate::engine::EngineVariant;
use crate::fields::FieldDef;
use crate::format::{format_template, FormatContext};

/// Column type of an auto-incrementing 64-bit primary key.
pub const BIGSERIAL: &str = "bigserial";

/// Column type of a plain 64-bit integer.
pub const BIGINT: &str = "bigint";

/// The override category a field falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// The framework's 32-bit auto-incrementing primary key.
    AutoField,
    /// The 64-bit auto-incrementing primary key.
    BigAutoField,
    /// The 64-bit primary key used while altering existing tables.
    BigAutoFieldForMigrations,
    /// A many-to-one relation.
    ForeignKey,
    /// A floating-point field.
    Float,
    /// Anything else.
    Other,
}

impl FieldKind {
    /// Returns `true` for the auto-incrementing kinds. The big variants are
    /// auto fields too.
    pub const fn is_auto_increment(self) -> bool {
        matches!(
            self,
            Self::AutoField | Self::BigAutoField | Self::BigAutoFieldForMigrations
        )
    }
}

/// Resolves the database column type of a field.
pub trait FieldTypeResolver: fmt::Debug + Send + Sync {
    /// Returns the field's definition (name, column, flags).
    fn field(&self) -> &FieldDef;

    /// Returns the override category of this field.
    fn kind(&self) -> FieldKind;

    /// Returns the column type on `connection`, or `None` if unknown.
    fn db_type(&self, connection: &dyn ConnectionDescriptor) -> Option<String>;

    /// Returns the column a foreign key points at on the referenced table.
    fn referenced_column(&self) -> Option<&str> {
        None
    }
}

/// Resolves a big integer column type.
///
/// On a supported engine this is [`BIGSERIAL`] for primary keys and
/// [`BIGINT`] otherwise. Any other engine gets the framework's lookup for
/// `field`.
pub fn resolve(
    connection: &dyn ConnectionDescriptor,
    is_primary_key: bool,
    field: &FieldDef,
) -> Option<String> {
    let engine = connection.engine();
    if let Some(variant) = EngineVariant::from_identifier(engine) {
        let db_type = if is_primary_key { BIGSERIAL } else { BIGINT };
        tracing::debug!(
            field = %field.name,
            engine = variant.identifier(),
            db_type,
            "resolved big integer column"
        );
        return Some(db_type.to_string());
    }
    default_db_type(field, connection)
}

/// The framework's default resolution: format the connection's template for
/// the field's internal type.
///
/// Returns `None` if the table has no template for the internal type or the
/// template references a value the field does not have.
pub fn default_db_type(field: &FieldDef, connection: &dyn ConnectionDescriptor) -> Option<String> {
    let internal_type = field.internal_type();
    let Some(template) = type_format_table(connection).get(internal_type) else {
        tracing::trace!(
            field = %field.name,
            internal_type,
            engine = connection.engine(),
            "no type-format template"
        );
        return None;
    };
    let context = FormatContext::for_field(field, connection);
    format_template(template, &context)
}
