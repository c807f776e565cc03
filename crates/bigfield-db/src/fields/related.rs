//! Foreign keys to 64-bit primary keys.

use crate::connection::ConnectionDescriptor;
use crate::engine;
use crate::fields::{FieldDef, FieldType, OnDelete};
use crate::resolver::{FieldKind, FieldTypeResolver};

/// A foreign key whose column type follows the primary key it references.
///
/// When the referenced field is auto-incrementing, the foreign key column
/// is a plain integer of matching width: `bigint` on the supported
/// PostgreSQL variants, the connection's 32-bit integer elsewhere. Any other
/// referenced field dictates the column type directly.
#[derive(Debug)]
pub struct BigForeignKey {
    def: FieldDef,
    target: Box<dyn FieldTypeResolver>,
}

impl BigForeignKey {
    /// Creates a foreign key named `name` to the model `to`, referencing
    /// `target`. The column is `<name>_id` and is indexed.
    pub fn new(
        name: impl Into<String>,
        to: impl Into<String>,
        target: Box<dyn FieldTypeResolver>,
    ) -> Self {
        let name = name.into();
        let column = format!("{name}_id");
        let def = FieldDef::new(
            name,
            FieldType::ForeignKey {
                to: to.into(),
                on_delete: OnDelete::default(),
            },
        )
        .column(column)
        .db_index();
        Self { def, target }
    }

    /// Sets the ON DELETE behavior.
    #[must_use]
    pub fn on_delete(mut self, on_delete: OnDelete) -> Self {
        if let FieldType::ForeignKey {
            on_delete: ref mut current,
            ..
        } = self.def.field_type
        {
            *current = on_delete;
        }
        self
    }

    /// Allows NULL values in the database.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.def = self.def.nullable();
        self
    }
}

impl FieldTypeResolver for BigForeignKey {
    fn field(&self) -> &FieldDef {
        &self.def
    }

    fn kind(&self) -> FieldKind {
        FieldKind::ForeignKey
    }

    fn referenced_column(&self) -> Option<&str> {
        Some(&self.target.field().column)
    }

    fn db_type(&self, connection: &dyn ConnectionDescriptor) -> Option<String> {
        if !self.target.kind().is_auto_increment() {
            return self.target.db_type(connection);
        }
        let int_type = if engine::is_supported(connection.engine()) {
            FieldType::BigIntegerField
        } else {
            FieldType::IntegerField
        };
        FieldDef::new(self.def.name.clone(), int_type)
            .column(self.def.column.clone())
            .db_type(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{DatabaseConnection, Vendor};
    use crate::fields::{BigAutoField, BigAutoFieldForMigrations};

    fn pg() -> DatabaseConnection {
        DatabaseConnection::new("django_rs.db.backends.postgresql", Vendor::PostgreSql)
    }

    fn mysql() -> DatabaseConnection {
        DatabaseConnection::new("django_rs.db.backends.mysql", Vendor::MySql)
    }

    fn fk(target: Box<dyn FieldTypeResolver>) -> BigForeignKey {
        BigForeignKey::new("document", "share.Document", target)
    }

    #[test]
    fn test_new_sets_column_and_defaults() {
        let key = fk(Box::new(BigAutoField::default()));
        assert_eq!(key.field().name, "document");
        assert_eq!(key.field().column, "document_id");
        assert!(key.field().db_index);
        assert_eq!(
            key.field().field_type,
            FieldType::ForeignKey {
                to: "share.Document".into(),
                on_delete: OnDelete::Cascade,
            }
        );
        assert_eq!(key.kind(), FieldKind::ForeignKey);
        assert_eq!(key.referenced_column(), Some("id"));
    }

    #[test]
    fn test_builders() {
        let key = fk(Box::new(BigAutoField::default()))
            .on_delete(OnDelete::SetNull)
            .nullable();
        assert!(matches!(
            key.field().field_type,
            FieldType::ForeignKey {
                on_delete: OnDelete::SetNull,
                ..
            }
        ));
        assert!(key.field().null);
    }

    #[test]
    fn test_auto_targets_on_postgres_become_bigint() {
        let targets: Vec<Box<dyn FieldTypeResolver>> = vec![
            Box::new(BigAutoField::default()),
            Box::new(BigAutoFieldForMigrations::default()),
            Box::new(FieldDef::new("id", FieldType::AutoField).primary_key()),
        ];
        for target in targets {
            assert_eq!(fk(target).db_type(&pg()).as_deref(), Some("bigint"));
        }
    }

    #[test]
    fn test_auto_targets_elsewhere_become_integer() {
        let targets: Vec<Box<dyn FieldTypeResolver>> = vec![
            Box::new(BigAutoField::default()),
            Box::new(FieldDef::new("id", FieldType::AutoField).primary_key()),
        ];
        for target in targets {
            assert_eq!(fk(target).db_type(&mysql()).as_deref(), Some("integer"));
        }
    }

    #[test]
    fn test_other_targets_delegate() {
        let code = FieldDef::new("code", FieldType::CharField).max_length(12);
        assert_eq!(
            fk(Box::new(code.clone())).db_type(&pg()).as_deref(),
            Some("varchar(12)")
        );
        assert_eq!(fk(Box::new(code.clone())).db_type(&pg()), code.db_type(&pg()));

        let uuid = FieldDef::new("uid", FieldType::UuidField);
        assert_eq!(fk(Box::new(uuid)).db_type(&mysql()).as_deref(), Some("char(32)"));
    }
}
