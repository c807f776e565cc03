//! DDL generation driven by column type resolution.
//!
//! [`SchemaEditor`] turns resolved column types into `CREATE TABLE`,
//! `CREATE INDEX` and `ALTER TABLE` statements for any
//! [`ConnectionDescriptor`]. Fields whose type resolves to `None` have no
//! column to emit and are skipped.

use crate::connection::{ConnectionDescriptor, Vendor};
use crate::fields::{FieldDef, FieldType};
use crate::model::{ModelSchema, PrimaryKeyScheme};
use crate::resolver::FieldTypeResolver;

/// `app_label.ModelName` to the referenced model's default table name.
fn referenced_table(to: &str) -> String {
    to.replace('.', "_").to_lowercase()
}

/// Generates DDL for one connection.
pub struct SchemaEditor<'a> {
    connection: &'a dyn ConnectionDescriptor,
}

impl<'a> SchemaEditor<'a> {
    /// Creates an editor for `connection`.
    pub fn new(connection: &'a dyn ConnectionDescriptor) -> Self {
        Self { connection }
    }

    fn quote(&self, name: &str) -> String {
        self.connection.quote_name(name)
    }

    /// Returns the column definition (type and constraints) for `field`.
    pub fn column_sql(&self, field: &dyn FieldTypeResolver) -> Option<String> {
        let type_str = field.db_type(self.connection)?;
        let def = field.field();
        let null_str = if def.primary_key {
            " PRIMARY KEY"
        } else if def.null {
            " NULL"
        } else {
            " NOT NULL"
        };
        let unique_str = if def.unique && !def.primary_key {
            " UNIQUE"
        } else {
            ""
        };
        Some(format!("{type_str}{null_str}{unique_str}"))
    }

    /// Returns the table-level `FOREIGN KEY` constraint for a foreign key
    /// field that knows which column it references.
    pub fn foreign_key_constraint(&self, field: &dyn FieldTypeResolver) -> Option<String> {
        let def = field.field();
        let FieldType::ForeignKey { to, on_delete } = &def.field_type else {
            return None;
        };
        let target_column = field.referenced_column()?;
        Some(format!(
            "FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE {}",
            self.quote(&def.column),
            self.quote(&referenced_table(to)),
            self.quote(target_column),
            on_delete.as_sql()
        ))
    }

    /// Returns `CREATE INDEX` for a `db_index` field. Primary key and unique
    /// columns are already indexed by their constraint.
    pub fn create_index(&self, table_name: &str, def: &FieldDef) -> Option<String> {
        if !def.db_index || def.primary_key || def.unique {
            return None;
        }
        let index_name = format!("{table_name}_{}_idx", def.column);
        Some(format!(
            "CREATE INDEX {} ON {} ({})",
            self.quote(&index_name),
            self.quote(table_name),
            self.quote(&def.column)
        ))
    }

    /// Generates `CREATE TABLE` DDL for a model, followed by its indexes.
    ///
    /// Returns nothing when none of the model's columns resolve.
    pub fn create_table(&self, model: &ModelSchema) -> Vec<String> {
        let table_name = model.table_name();
        let mut columns = Vec::new();
        let mut constraints = Vec::new();
        let mut indexes = Vec::new();

        for field in model.fields() {
            let def = field.field();
            let Some(sql) = self.column_sql(field) else {
                tracing::warn!(
                    table = %table_name,
                    field = %def.name,
                    internal_type = def.internal_type(),
                    "no column type for field; leaving it out of CREATE TABLE"
                );
                continue;
            };
            columns.push(format!("{} {sql}", self.quote(&def.column)));
            constraints.extend(self.foreign_key_constraint(field));
            indexes.extend(self.create_index(&table_name, def));
        }

        if columns.is_empty() {
            tracing::warn!(table = %table_name, "no column resolves; skipping CREATE TABLE");
            return Vec::new();
        }

        columns.extend(constraints);
        let mut stmts = vec![format!(
            "CREATE TABLE {} ({})",
            self.quote(&table_name),
            columns.join(", ")
        )];
        stmts.extend(indexes);
        stmts
    }

    /// Generates DDL changing a column from `old`'s type to `new`'s type.
    ///
    /// Emits nothing when the two resolve to the same type, when either is
    /// unknown, on SQLite (which cannot alter a column in place), or when the
    /// connection's dialect is unknown.
    pub fn alter_field(
        &self,
        table_name: &str,
        old: &dyn FieldTypeResolver,
        new: &dyn FieldTypeResolver,
    ) -> Vec<String> {
        let (Some(old_type), Some(new_type)) =
            (old.db_type(self.connection), new.db_type(self.connection))
        else {
            return Vec::new();
        };
        if old_type == new_type {
            return Vec::new();
        }

        let table = self.quote(table_name);
        let def = new.field();
        let column = self.quote(&def.column);
        match self.connection.vendor() {
            Some(Vendor::PostgreSql | Vendor::PostGis) => vec![format!(
                "ALTER TABLE {table} ALTER COLUMN {column} TYPE {new_type}"
            )],
            Some(Vendor::MySql) => {
                // MODIFY restates the column but the key constraints stay in place.
                let null_str = if def.null && !def.primary_key {
                    " NULL"
                } else {
                    " NOT NULL"
                };
                vec![format!(
                    "ALTER TABLE {table} MODIFY {column} {new_type}{null_str}"
                )]
            }
            Some(Vendor::Sqlite) => {
                tracing::warn!(
                    table = table_name,
                    from = %old_type,
                    to = %new_type,
                    "SQLite cannot alter a column type in place"
                );
                Vec::new()
            }
            None => {
                tracing::warn!(
                    table = table_name,
                    engine = self.connection.engine(),
                    "unknown SQL dialect; not altering column"
                );
                Vec::new()
            }
        }
    }

    /// Generates the DDL for each step of moving an existing table's primary
    /// key from `from` to [`PrimaryKeyScheme::Big`].
    ///
    /// Each altering migration uses the migration-safe field as its target,
    /// so only the step away from the 32-bit key changes the column.
    pub fn primary_key_conversion(
        &self,
        table_name: &str,
        from: PrimaryKeyScheme,
    ) -> Vec<(PrimaryKeyScheme, Vec<String>)> {
        let mut current = from.id_field();
        from.conversion_steps()
            .into_iter()
            .map(|step| {
                let target = PrimaryKeyScheme::BigForMigrations.id_field();
                let sql = self.alter_field(table_name, current.as_ref(), target.as_ref());
                current = target;
                (step, sql)
            })
            .collect()
    }
}
