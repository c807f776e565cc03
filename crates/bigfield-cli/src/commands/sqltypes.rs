//! The `sqltypes` management command.
//!
//! Prints the column type every primary key related field resolves to on a
//! configured database.

use async_trait::async_trait;
use bigfield_core::logging::command_span;
use bigfield_core::{BigFieldError, Settings};
use bigfield_db::fields::{
    BigAutoField, BigAutoFieldForMigrations, BigForeignKey, FieldDef, FieldType, Float16Field,
};
use bigfield_db::{DatabaseConnection, FieldTypeResolver};

use crate::command::ManagementCommand;

/// Shows the resolved column types for a database alias.
pub struct SqltypesCommand;

/// Resolves each field type on `connection`, labelled by field type.
pub fn column_types(connection: &DatabaseConnection) -> Vec<(&'static str, Option<String>)> {
    let auto = || FieldDef::new("id", FieldType::AutoField).primary_key();
    let fields: Vec<(&'static str, Box<dyn FieldTypeResolver>)> = vec![
        ("AutoField", Box::new(auto())),
        ("BigAutoField", Box::new(BigAutoField::default())),
        (
            "BigAutoFieldForMigrations",
            Box::new(BigAutoFieldForMigrations::default()),
        ),
        (
            "BigForeignKey(AutoField)",
            Box::new(BigForeignKey::new("parent", "app.Model", Box::new(auto()))),
        ),
        (
            "BigForeignKey(BigAutoField)",
            Box::new(BigForeignKey::new(
                "parent",
                "app.Model",
                Box::new(BigAutoField::default()),
            )),
        ),
        ("Float16Field", Box::new(Float16Field::new("value"))),
    ];

    fields
        .into_iter()
        .map(|(label, field)| (label, field.db_type(connection)))
        .collect()
}

/// Formats resolved types as aligned `label  type` lines. Unresolved types
/// print as `(framework default)`.
pub fn format_column_types(rows: &[(&str, Option<String>)]) -> Vec<String> {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, db_type)| {
            let db_type = db_type.as_deref().unwrap_or("(framework default)");
            format!("{label:<width$}  {db_type}")
        })
        .collect()
}

#[async_trait]
impl ManagementCommand for SqltypesCommand {
    fn name(&self) -> &'static str {
        "sqltypes"
    }

    fn help(&self) -> &'static str {
        "Show the column types the big integer fields resolve to"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("database")
                .long("database")
                .default_value("default")
                .help("Database alias"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), BigFieldError> {
        let database = matches
            .get_one::<String>("database")
            .map_or("default", String::as_str);
        let _guard = command_span(self.name(), database).entered();

        let connection = DatabaseConnection::from_settings(settings.database(database)?)?;
        for line in format_column_types(&column_types(&connection)) {
            println!("{line}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigfield_core::DatabaseSettings;
    use bigfield_db::connection::{DataTypeTable, Vendor};

    fn types_for(engine: &str) -> Vec<(&'static str, Option<String>)> {
        let conn = DatabaseConnection::from_settings(&DatabaseSettings::with_engine(engine)).unwrap();
        column_types(&conn)
    }

    #[test]
    fn test_column_types_postgres() {
        let rows = types_for("django_rs.db.backends.postgresql");
        let expected = [
            ("AutoField", "serial"),
            ("BigAutoField", "bigserial"),
            ("BigAutoFieldForMigrations", "bigint"),
            ("BigForeignKey(AutoField)", "bigint"),
            ("BigForeignKey(BigAutoField)", "bigint"),
            ("Float16Field", "float"),
        ];
        assert_eq!(rows.len(), expected.len());
        for ((label, db_type), (want_label, want_type)) in rows.iter().zip(expected) {
            assert_eq!(*label, want_label);
            assert_eq!(db_type.as_deref(), Some(want_type));
        }
    }

    #[test]
    fn test_column_types_sqlite() {
        let rows = types_for("django_rs.db.backends.sqlite3");
        assert!(rows.iter().take(5).all(|(_, t)| t.as_deref() == Some("integer")));
        assert_eq!(rows[5].1.as_deref(), Some("float"));
    }

    #[test]
    fn test_format_column_types_aligns_and_marks_defaults() {
        let conn = DatabaseConnection::with_data_types(
            "django_rs.db.backends.sqlite3",
            Vendor::Sqlite,
            DataTypeTable::new(),
        );
        let lines = format_column_types(&column_types(&conn));
        assert_eq!(lines[0], "AutoField                    (framework default)");
        assert_eq!(lines[5], "Float16Field                 float");
    }

    #[tokio::test]
    async fn test_handle_unknown_database() {
        let cmd = SqltypesCommand;
        let matches = cmd
            .add_arguments(clap::Command::new("sqltypes"))
            .try_get_matches_from(["sqltypes", "--database", "replica"])
            .unwrap();
        let err = cmd.handle(&matches, &Settings::default()).await.unwrap_err();
        assert!(matches!(err, BigFieldError::UnknownDatabase(_)));
    }

    #[tokio::test]
    async fn test_handle_default_database() {
        let cmd = SqltypesCommand;
        let matches = cmd
            .add_arguments(clap::Command::new("sqltypes"))
            .try_get_matches_from(["sqltypes"])
            .unwrap();
        assert!(cmd.handle(&matches, &Settings::default()).await.is_ok());
    }
}
