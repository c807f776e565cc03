//! The `sqlbigpk` management command.
//!
//! Shows the SQL for moving an existing table's primary key to 64 bits, one
//! block per step of the conversion.

use async_trait::async_trait;
use bigfield_core::logging::command_span;
use bigfield_core::{BigFieldError, Settings};
use bigfield_db::{ConnectionDescriptor, DatabaseConnection, PrimaryKeyScheme, SchemaEditor};

use crate::command::ManagementCommand;

/// Displays the primary key conversion SQL for a table.
pub struct SqlbigpkCommand;

/// Parses the `--from` argument.
pub fn parse_scheme(value: &str) -> Result<PrimaryKeyScheme, BigFieldError> {
    match value {
        "default" => Ok(PrimaryKeyScheme::Default),
        "for-migrations" => Ok(PrimaryKeyScheme::BigForMigrations),
        "big" => Ok(PrimaryKeyScheme::Big),
        other => Err(BigFieldError::ConfigurationError(format!(
            "Unknown primary key scheme '{other}' (expected default, for-migrations or big)"
        ))),
    }
}

/// Generates the conversion script for `table` starting from `from`.
///
/// Each step is headed by a comment naming the model base to switch to,
/// followed by its statements. The script ends with the primary key column
/// definition new tables get.
pub fn generate_sqlbigpk(
    connection: &DatabaseConnection,
    table: &str,
    from: PrimaryKeyScheme,
) -> Vec<String> {
    let editor = SchemaEditor::new(connection);
    let mut lines = Vec::new();

    for (i, (scheme, stmts)) in editor
        .primary_key_conversion(table, from)
        .into_iter()
        .enumerate()
    {
        lines.push(format!("-- Step {}: inherit from {scheme}", i + 1));
        if stmts.is_empty() {
            lines.push("-- (no schema change)".to_string());
        }
        lines.extend(stmts.into_iter().map(|s| format!("{s};")));
    }

    let id = PrimaryKeyScheme::Big.id_field();
    if let Some(column) = editor.column_sql(id.as_ref()) {
        lines.push(format!(
            "-- New tables: {} {column}",
            connection.quote_name(&id.field().column)
        ));
    }
    lines
}

#[async_trait]
impl ManagementCommand for SqlbigpkCommand {
    fn name(&self) -> &'static str {
        "sqlbigpk"
    }

    fn help(&self) -> &'static str {
        "Show the SQL for converting a table's primary key to 64 bits"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("table")
                .long("table")
                .required(true)
                .help("Table whose primary key is converted"),
        )
        .arg(
            clap::Arg::new("from")
                .long("from")
                .default_value("default")
                .help("Current scheme: default, for-migrations or big"),
        )
        .arg(
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

        let table = matches
            .get_one::<String>("table")
            .ok_or_else(|| BigFieldError::ConfigurationError("--table is required".into()))?;
        let from = parse_scheme(
            matches
                .get_one::<String>("from")
                .map_or("default", String::as_str),
        )?;

        let connection = DatabaseConnection::from_settings(settings.database(database)?)?;
        for line in generate_sqlbigpk(&connection, table, from) {
            println!("{line}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigfield_db::Vendor;

    fn pg() -> DatabaseConnection {
        DatabaseConnection::new("django_rs.db.backends.postgresql", Vendor::PostgreSql)
    }

    #[test]
    fn test_parse_scheme() {
        assert_eq!(parse_scheme("default").unwrap(), PrimaryKeyScheme::Default);
        assert_eq!(
            parse_scheme("for-migrations").unwrap(),
            PrimaryKeyScheme::BigForMigrations
        );
        assert_eq!(parse_scheme("big").unwrap(), PrimaryKeyScheme::Big);
        assert!(parse_scheme("huge").is_err());
    }

    #[test]
    fn test_generate_sqlbigpk_postgres() {
        let lines = generate_sqlbigpk(&pg(), "share_document", PrimaryKeyScheme::Default);
        assert_eq!(
            lines,
            vec![
                "-- Step 1: inherit from ModelPkeyForMigrations",
                "ALTER TABLE \"share_document\" ALTER COLUMN \"id\" TYPE bigint;",
                "-- Step 2: inherit from ModelPkey",
                "-- (no schema change)",
                "-- New tables: \"id\" bigserial PRIMARY KEY",
            ]
        );
    }

    #[test]
    fn test_generate_sqlbigpk_already_big() {
        let lines = generate_sqlbigpk(&pg(), "t", PrimaryKeyScheme::Big);
        assert_eq!(lines, vec!["-- New tables: \"id\" bigserial PRIMARY KEY"]);
    }

    #[test]
    fn test_generate_sqlbigpk_mysql_has_no_type_change() {
        let conn = DatabaseConnection::new("django_rs.db.backends.mysql", Vendor::MySql);
        let lines = generate_sqlbigpk(&conn, "t", PrimaryKeyScheme::Default);
        assert_eq!(lines[1], "-- (no schema change)");
        assert_eq!(
            lines.last().unwrap(),
            "-- New tables: `id` integer AUTO_INCREMENT PRIMARY KEY"
        );
    }

    #[tokio::test]
    async fn test_handle_requires_table() {
        let cmd = SqlbigpkCommand;
        let result = cmd
            .add_arguments(clap::Command::new("sqlbigpk"))
            .try_get_matches_from(["sqlbigpk"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_handle_rejects_unknown_scheme() {
        let cmd = SqlbigpkCommand;
        let matches = cmd
            .add_arguments(clap::Command::new("sqlbigpk"))
            .try_get_matches_from(["sqlbigpk", "--table", "t", "--from", "tiny"])
            .unwrap();
        let err = cmd.handle(&matches, &Settings::default()).await.unwrap_err();
        assert!(err.is_configuration());
    }
}
