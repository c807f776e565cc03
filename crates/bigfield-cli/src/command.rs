//! Subcommand dispatch for the `bigfield` binary.
//!
//! Each [`ManagementCommand`] contributes one clap subcommand. The
//! [`CommandRegistry`] assembles them into the top-level parser and routes
//! the parsed arguments back to the command that declared them.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bigfield_core::{BigFieldError, BigFieldResult, Settings};

/// A subcommand of the `bigfield` binary.
#[async_trait]
pub trait ManagementCommand: Send + Sync {
    /// The subcommand name.
    fn name(&self) -> &'static str;

    /// One-line description shown in `--help`.
    fn help(&self) -> &'static str;

    /// Declares the subcommand's arguments on `cmd`.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command;

    /// Runs the subcommand against the loaded settings.
    async fn handle(&self, matches: &clap::ArgMatches, settings: &Settings)
        -> BigFieldResult<()>;
}

/// Registered subcommands, keyed by name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Box<dyn ManagementCommand>>,
}

impl CommandRegistry {
    /// Creates a registry with no commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `command`, replacing any command registered under the same name.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        self.commands.insert(command.name(), command);
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Builds the `bigfield` parser: a global `--settings FILE` option and one
    /// subcommand per registered command, in name order.
    pub fn build_cli(&self) -> clap::Command {
        let root = clap::Command::new("bigfield")
            .about("Column types for 64-bit primary keys")
            .subcommand_required(true)
            .arg(
                clap::Arg::new("settings")
                    .long("settings")
                    .global(true)
                    .value_name("FILE")
                    .help("Settings file (TOML, or JSON with a .json extension)"),
            );

        self.commands.values().fold(root, |root, command| {
            let sub = clap::Command::new(command.name()).about(command.help());
            root.subcommand(command.add_arguments(sub))
        })
    }

    /// Runs the subcommand selected in `matches`.
    pub async fn execute(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> BigFieldResult<()> {
        let Some((name, args)) = matches.subcommand() else {
            return Err(BigFieldError::ConfigurationError(
                "no command given".to_string(),
            ));
        };
        let command = self.get(name).ok_or_else(|| {
            BigFieldError::ConfigurationError(format!("unknown command '{name}'"))
        })?;

        tracing::debug!(command = name, "dispatching");
        command.handle(args, settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{register_builtin_commands, SqltypesCommand};
    use bigfield_core::DatabaseSettings;

    fn builtin() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        register_builtin_commands(&mut registry);
        registry
    }

    fn postgres_settings() -> Settings {
        let mut settings = Settings::default();
        settings.databases.insert(
            "pg".to_string(),
            DatabaseSettings::with_engine("django_rs.db.backends.postgresql"),
        );
        settings
    }

    #[test]
    fn test_register_replaces_by_name() {
        let mut registry = builtin();
        registry.register(Box::new(SqltypesCommand));
        assert!(registry.get("sqltypes").is_some());
        assert!(registry.get("sqlbigpk").is_some());
        assert!(registry.get("migrate").is_none());
    }

    #[test]
    fn test_subcommands_in_name_order() {
        let cli = builtin().build_cli();
        let names: Vec<&str> = cli.get_subcommands().map(clap::Command::get_name).collect();
        assert_eq!(names, vec!["sqlbigpk", "sqltypes"]);
    }

    #[test]
    fn test_settings_is_global() {
        let matches = builtin()
            .build_cli()
            .try_get_matches_from(["bigfield", "sqltypes", "--settings", "site.toml"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("settings").map(String::as_str),
            Some("site.toml")
        );
        assert_eq!(matches.subcommand_name(), Some("sqltypes"));
    }

    #[test]
    fn test_parser_requires_a_command() {
        assert!(builtin().build_cli().try_get_matches_from(["bigfield"]).is_err());
    }

    #[test]
    fn test_sqlbigpk_requires_table() {
        let result = builtin()
            .build_cli()
            .try_get_matches_from(["bigfield", "sqlbigpk", "--database", "pg"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_execute_dispatches_sqltypes() {
        let registry = builtin();
        let matches = registry
            .build_cli()
            .try_get_matches_from(["bigfield", "sqltypes", "--database", "pg"])
            .unwrap();
        registry.execute(&matches, &postgres_settings()).await.unwrap();
    }

    #[tokio::test]
    async fn test_execute_dispatches_sqlbigpk() {
        let registry = builtin();
        let matches = registry
            .build_cli()
            .try_get_matches_from([
                "bigfield", "sqlbigpk", "--table", "share_document", "--database", "pg",
            ])
            .unwrap();
        registry.execute(&matches, &postgres_settings()).await.unwrap();
    }

    #[tokio::test]
    async fn test_execute_surfaces_command_errors() {
        let registry = builtin();
        let matches = registry
            .build_cli()
            .try_get_matches_from(["bigfield", "sqlbigpk", "--table", "t", "--from", "tiny"])
            .unwrap();
        let err = registry
            .execute(&matches, &Settings::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("tiny"));
    }

    #[tokio::test]
    async fn test_execute_with_command_missing_from_registry() {
        let registry = builtin();
        let matches = registry
            .build_cli()
            .try_get_matches_from(["bigfield", "sqltypes"])
            .unwrap();
        let err = CommandRegistry::new()
            .execute(&matches, &Settings::default())
            .await
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("unknown command 'sqltypes'"));
    }
}
