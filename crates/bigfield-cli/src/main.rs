//! The `bigfield` command line tool.

use anyhow::Context;
use bigfield_cli::{register_builtin_commands, CommandRegistry};
use bigfield_core::logging::setup_logging;
use bigfield_core::settings_loader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut registry = CommandRegistry::new();
    register_builtin_commands(&mut registry);
    let matches = registry.build_cli().get_matches();

    let settings = match matches.get_one::<String>("settings") {
        Some(path) => settings_loader::from_file_with_env(path)
            .with_context(|| format!("failed to load settings from {path}"))?,
        None => settings_loader::from_env(),
    };
    setup_logging(&settings);
    tracing::debug!(databases = settings.databases.len(), "settings loaded");

    registry.execute(&matches, &settings).await?;
    Ok(())
}
