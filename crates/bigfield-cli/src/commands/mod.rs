//! Built-in management commands.
//!
//! Each command implements the
//! [`ManagementCommand`](crate::command::ManagementCommand) trait.

pub mod sqlbigpk;
pub mod sqltypes;

pub use sqlbigpk::SqlbigpkCommand;
pub use sqltypes::SqltypesCommand;

use crate::command::CommandRegistry;

/// Registers all built-in management commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(SqltypesCommand));
    registry.register(Box::new(SqlbigpkCommand));
}
