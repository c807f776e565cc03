//! # bigfield-cli
//!
//! Management commands for inspecting the column types the big integer
//! fields resolve to, and the SQL for moving existing tables onto them.
//!
//! - `sqltypes` prints the resolved type of every field for a database alias
//! - `sqlbigpk` prints the primary key conversion steps for a table
//!
//! ## Quick Start
//!
//! ```rust
//! use bigfield_cli::command::CommandRegistry;
//! use bigfield_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! assert!(registry.get("sqltypes").is_some());
//! assert!(registry.get("sqlbigpk").is_some());
//! ```

// These clippy lints are intentionally allowed:
// - doc_markdown: backtick requirements for documentation items are too strict
// - missing_const_for_fn: some functions may gain runtime logic later
// - unused_async: command handlers maintain consistent async signatures
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::unused_async)]

pub mod command;
pub mod commands;

pub use command::{CommandRegistry, ManagementCommand};
pub use commands::register_builtin_commands;
