//! # bigfield-core
//!
//! Settings, logging, and error types shared by the bigfield crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Database and logging configuration
//! - [`settings_loader`] - Loading settings from TOML/JSON files and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

pub use error::{BigFieldError, BigFieldResult};
pub use settings::{DatabaseSettings, Settings};
