//! Configuration management module

pub mod loader;
pub mod validation;

pub use loader::{Config, LogLevel, PruneMode};
pub use validation::{ValidationError, validate_config};
