//! Command implementations

pub mod base;
pub mod clean;
pub mod clone;
pub mod menu;
pub mod report;
pub mod validators;

pub use base::{Command, CommandContext};
pub use clean::CleanCommand;
pub use clone::CloneCommand;
pub use menu::{MenuAction, run_menu};
pub use report::ReportCommand;
