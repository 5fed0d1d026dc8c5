//! Utility modules for common functionality

pub mod naming;
pub mod process;

// Re-export commonly used functions
pub use naming::{NameRegistry, allocate, repo_base_name};
pub use process::{ProcessOutput, describe_exit_code};
