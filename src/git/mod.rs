//! Git operations for the clone pipeline
//!
//! ## Sub-modules
//!
//! - [`client`]: the [`GitClient`] seam and its system-git implementation
//!   - `clone_repo()` - shallow clone with submodules
//!   - `has_remote()` / `remove_remote()` - remote detachment
//!
//! - [`strip`]: [`MetadataStripper`], which removes `.git` from a working
//!   tree and from every declared submodule
//!
//! - [`common`]: shared helpers
//!   - `Logger` - consistent console and log output per repository

pub mod client;
pub mod common;
pub mod strip;

pub use client::{GitClient, SystemGit};
pub use common::Logger;
pub use strip::{MetadataStripper, StripReport, declared_submodules, parse_submodule_paths};
