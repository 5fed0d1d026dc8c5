//! Pattern matching and directory pruning
//!
//! - [`matcher`]: glob-or-regex name matching ([`PatternSet`])
//! - [`sanitizer`]: one-level deletion under a [`MatchPolicy`]
//! - [`cleanup`]: keep-lists built from [`CleanupOption`]s

pub mod cleanup;
pub mod matcher;
pub mod sanitizer;

pub use cleanup::{CleanupOption, cleanup_patterns, perform_cleanup};
pub use matcher::{Pattern, PatternSet, split_pattern_list};
pub use sanitizer::{MatchPolicy, SanitizeReport, sanitize};
