//! Manifest of repositories to clone

pub mod builder;
pub mod parser;
pub mod row;

pub use builder::ManifestRowBuilder;
pub use parser::{Manifest, ManifestEntry, parse_manifest, read_manifest};
pub use row::ManifestRow;
