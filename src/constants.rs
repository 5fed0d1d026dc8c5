//! Central constants for the harvest application

/// Default values for Git operations
pub mod git {
    /// Executable used for every git invocation
    pub const GIT_BINARY: &str = "git";

    /// Name of the metadata directory (or gitfile) inside a working tree
    pub const METADATA_DIR: &str = ".git";

    /// Submodule declaration file at the root of a working tree
    pub const SUBMODULES_FILE: &str = ".gitmodules";

    /// Remote detached from every cloned repository
    pub const ORIGIN_REMOTE: &str = "origin";

    /// Clone depth used when a manifest row leaves it empty
    pub const DEFAULT_DEPTH: u32 = 1;
}

/// Default values for configuration
pub mod config {
    /// Default configuration file name
    pub const DEFAULT_CONFIG_FILE: &str = "harvest.yaml";

    /// Default manifest file name
    pub const DEFAULT_MANIFEST_FILE: &str = "repositories.csv";

    /// Directory that receives clones when a row has no target directory
    pub const DEFAULT_CLEAN_DIRECTORY: &str = ".";

    /// Default log file
    pub const DEFAULT_LOG_FILE: &str = "harvest.log";

    /// Default worker count for parallel clones
    pub const DEFAULT_MAX_WORKERS: usize = 4;

    /// Keep-list applied when neither the row nor the user overrides it
    pub const DEFAULT_PATTERNS: &[&str] = &[".git", "*.csv", "*.log", "*.py", "*.md"];
}

/// Naming rules for clone targets
pub mod naming {
    /// Highest numeric suffix tried before giving up on a base name
    pub const MAX_SUFFIX: u32 = 100;
}

/// Manifest format
pub mod manifest {
    /// Column delimiter
    pub const DELIMITER: char = '|';

    /// Separator inside the `custom_patterns` column
    pub const PATTERN_SEPARATOR: char = ',';
}

/// Post-clone hook
pub mod hook {
    /// Placeholder replaced with the clone target path
    pub const TARGET_PLACEHOLDER: &str = "{target}";

    /// Shell used to run hook commands
    pub const SHELL: &str = "sh";
}
