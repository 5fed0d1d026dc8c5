//! Pipe-delimited manifest reader
//!
//! ```text
//! repo_url|target_directory|depth|custom_patterns|is_active
//! https://github.com/owner/tool.git|clones|1|*.rs,Cargo.toml|true
//! ```
//!
//! The first non-blank line names the columns; `repo_url` and `is_active`
//! are required, the rest may be missing. Lines starting with `#` are
//! comments.

use super::row::ManifestRow;
use crate::constants::git::DEFAULT_DEPTH;
use crate::constants::manifest::DELIMITER;
use crate::error::HarvestError;
use crate::sanitize::split_pattern_list;
use std::collections::HashMap;
use std::path::Path;

/// A parsed row or the reason it could not be used
pub type ManifestEntry = Result<ManifestRow, HarvestError>;

/// Active rows of a manifest, in file order
#[derive(Debug, Default)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
    /// Rows whose `is_active` is not `true`
    pub skipped_inactive: usize,
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct Header {
    columns: HashMap<String, usize>,
}

impl Header {
    fn parse(line: &str) -> Result<Self, HarvestError> {
        let columns: HashMap<String, usize> = split_fields(line)
            .into_iter()
            .enumerate()
            .map(|(index, name)| (name.to_ascii_lowercase(), index))
            .collect();

        for required in ["repo_url", "is_active"] {
            if !columns.contains_key(required) {
                return Err(HarvestError::ManifestHeader(format!(
                    "missing required column '{required}'"
                )));
            }
        }
        Ok(Self { columns })
    }

    fn get<'a>(&self, fields: &'a [String], column: &str) -> Option<&'a str> {
        self.columns
            .get(column)
            .and_then(|&index| fields.get(index))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Read and parse the manifest at `path`
pub fn read_manifest(path: &Path) -> Result<Manifest, HarvestError> {
    if !path.exists() {
        return Err(HarvestError::ManifestMissing(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|e| {
        HarvestError::ManifestHeader(format!("cannot read '{}': {e}", path.display()))
    })?;
    parse_manifest(&content)
}

pub fn parse_manifest(content: &str) -> Result<Manifest, HarvestError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'));

    let Some((_, header_line)) = lines.next() else {
        return Err(HarvestError::ManifestHeader("manifest is empty".to_string()));
    };
    let header = Header::parse(header_line)?;

    let mut manifest = Manifest::default();
    for (line, text) in lines {
        let fields = split_fields(text);

        let active = header
            .get(&fields, "is_active")
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));
        if !active {
            tracing::debug!("Skipping inactive manifest line {line}");
            manifest.skipped_inactive += 1;
            continue;
        }

        manifest.entries.push(parse_row(&header, &fields, line));
    }

    Ok(manifest)
}

fn parse_row(header: &Header, fields: &[String], line: usize) -> ManifestEntry {
    let repo_url = header
        .get(fields, "repo_url")
        .ok_or_else(|| HarvestError::Manifest {
            line,
            message: "missing repo_url".to_string(),
        })?;

    let depth = match header.get(fields, "depth") {
        None => DEFAULT_DEPTH,
        Some(value) => value
            .parse::<u32>()
            .ok()
            .filter(|&depth| depth >= 1)
            .ok_or_else(|| HarvestError::InvalidDepth {
                line,
                value: value.to_string(),
            })?,
    };

    let custom_patterns = header
        .get(fields, "custom_patterns")
        .map(split_pattern_list)
        .filter(|patterns| !patterns.is_empty());

    Ok(ManifestRow {
        line,
        repo_url: repo_url.to_string(),
        target_directory: header.get(fields, "target_directory").map(str::to_string),
        depth,
        custom_patterns,
        is_active: true,
    })
}

/// Split on the delimiter, trimming each field and removing surrounding quotes
fn split_fields(line: &str) -> Vec<String> {
    line.split(DELIMITER)
        .map(|field| {
            let field = field.trim();
            field
                .strip_prefix('"')
                .and_then(|f| f.strip_suffix('"'))
                .unwrap_or(field)
                .trim()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "repo_url|target_directory|depth|custom_patterns|is_active";

    #[test]
    fn test_parse_full_row() {
        let content = format!(
            "{HEADER}\nhttps://github.com/owner/tool.git|clones|3|*.rs, Cargo.toml|true\n"
        );
        let manifest = parse_manifest(&content).unwrap();
        let row = manifest.entries[0].as_ref().unwrap();

        assert_eq!(row.line, 2);
        assert_eq!(row.repo_url, "https://github.com/owner/tool.git");
        assert_eq!(row.target_directory.as_deref(), Some("clones"));
        assert_eq!(row.depth, 3);
        assert_eq!(
            row.custom_patterns,
            Some(vec!["*.rs".to_string(), "Cargo.toml".to_string()])
        );
    }

    #[test]
    fn test_optional_columns_default() {
        let content = format!("{HEADER}\nhttps://github.com/owner/tool.git|||| TRUE \n");
        let manifest = parse_manifest(&content).unwrap();
        let row = manifest.entries[0].as_ref().unwrap();

        assert_eq!(row.target_directory, None);
        assert_eq!(row.depth, 1);
        assert_eq!(row.custom_patterns, None);
    }

    #[test]
    fn test_columns_in_any_order_and_missing() {
        let content = "is_active|repo_url\ntrue|git@github.com:owner/a.git\n";
        let manifest = parse_manifest(content).unwrap();
        let row = manifest.entries[0].as_ref().unwrap();
        assert_eq!(row.repo_url, "git@github.com:owner/a.git");
        assert_eq!(row.depth, 1);
    }

    #[test]
    fn test_inactive_rows_are_skipped() {
        let content = format!(
            "{HEADER}\n\
             https://x/a.git||||false\n\
             https://x/b.git||||yes\n\
             https://x/c.git||||\n\
             https://x/d.git||||True\n"
        );
        let manifest = parse_manifest(&content).unwrap();
        assert_eq!(manifest.skipped_inactive, 3);
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.entries[0].as_ref().unwrap().repo_url, "https://x/d.git");
    }

    #[test]
    fn test_invalid_depth_fails_only_its_row() {
        let content = format!(
            "{HEADER}\n\
             https://x/a.git||two||true\n\
             https://x/b.git||0||true\n\
             https://x/c.git||2||true\n"
        );
        let manifest = parse_manifest(&content).unwrap();
        assert_eq!(manifest.len(), 3);
        assert!(matches!(
            manifest.entries[0],
            Err(HarvestError::InvalidDepth { line: 2, .. })
        ));
        assert!(matches!(
            manifest.entries[1],
            Err(HarvestError::InvalidDepth { line: 3, .. })
        ));
        assert_eq!(manifest.entries[2].as_ref().unwrap().depth, 2);
    }

    #[test]
    fn test_inactive_row_with_bad_depth_is_not_an_error() {
        let content = format!("{HEADER}\nhttps://x/a.git||bogus||false\n");
        let manifest = parse_manifest(&content).unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.skipped_inactive, 1);
    }

    #[test]
    fn test_missing_url_is_a_row_error() {
        let content = format!("{HEADER}\n||1||true\n");
        let manifest = parse_manifest(&content).unwrap();
        assert!(matches!(
            manifest.entries[0],
            Err(HarvestError::Manifest { line: 2, .. })
        ));
    }

    #[test]
    fn test_comments_blank_lines_and_quotes() {
        let content = format!(
            "# repositories to mirror\n\n{HEADER}\n\n\"https://x/a.git\"|\"out dir\"|1|\"*.md\"|\"true\"\n# trailing\n"
        );
        let manifest = parse_manifest(&content).unwrap();
        let row = manifest.entries[0].as_ref().unwrap();
        assert_eq!(row.line, 5);
        assert_eq!(row.repo_url, "https://x/a.git");
        assert_eq!(row.target_directory.as_deref(), Some("out dir"));
        assert_eq!(row.custom_patterns, Some(vec!["*.md".to_string()]));
    }

    #[test]
    fn test_header_errors() {
        assert!(matches!(
            parse_manifest(""),
            Err(HarvestError::ManifestHeader(_))
        ));
        assert!(matches!(
            parse_manifest("url|active\nx|true\n"),
            Err(HarvestError::ManifestHeader(_))
        ));
    }

    #[test]
    fn test_blank_custom_patterns_mean_defaults() {
        let content = format!("{HEADER}\nhttps://x/a.git|| | , |true\n");
        let manifest = parse_manifest(&content).unwrap();
        assert_eq!(manifest.entries[0].as_ref().unwrap().custom_patterns, None);
    }
}
