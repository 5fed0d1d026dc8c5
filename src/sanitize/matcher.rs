//! Glob-or-regex matching of directory entry names
//!
//! Every pattern is read two ways at once: as a shell glob and, when it
//! compiles, as a regular expression anchored at the start of the name.
//! A name matches the set when either reading of any pattern accepts it.

use glob::Pattern as GlobPattern;
use regex::Regex;

/// A single user pattern, compiled once
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    glob: Option<GlobPattern>,
    regex: Option<Regex>,
}

impl Pattern {
    pub fn new(source: &str) -> Self {
        let glob = GlobPattern::new(source)
            .or_else(|_| GlobPattern::new(&shell_glob(source)))
            .ok();
        let regex = Regex::new(source).ok();
        if regex.is_none() {
            tracing::debug!(pattern = source, "not a valid regex, using glob only");
        }
        Self {
            source: source.to_string(),
            glob,
            regex,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern also takes part as a regular expression
    pub fn is_regex(&self) -> bool {
        self.regex.is_some()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.glob_matches(name) || self.regex_matches_prefix(name)
    }

    fn glob_matches(&self, name: &str) -> bool {
        match &self.glob {
            Some(glob) => glob.matches(name),
            None => self.source == name,
        }
    }

    fn regex_matches_prefix(&self, name: &str) -> bool {
        // The leftmost match starts at 0 whenever any match does
        self.regex
            .as_ref()
            .and_then(|re| re.find(name))
            .is_some_and(|m| m.start() == 0)
    }
}

/// An ordered set of patterns
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| Pattern::new(p.as_ref()))
                .collect(),
        }
    }

    /// Parse a comma-separated list, dropping empty entries
    pub fn parse_list(list: &str) -> Self {
        Self::new(split_pattern_list(list))
    }

    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn sources(&self) -> Vec<String> {
        self.patterns.iter().map(|p| p.as_str().to_string()).collect()
    }
}

/// Rewrite a shell glob the `glob` crate rejects into an equivalent one
///
/// Runs of `*` collapse to one (a name has no separators, so `**` means
/// `*`), and a `[` without a closing `]` becomes the literal class `[[]`.
fn shell_glob(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => {
                if !out.ends_with('*') {
                    out.push('*');
                }
                i += 1;
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.extend(&chars[i..=end]);
                    i = end + 1;
                }
                None => {
                    out.push_str("[[]");
                    i += 1;
                }
            },
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Index of the `]` closing the class opened at `start`
///
/// A `]` right after `[` or `[!` is a member, not the end.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    (j..chars.len()).find(|&k| chars[k] == ']')
}

/// Split a comma-separated pattern list into trimmed, non-empty entries
pub fn split_pattern_list(list: &str) -> Vec<String> {
    list.split(crate::constants::manifest::PATTERN_SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Check if the name matches any of the patterns
pub fn matches(name: &str, patterns: &[&str]) -> bool {
    PatternSet::new(patterns.iter().copied()).matches(name)
}
