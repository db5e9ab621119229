use regex::Regex;

use crate::entry::Entry;
use crate::error::SieveError;
use crate::traits::Matcher;

fn subject(entry: &Entry, include_extension: bool) -> &str {
    if include_extension {
        &entry.name
    } else {
        entry.stem()
    }
}

/// Regex search against the entry's name without extension (directories:
/// full name). A pattern that fails to compile matches nothing.
pub fn match_by_pattern(entry: &Entry, pattern: &str) -> bool {
    Regex::new(pattern).map_or(false, |re| re.is_match(subject(entry, false)))
}

/// Regex search against the entry's full name. A pattern that fails to
/// compile matches nothing.
pub fn match_by_pattern_with_extension(entry: &Entry, pattern: &str) -> bool {
    Regex::new(pattern).map_or(false, |re| re.is_match(subject(entry, true)))
}

/// A regular-expression criterion, compiled once on construction.
///
/// Construction never fails. A malformed pattern is kept as its compile
/// error and every evaluation returns [`SieveError::InvalidPattern`], which
/// a walk treats as "no match".
#[derive(Debug, Clone)]
pub struct PatternCriterion {
    pattern: String,
    include_extension: bool,
    compiled: Result<Regex, regex::Error>,
}

impl PatternCriterion {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let compiled = Regex::new(&pattern);
        Self {
            pattern,
            include_extension: false,
            compiled,
        }
    }

    /// Match against the full name instead of the name without extension.
    pub fn with_extension(mut self, yes: bool) -> Self {
        self.include_extension = yes;
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn includes_extension(&self) -> bool {
        self.include_extension
    }

    /// Whether the pattern compiled.
    pub fn is_valid(&self) -> bool {
        self.compiled.is_ok()
    }
}

impl Matcher for PatternCriterion {
    fn matches(&self, entry: &Entry) -> Result<bool, SieveError> {
        let re = self
            .compiled
            .as_ref()
            .map_err(|source| SieveError::InvalidPattern {
                pattern: self.pattern.clone(),
                source: source.clone(),
            })?;
        Ok(re.is_match(subject(entry, self.include_extension)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;

    fn file(name: &str) -> Entry {
        Entry::new(format!("/var/data/{name}"), EntryKind::File)
    }

    #[test]
    fn searches_name_without_extension() {
        let entry = file("invoice_2024.txt");
        assert!(match_by_pattern(&entry, r"^invoice_\d{4}$"));
        assert!(!match_by_pattern(&entry, r"\.txt$"));
        assert!(match_by_pattern_with_extension(&entry, r"\.txt$"));
    }

    #[test]
    fn invalid_pattern_never_matches() {
        for name in ["a.txt", "[", "", "invoice"] {
            let entry = file(name);
            assert!(!match_by_pattern(&entry, "[unclosed"));
            assert!(!match_by_pattern_with_extension(&entry, "(a"));
        }
    }

    #[test]
    fn criterion_surfaces_compile_error() {
        let criterion = PatternCriterion::new("[unclosed");
        assert!(!criterion.is_valid());
        let err = criterion.matches(&file("x.txt")).unwrap_err();
        assert!(matches!(err, SieveError::InvalidPattern { .. }));
    }

    #[test]
    fn criterion_respects_extension_flag() {
        let entry = file("draft.md");
        assert!(!PatternCriterion::new(r"\.md$").matches(&entry).unwrap());
        assert!(PatternCriterion::new(r"\.md$")
            .with_extension(true)
            .matches(&entry)
            .unwrap());
    }
}
