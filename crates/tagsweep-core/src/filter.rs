//! Whole-match tag filtering.

use regex::Regex;

use crate::error::{PruneError, Result};

/// Selects tags whose leftmost regex match spans the entire tag.
///
/// The regex engine searches for substrings, so `SNAPSHOT` would normally
/// match `1.0.0-SNAPSHOT`. Here a tag is only selected when the first match
/// found is the whole tag, so patterns behave as if anchored at both ends
/// while keeping leftmost-first alternation semantics.
#[derive(Debug, Clone)]
pub struct VersionFilter {
    regex: Regex,
}

impl VersionFilter {
    /// Compiles a version pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PruneError::InvalidPattern`] if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| PruneError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// Returns the source pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns true if the first match of the pattern is the whole tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagsweep_core::VersionFilter;
    ///
    /// let filter = VersionFilter::new(".*-SNAPSHOT.*").unwrap();
    /// assert!(filter.matches("1.2.0-SNAPSHOT"));
    /// assert!(!filter.matches("1.2.0"));
    ///
    /// let filter = VersionFilter::new("SNAPSHOT").unwrap();
    /// assert!(!filter.matches("1.2.0-SNAPSHOT"));
    /// ```
    #[must_use]
    pub fn matches(&self, tag: &str) -> bool {
        if tag.is_empty() {
            return false;
        }
        self.regex
            .find(tag)
            .is_some_and(|m| m.start() == 0 && m.end() == tag.len())
    }

    /// Yields matching tags in source order. Duplicates are kept.
    pub fn filter<'a>(
        &'a self,
        tags: &'a [impl AsRef<str>],
    ) -> impl Iterator<Item = &'a str> + 'a {
        tags.iter()
            .map(AsRef::as_ref)
            .filter(move |tag| self.matches(tag))
    }
}
