//! Semantic version parsing and ordering of matched tags.
//!
//! Accepted tag formats:
//! - `1.2.3`, `v1.2.3` → full version
//! - `1.2`, `v1` → missing components padded with zero
//! - `1.2.3-SNAPSHOT`, `1.2.3+build.5` → pre-release and build metadata
//!
//! Tags that do not parse are left out of the candidate list and reported
//! separately, so they are neither kept nor deleted.

use std::cmp::Ordering;
use std::fmt;

use semver::Version;

/// A tag that parsed as a semantic version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCandidate {
    raw: String,
    parsed: Version,
}

impl VersionCandidate {
    /// Parses a tag into a candidate, or returns `None` if it is not a version.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        parse_version(tag).map(|parsed| Self {
            raw: tag.to_string(),
            parsed,
        })
    }

    /// Tag exactly as the registry returned it.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parsed semantic version.
    #[must_use]
    pub const fn version(&self) -> &Version {
        &self.parsed
    }
}

impl Ord for VersionCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parsed
            .cmp(&other.parsed)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for VersionCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Matched tags split into sortable candidates and unparsable leftovers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedVersions {
    /// Candidates ordered newest first.
    pub candidates: Vec<VersionCandidate>,
    /// Tags that matched the pattern but are not semantic versions, in input order.
    pub unparsable: Vec<String>,
}

/// Parses a tag as a semantic version.
///
/// A leading `v` is ignored and a short numeric core (`1` or `1.2`) is
/// padded to three components. Leading zeros in the core are tolerated.
///
/// # Examples
///
/// ```
/// use tagsweep_core::parse_version;
///
/// let v = parse_version("v1.2-SNAPSHOT").unwrap();
/// assert_eq!(v.to_string(), "1.2.0-SNAPSHOT");
///
/// assert!(parse_version("latest").is_none());
/// ```
#[must_use]
pub fn parse_version(tag: &str) -> Option<Version> {
    let tag = tag.trim();
    let version = tag
        .strip_prefix('v')
        .or_else(|| tag.strip_prefix('V'))
        .unwrap_or(tag);

    let split = version.find(['-', '+']).unwrap_or(version.len());
    let (core, suffix) = version.split_at(split);

    let parts: Vec<&str> = core.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    let mut numbers = [0_u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }

    let [major, minor, patch] = numbers;
    Version::parse(&format!("{major}.{minor}.{patch}{suffix}")).ok()
}

/// Parses matched tags and orders them newest first.
///
/// Ordering follows semantic version precedence: major, minor, patch, then
/// pre-release (a pre-release sorts below its release), with build metadata
/// as the last tiebreaker. Tags that normalize to the same version are
/// ordered by their raw text so the result is deterministic.
///
/// # Examples
///
/// ```
/// use tagsweep_core::sort_versions;
///
/// let sorted = sort_versions(["1.0.0", "2.0.0-rc.1", "2.0.0", "nightly"]);
/// let order: Vec<&str> = sorted.candidates.iter().map(|c| c.raw()).collect();
/// assert_eq!(order, vec!["2.0.0", "2.0.0-rc.1", "1.0.0"]);
/// assert_eq!(sorted.unparsable, vec!["nightly".to_string()]);
/// ```
pub fn sort_versions<I, S>(tags: I) -> SortedVersions
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sorted = SortedVersions::default();

    for tag in tags {
        let tag = tag.as_ref();
        match VersionCandidate::parse(tag) {
            Some(candidate) => sorted.candidates.push(candidate),
            None => {
                tracing::warn!(tag, "Tag matched the version pattern but is not a semantic version; skipping");
                sorted.unparsable.push(tag.to_string());
            }
        }
    }

    sorted.candidates.sort_by(|a, b| b.cmp(a));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(sorted: &SortedVersions) -> Vec<&str> {
        sorted.candidates.iter().map(VersionCandidate::raw).collect()
    }

    #[test]
    fn test_parse_full_version() {
        let v = parse_version("1.2.3").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 2, 3));
    }

    #[test]
    fn test_parse_prefixed_version() {
        assert_eq!(parse_version("v1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parse_version("V4.0.1").unwrap(), Version::new(4, 0, 1));
    }

    #[test]
    fn test_parse_short_versions_are_padded() {
        assert_eq!(parse_version("1").unwrap(), Version::new(1, 0, 0));
        assert_eq!(parse_version("1.2").unwrap(), Version::new(1, 2, 0));
        assert_eq!(
            parse_version("1.2-SNAPSHOT").unwrap().to_string(),
            "1.2.0-SNAPSHOT"
        );
    }

    #[test]
    fn test_parse_leading_zeros() {
        assert_eq!(parse_version("01.02.03").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_prerelease_and_build() {
        let v = parse_version("1.2.3-SNAPSHOT+build.7").unwrap();
        assert_eq!(v.pre.as_str(), "SNAPSHOT");
        assert_eq!(v.build.as_str(), "build.7");
    }

    #[test]
    fn test_parse_rejects_non_versions() {
        assert!(parse_version("latest").is_none());
        assert!(parse_version("").is_none());
        assert!(parse_version("1.2.3.4").is_none());
        assert!(parse_version("1..2").is_none());
        assert!(parse_version("1.x").is_none());
        assert!(parse_version("-SNAPSHOT").is_none());
        assert!(parse_version("1.0.0-").is_none());
    }

    #[test]
    fn test_sort_descending() {
        let sorted = sort_versions(["1.0.0-SNAPSHOT", "1.1.0-SNAPSHOT", "1.2.0-SNAPSHOT"]);
        assert_eq!(
            order(&sorted),
            vec!["1.2.0-SNAPSHOT", "1.1.0-SNAPSHOT", "1.0.0-SNAPSHOT"]
        );
        assert!(sorted.unparsable.is_empty());
    }

    #[test]
    fn test_sort_numeric_not_lexical() {
        let sorted = sort_versions(["1.9.0", "1.10.0", "1.2.0"]);
        assert_eq!(order(&sorted), vec!["1.10.0", "1.9.0", "1.2.0"]);
    }

    #[test]
    fn test_prerelease_sorts_below_release() {
        let sorted = sort_versions(["2.0.0-SNAPSHOT", "2.0.0", "1.9.9"]);
        assert_eq!(order(&sorted), vec!["2.0.0", "2.0.0-SNAPSHOT", "1.9.9"]);
    }

    #[test]
    fn test_build_metadata_is_last_tiebreaker() {
        let sorted = sort_versions(["1.0.0+b1", "1.1.0", "1.0.0+b2"]);
        assert_eq!(order(&sorted), vec!["1.1.0", "1.0.0+b2", "1.0.0+b1"]);
    }

    #[test]
    fn test_unparsable_tags_are_excluded() {
        let sorted = sort_versions(["build-SNAPSHOT", "1.0.0-SNAPSHOT", "x-SNAPSHOT"]);
        assert_eq!(order(&sorted), vec!["1.0.0-SNAPSHOT"]);
        assert_eq!(sorted.unparsable, vec!["build-SNAPSHOT", "x-SNAPSHOT"]);
    }

    #[test]
    fn test_raw_tag_is_preserved() {
        let sorted = sort_versions(["v1.2"]);
        assert_eq!(sorted.candidates[0].raw(), "v1.2");
        assert_eq!(sorted.candidates[0].version(), &Version::new(1, 2, 0));
        assert_eq!(sorted.candidates[0].to_string(), "v1.2");
    }

    #[test]
    fn test_sort_is_idempotent() {
        let first = sort_versions(["1.0.0", "v1.0.0", "3.0.0-rc.1", "2.5"]);
        let second = sort_versions(order(&first));
        assert_eq!(first, second);
    }
}
