//! Keep/delete partitioning of sorted versions.

use crate::version::VersionCandidate;

/// One ranked version and whether it survives the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// The version being decided on.
    pub candidate: VersionCandidate,
    /// True if the version is among the newest `keep` entries.
    pub keep: bool,
}

/// Retention decision for every matched version, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionPlan {
    entries: Vec<PlanEntry>,
    keep_count: usize,
}

impl RetentionPlan {
    /// Marks the first `keep_count` candidates as kept and the rest for deletion.
    ///
    /// `candidates` must already be sorted newest first; their order is preserved.
    #[must_use]
    pub fn new(candidates: Vec<VersionCandidate>, keep_count: usize) -> Self {
        let entries = candidates
            .into_iter()
            .enumerate()
            .map(|(rank, candidate)| PlanEntry {
                candidate,
                keep: rank < keep_count,
            })
            .collect();

        Self {
            entries,
            keep_count,
        }
    }

    /// All entries in rank order.
    #[must_use]
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Requested number of versions to keep.
    #[must_use]
    pub const fn keep_count(&self) -> usize {
        self.keep_count
    }

    /// Versions that survive, newest first.
    pub fn kept(&self) -> impl Iterator<Item = &VersionCandidate> {
        self.entries
            .iter()
            .filter(|e| e.keep)
            .map(|e| &e.candidate)
    }

    /// Versions scheduled for deletion, newest first.
    pub fn to_delete(&self) -> impl Iterator<Item = &VersionCandidate> {
        self.entries
            .iter()
            .filter(|e| !e.keep)
            .map(|e| &e.candidate)
    }

    /// Number of versions scheduled for deletion.
    #[must_use]
    pub fn delete_count(&self) -> usize {
        self.entries.len().saturating_sub(self.keep_count)
    }

    /// Number of ranked versions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no version matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::sort_versions;

    fn plan(tags: &[&str], keep: usize) -> RetentionPlan {
        RetentionPlan::new(sort_versions(tags).candidates, keep)
    }

    fn raws<'a>(it: impl Iterator<Item = &'a VersionCandidate>) -> Vec<&'a str> {
        it.map(VersionCandidate::raw).collect()
    }

    #[test]
    fn test_keep_newest_two() {
        let plan = plan(&["1.0.0-SNAPSHOT", "1.1.0-SNAPSHOT", "1.2.0-SNAPSHOT"], 2);
        assert_eq!(raws(plan.kept()), vec!["1.2.0-SNAPSHOT", "1.1.0-SNAPSHOT"]);
        assert_eq!(raws(plan.to_delete()), vec!["1.0.0-SNAPSHOT"]);
        assert_eq!(plan.delete_count(), 1);
    }

    #[test]
    fn test_keep_zero_deletes_everything() {
        let plan = plan(&["1.0.0", "2.0.0"], 0);
        assert_eq!(plan.kept().count(), 0);
        assert_eq!(raws(plan.to_delete()), vec!["2.0.0", "1.0.0"]);
        assert_eq!(plan.delete_count(), 2);
    }

    #[test]
    fn test_keep_more_than_available() {
        let plan = plan(&["1.0.0", "2.0.0"], 10);
        assert_eq!(plan.kept().count(), 2);
        assert_eq!(plan.to_delete().count(), 0);
        assert_eq!(plan.delete_count(), 0);
    }

    #[test]
    fn test_empty_plan() {
        let plan = RetentionPlan::new(Vec::new(), 3);
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
        assert_eq!(plan.keep_count(), 3);
    }

    #[test]
    fn test_entries_keep_rank_order() {
        let plan = plan(&["3.0.0", "1.0.0", "2.0.0"], 1);
        let flags: Vec<(&str, bool)> = plan
            .entries()
            .iter()
            .map(|e| (e.candidate.raw(), e.keep))
            .collect();
        assert_eq!(
            flags,
            vec![("3.0.0", true), ("2.0.0", false), ("1.0.0", false)]
        );
    }
}
