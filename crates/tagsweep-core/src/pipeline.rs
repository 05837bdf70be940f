//! The end-to-end pruning run.

use tracing::{debug, info};

use crate::config::PruneConfig;
use crate::error::{PruneError, Result};
use crate::executor::{DeletionExecutor, DeletionReport};
use crate::notice::Notice;
use crate::plan::RetentionPlan;
use crate::registry::ManifestRegistry;
use crate::version::sort_versions;

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneReport {
    /// Number of tags returned by the registry.
    pub listed: usize,
    /// Tags that matched the pattern but are not semantic versions.
    pub unparsable: Vec<String>,
    /// The keep/delete decision for every sortable match.
    pub plan: RetentionPlan,
    /// Outcome of every deletion attempt.
    pub deletions: DeletionReport,
}

/// Runs list → filter → sort → plan → delete against one repository.
#[derive(Debug)]
pub struct Pruner<'a, R> {
    registry: &'a R,
    config: &'a PruneConfig,
}

impl<'a, R: ManifestRegistry> Pruner<'a, R> {
    /// Creates a pruner for the given registry and configuration.
    #[must_use]
    pub const fn new(registry: &'a R, config: &'a PruneConfig) -> Self {
        Self { registry, config }
    }

    /// Executes the run, reporting progress through `notify`.
    ///
    /// Per-version digest and deletion failures do not stop the run; they are
    /// recorded in [`PruneReport::deletions`].
    ///
    /// # Errors
    ///
    /// Returns [`PruneError::RegistryQuery`] if the tags cannot be listed.
    pub async fn run<F>(&self, notify: &mut F) -> Result<PruneReport>
    where
        F: FnMut(&Notice),
    {
        let repository = self.config.target().repository();

        let tags = self
            .registry
            .list_tags(repository)
            .await
            .map_err(|e| PruneError::RegistryQuery {
                repository: repository.to_string(),
                source: Box::new(e),
            })?;
        debug!(repository, count = tags.len(), "Listed tags");

        let matched: Vec<&str> = self.config.filter().filter(&tags).collect();
        let sorted = sort_versions(matched);
        for tag in &sorted.unparsable {
            notify(&Notice::Unparsable { tag: tag.clone() });
        }

        let plan = RetentionPlan::new(sorted.candidates, self.config.keep());
        info!(
            repository,
            pattern = self.config.filter().pattern(),
            matched = plan.len(),
            keep = self.config.keep(),
            delete = plan.delete_count(),
            dry_run = self.config.dry_run(),
            "Planned retention"
        );

        if self.config.dry_run() {
            notify(&Notice::DryRun);
        }
        notify(&Notice::Summary {
            matched: plan.len(),
            keep: self.config.keep(),
        });

        let deletions = DeletionExecutor::new(self.registry, self.config.dry_run())
            .execute(repository, &plan, &mut *notify)
            .await;

        notify(&Notice::Finished {
            deleted: deletions.deleted(),
            failed: deletions.failed(),
            skipped: deletions.skipped(),
        });

        Ok(PruneReport {
            listed: tags.len(),
            unparsable: sorted.unparsable,
            plan,
            deletions,
        })
    }
}
