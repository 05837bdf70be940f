//! Sequential manifest deletion for a retention plan.

use tracing::{error, info};

use crate::notice::Notice;
use crate::plan::RetentionPlan;
use crate::registry::ManifestRegistry;

/// What happened to one version scheduled for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// Dry-run: no registry call was made.
    DryRun,

    /// The manifest was deleted.
    Deleted {
        /// Digest of the deleted manifest.
        digest: String,
    },

    /// The manifest digest could not be resolved.
    DigestFailed {
        /// Error message.
        error: String,
    },

    /// The digest was resolved but the delete request failed.
    DeleteFailed {
        /// Digest that could not be deleted.
        digest: String,
        /// Error message.
        error: String,
    },
}

impl DeletionOutcome {
    /// Returns true if the deletion failed at either step.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::DigestFailed { .. } | Self::DeleteFailed { .. })
    }
}

/// Outcome for one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionRecord {
    /// Raw tag.
    pub version: String,
    /// What happened.
    pub outcome: DeletionOutcome,
}

/// Outcomes of every deletion attempt, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
    /// One record per version scheduled for deletion.
    pub records: Vec<DeletionRecord>,
}

impl DeletionReport {
    /// Number of manifests deleted.
    #[must_use]
    pub fn deleted(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, DeletionOutcome::Deleted { .. }))
            .count()
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_failure()).count()
    }

    /// Number of deletions skipped by dry-run.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome == DeletionOutcome::DryRun)
            .count()
    }

    /// Returns true if no deletion failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }
}

/// Walks a retention plan and deletes the manifests of the versions it drops.
///
/// Calls are strictly sequential. A failure for one version is recorded and
/// the executor moves on to the next.
#[derive(Debug)]
pub struct DeletionExecutor<'a, R> {
    registry: &'a R,
    dry_run: bool,
}

impl<'a, R: ManifestRegistry> DeletionExecutor<'a, R> {
    /// Creates an executor over the given registry.
    #[must_use]
    pub const fn new(registry: &'a R, dry_run: bool) -> Self {
        Self { registry, dry_run }
    }

    /// Applies the plan to `repository`, reporting progress through `notify`.
    pub async fn execute<F>(
        &self,
        repository: &str,
        plan: &RetentionPlan,
        notify: &mut F,
    ) -> DeletionReport
    where
        F: FnMut(&Notice),
    {
        let mut report = DeletionReport::default();

        for entry in plan.entries() {
            let version = entry.candidate.raw();

            if entry.keep {
                notify(&Notice::Keep {
                    version: version.to_string(),
                });
                continue;
            }

            notify(&Notice::Delete {
                version: version.to_string(),
            });

            let outcome = if self.dry_run {
                DeletionOutcome::DryRun
            } else {
                self.delete_version(repository, version, &mut *notify).await
            };

            report.records.push(DeletionRecord {
                version: version.to_string(),
                outcome,
            });
        }

        report
    }

    async fn delete_version<F>(
        &self,
        repository: &str,
        version: &str,
        notify: &mut F,
    ) -> DeletionOutcome
    where
        F: FnMut(&Notice),
    {
        let digest = match self
            .registry
            .resolve_manifest_digest(repository, version)
            .await
        {
            Ok(digest) => digest,
            Err(e) => {
                error!(repository, version, error = %e, "Failed to resolve manifest digest");
                let error = e.to_string();
                notify(&Notice::DigestFailed {
                    version: version.to_string(),
                    error: error.clone(),
                });
                return DeletionOutcome::DigestFailed { error };
            }
        };

        notify(&Notice::DeletingDigest {
            version: version.to_string(),
            digest: digest.clone(),
        });

        match self.registry.delete_manifest(repository, &digest).await {
            Ok(()) => {
                info!(repository, version, digest = %digest, "Deleted manifest");
                DeletionOutcome::Deleted { digest }
            }
            Err(e) => {
                error!(repository, version, digest = %digest, error = %e, "Failed to delete manifest");
                let error = e.to_string();
                notify(&Notice::DeleteFailed {
                    version: version.to_string(),
                    digest: digest.clone(),
                    error: error.clone(),
                });
                DeletionOutcome::DeleteFailed { digest, error }
            }
        }
    }
}
