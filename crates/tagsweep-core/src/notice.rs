//! Human-readable progress notices emitted while pruning.
//!
//! The pipeline reports progress through a callback instead of printing, so
//! the binary decides where output goes and tests can capture it.

use std::fmt;

/// A progress event of a pruning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Dry-run mode is active.
    DryRun,

    /// Matching finished.
    Summary {
        /// Number of sortable versions that matched the pattern.
        matched: usize,
        /// Number of versions to keep.
        keep: usize,
    },

    /// A tag matched the pattern but is not a semantic version.
    Unparsable {
        /// Raw tag.
        tag: String,
    },

    /// A version is retained.
    Keep {
        /// Raw tag.
        version: String,
    },

    /// A version is scheduled for deletion.
    Delete {
        /// Raw tag.
        version: String,
    },

    /// The manifest digest of a version was resolved and is being deleted.
    DeletingDigest {
        /// Raw tag.
        version: String,
        /// Manifest digest.
        digest: String,
    },

    /// The manifest digest could not be resolved.
    DigestFailed {
        /// Raw tag.
        version: String,
        /// Error message.
        error: String,
    },

    /// The manifest could not be deleted.
    DeleteFailed {
        /// Raw tag.
        version: String,
        /// Manifest digest.
        digest: String,
        /// Error message.
        error: String,
    },

    /// The run is complete.
    Finished {
        /// Manifests actually deleted.
        deleted: usize,
        /// Deletions that failed.
        failed: usize,
        /// Deletions skipped because of dry-run.
        skipped: usize,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DryRun => write!(f, "DRY RUN - nothing will be deleted"),
            Self::Summary { matched, keep } => write!(
                f,
                "Found {matched} images that match, keeping the {keep} latest versions and deleting the rest"
            ),
            Self::Unparsable { tag } => {
                write!(f, "Ignoring tag {tag}: not a semantic version")
            }
            Self::Keep { version } => write!(f, "Keep version: {version}"),
            Self::Delete { version } => write!(f, "Delete version: {version}"),
            Self::DeletingDigest { digest, .. } => {
                write!(f, "Deleting manifest digest: {digest}")
            }
            Self::DigestFailed { version, error } => {
                write!(f, "Unable to resolve manifest digest for {version}: {error}")
            }
            Self::DeleteFailed {
                version,
                digest,
                error,
            } => write!(f, "Unable to delete manifest {digest} ({version}): {error}"),
            Self::Finished {
                deleted,
                failed,
                skipped,
            } => {
                write!(f, "Done: {deleted} deleted, {failed} failed, {skipped} skipped")?;
                if *skipped > 0 {
                    write!(f, " (dry run)")?;
                }
                Ok(())
            }
        }
    }
}

impl Notice {
    /// Returns true for notices that describe a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::DigestFailed { .. } | Self::DeleteFailed { .. })
    }
}
