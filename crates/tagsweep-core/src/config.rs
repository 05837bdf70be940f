//! Configuration for a pruning run.

use crate::error::Result;
use crate::filter::VersionFilter;
use crate::target::RegistryTarget;

/// Immutable settings for one pruning run.
///
/// Everything that can be wrong with user input is checked while building
/// the configuration, before any registry call.
#[derive(Debug, Clone)]
pub struct PruneConfig {
    target: RegistryTarget,
    filter: VersionFilter,
    keep: usize,
    dry_run: bool,
}

impl PruneConfig {
    /// Default version pattern: any tag containing `-SNAPSHOT`.
    pub const DEFAULT_VERSION_PATTERN: &'static str = ".*-SNAPSHOT.*";

    /// Default number of versions to keep.
    pub const DEFAULT_KEEP: usize = 3;

    /// Creates a configuration for the given registry path with default
    /// pattern, keep count and dry-run off.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagsweep_core::PruneConfig;
    ///
    /// let config = PruneConfig::new("registry.example.com/myorg/myimage")?
    ///     .with_pattern(r"\d+\.\d+\.\d+-rc\.\d+")?
    ///     .with_keep(5)
    ///     .with_dry_run(true);
    ///
    /// assert_eq!(config.target().repository(), "myorg/myimage");
    /// assert_eq!(config.keep(), 5);
    /// assert!(config.dry_run());
    /// # Ok::<(), tagsweep_core::PruneError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the path cannot be parsed.
    pub fn new(path: &str) -> Result<Self> {
        Ok(Self {
            target: RegistryTarget::parse(path)?,
            filter: VersionFilter::new(Self::DEFAULT_VERSION_PATTERN)?,
            keep: Self::DEFAULT_KEEP,
            dry_run: false,
        })
    }

    /// Sets the version pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PruneError::InvalidPattern`](crate::PruneError::InvalidPattern)
    /// if the pattern does not compile.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.filter = VersionFilter::new(pattern)?;
        Ok(self)
    }

    /// Sets the number of newest matching versions to keep.
    #[must_use]
    pub const fn with_keep(mut self, keep: usize) -> Self {
        self.keep = keep;
        self
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Registry and repository to prune.
    #[must_use]
    pub const fn target(&self) -> &RegistryTarget {
        &self.target
    }

    /// Compiled version filter.
    #[must_use]
    pub const fn filter(&self) -> &VersionFilter {
        &self.filter
    }

    /// Number of versions to keep.
    #[must_use]
    pub const fn keep(&self) -> usize {
        self.keep
    }

    /// Whether destructive calls are suppressed.
    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }
}
