//! # tagsweep-core
//!
//! Retention planning for container image tags.
//!
//! Given a registry path, tagsweep lists the tags of an image, keeps those
//! that fully match a version pattern, orders them by semantic version
//! (newest first), retains the `N` newest and deletes the manifests behind
//! the rest.
//!
//! This crate contains the whole decision pipeline and no network code. The
//! registry is reached through the [`ManifestRegistry`] trait, implemented
//! over HTTP by `tagsweep-registry`.
//!
//! ## Pipeline
//!
//! ```text
//! RegistryTarget ──► list_tags ──► VersionFilter ──► sort_versions
//!                                                        │
//!            DeletionExecutor ◄── RetentionPlan ◄────────┘
//!                   │
//!                   ▼
//!   resolve_manifest_digest + delete_manifest
//! ```
//!
//! ## Example
//!
//! ```
//! use tagsweep_core::{sort_versions, RetentionPlan, VersionFilter};
//!
//! let tags = ["1.0.0-SNAPSHOT", "1.1.0-SNAPSHOT", "2.0.0-RELEASE", "1.2.0-SNAPSHOT"];
//! let filter = VersionFilter::new(".*-SNAPSHOT.*").unwrap();
//! let matched: Vec<&str> = filter.filter(&tags).collect();
//!
//! let sorted = sort_versions(matched);
//! let plan = RetentionPlan::new(sorted.candidates, 2);
//!
//! let deleted: Vec<&str> = plan.to_delete().map(|c| c.raw()).collect();
//! assert_eq!(deleted, vec!["1.0.0-SNAPSHOT"]);
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod error;
pub mod executor;
pub mod filter;
pub mod notice;
pub mod pipeline;
pub mod plan;
pub mod registry;
pub mod target;
pub mod version;


pub use config::PruneConfig;
pub use error::{BoxError, PruneError, Result};
pub use executor::{DeletionExecutor, DeletionOutcome, DeletionRecord, DeletionReport};
pub use filter::VersionFilter;
pub use notice::Notice;
pub use pipeline::{PruneReport, Pruner};
pub use plan::{PlanEntry, RetentionPlan};
pub use registry::ManifestRegistry;
pub use target::RegistryTarget;
pub use version::{parse_version, sort_versions, SortedVersions, VersionCandidate};
