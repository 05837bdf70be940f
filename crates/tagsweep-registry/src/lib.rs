//! # tagsweep-registry
//!
//! Docker Registry HTTP API V2 client used by tagsweep to list tags, resolve
//! manifest digests and delete manifests.
//!
//! Works against any registry implementing the distribution API
//! (Docker Distribution, Harbor, Nexus, Artifactory, GitLab, etc.). Deletion
//! must be enabled on the registry side; a registry that refuses deletes
//! answers `405` and surfaces as [`RegistryError::DeletionDisabled`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tagsweep_core::ManifestRegistry;
//! use tagsweep_registry::{RegistryAuth, RegistryClient, RegistryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RegistryConfig::new("https://registry.example.com")
//!         .with_auth(RegistryAuth::basic("user", "secret"));
//!
//!     let client = RegistryClient::new(config)?;
//!     client.ping().await?;
//!
//!     let tags = client.list_tags("myorg/myimage").await?;
//!     println!("{tags:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |---|---|
//! | ping | `GET /v2/` |
//! | list tags | `GET /v2/<name>/tags/list` (follows `Link` pagination) |
//! | resolve digest | `HEAD /v2/<name>/manifests/<tag>` → `Docker-Content-Digest` |
//! | delete manifest | `DELETE /v2/<name>/manifests/<digest>` |

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod client;
mod config;
mod error;
mod oci;

pub use client::RegistryClient;
pub use config::{RegistryAuth, RegistryConfig};
pub use error::RegistryError;
pub use oci::{media_type, DOCKER_CONTENT_DIGEST};
