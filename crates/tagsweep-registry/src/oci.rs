//! Wire types of the Docker Registry HTTP API V2.
//!
//! Only what tag listing, digest resolution and deletion need: manifest media
//! types for content negotiation, the tag list body, the error body and the
//! `Link` header used for pagination.

use serde::Deserialize;
use url::Url;

/// Header carrying the canonical manifest digest.
pub const DOCKER_CONTENT_DIGEST: &str = "docker-content-digest";

/// Manifest media types accepted when resolving digests.
pub mod media_type {
    /// Docker image manifest, schema 2.
    pub const DOCKER_MANIFEST_V2: &str = "application/vnd.docker.distribution.manifest.v2+json";

    /// Docker manifest list (multi-arch), schema 2.
    pub const DOCKER_MANIFEST_LIST: &str =
        "application/vnd.docker.distribution.manifest.list.v2+json";

    /// OCI image manifest.
    pub const OCI_MANIFEST: &str = "application/vnd.oci.image.manifest.v1+json";

    /// OCI image index.
    pub const OCI_INDEX: &str = "application/vnd.oci.image.index.v1+json";

    /// `Accept` header value covering every manifest type a tag may point to.
    ///
    /// Without the schema 2 types, registries fall back to converting the
    /// manifest to schema 1 and report the digest of that conversion, which
    /// cannot be deleted.
    #[must_use]
    pub fn manifest_accept() -> String {
        [
            DOCKER_MANIFEST_V2,
            DOCKER_MANIFEST_LIST,
            OCI_MANIFEST,
            OCI_INDEX,
        ]
        .join(", ")
    }
}

/// Response from the `/v2/<name>/tags/list` endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TagList {
    /// Registries send `null` for a repository without tags.
    #[serde(default)]
    tags: Option<Vec<String>>,
}

impl TagList {
    /// Consumes the list and returns its tags.
    pub(crate) fn into_tags(self) -> Vec<String> {
        self.tags.unwrap_or_default()
    }
}

/// Error response from registry API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    /// List of errors.
    pub errors: Vec<RegistryApiError>,
}

/// Individual error from registry API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RegistryApiError {
    /// Error code.
    pub code: String,

    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

/// Turns a registry error body into a one-line message.
///
/// Falls back to the raw body when it is not a registry error document.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .filter(|r| !r.errors.is_empty())
        .map_or_else(
            || body.trim().to_string(),
            |r| {
                r.errors
                    .iter()
                    .map(|e| {
                        if e.message.is_empty() {
                            e.code.clone()
                        } else {
                            format!("{}: {}", e.code, e.message)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("; ")
            },
        )
}

/// Extracts the `rel="next"` target of a `Link` header, resolved against `base`.
///
/// Registries return relative links such as
/// `</v2/app/tags/list?n=100&last=1.9.0>; rel="next"`. Links to another
/// scheme, host or port are dropped, since every page carries the credentials.
pub(crate) fn next_page_url(base: &Url, link: &str) -> Option<Url> {
    link.split(',')
        .find(|part| part.contains("rel=\"next\"") || part.contains("rel=next"))
        .and_then(|part| part.split(';').next())
        .map(|target| target.trim().trim_start_matches('<').trim_end_matches('>'))
        .filter(|target| !target.is_empty())
        .and_then(|target| base.join(target).ok())
        .filter(|next| next.origin() == base.origin())
}
