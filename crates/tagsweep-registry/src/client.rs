//! Docker Registry HTTP API V2 client.
//!
//! This module provides the HTTP implementation of
//! [`ManifestRegistry`](tagsweep_core::ManifestRegistry).

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK};
use reqwest::{Response, StatusCode};
use tagsweep_core::ManifestRegistry;
use tracing::{debug, warn};
use url::Url;

use crate::config::{RegistryAuth, RegistryConfig};
use crate::error::RegistryError;
use crate::oci::{error_message, media_type, next_page_url, TagList, DOCKER_CONTENT_DIGEST};

/// Client for a Docker Registry V2 compatible registry.
#[derive(Debug)]
pub struct RegistryClient {
    config: RegistryConfig,
    http: reqwest::Client,
}

impl RegistryClient {
    /// Creates a new registry client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tagsweep_registry::{RegistryClient, RegistryConfig};
    ///
    /// let config = RegistryConfig::new("https://registry.example.com");
    /// let client = RegistryClient::new(config)?;
    /// # Ok::<(), tagsweep_registry::RegistryError>(())
    /// ```
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| RegistryError::ConnectionFailed {
                url: config.url.clone(),
                source: e,
            })?;

        Ok(Self { config, http })
    }

    /// Checks that the registry speaks the V2 API and accepts the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AuthenticationFailed`] on `401`/`403`, or an
    /// HTTP/connection error if the registry is unreachable.
    pub async fn ping(&self) -> Result<(), RegistryError> {
        let url = self.config.api_url("");

        let response = self
            .http
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await?;

        Self::check_status(response).await?;
        debug!(url = %url, "Registry ping succeeded");
        Ok(())
    }

    /// Returns the response if it is a success, otherwise maps the status to an error.
    async fn check_status(response: Response) -> Result<Response, RegistryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(&response.text().await.unwrap_or_default());
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(RegistryError::AuthenticationFailed {
                    message: if message.is_empty() {
                        status.to_string()
                    } else {
                        format!("{status}: {message}")
                    },
                })
            }
            _ => Err(RegistryError::HttpError {
                status: status.as_u16(),
                message,
            }),
        }
    }

    /// Creates authentication headers based on configuration.
    fn auth_headers(&self) -> Result<HeaderMap, RegistryError> {
        let mut headers = HeaderMap::new();

        match &self.config.auth {
            RegistryAuth::None => {}
            RegistryAuth::Basic { username, password } => {
                let credentials = base64::Engine::encode(
                    &base64::engine::general_purpose::STANDARD,
                    format!("{username}:{password}"),
                );
                let mut value = HeaderValue::from_str(&format!("Basic {credentials}"))
                    .map_err(|_| RegistryError::AuthenticationFailed {
                        message: "Invalid credentials".to_string(),
                    })?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
        }

        Ok(headers)
    }
}

#[async_trait]
impl ManifestRegistry for RegistryClient {
    type Error = RegistryError;

    /// Lists all tags, following `Link` pagination.
    ///
    /// Only links back to the registry itself are followed, and each page at
    /// most once. An unknown repository yields an empty list.
    async fn list_tags(&self, repository: &str) -> Result<Vec<String>, RegistryError> {
        let first = self.config.api_url(&format!("{repository}/tags/list"));
        let first =
            Url::parse(&first).map_err(|_| RegistryError::InvalidUrl { url: first.clone() })?;
        let mut visited = HashSet::from([first.clone()]);
        let mut next = Some(first);
        let mut tags = Vec::new();

        while let Some(url) = next.take() {
            let response = self
                .http
                .get(url.clone())
                .headers(self.auth_headers()?)
                .send()
                .await?;

            if response.status() == StatusCode::NOT_FOUND && tags.is_empty() {
                debug!(repository, "Repository not found, no tags");
                return Ok(tags);
            }

            let response = Self::check_status(response).await?;

            next = response
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(|link| next_page_url(&url, link));
            if let Some(page) = &next {
                if !visited.insert(page.clone()) {
                    warn!(repository, url = %page, "Tag list pagination loops, stopping");
                    next = None;
                }
            }

            let page: TagList = response.json().await?;
            tags.extend(page.into_tags());
        }

        debug!(repository, count = tags.len(), "Fetched tag list");
        Ok(tags)
    }

    /// Resolves a tag to its manifest digest with a `HEAD` request.
    async fn resolve_manifest_digest(
        &self,
        repository: &str,
        tag: &str,
    ) -> Result<String, RegistryError> {
        let url = self
            .config
            .api_url(&format!("{repository}/manifests/{tag}"));

        let response = self
            .http
            .head(&url)
            .headers(self.auth_headers()?)
            .header(ACCEPT, media_type::manifest_accept())
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound {
                repository: repository.to_string(),
                reference: tag.to_string(),
            });
        }

        let response = Self::check_status(response).await?;

        response
            .headers()
            .get(DOCKER_CONTENT_DIGEST)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(ToString::to_string)
            .ok_or_else(|| RegistryError::MissingDigest {
                repository: repository.to_string(),
                reference: tag.to_string(),
            })
    }

    /// Deletes a manifest by digest.
    async fn delete_manifest(&self, repository: &str, digest: &str) -> Result<(), RegistryError> {
        let url = self
            .config
            .api_url(&format!("{repository}/manifests/{digest}"));

        let response = self
            .http
            .delete(&url)
            .headers(self.auth_headers()?)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(RegistryError::NotFound {
                repository: repository.to_string(),
                reference: digest.to_string(),
            }),
            StatusCode::METHOD_NOT_ALLOWED => Err(RegistryError::DeletionDisabled {
                repository: repository.to_string(),
                digest: digest.to_string(),
            }),
            _ => Self::check_status(response).await.map(|_| ()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = RegistryConfig::new("https://registry.example.com");
        let client = RegistryClient::new(config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_auth_headers_none() {
        let config = RegistryConfig::new("https://example.com");
        let client = RegistryClient::new(config).unwrap();
        let headers = client.auth_headers().unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn test_auth_headers_basic() {
        let config = RegistryConfig::new("https://example.com")
            .with_auth(RegistryAuth::basic("user", "pass"));
        let client = RegistryClient::new(config).unwrap();
        let headers = client.auth_headers().unwrap();

        let auth = headers.get(AUTHORIZATION).unwrap();
        assert!(auth.is_sensitive());
        // base64("user:pass")
        assert_eq!(auth.to_str().unwrap(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_auth_headers_basic_empty_password() {
        let config = RegistryConfig::new("https://example.com")
            .with_auth(RegistryAuth::basic("user", ""));
        let client = RegistryClient::new(config).unwrap();
        let headers = client.auth_headers().unwrap();

        // base64("user:")
        assert_eq!(
            headers.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Basic dXNlcjo="
        );
    }
}
