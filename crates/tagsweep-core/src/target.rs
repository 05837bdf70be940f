//! Registry path parsing.
//!
//! Users pass the image the way they would to `docker pull`
//! (`registry.example.com/myorg/myimage`) or as a full URL
//! (`http://localhost:5000/myorg/myimage`). Both normalize to a
//! [`RegistryTarget`].

use std::fmt;

use url::Url;

use crate::error::{PruneError, Result};

/// Registry endpoint plus repository path, parsed from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryTarget {
    scheme: String,
    host: String,
    port: Option<u16>,
    repository: String,
}

impl RegistryTarget {
    /// Parses a registry path or URL.
    ///
    /// Inputs without a scheme are treated as `https`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagsweep_core::RegistryTarget;
    ///
    /// let target = RegistryTarget::parse("example.com/a/b").unwrap();
    /// assert_eq!(target.scheme(), "https");
    /// assert_eq!(target.host(), "example.com");
    /// assert_eq!(target.repository(), "a/b");
    /// assert_eq!(target.registry_url(), "https://example.com");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PruneError::Configuration`] if the input is not a valid
    /// `http`/`https` URL, or if the host or repository path is empty.
    pub fn parse(raw: &str) -> Result<Self> {
        let input = raw.trim();
        if input.is_empty() {
            return Err(PruneError::configuration(raw, "registry path is empty"));
        }

        let with_scheme = match input.split_once("://") {
            Some((scheme, _))
                if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") =>
            {
                input.to_string()
            }
            Some((scheme, _)) => {
                return Err(PruneError::configuration(
                    raw,
                    format!("unsupported scheme '{scheme}', expected http or https"),
                ));
            }
            None => format!("https://{input}"),
        };

        let url = Url::parse(&with_scheme)
            .map_err(|e| PruneError::configuration(raw, format!("unable to parse url: {e}")))?;

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| PruneError::configuration(raw, "registry host is empty"))?;

        let path = url.path();
        let repository = path
            .strip_prefix('/')
            .unwrap_or(path)
            .trim_end_matches('/');
        if repository.is_empty() {
            return Err(PruneError::configuration(raw, "image name is empty"));
        }

        Ok(Self {
            scheme: url.scheme().to_string(),
            host: host.to_string(),
            port: url.port(),
            repository: repository.to_string(),
        })
    }

    /// URL scheme, either `http` or `https`.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Registry host name, without port.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Explicit port, if one was given and differs from the scheme default.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Repository path inside the registry (the image name).
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Base URL of the registry API, `scheme://host[:port]`.
    #[must_use]
    pub fn registry_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{port}", self.scheme, self.host),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }
}

impl fmt::Display for RegistryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.registry_url(), self.repository)
    }
}
