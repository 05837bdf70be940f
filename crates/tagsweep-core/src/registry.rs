//! The registry operations the pipeline depends on.

use async_trait::async_trait;

/// Registry operations needed to prune a repository.
///
/// Implemented over HTTP by `tagsweep_registry::RegistryClient`. The pipeline
/// awaits each call before issuing the next one.
#[async_trait]
pub trait ManifestRegistry: Send + Sync {
    /// Error returned by every operation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Lists all tags of a repository.
    async fn list_tags(&self, repository: &str) -> Result<Vec<String>, Self::Error>;

    /// Resolves the content digest of the manifest a tag points to.
    async fn resolve_manifest_digest(
        &self,
        repository: &str,
        tag: &str,
    ) -> Result<String, Self::Error>;

    /// Deletes a manifest by digest.
    async fn delete_manifest(&self, repository: &str, digest: &str) -> Result<(), Self::Error>;
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory registry for pipeline tests.

    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::ManifestRegistry;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    pub struct FakeError(pub String);

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        ListTags(String),
        ResolveDigest(String, String),
        DeleteManifest(String, String),
    }

    #[derive(Debug, Default)]
    pub struct FakeRegistry {
        tags: Vec<String>,
        list_error: Option<String>,
        digest_failures: HashSet<String>,
        delete_failures: HashSet<String>,
        calls: Mutex<Vec<Call>>,
    }

    pub fn digest_of(tag: &str) -> String {
        format!("sha256:{tag}")
    }

    impl FakeRegistry {
        pub fn with_tags(tags: &[&str]) -> Self {
            Self {
                tags: tags.iter().map(ToString::to_string).collect(),
                ..Self::default()
            }
        }

        pub fn failing_list(message: &str) -> Self {
            Self {
                list_error: Some(message.to_string()),
                ..Self::default()
            }
        }

        pub fn fail_digest_for(mut self, tag: &str) -> Self {
            self.digest_failures.insert(tag.to_string());
            self
        }

        pub fn fail_delete_for(mut self, tag: &str) -> Self {
            self.delete_failures.insert(digest_of(tag));
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub fn destructive_calls(&self) -> usize {
            self.calls()
                .iter()
                .filter(|c| matches!(c, Call::DeleteManifest(..)))
                .count()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl ManifestRegistry for FakeRegistry {
        type Error = FakeError;

        async fn list_tags(&self, repository: &str) -> Result<Vec<String>, FakeError> {
            self.record(Call::ListTags(repository.to_string()));
            match &self.list_error {
                Some(message) => Err(FakeError(message.clone())),
                None => Ok(self.tags.clone()),
            }
        }

        async fn resolve_manifest_digest(
            &self,
            repository: &str,
            tag: &str,
        ) -> Result<String, FakeError> {
            self.record(Call::ResolveDigest(repository.to_string(), tag.to_string()));
            if self.digest_failures.contains(tag) {
                return Err(FakeError(format!("manifest unknown: {tag}")));
            }
            Ok(digest_of(tag))
        }

        async fn delete_manifest(&self, repository: &str, digest: &str) -> Result<(), FakeError> {
            self.record(Call::DeleteManifest(
                repository.to_string(),
                digest.to_string(),
            ));
            if self.delete_failures.contains(digest) {
                return Err(FakeError("The operation is unsupported".to_string()));
            }
            Ok(())
        }
    }
}
