//! Resolver delegating to an external resolution function

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::{
    error::ResolutionError,
    registry::MethodResolver,
    types::{DidUrl, Document},
};

/// The shape of an external resolution function: it receives the parsed DID
/// URL and reports failures as [`anyhow::Error`]
pub type DelegateFn =
    dyn Fn(DidUrl) -> BoxFuture<'static, anyhow::Result<Document>> + Send + Sync;

/// Wraps a third-party resolution function as a [`MethodResolver`].
///
/// Results pass through untouched. Foreign errors are translated at this
/// boundary: an [`anyhow::Error`] wrapping a [`ResolutionError`] is unwrapped
/// and propagated as-is, anything else becomes
/// [`ResolutionError::BackendUnavailable`]. No foreign error type escapes.
pub struct DelegatedResolver {
    delegate: Box<DelegateFn>,
}

impl DelegatedResolver {
    pub fn new<F>(delegate: F) -> Self
    where
        F: Fn(DidUrl) -> BoxFuture<'static, anyhow::Result<Document>> + Send + Sync + 'static,
    {
        Self {
            delegate: Box::new(delegate),
        }
    }
}

#[async_trait]
impl MethodResolver for DelegatedResolver {
    async fn resolve(&self, did: &DidUrl) -> Result<Document, ResolutionError> {
        (self.delegate)(did.clone())
            .await
            .map_err(|err| match err.downcast::<ResolutionError>() {
                Ok(native) => native,
                Err(foreign) => ResolutionError::BackendUnavailable(foreign.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use futures::FutureExt;
    use serde_json::json;

    use super::*;

    fn url(s: &str) -> DidUrl {
        DidUrl::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_passes_result_through() {
        let resolver = DelegatedResolver::new(|did: DidUrl| {
            async move {
                let mut document = Document::new();
                document.insert("id", json!(did.to_string()));
                Ok(document)
            }
            .boxed()
        });

        let document = resolver.resolve(&url("did:web:example.com")).await.unwrap();
        assert_eq!(document.id(), Some("did:web:example.com"));
    }

    #[tokio::test]
    async fn test_native_errors_pass_through() {
        let resolver = DelegatedResolver::new(|did: DidUrl| {
            async move {
                Err(anyhow::Error::new(ResolutionError::NotFound {
                    did: did.to_string(),
                }))
            }
            .boxed()
        });

        let err = resolver.resolve(&url("did:web:gone.example")).await.unwrap_err();
        assert!(matches!(err, ResolutionError::NotFound { ref did } if did == "did:web:gone.example"));
    }

    #[tokio::test]
    async fn test_foreign_errors_are_translated() {
        let resolver = DelegatedResolver::new(|_did: DidUrl| {
            async { Err(anyhow::anyhow!("connection refused")) }.boxed()
        });

        let err = resolver.resolve(&url("did:web:example.com")).await.unwrap_err();
        assert!(
            matches!(err, ResolutionError::BackendUnavailable(ref msg) if msg == "connection refused")
        );
    }
}
