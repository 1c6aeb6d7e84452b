//! Boundary to an external JSON-LD expansion collaborator
//!
//! No JSON-LD processing happens in this crate. The expansion function is an
//! external collaborator consuming a document loader; this module only
//! validates the loader configuration and can adapt a [`ResolverRegistry`]
//! into a loader serving `did:` URLs.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{error::ConfigError, registry::ResolverRegistry};

/// Fetches the JSON value behind a URL during JSON-LD expansion
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, url: &str) -> anyhow::Result<Value>;
}

/// Loader configuration handed to the expansion collaborator.
///
/// `document_loader` and `resolver` are mutually exclusive; setting both is a
/// configuration error. Setting neither means the collaborator's own default
/// loader applies.
#[derive(Default)]
pub struct ExpandOptions {
    document_loader: Option<Arc<dyn DocumentLoader>>,
    resolver: Option<Arc<ResolverRegistry>>,
}

impl ExpandOptions {
    pub fn with_document_loader(mut self, loader: Arc<dyn DocumentLoader>) -> Self {
        self.document_loader = Some(loader);
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<ResolverRegistry>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Resolves the configured loader choice.
    ///
    /// A configured registry is adapted into a loader serving `did:` URLs by
    /// resolution; non-DID URLs are refused by that adapter.
    ///
    /// # Errors
    /// [`ConfigError::LoaderConflict`] when both options are set.
    pub fn loader(&self) -> Result<Option<Arc<dyn DocumentLoader>>, ConfigError> {
        match (&self.document_loader, &self.resolver) {
            (Some(_), Some(_)) => Err(ConfigError::LoaderConflict),
            (Some(loader), None) => Ok(Some(loader.clone())),
            (None, Some(resolver)) => Ok(Some(Arc::new(RegistryLoader(resolver.clone())))),
            (None, None) => Ok(None),
        }
    }
}

/// Serves `did:` URLs from a resolver registry
struct RegistryLoader(Arc<ResolverRegistry>);

#[async_trait]
impl DocumentLoader for RegistryLoader {
    async fn load(&self, url: &str) -> anyhow::Result<Value> {
        if !url.starts_with("did:") {
            anyhow::bail!("registry loader only serves did: urls, got `{url}`");
        }
        let document = self.0.resolve(url).await?;
        Ok(Value::Object(document.into_inner()))
    }
}
