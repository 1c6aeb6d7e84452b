//! Composite dispatcher routing identifiers to their method resolvers

use std::collections::{hash_map::Entry, HashMap};
use std::fmt;

use async_trait::async_trait;

use crate::{
    error::{RegistryError, ResolutionError},
    types::{Document, DidUrl, DID_CONTEXT},
};

/// The registration descriptor a resolver is keyed under: a scheme prefix and
/// a method name. Plain data, shared by no resolver state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId {
    pub prefix: String,
    pub method: String,
}

impl MethodId {
    pub fn new(prefix: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            method: method.into(),
        }
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.method)
    }
}

/// The capability every method resolver provides: one identifier syntax
/// resolved to a backend-shaped document.
///
/// Implementations are long-lived and stateless; a single instance is shared
/// by all resolution calls, which may run concurrently. Cancellation and
/// timeout toward a remote backend are the implementation's concern, not the
/// registry's.
#[async_trait]
pub trait MethodResolver: Send + Sync {
    async fn resolve(&self, did: &DidUrl) -> Result<Document, ResolutionError>;
}

/// Routes an identifier to the resolver registered for its
/// `(prefix, method)` pair and normalizes the result.
///
/// A registry is populated once at startup with [`register`](Self::register)
/// and never mutated afterward; lookups take `&self` and need no locking.
/// Construct one registry per process (or per test) and share it behind an
/// [`Arc`](std::sync::Arc).
///
/// # Examples
/// ```
/// use lib_didresolver::{methods::KeyResolver, ResolverRegistry};
///
/// # tokio_test::block_on(async {
/// let mut registry = ResolverRegistry::new();
/// registry.register("did", "key", KeyResolver).unwrap();
///
/// let document = registry
///     .resolve("did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK")
///     .await
///     .unwrap();
/// assert_eq!(
///     document.id(),
///     Some("did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK")
/// );
/// # })
/// ```
#[derive(Default)]
pub struct ResolverRegistry {
    methods: HashMap<MethodId, Box<dyn MethodResolver>>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `resolver` under the `(prefix, method)` pair.
    ///
    /// # Errors
    /// [`RegistryError::Conflict`] if a resolver is already registered for
    /// that exact pair. Registration never silently overwrites; treat a
    /// conflict as fatal at startup.
    pub fn register<R>(
        &mut self,
        prefix: &str,
        method: &str,
        resolver: R,
    ) -> Result<(), RegistryError>
    where
        R: MethodResolver + 'static,
    {
        match self.methods.entry(MethodId::new(prefix, method)) {
            Entry::Occupied(entry) => Err(RegistryError::Conflict(entry.key().clone())),
            Entry::Vacant(entry) => {
                log::debug!("registered resolver for {}", entry.key());
                entry.insert(Box::new(resolver));
                Ok(())
            }
        }
    }

    /// The registered `(prefix, method)` pairs, sorted, in `prefix:method`
    /// form
    pub fn methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = self.methods.keys().map(MethodId::to_string).collect();
        methods.sort();
        methods
    }

    /// Resolves an identifier string to its canonical document.
    ///
    /// The input is parsed before any dispatch, so malformed identifiers fail
    /// fast without touching a backend.
    pub async fn resolve(&self, input: &str) -> Result<Document, ResolutionError> {
        let url = DidUrl::parse(input)?;
        self.resolve_url(&url).await
    }

    /// Resolves an already-parsed DID URL, dispatching on its
    /// `(prefix, method)` pair.
    ///
    /// The resolver's output is merged with the mandatory DID context entry;
    /// a context the resolver itself declared always wins.
    pub async fn resolve_url(&self, url: &DidUrl) -> Result<Document, ResolutionError> {
        let id = MethodId::new(url.scheme(), url.method());
        let resolver = self
            .methods
            .get(&id)
            .ok_or(ResolutionError::UnsupportedMethod(id))?;

        log::trace!("dispatching {} to its method resolver", url);
        let mut document = resolver.resolve(url).await?;
        document.ensure_context(DID_CONTEXT);
        Ok(document)
    }
}
