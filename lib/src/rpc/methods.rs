//! Interface Implementations for the resolution and chain JSON-RPC namespaces

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use jsonrpsee::types::ErrorObjectOwned;

use super::api::{ChainToolsServer, DidResolutionServer};
use crate::{
    chain::{ChainTag, ResourceId},
    registry::ResolverRegistry,
    types::{ResolutionMetadata, ResolutionResult},
    versions::{TypeRegistry, TypeSet},
};

/// Read-only methods for the `did` JSON-RPC namespace
pub struct DidResolutionMethods {
    registry: Arc<ResolverRegistry>,
}

impl DidResolutionMethods {
    pub fn new(registry: Arc<ResolverRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl DidResolutionServer for DidResolutionMethods {
    async fn resolve_did(&self, did: String) -> Result<ResolutionResult, ErrorObjectOwned> {
        log::debug!("did_resolveDid called for {}", did);
        let document = self.registry.resolve(&did).await?;
        Ok(ResolutionResult {
            document,
            resolution_metadata: ResolutionMetadata::default(),
        })
    }

    async fn supported_methods(&self) -> Result<Vec<String>, ErrorObjectOwned> {
        Ok(self.registry.methods())
    }
}

/// Read-only methods for the `chain` JSON-RPC namespace
pub struct ChainToolsMethods {
    types: Arc<TypeRegistry>,
}

impl ChainToolsMethods {
    pub fn new(types: Arc<TypeRegistry>) -> Self {
        Self { types }
    }
}

#[async_trait]
impl ChainToolsServer for ChainToolsMethods {
    async fn convert_id(
        &self,
        id: String,
        from: String,
        to: String,
    ) -> Result<String, ErrorObjectOwned> {
        log::debug!("chain_convertId called for {} ({} -> {})", id, from, to);
        let from = ChainTag::from_str(&from)?;
        let to = ChainTag::from_str(&to)?;
        let id = ResourceId::decode_str(&id, from)?;
        Ok(id.convert(to).encode_str())
    }

    async fn types_for(&self, spec: String, version: u32) -> Result<TypeSet, ErrorObjectOwned> {
        log::debug!("chain_typesFor called for {} v{}", spec, version);
        Ok(self.types.types_for(&spec, version)?.clone())
    }
}
