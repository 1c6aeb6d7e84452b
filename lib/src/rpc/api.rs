//! Trait Interface Definitions for the resolution and chain JSON-RPC namespaces

use jsonrpsee::{proc_macros::rpc, types::ErrorObjectOwned};

use crate::{types::ResolutionResult, versions::TypeSet};

/// DID resolution JSON-RPC interface methods
#[cfg(feature = "server")]
#[rpc(server, namespace = "did")]
pub trait DidResolution {
    #[method(name = "resolveDid")]
    async fn resolve_did(&self, did: String) -> Result<ResolutionResult, ErrorObjectOwned>;

    #[method(name = "supportedMethods")]
    async fn supported_methods(&self) -> Result<Vec<String>, ErrorObjectOwned>;
}

/// DID resolution JSON-RPC interface methods
#[cfg(feature = "client")]
#[rpc(client, namespace = "did")]
pub trait DidResolution {
    #[method(name = "resolveDid")]
    async fn resolve_did(&self, did: String) -> Result<ResolutionResult, ErrorObjectOwned>;

    #[method(name = "supportedMethods")]
    async fn supported_methods(&self) -> Result<Vec<String>, ErrorObjectOwned>;
}

/// Chain identifier and type-registry JSON-RPC interface methods
#[cfg(feature = "server")]
#[rpc(server, namespace = "chain")]
pub trait ChainTools {
    #[method(name = "convertId")]
    async fn convert_id(
        &self,
        id: String,
        from: String,
        to: String,
    ) -> Result<String, ErrorObjectOwned>;

    #[method(name = "typesFor")]
    async fn types_for(&self, spec: String, version: u32) -> Result<TypeSet, ErrorObjectOwned>;
}

/// Chain identifier and type-registry JSON-RPC interface methods
#[cfg(feature = "client")]
#[rpc(client, namespace = "chain")]
pub trait ChainTools {
    #[method(name = "convertId")]
    async fn convert_id(
        &self,
        id: String,
        from: String,
        to: String,
    ) -> Result<String, ErrorObjectOwned>;

    #[method(name = "typesFor")]
    async fn types_for(&self, spec: String, version: u32) -> Result<TypeSet, ErrorObjectOwned>;
}
