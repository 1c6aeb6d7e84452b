//! Multi-method DID resolution library
//!
//! This library routes Decentralized Identifiers (DIDs) to pluggable method
//! resolvers and normalizes their output into one canonical document shape,
//! per the W3C [specification](https://www.w3.org/TR/did-core/#abstract).
//! Alongside resolution it carries a cross-chain resource identifier codec
//! and a versioned registry of wire-format type definitions.
//!
//! # Examples
//!
//! ## Resolving with a [`ResolverRegistry`]
//! A registry is populated once at startup; each method resolver is
//! registered under its `(prefix, method)` pair and shared by all calls.
//!
//! ```rust
//! use lib_didresolver::{methods::KeyResolver, ResolverRegistry};
//!
//! # tokio_test::block_on(async {
//! let mut registry = ResolverRegistry::new();
//! registry.register("did", "key", KeyResolver).unwrap();
//!
//! let document = registry
//!     .resolve("did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK")
//!     .await
//!     .unwrap();
//! assert!(document.context().is_some());
//! # })
//! ```
//!
//! ## Converting resource identifiers between chains
//! ```rust
//! use lib_didresolver::{ChainTag, ResourceId};
//!
//! let id = ResourceId::decode_str(
//!     "0x0adb5ec7bcddb2b44d8d7f433b0a4c2b135ae8f0f7dbdbb1b070a3d4bb52d5fd",
//!     ChainTag::Dock,
//! )
//! .unwrap();
//! let converted = id.convert(ChainTag::CheqdTestnet);
//! assert!(id.equivalent(&converted));
//! ```
//!
//! # Cargo Feature Flags
//!
//! `server` enables the JSON-RPC server api for resolution and chain tools
//!
//! `client` enables the JSON-RPC client for the resolution server
//!
//! ### Using the Server
//! ``` no_run
//! # #[cfg(feature = "server")]
//! # {
//! use std::sync::Arc;
//! use jsonrpsee::server::Server;
//! use lib_didresolver::{
//!     methods::KeyResolver, rpc::DidResolutionMethods, DidResolutionServer, ResolverRegistry,
//! };
//!
//! # tokio_test::block_on(async {
//! let mut registry = ResolverRegistry::new();
//! registry.register("did", "key", KeyResolver).unwrap();
//! let server = Server::builder().build("127.0.0.1:0").await.unwrap();
//!
//! let addr = server.local_addr().unwrap();
//! let handle = server.start(DidResolutionMethods::new(Arc::new(registry)).into_rpc());
//! handle.stopped().await;
//! # })
//! # }
//! ```
//!
//! ### Using the Client
//!
//! ```no_run
//! # #[cfg(feature = "client")]
//! # {
//! use jsonrpsee::ws_client::WsClientBuilder;
//! use lib_didresolver::DidResolutionClient;
//!
//! # tokio_test::block_on(async {
//! let client = WsClientBuilder::default().build("ws://127.0.0.1:9999").await.unwrap();
//! let result = client
//!     .resolve_did("did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK".into())
//!     .await
//!     .unwrap();
//! # })
//! # }
//! ```

pub mod chain;
pub mod error;
pub mod expand;
pub mod methods;
mod registry;
pub mod types;
mod util;
pub mod versions;

#[cfg(any(feature = "server", feature = "client"))]
pub mod rpc;

pub use crate::chain::{ChainTag, Payload, ResourceId};
pub use crate::registry::{MethodId, MethodResolver, ResolverRegistry};
pub use crate::versions::{TypeRegistry, TypeSet, VersionRange};

#[cfg(feature = "server")]
pub use rpc::{ChainToolsServer, DidResolutionServer};

#[cfg(feature = "client")]
pub use rpc::{ChainToolsClient, DidResolutionClient};
