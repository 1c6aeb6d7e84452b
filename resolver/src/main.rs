//! ## Endpoint Documentation: `resolveDid`
//!
//! ### Overview
//!
//! The `did_resolveDid` endpoint receives a DID string and returns the
//! resolved DID document in JSON form together with resolution metadata. The
//! gateway also exposes the `chain` namespace for converting resource
//! identifiers between chains and for selecting versioned wire-format type
//! definitions.
//!
//! ### Request Format
//!
//! The request carries one positional parameter: the DID to resolve.
//!
//! Example Request:
//! ```json
//! {
//!   "id": 1,
//!   "jsonrpc": "2.0",
//!   "method": "did_resolveDid",
//!   "params": ["did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK"]
//! }
//! ```
//!
//! ### Response Format
//!
//! The response carries the resolved document under `didDocument` and the
//! content type under `didResolutionMetadata`.
//!
//! ### Error Handling
//!
//! Failures are reported as typed JSON-RPC errors in the `-31xxx` code space:
//! `-31001` malformed identifier, `-31002` unsupported method, `-31003` not
//! found, `-31004` backend unavailable, `-31010` invalid chain identifier
//! format, `-31020` unknown spec, `-31021` unsupported version.
//!
//! ### Example
//!
//! ```bash
//! curl -H "Content-Type: application/json" -d '{"id":1, "jsonrpc":"2.0", "method":"did_resolveDid", "params": ["did:key:z6Mk..."] }' http://localhost:8080
//! ```
//!
//! All available methods are listed by the `rpc_methods` endpoint.

use std::sync::Arc;

use anyhow::Result;
use jsonrpsee::{server::Server, RpcModule};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use lib_didresolver::{
    methods::KeyResolver,
    rpc::{ChainToolsMethods, DidResolutionMethods},
    ChainToolsServer, DidResolutionServer, ResolverRegistry, TypeRegistry,
};

mod argenv;

/// Entrypoint for the DID Resolution Gateway
pub async fn run() -> Result<()> {
    init_logging();
    load_env()?;
    let opts = argenv::parse_args();

    let server_host = host_from(opts.host, opts.port);
    let server = Server::builder().build(server_host).await?;
    let addr = server.local_addr()?;

    // registration conflicts are fatal: abort startup rather than overwrite
    let mut registry = ResolverRegistry::new();
    registry.register("did", "key", KeyResolver)?;
    let registry = Arc::new(registry);
    let types = Arc::new(TypeRegistry::bundled());

    let mut methods = RpcModule::new(());
    methods.merge(DidResolutionMethods::new(registry).into_rpc())?;
    methods.merge(ChainToolsMethods::new(types).into_rpc())?;
    let methods = build_rpc_api(methods);

    let handle = server.start(methods);

    log::info!("Server Started at {addr}");
    handle.stopped().await;
    Ok(())
}

fn load_env() -> Result<()> {
    match dotenvy::dotenv_override() {
        Ok(path) => {
            // .env file successfully loaded.
            log::debug!("Env file {} was loaded successfully", path.display());
        }
        Err(err) => {
            // Error handling for the case where dotenv() fails
            log::info!("env file(s) not loaded : {err}");
        }
    };
    Ok(())
}

fn host_from(host: String, port: u16) -> String {
    format!("{}:{}", host, port)
}

fn init_logging() {
    let fmt = fmt::layer().compact();
    Registry::default()
        .with(EnvFilter::from_default_env())
        .with(fmt)
        .init()
}

// creates an endpoint listing all methods available on the server, at the
// endpoint `rpc_methods`
fn build_rpc_api<M: Send + Sync + 'static>(mut rpc_api: RpcModule<M>) -> RpcModule<M> {
    let mut available_methods = rpc_api.method_names().collect::<Vec<_>>();
    available_methods.push("rpc_methods");
    available_methods.sort();

    rpc_api
        .register_method("rpc_methods", move |_, _| {
            serde_json::json!({
                "methods": available_methods,
            })
        })
        .expect("infallible all other methods have their own address space; qed");

    rpc_api
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await?;
    Ok(())
}
