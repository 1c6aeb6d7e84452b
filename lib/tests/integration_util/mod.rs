//! Shared setup code for integration tests
use std::sync::{Arc, Once};
use std::{future::Future, time::Duration};

use futures::future::FutureExt;
use jsonrpsee::{
    server::Server,
    ws_client::{WsClient, WsClientBuilder},
    RpcModule,
};
use tokio::time::timeout as timeout_tokio;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use lib_didresolver::{
    methods::KeyResolver,
    rpc::{ChainToolsMethods, DidResolutionMethods},
    ChainToolsServer, DidResolutionServer, ResolverRegistry, TypeRegistry,
};

static INIT: Once = Once::new();

pub(crate) fn init_logging() {
    INIT.call_once(|| {
        let fmt = fmt::layer().compact();
        Registry::default()
            .with(EnvFilter::from_default_env())
            .with(fmt)
            .init()
    })
}

/// Test harness for using a WebSockets Server
/// Optionally provide a timeout [`std::time::Duration`] deadline by which the
/// test must finish.
///
/// # Panics
///
/// If `fun` panics, the test will end upon reaching `timeout`. Default
/// timeout is 2 seconds.
pub async fn with_client<F, R, T>(timeout: Option<Duration>, fun: F) -> T
where
    F: FnOnce(WsClient) -> R + 'static,
    R: Future<Output = T> + FutureExt + Send + 'static,
{
    init_logging();
    let server = Server::builder().build("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap();

    let mut registry = ResolverRegistry::new();
    registry.register("did", "key", KeyResolver).unwrap();

    let mut methods = RpcModule::new(());
    methods
        .merge(DidResolutionMethods::new(Arc::new(registry)).into_rpc())
        .unwrap();
    methods
        .merge(ChainToolsMethods::new(Arc::new(TypeRegistry::bundled())).into_rpc())
        .unwrap();
    let handle = server.start(methods);

    let client = WsClientBuilder::default()
        .build(&format!("ws://{addr}"))
        .await
        .unwrap();

    // cant catch_unwind b/c jsonrpsee uses tokio mpsc which is !UnwindSafe, so
    // we wrap with a timeout. If we panic in the closure without the timeout,
    // the server never stops and the test hangs.
    let result = timeout_tokio(timeout.unwrap_or(Duration::from_secs(2)), fun(client)).await;

    handle.stop().unwrap();
    handle.stopped().await;

    if result.is_err() {
        log::debug!("Test timed out due to panic, or running too long.");
    }
    result.unwrap()
}
