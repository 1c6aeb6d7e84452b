//! Resolver backed by a remote ledger

use async_trait::async_trait;
use num_bigint::BigUint;

use crate::{
    chain::{ChainTag, Payload, ResourceId},
    error::{DidError, LedgerError, ResolutionError},
    registry::MethodResolver,
    types::{DidUrl, Document},
};

/// The boundary to a chain holding registered DID documents.
///
/// `get_document` returning `Ok(None)` is a valid negative outcome (the
/// ledger was reached and holds no record), kept distinct from a transport
/// failure. `balance` reports chain-native token amounts, which may exceed
/// any fixed-width integer.
#[async_trait]
pub trait DidLedger: Send + Sync {
    async fn get_document(&self, id: &Payload) -> Result<Option<Document>, LedgerError>;
    async fn balance(&self, account: &Payload) -> Result<BigUint, LedgerError>;
}

/// Resolves identifiers whose method-specific id is a dock-framed resource id
/// by querying a [`DidLedger`].
///
/// The registry imposes no retry or timeout here; wrap the ledger's calls in
/// the caller's surrounding context to cancel a hung backend.
pub struct LedgerResolver<C> {
    ledger: C,
}

impl<C: DidLedger> LedgerResolver<C> {
    pub fn new(ledger: C) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl<C: DidLedger + 'static> MethodResolver for LedgerResolver<C> {
    async fn resolve(&self, did: &DidUrl) -> Result<Document, ResolutionError> {
        let id = ResourceId::decode_str(did.id(), ChainTag::Dock)
            .map_err(|e| DidError::MethodSpecificId(e.to_string()))?;

        log::debug!("querying ledger for {}", id);
        match self.ledger.get_document(id.payload()).await {
            Ok(Some(document)) => Ok(document),
            Ok(None) => Err(ResolutionError::NotFound {
                did: did.to_string(),
            }),
            Err(err) => {
                log::error!("ledger unreachable while resolving {}: {}", did, err);
                Err(ResolutionError::BackendUnavailable(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct MockLedger {
        documents: HashMap<Payload, Document>,
        unreachable: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl DidLedger for MockLedger {
        async fn get_document(&self, id: &Payload) -> Result<Option<Document>, LedgerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unreachable {
                return Err(LedgerError::Transport("connection reset".to_string()));
            }
            Ok(self.documents.get(id).cloned())
        }

        async fn balance(&self, _account: &Payload) -> Result<BigUint, LedgerError> {
            if self.unreachable {
                return Err(LedgerError::Transport("connection reset".to_string()));
            }
            // more than u64 can hold
            Ok(BigUint::from(u64::MAX) + 1u8)
        }
    }

    const DID: &str = "did:dock:0x0adb5ec7bcddb2b44d8d7f433b0a4c2b135ae8f0f7dbdbb1b070a3d4bb52d5fd";

    fn payload() -> Payload {
        *ResourceId::decode_str(
            "0adb5ec7bcddb2b44d8d7f433b0a4c2b135ae8f0f7dbdbb1b070a3d4bb52d5fd",
            ChainTag::Dock,
        )
        .unwrap()
        .payload()
    }

    #[tokio::test]
    async fn test_resolves_registered_document() {
        let mut document = Document::new();
        document.insert("id", json!(DID));
        let ledger = MockLedger {
            documents: HashMap::from([(payload(), document)]),
            ..Default::default()
        };

        let resolved = LedgerResolver::new(ledger)
            .resolve(&DidUrl::parse(DID).unwrap())
            .await
            .unwrap();
        assert_eq!(resolved.id(), Some(DID));
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let resolver = LedgerResolver::new(MockLedger::default());
        let err = resolver.resolve(&DidUrl::parse(DID).unwrap()).await.unwrap_err();
        assert!(matches!(err, ResolutionError::NotFound { ref did } if did == DID));
    }

    #[tokio::test]
    async fn test_transport_failure_is_backend_unavailable() {
        let resolver = LedgerResolver::new(MockLedger {
            unreachable: true,
            ..Default::default()
        });
        let err = resolver.resolve(&DidUrl::parse(DID).unwrap()).await.unwrap_err();
        assert!(matches!(err, ResolutionError::BackendUnavailable(_)));
    }

    #[tokio::test]
    async fn test_malformed_id_touches_no_backend() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = LedgerResolver::new(MockLedger {
            calls: calls.clone(),
            ..Default::default()
        });

        let err = resolver
            .resolve(&DidUrl::parse("did:dock:0xdeadbeef").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ResolutionError::Malformed(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_balance_is_arbitrary_precision() {
        let ledger = MockLedger::default();
        let balance = ledger.balance(&payload()).await.unwrap();
        assert_eq!(balance, BigUint::from(u64::MAX) + 1u8);
    }
}
