//! Deterministic resolver for the `did:key` method
//!
//! The method-specific id is a multibase-encoded multicodec public key; the
//! whole document is derived from it with no I/O.

use async_trait::async_trait;
use url::Url;

use crate::{
    error::{DidError, ResolutionError},
    registry::MethodResolver,
    types::{
        DidDocument, DidUrl, Document, KeyType, VerificationMethod,
        VerificationMethodProperties, DID_CONTEXT,
    },
};

const ED25519_MULTICODEC: [u8; 2] = [0xed, 0x01];
const SECP256K1_MULTICODEC: [u8; 2] = [0xe7, 0x01];

const ED25519_CONTEXT: &str = "https://w3id.org/security/suites/ed25519-2020/v1";
const SECP256K1_CONTEXT: &str = "https://w3id.org/security/suites/secp256k1-2019/v1";

/// Resolves `did:key` identifiers purely from the identifier payload.
///
/// Supports Ed25519 (`z6Mk…`, multicodec `0xed 0x01`, 32-byte key) and
/// compressed secp256k1 (`zQ3s…`, multicodec `0xe7 0x01`, 33-byte key).
/// The only failure mode is a malformed payload.
pub struct KeyResolver;

impl KeyResolver {
    fn decode_multikey(id: &str) -> Result<(KeyType, Vec<u8>), DidError> {
        let encoded = id.strip_prefix('z').ok_or_else(|| {
            DidError::MethodSpecificId(format!("`{id}` is not multibase base58btc"))
        })?;
        let bytes = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| DidError::MethodSpecificId(e.to_string()))?;

        if bytes.len() == 34 && bytes[..2] == ED25519_MULTICODEC {
            Ok((KeyType::Ed25519VerificationKey2020, bytes[2..].to_vec()))
        } else if bytes.len() == 35 && bytes[..2] == SECP256K1_MULTICODEC {
            Ok((KeyType::EcdsaSecp256k1VerificationKey2019, bytes[2..].to_vec()))
        } else {
            Err(DidError::MethodSpecificId(format!(
                "unsupported multicodec prefix or key length ({} bytes)",
                bytes.len()
            )))
        }
    }

    fn suite_context(key_type: KeyType) -> &'static str {
        match key_type {
            KeyType::Ed25519VerificationKey2020 => ED25519_CONTEXT,
            _ => SECP256K1_CONTEXT,
        }
    }
}

#[async_trait]
impl MethodResolver for KeyResolver {
    async fn resolve(&self, did: &DidUrl) -> Result<Document, ResolutionError> {
        let (key_type, _key) = Self::decode_multikey(did.id())?;
        log::trace!("derived a {} document for {}", key_type, did);

        let subject = DidUrl::from(did.did.clone());
        let method_id = subject.with_fragment(Some(did.id()));

        let document = DidDocument {
            context: vec![
                Url::parse(DID_CONTEXT).expect("static context url; qed"),
                Url::parse(Self::suite_context(key_type)).expect("static context url; qed"),
            ],
            id: subject.clone(),
            also_known_as: vec![],
            controller: None,
            verification_method: vec![VerificationMethod {
                id: method_id.clone(),
                controller: subject,
                verification_type: key_type,
                verification_properties: Some(VerificationMethodProperties::PublicKeyMultibase {
                    public_key_multibase: did.id().to_string(),
                }),
            }],
            authentication: vec![method_id.clone()],
            assertion_method: vec![method_id.clone()],
            key_agreement: vec![],
            capability_invocation: vec![method_id.clone()],
            capability_delegation: vec![method_id],
            service: vec![],
        };
        Ok(Document::from_serialize(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const ED25519_DID: &str = "did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK";
    const SECP256K1_DID: &str = "did:key:zQ3shokFTS3brHcDQrn82RUDfCZESWL1ZdCEJwekUDPQiYBme";

    async fn resolve(did: &str) -> Result<Document, ResolutionError> {
        KeyResolver.resolve(&DidUrl::parse(did).unwrap()).await
    }

    #[tokio::test]
    async fn test_ed25519_document() {
        let document = resolve(ED25519_DID).await.unwrap();
        assert_eq!(document.id(), Some(ED25519_DID));

        let context = document.context().unwrap();
        assert!(context
            .as_array()
            .unwrap()
            .contains(&json!(DID_CONTEXT)));

        let multikey = ED25519_DID.trim_start_matches("did:key:");
        let vm = &document.get("verificationMethod").unwrap()[0];
        assert_eq!(vm["id"], json!(format!("{ED25519_DID}#{multikey}")));
        assert_eq!(vm["type"], json!("Ed25519VerificationKey2020"));
        assert_eq!(vm["publicKeyMultibase"], json!(multikey));
        assert_eq!(
            document.get("authentication").unwrap()[0],
            json!(format!("{ED25519_DID}#{multikey}"))
        );
    }

    #[tokio::test]
    async fn test_secp256k1_document() {
        let document = resolve(SECP256K1_DID).await.unwrap();
        assert_eq!(document.id(), Some(SECP256K1_DID));
        let vm = &document.get("verificationMethod").unwrap()[0];
        assert_eq!(vm["type"], json!("EcdsaSecp256k1VerificationKey2019"));
    }

    #[tokio::test]
    async fn test_fragment_is_not_part_of_subject() {
        let document = resolve(&format!("{ED25519_DID}#key-1")).await.unwrap();
        assert_eq!(document.id(), Some(ED25519_DID));
    }

    #[tokio::test]
    async fn test_malformed_payloads() {
        // wrong multibase prefix
        let err = resolve("did:key:a6MkhaXg").await.unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::Malformed(DidError::MethodSpecificId(_))
        ));

        // valid base58 but not a supported multicodec key
        let short = format!("did:key:z{}", bs58::encode([0xedu8, 0x01, 0xff]).into_string());
        let err = resolve(&short).await.unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::Malformed(DidError::MethodSpecificId(_))
        ));
    }
}
