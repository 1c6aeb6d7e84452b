//! Type definitions adhering to the [DID Specification](https://www.w3.org/TR/did-core/#abstract):
//! the canonical resolved [`Document`] and the structured document model used
//! by resolvers that build documents field by field

mod did_parser;
mod did_url;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

pub use did_parser::*;
pub use did_url::*;

use crate::error::DocumentError;

/// The mandatory DID core context every resolved document carries
pub const DID_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// The canonical output of every resolution: a JSON object keyed by string.
///
/// Backends produce heterogeneous shapes; the registry normalizes them into
/// this one form, guaranteeing an `@context` entry is present. A `Document`
/// is produced fresh per resolution call and never cached by the core.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Document(serde_json::Map<String, Value>);

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a canonical document from any serializable value that maps to a
    /// JSON object.
    ///
    /// # Errors
    /// [`DocumentError::NotAnObject`] if the value serializes to anything but
    /// a JSON object.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, DocumentError> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(DocumentError::NotAnObject),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// The document's `id` entry, when the backend provided one
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// The document's `@context` entry
    pub fn context(&self) -> Option<&Value> {
        self.0.get("@context")
    }

    /// Adds `context` to the document's `@context` entry unless it is already
    /// declared.
    ///
    /// Scalar and array context values are treated uniformly, append if
    /// absent: a resolver-supplied context is never removed or replaced, only
    /// extended.
    pub fn ensure_context(&mut self, context: &str) {
        let ctx = Value::String(context.to_string());
        match self.0.get_mut("@context") {
            None => {
                self.0.insert("@context".to_string(), ctx);
            }
            Some(Value::Array(values)) => {
                if !values.contains(&ctx) {
                    values.push(ctx);
                }
            }
            Some(existing) => {
                if *existing != ctx {
                    let prior = existing.take();
                    *existing = Value::Array(vec![prior, ctx]);
                }
            }
        }
    }

    pub fn into_inner(self) -> serde_json::Map<String, Value> {
        self.0
    }
}

impl From<serde_json::Map<String, Value>> for Document {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A structured DID Document, based on the did specification,
/// [DID Document Properties](https://www.w3.org/TR/did-core/#did-document-properties)
///
/// Deterministic resolvers build this shape and bridge it into the canonical
/// [`Document`] with [`Document::from_serialize`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DidDocument {
    #[serde(rename = "@context")]
    pub context: Vec<Url>,
    pub id: DidUrl,
    #[serde(default, rename = "alsoKnownAs", skip_serializing_if = "Vec::is_empty")]
    pub also_known_as: Vec<DidUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<DidUrl>,
    #[serde(
        default,
        rename = "verificationMethod",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub verification_method: Vec<VerificationMethod>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authentication: Vec<DidUrl>,
    #[serde(
        default,
        rename = "assertionMethod",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub assertion_method: Vec<DidUrl>,
    #[serde(default, rename = "keyAgreement", skip_serializing_if = "Vec::is_empty")]
    pub key_agreement: Vec<DidUrl>,
    #[serde(
        default,
        rename = "capabilityInvocation",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub capability_invocation: Vec<DidUrl>,
    #[serde(
        default,
        rename = "capabilityDelegation",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub capability_delegation: Vec<DidUrl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service: Vec<Service>,
}

/// Represents a service associated with a DID.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Service {
    /// The unique identifier of the service.
    pub id: DidUrl,
    /// The type of the service (e.g., messaging, hub, etc.).
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    /// The URL representing the service endpoint.
    #[serde(rename = "serviceEndpoint")]
    pub service_endpoint: Url,
}

/// Describes a method for verifying a DID.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VerificationMethod {
    /// The unique identifier of the verification method, typically a DID URL.
    pub id: DidUrl,
    /// The DID URL of the controller for this verification method.
    pub controller: DidUrl,
    /// The type of the verification method (e.g., cryptographic key type).
    #[serde(rename = "type")]
    pub verification_type: KeyType,
    /// the public key and its encoding
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub verification_properties: Option<VerificationMethodProperties>,
}

/// The key material of a verification method, tagged by its encoding
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum VerificationMethodProperties {
    /// Public key encoded as hex
    PublicKeyHex {
        #[serde(rename = "publicKeyHex")]
        public_key_hex: String,
    },
    /// Public key encoded as base58
    PublicKeyBase58 {
        #[serde(rename = "publicKeyBase58")]
        public_key_base58: String,
    },
    /// Public key as a Json-Web-Key
    PublicKeyJwk {
        #[serde(rename = "publicKeyJwk")]
        public_key_jwk: Value,
    },
    /// Public key in Multibase format
    PublicKeyMultibase {
        #[serde(rename = "publicKeyMultibase")]
        public_key_multibase: String,
    },
}

/// Represents different types of services associated with a DID.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServiceType {
    /// Linked-domain service endpoint
    #[serde(rename = "LinkedDomains")]
    LinkedDomains,
    /// Other service type, not directly supported
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::LinkedDomains => write!(f, "LinkedDomains"),
            ServiceType::Other(other) => write!(f, "{}", other),
        }
    }
}

/// Cryptographic key types defined in the [DID Specification](https://www.w3.org/TR/did-spec-registries/#verification-method-types)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum KeyType {
    JsonWebKey2020,
    Ed25519VerificationKey2020,
    EcdsaSecp256k1VerificationKey2019,
    X25519KeyAgreementKey2019,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::JsonWebKey2020 => write!(f, "jwk"),
            KeyType::Ed25519VerificationKey2020 => write!(f, "Ed25519"),
            KeyType::EcdsaSecp256k1VerificationKey2019 => write!(f, "Secp256k1"),
            KeyType::X25519KeyAgreementKey2019 => write!(f, "X25519"),
        }
    }
}

/// Metadata about a single resolution, returned alongside the document
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ResolutionMetadata {
    #[serde(rename = "contentType")]
    pub content_type: String,
}

impl Default for ResolutionMetadata {
    fn default() -> Self {
        Self {
            content_type: "application/did+ld+json".to_string(),
        }
    }
}

/// The envelope returned by the JSON-RPC resolution endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResolutionResult {
    #[serde(rename = "didDocument")]
    pub document: Document,
    #[serde(rename = "didResolutionMetadata")]
    pub resolution_metadata: ResolutionMetadata,
}
