//! Error taxonomy for resolution, chain identifier decoding and version lookup

use jsonrpsee::types::ErrorObjectOwned;
use thiserror::Error;

use crate::registry::MethodId;

/// Errors originating from the parsing of a DID URL, [`DidUrl`](crate::types::DidUrl)
#[derive(Error, Debug, PartialEq)]
pub enum DidError {
    #[error("Parsing of did failed, {0}")]
    Parse(#[from] peg::error::ParseError<peg::str::LineCol>),
    #[error("invalid method-specific id: {0}")]
    MethodSpecificId(String),
}

/// Errors surfaced to callers of [`ResolverRegistry::resolve`](crate::ResolverRegistry::resolve)
///
/// Resolution either fully succeeds or fails with exactly one of these
/// variants; no partial document is ever returned.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// the input does not parse into the DID URL grammar
    #[error(transparent)]
    Malformed(#[from] DidError),
    /// no resolver is registered for the identifier's `(prefix, method)` pair
    #[error("no resolver registered for `{0}`")]
    UnsupportedMethod(MethodId),
    /// the backend was reached but holds no record for the identifier
    #[error("no document found for `{did}`")]
    NotFound { did: String },
    /// transport failure reaching a remote backend; safe to retry at the call site
    #[error("backend unreachable: {0}")]
    BackendUnavailable(String),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Errors during registration with a [`ResolverRegistry`](crate::ResolverRegistry)
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// a resolver is already registered under this `(prefix, method)` pair
    #[error("a resolver is already registered for `{0}`")]
    Conflict(MethodId),
}

/// Errors from building or reshaping a canonical [`Document`](crate::types::Document)
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error("resolved value is not a JSON object")]
    NotAnObject,
}

/// Chain-specific decode failures for resource identifiers
#[derive(Error, Debug, PartialEq)]
pub enum IdFormatError {
    #[error("expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },
    #[error("prefix byte {actual:#04x} does not match {expected:#04x}")]
    Prefix { expected: u8, actual: u8 },
    #[error("checksum byte does not match the framed payload")]
    Checksum,
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
    #[error("{0}")]
    Base58(#[from] bs58::decode::Error),
    #[error("unknown chain tag `{0}`")]
    UnknownChain(String),
}

/// Errors from the [`TypeRegistry`](crate::versions::TypeRegistry), both at
/// construction (range table validation) and at lookup time
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TypesError {
    #[error("no type definitions registered for spec `{0}`")]
    UnknownSpec(String),
    #[error("version {version} predates the oldest registered range for `{spec}`")]
    UnsupportedVersion { spec: String, version: u32 },
    #[error("range [{min}, {max}] is inverted")]
    Inverted { min: u32, max: u32 },
    #[error("version ranges overlap at version {0}")]
    Overlap(u32),
    #[error("version ranges leave a gap starting at version {0}")]
    Gap(u32),
    #[error("the final range for `{0}` must be open-ended")]
    BoundedTail(String),
    #[error("spec `{0}` has no ranges")]
    Empty(String),
}

/// Errors from a [`DidLedger`](crate::methods::DidLedger) backend
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("ledger rpc error: {0}")]
    Rpc(String),
}

/// Configuration errors at the JSON-LD expansion boundary
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("`document_loader` and `resolver` are mutually exclusive")]
    LoaderConflict,
}

impl From<ResolutionError> for ErrorObjectOwned {
    fn from(err: ResolutionError) -> Self {
        let code = match &err {
            ResolutionError::Malformed(_) => -31001,
            ResolutionError::UnsupportedMethod(_) => -31002,
            ResolutionError::NotFound { .. } => -31003,
            ResolutionError::BackendUnavailable(_) => -31004,
            ResolutionError::Document(_) => -31005,
        };
        ErrorObjectOwned::owned(code, err.to_string(), None::<()>)
    }
}

impl From<IdFormatError> for ErrorObjectOwned {
    fn from(err: IdFormatError) -> Self {
        ErrorObjectOwned::owned(-31010, err.to_string(), None::<()>)
    }
}

impl From<TypesError> for ErrorObjectOwned {
    fn from(err: TypesError) -> Self {
        let code = match &err {
            TypesError::UnknownSpec(_) => -31020,
            TypesError::UnsupportedVersion { .. } => -31021,
            _ => -31022,
        };
        ErrorObjectOwned::owned(code, err.to_string(), None::<()>)
    }
}
