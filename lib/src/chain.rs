//! Cross-chain resource identifier codec
//!
//! A resource identifier (an accumulator or blob id, for example) is a fixed
//! 32-byte payload framed by chain-specific rules: picking which rules apply
//! is the job of the [`ChainTag`]. Converting between chains re-frames the
//! payload and nothing else, so identifiers stay equivalent across chains.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use smart_default::SmartDefault;

use crate::error::IdFormatError;

/// Length of the chain-agnostic payload in bytes
pub const PAYLOAD_LEN: usize = 32;

/// The chain-agnostic 32-byte payload underneath a framed resource identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Payload(pub [u8; PAYLOAD_LEN]);

impl Payload {
    pub fn as_bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Identifies which chain's framing convention applies to a resource
/// identifier.
///
/// `dock` frames nothing: the raw bytes are the payload, rendered as hex.
/// The cheqd chains add a distinguishing prefix byte and a trailing checksum
/// byte, rendered as base58btc.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, SmartDefault, PartialOrd, Ord,
)]
#[serde(rename_all = "kebab-case")]
pub enum ChainTag {
    #[default]
    Dock,
    CheqdMainnet,
    CheqdTestnet,
}

impl ChainTag {
    /// The chain's distinguishing prefix byte, `None` when the chain frames
    /// the bare payload
    pub fn prefix(&self) -> Option<u8> {
        match self {
            ChainTag::Dock => None,
            ChainTag::CheqdMainnet => Some(0x63),
            ChainTag::CheqdTestnet => Some(0x74),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChainTag::Dock => "dock",
            ChainTag::CheqdMainnet => "cheqd-mainnet",
            ChainTag::CheqdTestnet => "cheqd-testnet",
        }
    }

    /// Every chain tag the codec supports
    pub fn all() -> [ChainTag; 3] {
        [ChainTag::Dock, ChainTag::CheqdMainnet, ChainTag::CheqdTestnet]
    }
}

impl fmt::Display for ChainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChainTag {
    type Err = IdFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dock" => Ok(ChainTag::Dock),
            "cheqd-mainnet" => Ok(ChainTag::CheqdMainnet),
            "cheqd-testnet" => Ok(ChainTag::CheqdTestnet),
            other => Err(IdFormatError::UnknownChain(other.to_string())),
        }
    }
}

// framing checksum: first byte of Keccak-256(prefix || payload)
fn frame_checksum(prefix: u8, payload: &[u8; PAYLOAD_LEN]) -> u8 {
    let mut hasher = Keccak256::new();
    hasher.update([prefix]);
    hasher.update(payload);
    hasher.finalize()[0]
}

/// A chain-tagged resource identifier.
///
/// Two identifiers for different chain tags are equivalent iff their decoded
/// payloads are bit-identical; compare with [`equivalent`](Self::equivalent).
/// Derived equality also requires the tags to match.
///
/// # Examples
/// ```
/// use lib_didresolver::{ChainTag, ResourceId};
///
/// let id = ResourceId::decode_str(
///     "0x0adb5ec7bcddb2b44d8d7f433b0a4c2b135ae8f0f7dbdbb1b070a3d4bb52d5fd",
///     ChainTag::Dock,
/// )
/// .unwrap();
/// let converted = id.convert(ChainTag::CheqdTestnet);
/// assert!(id.equivalent(&converted));
/// assert_eq!(converted.convert(ChainTag::Dock), id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId {
    payload: Payload,
    tag: ChainTag,
}

impl ResourceId {
    pub fn new(payload: Payload, tag: ChainTag) -> Self {
        Self { payload, tag }
    }

    /// Decodes a framed byte sequence under `tag`'s rules.
    ///
    /// # Errors
    /// [`IdFormatError`] when the length, prefix byte or checksum byte does
    /// not match the chain's rule set.
    pub fn decode(raw: &[u8], tag: ChainTag) -> Result<Self, IdFormatError> {
        match tag.prefix() {
            None => {
                let payload: [u8; PAYLOAD_LEN] =
                    raw.try_into().map_err(|_| IdFormatError::Length {
                        expected: PAYLOAD_LEN,
                        actual: raw.len(),
                    })?;
                Ok(Self::new(Payload(payload), tag))
            }
            Some(prefix) => {
                if raw.len() != PAYLOAD_LEN + 2 {
                    return Err(IdFormatError::Length {
                        expected: PAYLOAD_LEN + 2,
                        actual: raw.len(),
                    });
                }
                if raw[0] != prefix {
                    return Err(IdFormatError::Prefix {
                        expected: prefix,
                        actual: raw[0],
                    });
                }
                let mut payload = [0u8; PAYLOAD_LEN];
                payload.copy_from_slice(&raw[1..1 + PAYLOAD_LEN]);
                if raw[1 + PAYLOAD_LEN] != frame_checksum(prefix, &payload) {
                    return Err(IdFormatError::Checksum);
                }
                Ok(Self::new(Payload(payload), tag))
            }
        }
    }

    /// Decodes the chain's string rendering: `0x`-optional hex for bare
    /// payloads, base58btc for prefixed framings.
    pub fn decode_str(s: &str, tag: ChainTag) -> Result<Self, IdFormatError> {
        let raw = match tag.prefix() {
            None => hex::decode(s.strip_prefix("0x").unwrap_or(s))?,
            Some(_) => bs58::decode(s).into_vec()?,
        };
        Self::decode(&raw, tag)
    }

    /// Re-frames the payload under this identifier's chain rules
    pub fn encode(&self) -> Vec<u8> {
        match self.tag.prefix() {
            None => self.payload.0.to_vec(),
            Some(prefix) => {
                let mut raw = Vec::with_capacity(PAYLOAD_LEN + 2);
                raw.push(prefix);
                raw.extend_from_slice(&self.payload.0);
                raw.push(frame_checksum(prefix, &self.payload.0));
                raw
            }
        }
    }

    /// The chain's string rendering of [`encode`](Self::encode)
    pub fn encode_str(&self) -> String {
        match self.tag.prefix() {
            None => format!("0x{}", hex::encode(self.payload.0)),
            Some(_) => bs58::encode(self.encode()).into_string(),
        }
    }

    /// Re-tags this identifier for `target`, preserving the payload exactly.
    ///
    /// Pure and deterministic: `decode(convert(id, T).encode(), T)` always
    /// yields the payload of `id`.
    pub fn convert(&self, target: ChainTag) -> ResourceId {
        Self::new(self.payload, target)
    }

    /// Payload equality across chain tags; the framing never participates
    pub fn equivalent(&self, other: &ResourceId) -> bool {
        self.payload == other.payload
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn tag(&self) -> ChainTag {
        self.tag
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.encode_str(), self.tag)
    }
}
