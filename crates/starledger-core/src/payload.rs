//! Block payloads: the structured content stored inside a block.
//!
//! Payloads are CBOR documents with named fields. The ledger stores them as
//! opaque bytes; only this module knows their shape.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The data carried by the genesis block.
pub const GENESIS_DATA: &str = "Genesis Block";

/// A star observation: the claim a wallet registers on the ledger.
///
/// Field names match the JSON objects clients submit, e.g.
/// `{"dec": "68° 52' 56.9", "ra": "16h 29m 1.0s", "story": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Star {
    /// Declination.
    pub dec: String,
    /// Right ascension.
    pub ra: String,
    /// Free-form story attached to the observation.
    pub story: String,
}

impl Star {
    pub fn new(dec: impl Into<String>, ra: impl Into<String>, story: impl Into<String>) -> Self {
        Self {
            dec: dec.into(),
            ra: ra.into(),
            story: story.into(),
        }
    }
}

/// Payload of every non-genesis block: a star bound to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Wallet address that proved ownership when registering.
    pub owner: String,
    /// The registered star.
    pub star: Star,
}

/// Sentinel payload of the genesis block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisPayload {
    pub data: String,
}

impl Default for GenesisPayload {
    fn default() -> Self {
        Self {
            data: GENESIS_DATA.to_string(),
        }
    }
}

/// Encode a registration into block payload bytes.
pub fn encode_registration(registration: &Registration) -> Result<Bytes, CoreError> {
    encode(registration)
}

/// Decode block payload bytes into a registration.
pub fn decode_registration(bytes: &[u8]) -> Result<Registration, CoreError> {
    decode(bytes)
}

/// Encode the genesis sentinel payload.
pub fn encode_genesis(genesis: &GenesisPayload) -> Result<Bytes, CoreError> {
    encode(genesis)
}

/// Decode the genesis sentinel payload.
pub fn decode_genesis(bytes: &[u8]) -> Result<GenesisPayload, CoreError> {
    decode(bytes)
}

fn encode<T: Serialize>(value: &T) -> Result<Bytes, CoreError> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf).map_err(|e| CoreError::Encoding(e.to_string()))?;
    Ok(buf.into())
}

fn decode<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T, CoreError> {
    ciborium::from_reader(bytes).map_err(|e| CoreError::Decoding(e.to_string()))
}
