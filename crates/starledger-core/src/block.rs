//! Block: one immutable unit of the ledger.
//!
//! A block is sealed exactly once. Sealing fixes every field and computes the
//! content hash over all of them; the hash is never recomputed into the block
//! afterwards, so any later change is visible to [`Block::self_check`].

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::canonical::canonical_header_bytes;
use crate::error::CoreError;
use crate::payload::{decode_registration, Registration};
use crate::types::BlockHash;

/// Position of the genesis block.
pub const GENESIS_POSITION: u64 = 0;

/// A sealed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Index of this block in the chain (0 for genesis).
    pub position: u64,

    /// Encoded payload bytes.
    pub payload: Bytes,

    /// Seconds since the Unix epoch at append time.
    pub created_at: i64,

    /// Hash of the preceding block (None for genesis).
    pub previous_hash: Option<BlockHash>,

    /// Content hash over every other field, fixed at sealing.
    pub hash: BlockHash,
}

impl Block {
    /// Assemble a block and compute its hash.
    pub fn seal(
        position: u64,
        created_at: i64,
        previous_hash: Option<BlockHash>,
        payload: impl Into<Bytes>,
    ) -> Self {
        let payload = payload.into();
        let header = canonical_header_bytes(position, created_at, previous_hash.as_ref(), &payload);
        Self {
            position,
            payload,
            created_at,
            previous_hash,
            hash: BlockHash::digest(&header),
        }
    }

    /// Recompute the content hash from the block's current fields.
    pub fn compute_hash(&self) -> BlockHash {
        let header = canonical_header_bytes(
            self.position,
            self.created_at,
            self.previous_hash.as_ref(),
            &self.payload,
        );
        BlockHash::digest(&header)
    }

    /// Check that the stored hash still matches the block's contents.
    pub fn self_check(&self) -> bool {
        self.compute_hash() == self.hash
    }

    /// Check if this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.position == GENESIS_POSITION
    }

    /// Decode the registration carried by this block.
    ///
    /// The genesis block carries no registration and yields `None`.
    pub fn registration(&self) -> Result<Option<Registration>, CoreError> {
        if self.is_genesis() {
            return Ok(None);
        }
        decode_registration(&self.payload).map(Some)
    }
}
