//! The Ledger: an append-only, hash-linked chain of blocks held in memory.
//!
//! The ledger is the sole owner of its blocks. All mutation goes through
//! [`Ledger::append`] (and the genesis append in [`Ledger::initialize`]),
//! which holds the write lock from reading the chain head until the new
//! block is pushed. Readers get clones, never references into the chain.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytes::Bytes;
use starledger_core::{
    encode_genesis, validate_chain, Block, BlockHash, ChainReport, GenesisPayload, Star,
};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::error::{LedgerError, Result};

/// An in-memory, single-writer ledger.
pub struct Ledger {
    blocks: RwLock<Vec<Block>>,
    clock: Arc<dyn Clock>,
}

impl Ledger {
    /// Create a ledger on the system clock with its genesis block in place.
    pub fn new() -> Result<Self> {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a ledger on the given clock with its genesis block in place.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Result<Self> {
        let ledger = Self::uninitialized(clock);
        ledger.initialize()?;
        Ok(ledger)
    }

    /// Create an empty ledger (height -1). Call [`Ledger::initialize`]
    /// before anything else.
    pub fn uninitialized(clock: Arc<dyn Clock>) -> Self {
        Self {
            blocks: RwLock::new(Vec::new()),
            clock,
        }
    }

    /// Adopt an existing chain as-is.
    ///
    /// Blocks are not re-hashed or re-linked; use [`Ledger::validate`] to
    /// find out whether the imported chain is consistent.
    pub fn from_blocks(blocks: Vec<Block>, clock: Arc<dyn Clock>) -> Self {
        Self {
            blocks: RwLock::new(blocks),
            clock,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────────

    /// Create the genesis block if the chain is empty.
    ///
    /// Returns the genesis block whether it was created now or already
    /// existed; calling this twice never produces a second genesis.
    pub fn initialize(&self) -> Result<Block> {
        let mut blocks = self.write();
        if let Some(genesis) = blocks.first() {
            return Ok(genesis.clone());
        }

        let payload = encode_genesis(&GenesisPayload::default())?;
        let genesis = self.append_locked(&mut blocks, payload);
        info!(hash = %genesis.hash, "created genesis block");
        Ok(genesis)
    }

    /// Append a block carrying `payload`.
    ///
    /// Position, timestamp and predecessor link are assigned here. The block
    /// is sealed before it is pushed, so the chain only ever grows by whole
    /// blocks.
    pub fn append(&self, payload: impl Into<Bytes>) -> Block {
        let mut blocks = self.write();
        self.append_locked(&mut blocks, payload.into())
    }

    fn append_locked(&self, blocks: &mut RwLockWriteGuard<'_, Vec<Block>>, payload: Bytes) -> Block {
        let position = blocks.len() as u64;
        let previous_hash = blocks.last().map(|b| b.hash);
        let created_at = self.clock.now_secs();

        let block = Block::seal(position, created_at, previous_hash, payload);
        blocks.push(block.clone());

        debug!(position, hash = %block.hash, "appended block");
        block
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Chain height: -1 before genesis, 0 with only genesis, N after N
    /// further appends.
    pub fn height(&self) -> i64 {
        self.read().len() as i64 - 1
    }

    /// Check whether the genesis block exists.
    pub fn is_initialized(&self) -> bool {
        !self.read().is_empty()
    }

    /// Find the first block with the given hash.
    pub fn find_by_hash(&self, hash: &BlockHash) -> Option<Block> {
        self.read().iter().find(|b| b.hash == *hash).cloned()
    }

    /// Find a block by hex-encoded hash. Input that isn't a valid hash is
    /// simply not found.
    pub fn find_by_hash_hex(&self, hash: &str) -> Option<Block> {
        let hash = BlockHash::from_hex(hash).ok()?;
        self.find_by_hash(&hash)
    }

    /// Get the block at `position`, if any.
    pub fn find_by_position(&self, position: u64) -> Option<Block> {
        let blocks = self.read();
        usize::try_from(position)
            .ok()
            .and_then(|index| blocks.get(index))
            .cloned()
    }

    /// All stars registered by `address`, oldest first.
    ///
    /// Addresses are compared exactly. No matches is an empty list; a block
    /// whose payload cannot be decoded is an error.
    pub fn list_claims_by_owner(&self, address: &str) -> Result<Vec<Star>> {
        Ok(self
            .owned_blocks(address)?
            .into_iter()
            .map(|(_, star)| star)
            .collect())
    }

    /// All blocks registered by `address`, oldest first.
    pub fn blocks_by_owner(&self, address: &str) -> Result<Vec<Block>> {
        Ok(self
            .owned_blocks(address)?
            .into_iter()
            .map(|(block, _)| block)
            .collect())
    }

    fn owned_blocks(&self, address: &str) -> Result<Vec<(Block, Star)>> {
        let blocks = self.read();
        let mut owned = Vec::new();
        for block in blocks.iter().filter(|b| !b.is_genesis()) {
            if let Some(registration) = block.registration()? {
                if registration.owner == address {
                    owned.push((block.clone(), registration.star));
                }
            }
        }
        Ok(owned)
    }

    /// The clock block timestamps are taken from.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// A consistent snapshot of the whole chain.
    pub fn blocks(&self) -> Vec<Block> {
        self.read().clone()
    }

    /// Walk the chain and report every integrity break.
    ///
    /// A corrupt chain is not an error; only an uninitialized one is.
    pub fn validate(&self) -> Result<ChainReport> {
        let blocks = self.read();
        if blocks.is_empty() {
            return Err(LedgerError::NotInitialized);
        }
        let report = validate_chain(&blocks);
        debug!(
            blocks = report.blocks_checked,
            findings = report.findings.len(),
            "validated chain"
        );
        Ok(report)
    }

    // A panic while holding the lock cannot leave a half-built block behind:
    // blocks are fully sealed before the single push.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Block>> {
        self.blocks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Block>> {
        self.blocks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("height", &self.height())
            .finish()
    }
}
