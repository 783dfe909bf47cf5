//! Chain validation: self-hash and link checks over a whole chain.
//!
//! Corruption is data, not an error. Every inconsistency becomes an
//! [`IntegrityFinding`] and the walk always covers the full chain.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::block::Block;
use crate::types::BlockHash;

/// The nature of an integrity break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingKind {
    /// The stored hash no longer matches the block's contents.
    SelfHashMismatch {
        stored: BlockHash,
        computed: BlockHash,
    },

    /// The next block does not record this block's hash as its predecessor.
    BrokenLink {
        expected: BlockHash,
        found: Option<BlockHash>,
    },

    /// The block's position does not match its index in the chain.
    PositionMismatch { found: u64 },

    /// The genesis block records a predecessor.
    GenesisHasPredecessor { found: BlockHash },
}

/// One detected inconsistency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityFinding {
    /// Index of the offending block.
    pub position: u64,
    pub kind: FindingKind,
}

impl fmt::Display for IntegrityFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FindingKind::SelfHashMismatch { stored, computed } => write!(
                f,
                "block {}: stored hash {} but contents hash to {}",
                self.position, stored, computed
            ),
            FindingKind::BrokenLink { expected, found } => write!(
                f,
                "block {}: next block links to {:?}, expected {}",
                self.position, found, expected
            ),
            FindingKind::PositionMismatch { found } => {
                write!(f, "block {}: recorded position is {}", self.position, found)
            }
            FindingKind::GenesisHasPredecessor { found } => {
                write!(f, "block {}: genesis links to {}", self.position, found)
            }
        }
    }
}

/// The outcome of validating a chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainReport {
    /// Number of blocks inspected.
    pub blocks_checked: usize,
    /// All findings, in position order.
    pub findings: Vec<IntegrityFinding>,
}

impl ChainReport {
    /// A chain with zero findings is valid.
    pub fn is_valid(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings at the given position.
    pub fn findings_at(&self, position: u64) -> impl Iterator<Item = &IntegrityFinding> {
        self.findings.iter().filter(move |f| f.position == position)
    }
}

/// Validate a chain of blocks.
///
/// For every block this checks:
/// - its stored hash against a recomputation (self-tamper check)
/// - its recorded position against its index
/// - its hash against the next block's `previous_hash` (skipped for the last)
///
/// and that the genesis block has no predecessor.
pub fn validate_chain(blocks: &[Block]) -> ChainReport {
    let mut findings = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        let position = index as u64;

        let computed = block.compute_hash();
        if computed != block.hash {
            findings.push(IntegrityFinding {
                position,
                kind: FindingKind::SelfHashMismatch {
                    stored: block.hash,
                    computed,
                },
            });
        }

        if block.position != position {
            findings.push(IntegrityFinding {
                position,
                kind: FindingKind::PositionMismatch {
                    found: block.position,
                },
            });
        }

        if index == 0 {
            if let Some(found) = block.previous_hash {
                findings.push(IntegrityFinding {
                    position,
                    kind: FindingKind::GenesisHasPredecessor { found },
                });
            }
        }

        if let Some(next) = blocks.get(index + 1) {
            if next.previous_hash != Some(block.hash) {
                findings.push(IntegrityFinding {
                    position,
                    kind: FindingKind::BrokenLink {
                        expected: block.hash,
                        found: next.previous_hash,
                    },
                });
            }
        }
    }

    ChainReport {
        blocks_checked: blocks.len(),
        findings,
    }
}
