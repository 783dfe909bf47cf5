//! # Star Ledger
//!
//! An append-only, hash-linked ledger of star registrations, each bound to
//! the wallet address that proved ownership of it.
//!
//! ## Overview
//!
//! - **Ledger**: The in-memory chain. Appends are serialized; every block
//!   links to the hash of its predecessor.
//! - **Registry**: Challenge/response ownership proof in front of the ledger.
//!   A star is recorded only for a wallet that signed a fresh challenge.
//! - **Validation**: A full-chain walk that reports every integrity break
//!   without stopping at the first.
//!
//! ## Usage
//!
//! ```rust
//! use starledger::{Ledger, RegistryConfig, StarRegistry};
//! use starledger::core::{Keypair, Star};
//!
//! let registry = StarRegistry::ed25519(Ledger::new()?, RegistryConfig::default())?;
//! let wallet = Keypair::generate();
//! let address = wallet.address();
//!
//! let challenge = registry.issue_challenge(&address)?;
//! let signature = wallet.sign(challenge.as_bytes());
//! let star = Star::new("68° 52' 56.9", "16h 29m 1.0s", "first light");
//!
//! let block = registry.submit_claim(&address, &challenge, &signature, star)?;
//! assert_eq!(block.position, 1);
//! assert!(registry.ledger().validate()?.is_valid());
//! # Ok::<(), starledger::LedgerError>(())
//! ```
//!
//! ## Re-exports
//!
//! - `starledger::core` - Core primitives (Block, BlockHash, Star, etc.)

pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod registry;

pub use starledger_core as core;

pub use clock::{Clock, SystemClock};
pub use config::{RegistryConfig, DEFAULT_OWNERSHIP_WINDOW};
pub use error::{LedgerError, OwnershipError, Result};
pub use ledger::Ledger;
pub use registry::StarRegistry;

pub use starledger_core::{
    Block, BlockHash, ChainReport, FindingKind, IntegrityFinding, Registration, Star,
    WalletSignature,
};
