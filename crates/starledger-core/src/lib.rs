//! # Star Ledger Core
//!
//! Pure primitives for the Star Ledger: blocks, canonical hashing, payload
//! encoding, ownership challenges and chain validation.
//!
//! This crate contains no locks, no clock and no I/O. It is pure computation
//! over hash-linked data structures.
//!
//! ## Key Types
//!
//! - [`Block`] - One sealed, immutable unit of the ledger
//! - [`BlockHash`] - Content hash (SHA-256 over canonical CBOR)
//! - [`Registration`] / [`Star`] - The payload binding a star to a wallet
//! - [`Challenge`] - The message a wallet signs to prove ownership
//! - [`SignatureVerifier`] - The trusted signature-verification seam
//!
//! ## Canonicalization
//!
//! Block headers are hashed over deterministic CBOR. See [`canonical`].

pub mod block;
pub mod canonical;
pub mod challenge;
pub mod crypto;
pub mod error;
pub mod payload;
pub mod types;
pub mod validation;

pub use block::{Block, GENESIS_POSITION};
pub use canonical::canonical_header_bytes;
pub use challenge::{Challenge, DOMAIN_TAG};
pub use crypto::{Ed25519Verifier, Keypair, SignatureVerifier, WalletSignature};
pub use error::{CoreError, ValidationError};
pub use payload::{
    decode_genesis, decode_registration, encode_genesis, encode_registration, GenesisPayload,
    Registration, Star, GENESIS_DATA,
};
pub use types::BlockHash;
pub use validation::{validate_chain, ChainReport, FindingKind, IntegrityFinding};
