//! Error types for the ledger API.

use starledger_core::{CoreError, ValidationError};
use thiserror::Error;

/// Why a well-formed ownership claim was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OwnershipError {
    /// The challenge is older than the ownership window. Request a new one.
    #[error("challenge expired: {elapsed_ms}ms elapsed, window is {window_ms}ms")]
    ChallengeExpired { elapsed_ms: i64, window_ms: i64 },

    /// The challenge timestamp lies in the future.
    #[error("challenge issued {skew_ms}ms in the future")]
    ChallengeFromFuture { skew_ms: i64 },

    /// The signature does not verify against the address. Re-sign.
    #[error("signature does not verify for this address")]
    InvalidSignature,
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed input.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Ownership verification failed.
    #[error("ownership verification failed: {0}")]
    Ownership(#[from] OwnershipError),

    /// Payload encoding or decoding failed.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// The ledger has no genesis block yet.
    #[error("ledger is not initialized")]
    NotInitialized,

    /// Rejected configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
