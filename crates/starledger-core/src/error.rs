//! Error types for the Star Ledger core.

use thiserror::Error;

/// Core errors that can occur while encoding, decoding or hashing blocks.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("invalid block hash: {0}")]
    InvalidHash(String),
}

/// Validation errors for ownership challenges.
///
/// These describe malformed input, as opposed to a well-formed challenge
/// that fails the ownership checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("malformed challenge: {0}")]
    MalformedChallenge(String),

    #[error("invalid challenge timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("unexpected challenge domain tag: {0:?}")]
    UnexpectedDomainTag(String),

    #[error("challenge was issued for {found}, not {expected}")]
    AddressMismatch { expected: String, found: String },
}
