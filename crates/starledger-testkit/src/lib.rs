//! # Star Ledger Testkit
//!
//! Testing utilities for the Star Ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: A manual clock, deterministic wallets and a ready-made
//!   registry for setting up test scenarios
//! - **Generators**: Proptest strategies for property-based testing
//! - **Tracing**: [`init_tracing`] to see ledger logs in test output
//!
//! The workspace's integration tests live in this crate's `tests/`
//! directory.
//!
//! ## Test Fixtures
//!
//! ```rust
//! use starledger_testkit::{sample_star, TestRegistry, TestWallet};
//!
//! let fixture = TestRegistry::new().unwrap();
//! let wallet = TestWallet::new();
//! fixture.claim(&wallet, sample_star()).unwrap();
//! assert_eq!(fixture.ledger().height(), 1);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use starledger_testkit::generators;
//!
//! proptest! {
//!     #[test]
//!     fn stars_register(star in generators::star()) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{
    init_tracing, sample_star, wallets, ManualClock, TestRegistry, TestWallet, EPOCH_MS,
};
