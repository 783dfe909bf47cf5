//! Proptest generators for property-based testing.

use proptest::prelude::*;

use starledger_core::{BlockHash, Keypair, Star};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a valid wallet address.
pub fn address() -> impl Strategy<Value = String> {
    keypair().prop_map(|kp| kp.address())
}

/// Generate a random BlockHash.
pub fn block_hash() -> impl Strategy<Value = BlockHash> {
    any::<[u8; 32]>().prop_map(BlockHash::from_bytes)
}

/// Generate a declination such as `-12° 4' 33.1`.
pub fn declination() -> impl Strategy<Value = String> {
    (-89i32..=89, 0u32..60, 0u32..600)
        .prop_map(|(deg, min, tenths)| format!("{deg}° {min}' {}.{}", tenths / 10, tenths % 10))
}

/// Generate a right ascension such as `16h 29m 1.0s`.
pub fn right_ascension() -> impl Strategy<Value = String> {
    (0u32..24, 0u32..60, 0u32..600)
        .prop_map(|(h, m, tenths)| format!("{h}h {m}m {}.{}s", tenths / 10, tenths % 10))
}

/// Generate a star story, including non-ASCII text.
pub fn story() -> impl Strategy<Value = String> {
    "\\PC{0,64}"
}

/// Generate a star.
pub fn star() -> impl Strategy<Value = Star> {
    (declination(), right_ascension(), story())
        .prop_map(|(dec, ra, story)| Star::new(dec, ra, story))
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a registration plan: which of `owners` wallets claims which star,
/// in submission order.
pub fn claim_plan(owners: usize, max_claims: usize) -> impl Strategy<Value = Vec<(usize, Star)>> {
    prop::collection::vec((0..owners, star()), 0..=max_claims)
}
