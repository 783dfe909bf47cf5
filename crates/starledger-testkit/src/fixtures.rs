//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use starledger::{Block, Clock, Ledger, RegistryConfig, Result, StarRegistry};
use starledger_core::{Keypair, Star, WalletSignature};
use tracing_subscriber::EnvFilter;

/// 2025-01-14T16:00:00Z in Unix milliseconds.
pub const EPOCH_MS: i64 = 1_736_870_400_000;

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Create a clock reading `millis`.
    pub fn new(millis: i64) -> Self {
        Self {
            now: AtomicI64::new(millis),
        }
    }

    /// Set the current time.
    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.advance_millis(by.as_millis() as i64);
    }

    /// Move the clock by `millis` (negative moves it back).
    pub fn advance_millis(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(EPOCH_MS)
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// A wallet with a known key.
#[derive(Debug, Clone)]
pub struct TestWallet {
    pub keypair: Keypair,
}

impl TestWallet {
    /// Create a wallet with a random key.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
        }
    }

    /// Create with a deterministic key from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
        }
    }

    /// The wallet's address.
    pub fn address(&self) -> String {
        self.keypair.address()
    }

    /// Sign a challenge message the way a wallet client would.
    pub fn sign_challenge(&self, challenge: &str) -> WalletSignature {
        self.keypair.sign(challenge.as_bytes())
    }
}

impl Default for TestWallet {
    fn default() -> Self {
        Self::new()
    }
}

/// Create distinct deterministic wallets for multi-party tests.
pub fn wallets(count: usize) -> Vec<TestWallet> {
    (0..count)
        .map(|i| {
            let mut seed = [0x5a; 32];
            seed[..8].copy_from_slice(&(i as u64).to_le_bytes());
            TestWallet::with_seed(seed)
        })
        .collect()
}

/// A registry over a fresh ledger driven by a [`ManualClock`].
#[derive(Debug)]
pub struct TestRegistry {
    pub registry: StarRegistry,
    pub clock: Arc<ManualClock>,
}

impl TestRegistry {
    /// Default window, clock at [`EPOCH_MS`].
    pub fn new() -> Result<Self> {
        Self::with_config(RegistryConfig::default())
    }

    /// Custom ownership window, clock at [`EPOCH_MS`].
    pub fn with_window(window: Duration) -> Result<Self> {
        Self::with_config(RegistryConfig::default().with_ownership_window(window))
    }

    fn with_config(config: RegistryConfig) -> Result<Self> {
        let clock = Arc::new(ManualClock::default());
        let ledger = Ledger::with_clock(clock.clone())?;
        Ok(Self {
            registry: StarRegistry::ed25519(ledger, config)?,
            clock,
        })
    }

    /// The underlying ledger.
    pub fn ledger(&self) -> &Ledger {
        self.registry.ledger()
    }

    /// Run the whole challenge/sign/submit exchange for `wallet` without
    /// advancing the clock.
    pub fn claim(&self, wallet: &TestWallet, star: Star) -> Result<Block> {
        let address = wallet.address();
        let challenge = self.registry.issue_challenge(&address)?;
        let signature = wallet.sign_challenge(&challenge);
        self.registry.submit_claim(&address, &challenge, &signature, star)
    }
}

/// The star used throughout the registration scenarios.
pub fn sample_star() -> Star {
    Star::new("68° 52' 56.9", "16h 29m 1.0s", "test")
}

/// Install a test-friendly tracing subscriber.
///
/// Honors `RUST_LOG`, defaulting to `warn`. Safe to call from every test.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(1_000);
        clock.advance(Duration::from_millis(500));
        assert_eq!(clock.now_millis(), 1_500);
        clock.advance_millis(-2_000);
        assert_eq!(clock.now_millis(), -500);
        clock.set(EPOCH_MS);
        assert_eq!(clock.now_secs(), EPOCH_MS / 1000);
    }

    #[test]
    fn test_wallets_are_distinct() {
        let parties = wallets(3);
        let addresses: Vec<_> = parties.iter().map(TestWallet::address).collect();
        assert_ne!(addresses[0], addresses[1]);
        assert_ne!(addresses[1], addresses[2]);
        assert_ne!(addresses[0], addresses[2]);
    }

    #[test]
    fn test_many_wallets_stay_distinct() {
        let addresses: HashSet<_> = wallets(300).iter().map(TestWallet::address).collect();
        assert_eq!(addresses.len(), 300);
    }

    #[test]
    fn test_fixture_claim() {
        let fixture = TestRegistry::new().unwrap();
        let wallet = TestWallet::with_seed([0x42; 32]);

        let block = fixture.claim(&wallet, sample_star()).unwrap();
        assert_eq!(block.position, 1);
        assert_eq!(block.created_at, EPOCH_MS / 1000);
    }
}
