//! The star registry: ownership verification in front of the ledger.
//!
//! Registration is a challenge/response exchange:
//!
//! 1. The client asks for a challenge for its address.
//! 2. The client signs the challenge with the wallet key, off-ledger.
//! 3. The client submits address, challenge, signature and star.
//! 4. The registry appends the star iff the challenge is younger than the
//!    ownership window *and* the signature verifies.

use starledger_core::{
    encode_registration, Block, Challenge, Ed25519Verifier, Registration, SignatureVerifier,
    Star, ValidationError, WalletSignature,
};
use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::error::{LedgerError, OwnershipError, Result};
use crate::ledger::Ledger;

/// Ownership-verifying front end to a [`Ledger`].
pub struct StarRegistry<V: SignatureVerifier = Ed25519Verifier> {
    ledger: Ledger,
    verifier: V,
    config: RegistryConfig,
}

impl StarRegistry<Ed25519Verifier> {
    /// Create a registry over `ledger` using Ed25519 wallet signatures.
    pub fn ed25519(ledger: Ledger, config: RegistryConfig) -> Result<Self> {
        Self::new(ledger, Ed25519Verifier, config)
    }
}

impl<V: SignatureVerifier> StarRegistry<V> {
    /// Create a registry. The ledger's clock drives challenge timestamps.
    pub fn new(ledger: Ledger, verifier: V, config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ledger,
            verifier,
            config,
        })
    }

    /// The underlying ledger, for lookups and validation.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Issue a challenge for `address`: `"<address>:<nowMillis>:starRegistry"`.
    ///
    /// Nothing is recorded; the challenge carries its own timestamp. An
    /// address containing `':'` could never be submitted back, so it fails
    /// here with [`LedgerError::Validation`].
    pub fn issue_challenge(&self, address: &str) -> Result<String> {
        let challenge = Challenge::issue(address, self.ledger.clock().now_millis())?;
        Ok(challenge.to_message())
    }

    /// Register `star` for `address` if `signature` over `message` proves
    /// ownership within the window.
    ///
    /// Malformed messages fail with [`LedgerError::Validation`]; expired,
    /// future-dated or badly signed challenges fail with
    /// [`LedgerError::Ownership`]. The ledger is unchanged on any failure.
    pub fn submit_claim(
        &self,
        address: &str,
        message: &str,
        signature: &WalletSignature,
        star: Star,
    ) -> Result<Block> {
        self.submit(address, message, Some(signature), star)
    }

    /// Like [`StarRegistry::submit_claim`], with the signature hex-encoded.
    ///
    /// A signature that isn't 64 bytes of hex is treated as invalid.
    pub fn submit_claim_hex(
        &self,
        address: &str,
        message: &str,
        signature_hex: &str,
        star: Star,
    ) -> Result<Block> {
        let signature = WalletSignature::from_hex(signature_hex).ok();
        self.submit(address, message, signature.as_ref(), star)
    }

    fn submit(
        &self,
        address: &str,
        message: &str,
        signature: Option<&WalletSignature>,
        star: Star,
    ) -> Result<Block> {
        let challenge = Challenge::parse(message).map_err(|e| self.reject(address, e))?;
        if challenge.address != address {
            return Err(self.reject(
                address,
                ValidationError::AddressMismatch {
                    expected: address.to_string(),
                    found: challenge.address,
                },
            ));
        }

        let elapsed_ms = self
            .ledger
            .clock()
            .now_millis()
            .saturating_sub(challenge.issued_at);
        let verified = signature
            .map(|sig| self.verifier.verify(message.as_bytes(), address, sig))
            .unwrap_or(false);

        self.check_window(elapsed_ms)
            .map_err(|e| self.reject(address, e))?;
        if !verified {
            return Err(self.reject(address, OwnershipError::InvalidSignature));
        }

        let payload = encode_registration(&Registration {
            owner: address.to_string(),
            star,
        })?;
        let block = self.ledger.append(payload);
        debug!(address, position = block.position, "registered star");
        Ok(block)
    }

    fn check_window(&self, elapsed_ms: i64) -> std::result::Result<(), OwnershipError> {
        let window_ms = self.config.window_millis();
        if elapsed_ms < 0 {
            return Err(OwnershipError::ChallengeFromFuture {
                skew_ms: elapsed_ms.saturating_neg(),
            });
        }
        if elapsed_ms >= window_ms {
            return Err(OwnershipError::ChallengeExpired {
                elapsed_ms,
                window_ms,
            });
        }
        Ok(())
    }

    fn reject(&self, address: &str, error: impl Into<LedgerError>) -> LedgerError {
        let error = error.into();
        warn!(address, %error, "rejected star registration");
        error
    }
}

impl<V: SignatureVerifier> std::fmt::Debug for StarRegistry<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StarRegistry")
            .field("ledger", &self.ledger)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use starledger_core::Keypair;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    const T0: i64 = 1_736_870_400_000;

    struct TestClock(AtomicI64);

    impl TestClock {
        fn advance(&self, ms: i64) {
            self.0.fetch_add(ms, Ordering::SeqCst);
        }
    }

    impl Clock for TestClock {
        fn now_millis(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn registry(window: Duration) -> (StarRegistry, Arc<TestClock>) {
        let clock = Arc::new(TestClock(AtomicI64::new(T0)));
        let ledger = Ledger::with_clock(clock.clone()).unwrap();
        let config = RegistryConfig::default().with_ownership_window(window);
        (StarRegistry::ed25519(ledger, config).unwrap(), clock)
    }

    fn star() -> Star {
        Star::new("68° 52' 56.9", "16h 29m 1.0s", "test")
    }

    #[test]
    fn test_issue_challenge_format() {
        let (registry, _) = registry(Duration::from_secs(300));
        assert_eq!(
            registry.issue_challenge("addr1").unwrap(),
            format!("addr1:{T0}:starRegistry")
        );
    }

    #[test]
    fn test_accepts_signed_claim() {
        let (registry, clock) = registry(Duration::from_secs(300));
        let wallet = Keypair::from_seed(&[7; 32]);
        let address = wallet.address();

        let message = registry.issue_challenge(&address).unwrap();
        let signature = wallet.sign(message.as_bytes());
        clock.advance(1_000);

        let block = registry
            .submit_claim(&address, &message, &signature, star())
            .unwrap();
        assert_eq!(block.position, 1);
        assert_eq!(registry.ledger().height(), 1);
        assert_eq!(registry.ledger().list_claims_by_owner(&address).unwrap(), vec![star()]);
    }

    #[test]
    fn test_window_boundary() {
        let (registry, clock) = registry(Duration::from_millis(10_000));
        let wallet = Keypair::from_seed(&[7; 32]);
        let address = wallet.address();

        let message = registry.issue_challenge(&address).unwrap();
        let signature = wallet.sign(message.as_bytes());

        clock.advance(9_999);
        assert!(registry.submit_claim(&address, &message, &signature, star()).is_ok());

        clock.advance(2);
        let err = registry
            .submit_claim(&address, &message, &signature, star())
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Ownership(OwnershipError::ChallengeExpired {
                elapsed_ms: 10_001,
                window_ms: 10_000
            })
        ));
        assert_eq!(registry.ledger().height(), 1);
    }

    #[test]
    fn test_invalid_signature_rejected() {
        let (registry, _) = registry(Duration::from_secs(300));
        let wallet = Keypair::from_seed(&[7; 32]);
        let impostor = Keypair::from_seed(&[8; 32]);
        let address = wallet.address();

        let message = registry.issue_challenge(&address).unwrap();
        let signature = impostor.sign(message.as_bytes());

        let err = registry
            .submit_claim(&address, &message, &signature, star())
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Ownership(OwnershipError::InvalidSignature)
        ));
        assert_eq!(registry.ledger().height(), 0);
    }

    #[test]
    fn test_expired_reported_before_bad_signature() {
        let (registry, clock) = registry(Duration::from_secs(1));
        let address = Keypair::from_seed(&[7; 32]).address();
        let message = registry.issue_challenge(&address).unwrap();
        clock.advance(5_000);

        let err = registry
            .submit_claim(&address, &message, &WalletSignature::ZERO, star())
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Ownership(OwnershipError::ChallengeExpired { .. })
        ));
    }

    #[test]
    fn test_future_challenge_rejected() {
        let (registry, _) = registry(Duration::from_secs(300));
        let wallet = Keypair::from_seed(&[7; 32]);
        let address = wallet.address();
        let message = Challenge::new(address.clone(), T0 + 60_000).to_message();
        let signature = wallet.sign(message.as_bytes());

        let err = registry
            .submit_claim(&address, &message, &signature, star())
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Ownership(OwnershipError::ChallengeFromFuture { skew_ms: 60_000 })
        ));
    }

    #[test]
    fn test_malformed_message() {
        let (registry, _) = registry(Duration::from_secs(300));
        let wallet = Keypair::from_seed(&[7; 32]);
        let address = wallet.address();
        let message = format!("{address}:soon:starRegistry");
        let signature = wallet.sign(message.as_bytes());

        let err = registry
            .submit_claim(&address, &message, &signature, star())
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_challenge_for_other_address() {
        let (registry, _) = registry(Duration::from_secs(300));
        let wallet = Keypair::from_seed(&[7; 32]);
        let other = Keypair::from_seed(&[8; 32]);
        let message = registry.issue_challenge(&other.address()).unwrap();
        let signature = wallet.sign(message.as_bytes());

        let err = registry
            .submit_claim(&wallet.address(), &message, &signature, star())
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::AddressMismatch { .. })
        ));
    }

    #[test]
    fn test_submit_claim_hex() {
        let (registry, _) = registry(Duration::from_secs(300));
        let wallet = Keypair::from_seed(&[7; 32]);
        let address = wallet.address();
        let message = registry.issue_challenge(&address).unwrap();
        let signature = wallet.sign(message.as_bytes());

        assert!(registry
            .submit_claim_hex(&address, &message, &signature.to_hex(), star())
            .is_ok());

        let err = registry
            .submit_claim_hex(&address, &message, "zz", star())
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Ownership(OwnershipError::InvalidSignature)
        ));
    }

    #[test]
    fn test_issue_challenge_rejects_separator_in_address() {
        let (registry, _) = registry(Duration::from_secs(300));
        let err = registry.issue_challenge("bc1:q").unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::MalformedChallenge(_))
        ));
    }

    #[test]
    fn test_zero_window_config_rejected() {
        let ledger = Ledger::new().unwrap();
        let config = RegistryConfig::default().with_ownership_window(Duration::ZERO);
        assert!(matches!(
            StarRegistry::ed25519(ledger, config),
            Err(LedgerError::InvalidConfig(_))
        ));
    }
}
