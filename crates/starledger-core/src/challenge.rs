//! Ownership challenges: the message a wallet signs to prove control of an
//! address.
//!
//! Wire form: `"<address>:<timestampMillis>:starRegistry"`. A challenge is
//! never stored; its validity is re-derived from the embedded timestamp.

use std::fmt;

use crate::error::ValidationError;

/// Domain tag closing every challenge message.
pub const DOMAIN_TAG: &str = "starRegistry";

const SEPARATOR: char = ':';

/// A parsed ownership challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    /// Address the challenge was issued for.
    pub address: String,
    /// Issue time in Unix milliseconds.
    pub issued_at: i64,
}

impl Challenge {
    /// Create a challenge for `address` issued at `issued_at` milliseconds.
    pub fn new(address: impl Into<String>, issued_at: i64) -> Self {
        Self {
            address: address.into(),
            issued_at,
        }
    }

    /// Create a challenge that will survive [`Challenge::parse`].
    ///
    /// Addresses that are empty or contain the `':'` separator cannot be
    /// carried in a challenge message and are rejected.
    pub fn issue(address: impl Into<String>, issued_at: i64) -> Result<Self, ValidationError> {
        let address = address.into();
        if address.is_empty() {
            return Err(ValidationError::MalformedChallenge("empty address".into()));
        }
        if address.contains(SEPARATOR) {
            return Err(ValidationError::MalformedChallenge(format!(
                "address {address:?} contains '{SEPARATOR}'"
            )));
        }
        Ok(Self { address, issued_at })
    }

    /// Render the message to be signed.
    pub fn to_message(&self) -> String {
        self.to_string()
    }

    /// Parse a signed challenge message.
    pub fn parse(message: &str) -> Result<Self, ValidationError> {
        let fields: Vec<&str> = message.split(SEPARATOR).collect();
        let [address, timestamp, tag] = fields.as_slice() else {
            return Err(ValidationError::MalformedChallenge(format!(
                "expected 3 fields separated by '{}', got {}",
                SEPARATOR,
                fields.len()
            )));
        };

        if address.is_empty() {
            return Err(ValidationError::MalformedChallenge("empty address".into()));
        }

        let issued_at = timestamp
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidTimestamp((*timestamp).to_string()))?;

        if *tag != DOMAIN_TAG {
            return Err(ValidationError::UnexpectedDomainTag((*tag).to_string()));
        }

        Ok(Self {
            address: (*address).to_string(),
            issued_at,
        })
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.address,
            self.issued_at,
            DOMAIN_TAG,
            sep = SEPARATOR
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_format() {
        let challenge = Challenge::new("addr1", 1_736_870_400_000);
        assert_eq!(challenge.to_message(), "addr1:1736870400000:starRegistry");
    }

    #[test]
    fn test_parse_issued_message() {
        let challenge = Challenge::new("abcdef", 1_736_870_400_123);
        let parsed = Challenge::parse(&challenge.to_message()).unwrap();
        assert_eq!(parsed, challenge);
    }

    #[test]
    fn test_non_numeric_timestamp() {
        let result = Challenge::parse("addr1:yesterday:starRegistry");
        assert_eq!(
            result,
            Err(ValidationError::InvalidTimestamp("yesterday".into()))
        );
    }

    #[test]
    fn test_missing_fields() {
        assert!(matches!(
            Challenge::parse("addr1"),
            Err(ValidationError::MalformedChallenge(_))
        ));
        assert!(matches!(
            Challenge::parse("addr1:1736870400000"),
            Err(ValidationError::MalformedChallenge(_))
        ));
        assert!(matches!(
            Challenge::parse("addr1:1:starRegistry:extra"),
            Err(ValidationError::MalformedChallenge(_))
        ));
        assert!(matches!(
            Challenge::parse(":1736870400000:starRegistry"),
            Err(ValidationError::MalformedChallenge(_))
        ));
    }

    #[test]
    fn test_issue_rejects_unrepresentable_addresses() {
        assert!(matches!(
            Challenge::issue("bc1:q", 1),
            Err(ValidationError::MalformedChallenge(_))
        ));
        assert!(matches!(
            Challenge::issue("", 1),
            Err(ValidationError::MalformedChallenge(_))
        ));

        let issued = Challenge::issue("bc1q", 1_736_870_400_000).unwrap();
        assert_eq!(Challenge::parse(&issued.to_message()), Ok(issued));
    }

    #[test]
    fn test_wrong_domain_tag() {
        assert_eq!(
            Challenge::parse("addr1:1736870400000:otherRegistry"),
            Err(ValidationError::UnexpectedDomainTag("otherRegistry".into()))
        );
    }
}
