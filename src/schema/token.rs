use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Newtype wrapper for token IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TokenId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address must start with 0x: {0:?}")]
    MissingPrefix(String),
    #[error("address must have 40 hex digits, got {0}")]
    BadLength(usize),
    #[error("invalid hex digit {0:?} in address")]
    BadDigit(char),
}

/// A 20-byte account identity.
///
/// The text form is `0x` followed by 40 lowercase hex digits. Parsing
/// accepts either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address. Tokens can never be transferred to it.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Build an address whose last eight bytes hold `n`.
    ///
    /// Handy for fixtures and demos where accounts are numbered.
    pub fn from_index(n: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| AddressError::MissingPrefix(s.to_string()))?;
        if digits.len() != 40 {
            return Err(AddressError::BadLength(digits.len()));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes).map_err(|e| match e {
            hex::FromHexError::InvalidHexCharacter { c, .. } => AddressError::BadDigit(c),
            _ => AddressError::BadLength(digits.len()),
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_lowercase_hex() {
        let addr = Address::from_index(0xab);
        assert_eq!(addr.to_string(), "0x00000000000000000000000000000000000000ab");
    }

    #[test]
    fn parse_accepts_mixed_case() {
        let addr: Address = "0x00000000000000000000000000000000000000AB".parse().unwrap();
        assert_eq!(addr, Address::from_index(0xab));
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        let err = "00000000000000000000000000000000000000ab"
            .parse::<Address>()
            .unwrap_err();
        assert!(matches!(err, AddressError::MissingPrefix(_)));
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!("0xabc".parse::<Address>(), Err(AddressError::BadLength(3)));
    }

    #[test]
    fn parse_rejects_bad_digit() {
        let err = "0x0000000000000000000000000000000000000zab"
            .parse::<Address>()
            .unwrap_err();
        assert_eq!(err, AddressError::BadDigit('z'));
    }

    #[test]
    fn parse_rejects_non_ascii_without_panicking() {
        // 38 ASCII digits plus one two-byte character: 40 bytes in total.
        let text = format!("0x{}é", "0".repeat(38));
        assert!(matches!(
            text.parse::<Address>(),
            Err(AddressError::BadDigit(_))
        ));
    }

    #[test]
    fn display_and_parse_agree() {
        let addr = Address([0xde; 20]);
        assert_eq!(addr.to_string().parse::<Address>(), Ok(addr));
    }

    #[test]
    fn zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::from_index(1).is_zero());
    }

    #[test]
    fn serde_uses_text_form() {
        let addr = Address::from_index(7);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x0000000000000000000000000000000000000007\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn token_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&TokenId(3)).unwrap(), "3");
        assert_eq!(TokenId(3).to_string(), "3");
    }
}
