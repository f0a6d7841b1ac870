use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterfaceIdError {
    #[error("interface id must start with 0x: {0:?}")]
    MissingPrefix(String),
    #[error("interface id must have 1 to 8 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex in interface id: {0:?}")]
    BadDigit(String),
}

/// A 4-byte capability identifier (ERC-165 style).
///
/// Text form is `0x` plus 8 hex digits. Shorter inputs such as
/// `0xd23ecb9` are left-padded with zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterfaceId(pub [u8; 4]);

impl InterfaceId {
    /// The story extension: `storyEnabled`, `addCreatorStory`, `addStory`.
    pub const STORY: InterfaceId = InterfaceId([0x0d, 0x23, 0xec, 0xb9]);
    /// ERC-165 itself (`supportsInterface`).
    pub const ERC165: InterfaceId = InterfaceId([0x01, 0xff, 0xc9, 0xa7]);
    pub const ERC721: InterfaceId = InterfaceId([0x80, 0xac, 0x58, 0xcd]);
    pub const ERC721_METADATA: InterfaceId = InterfaceId([0x5b, 0x5e, 0x13, 0x9f]);
    /// Reserved by ERC-165; must never be reported as supported.
    pub const INVALID: InterfaceId = InterfaceId([0xff, 0xff, 0xff, 0xff]);

    pub fn as_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl From<u32> for InterfaceId {
    fn from(raw: u32) -> Self {
        Self(raw.to_be_bytes())
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for InterfaceId {
    type Err = InterfaceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| InterfaceIdError::MissingPrefix(s.to_string()))?;
        if digits.is_empty() || digits.len() > 8 {
            return Err(InterfaceIdError::BadLength(s.to_string()));
        }
        let padded = format!("{digits:0>8}");
        let mut bytes = [0u8; 4];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|_| InterfaceIdError::BadDigit(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for InterfaceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InterfaceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_id_display() {
        assert_eq!(InterfaceId::STORY.to_string(), "0x0d23ecb9");
    }

    #[test]
    fn short_form_is_left_padded() {
        let id: InterfaceId = "0xd23ecb9".parse().unwrap();
        assert_eq!(id, InterfaceId::STORY);
        assert_eq!("0x1".parse::<InterfaceId>(), Ok(InterfaceId::from(1)));
    }

    #[test]
    fn parse_full_form() {
        let id: InterfaceId = "0x80AC58CD".parse().unwrap();
        assert_eq!(id, InterfaceId::ERC721);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            "d23ecb9".parse::<InterfaceId>(),
            Err(InterfaceIdError::MissingPrefix(_))
        ));
        assert!(matches!(
            "0x".parse::<InterfaceId>(),
            Err(InterfaceIdError::BadLength(_))
        ));
        assert!(matches!(
            "0x123456789".parse::<InterfaceId>(),
            Err(InterfaceIdError::BadLength(_))
        ));
        assert!(matches!(
            "0xnothex".parse::<InterfaceId>(),
            Err(InterfaceIdError::BadDigit(_))
        ));
        assert!(matches!(
            "0x+1".parse::<InterfaceId>(),
            Err(InterfaceIdError::BadDigit(_))
        ));
        assert!(matches!(
            "0x1é".parse::<InterfaceId>(),
            Err(InterfaceIdError::BadDigit(_))
        ));
    }

    #[test]
    fn u32_conversion() {
        assert_eq!(InterfaceId::from(0x01ffc9a7), InterfaceId::ERC165);
        assert_eq!(InterfaceId::INVALID.as_u32(), u32::MAX);
    }
}
