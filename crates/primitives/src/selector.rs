//! Method selectors: the 4-byte opcode at the front of every call payload.

use crate::error::{PrimitiveError, PrimitiveResult};
use arbos_config::SELECTOR_SIZE;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

/// A 4-byte method selector.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Selector([u8; SELECTOR_SIZE]);

impl Selector {
    /// Width of a selector in bytes.
    pub const LENGTH: usize = SELECTOR_SIZE;

    /// Wraps four raw bytes.
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; SELECTOR_SIZE]) -> Self {
        Self(bytes)
    }

    /// Builds a selector from its big-endian integer form, e.g. `0xAABBCCDD`.
    #[inline]
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Self(value.to_be_bytes())
    }

    /// Creates a selector from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidLength` unless the slice is exactly 4 bytes.
    pub fn from_slice(value: &[u8]) -> PrimitiveResult<Self> {
        let bytes: [u8; SELECTOR_SIZE] =
            value
                .try_into()
                .map_err(|_| PrimitiveError::InvalidLength {
                    kind: "selector",
                    expected: SELECTOR_SIZE,
                    actual: value.len(),
                })?;
        Ok(Self(bytes))
    }

    /// Parses a hex selector with or without the `0x` prefix.
    pub fn parse(s: &str) -> PrimitiveResult<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|e| PrimitiveError::invalid_format(format!("{s}: {e}")))?;
        Self::from_slice(&bytes)
    }

    /// Computes the selector of a canonical signature such as
    /// `transfer(address,uint256)`: the first four bytes of its Keccak-256 hash.
    #[must_use]
    pub fn from_signature(signature: &str) -> Self {
        let digest = Keccak256::digest(signature.as_bytes());
        let mut bytes = [0u8; SELECTOR_SIZE];
        bytes.copy_from_slice(&digest[..SELECTOR_SIZE]);
        Self(bytes)
    }

    /// Splits a raw call payload into its selector and the encoded arguments.
    /// Returns `None` when the payload is shorter than a selector.
    #[must_use]
    pub fn split_input(input: &[u8]) -> Option<(Self, &[u8])> {
        if input.len() < SELECTOR_SIZE {
            return None;
        }
        let (head, rest) = input.split_at(SELECTOR_SIZE);
        Self::from_slice(head).ok().map(|selector| (selector, rest))
    }

    /// Returns the raw bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SELECTOR_SIZE] {
        &self.0
    }

    /// Returns the big-endian integer form.
    #[inline]
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl From<[u8; SELECTOR_SIZE]> for Selector {
    fn from(bytes: [u8; SELECTOR_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<u32> for Selector {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl FromStr for Selector {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector(0x{})", hex::encode(self.0))
    }
}

impl Serialize for Selector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Selector::parse(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_signatures() {
        assert_eq!(
            Selector::from_signature("transfer(address,uint256)"),
            Selector::from_u32(0xa9059cbb)
        );
        assert_eq!(
            Selector::from_signature("balanceOf(address)"),
            Selector::from_u32(0x70a08231)
        );
    }

    #[test]
    fn parse_requires_four_bytes() {
        assert_eq!(
            Selector::parse("0xAABBCCDD").unwrap(),
            Selector::from_u32(0xAABBCCDD)
        );
        assert!(matches!(
            Selector::parse("0xAABBCC"),
            Err(PrimitiveError::InvalidLength { actual: 3, .. })
        ));
        assert!(matches!(
            Selector::parse("0xAABBCCDDEE"),
            Err(PrimitiveError::InvalidLength { actual: 5, .. })
        ));
        assert!(Selector::parse("0xAABBCCDG").is_err());
    }

    #[test]
    fn split_input_separates_payload() {
        let input = [0xaa, 0xbb, 0xcc, 0xdd, 1, 2, 3];
        let (selector, rest) = Selector::split_input(&input).unwrap();
        assert_eq!(selector, Selector::from_u32(0xaabbccdd));
        assert_eq!(rest, &[1, 2, 3]);

        assert!(Selector::split_input(&[0xaa, 0xbb, 0xcc]).is_none());
        let (_, empty) = Selector::split_input(&input[..4]).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn display_is_lowercase_hex() {
        assert_eq!(Selector::from_u32(0xAABBCCDD).to_string(), "0xaabbccdd");
    }
}
