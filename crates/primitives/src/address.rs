//! Implementation of `Address`, a 20-byte account identifier.

use crate::error::{PrimitiveError, PrimitiveResult};
use arbos_config::ADDRESS_SIZE;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 20-byte account address, stored big-endian.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    /// Alias for the address width in bytes.
    pub const LENGTH: usize = ADDRESS_SIZE;

    /// Returns the zero address.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; ADDRESS_SIZE])
    }

    /// Wraps a fixed-size byte array.
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    /// Checks if this is the zero address.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Builds an address whose low eight bytes hold `value`.
    ///
    /// Precompiles live at small addresses, so `from_low_u64(0x107)` names
    /// the owner precompile.
    #[must_use]
    pub const fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; ADDRESS_SIZE];
        let low = value.to_be_bytes();
        let mut i = 0;
        while i < low.len() {
            bytes[ADDRESS_SIZE - 8 + i] = low[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Creates an address from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidLength` if the input is not exactly 20 bytes.
    pub fn from_slice(value: &[u8]) -> PrimitiveResult<Self> {
        let bytes: [u8; ADDRESS_SIZE] =
            value
                .try_into()
                .map_err(|_| PrimitiveError::InvalidLength {
                    kind: "address",
                    expected: ADDRESS_SIZE,
                    actual: value.len(),
                })?;
        Ok(Self(bytes))
    }

    /// Parses a hexadecimal address, with or without the `0x` prefix.
    ///
    /// Short inputs are left-padded with zeros, so `"0x65"` is the address
    /// ending in `0x65`.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidFormat` for empty, over-long or non-hex input.
    pub fn parse(s: &str) -> PrimitiveResult<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() || digits.len() > ADDRESS_SIZE * 2 {
            return Err(PrimitiveError::invalid_format(format!(
                "address must have 1 to {} hex digits: {s}",
                ADDRESS_SIZE * 2
            )));
        }
        let padded = format!("{digits:0>width$}", width = ADDRESS_SIZE * 2);
        let bytes = hex::decode(&padded)
            .map_err(|e| PrimitiveError::invalid_format(format!("{s}: {e}")))?;
        Self::from_slice(&bytes)
    }

    /// Returns the raw bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// Returns the bytes as a `Vec<u8>`.
    #[inline]
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Returns the `0x`-prefixed lowercase hex form.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl From<[u8; ADDRESS_SIZE]> for Address {
    fn from(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex_string())
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Address::parse(&value).map_err(serde::de::Error::custom)
    }
}
