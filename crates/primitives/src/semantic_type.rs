//! SemanticType - the normalized type vocabulary of interface descriptors and routine signatures.

use crate::error::{PrimitiveError, PrimitiveResult};
use std::fmt;

/// Integer widths carried as native integers. Every other width is arbitrary precision.
const NATIVE_INT_BITS: [u16; 4] = [8, 16, 32, 64];

/// The type of one parameter or return slot.
///
/// Declared operation types come from [`SemanticType::parse_abi`]. The
/// `Receiver`, `State` and `Error` variants never appear in an interface
/// document; they describe the implicit slots of a handler signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SemanticType {
    /// 20-byte account address
    Address,
    /// Boolean
    Bool,
    /// Signed integer of 8, 16, 32 or 64 bits
    Int(u16),
    /// Unsigned integer of 8, 16, 32 or 64 bits
    Uint(u16),
    /// Arbitrary precision integer
    BigInt,
    /// Fixed-width byte string of 1 to 32 bytes
    FixedBytes(u8),
    /// Dynamic byte string
    Bytes,
    /// UTF-8 string
    String,
    /// Dynamic array
    Array(Box<SemanticType>),
    /// The bound implementation a routine is invoked on
    Receiver,
    /// State-access handle
    State,
    /// Trailing error slot of a handler's returns
    Error,
}

impl SemanticType {
    /// Normalizes an ABI type name (`uint256`, `bytes32`, `address[]`, ...).
    ///
    /// Integers of 8, 16, 32 and 64 bits stay native; every other width,
    /// including the bare `int`/`uint` aliases, becomes [`SemanticType::BigInt`].
    pub fn parse_abi(name: &str) -> PrimitiveResult<Self> {
        let name = name.trim();
        if let Some(inner) = name.strip_suffix("[]") {
            return Ok(SemanticType::Array(Box::new(Self::parse_abi(inner)?)));
        }
        match name {
            "address" => return Ok(SemanticType::Address),
            "bool" => return Ok(SemanticType::Bool),
            "string" => return Ok(SemanticType::String),
            "bytes" => return Ok(SemanticType::Bytes),
            "int" | "uint" => return Ok(SemanticType::BigInt),
            _ => {}
        }
        if let Some(width) = name.strip_prefix("bytes") {
            return match width.parse::<u8>() {
                Ok(n) if (1..=32).contains(&n) => Ok(SemanticType::FixedBytes(n)),
                _ => Err(PrimitiveError::unsupported_type(name)),
            };
        }
        let (signed, bits) = if let Some(bits) = name.strip_prefix("uint") {
            (false, bits)
        } else if let Some(bits) = name.strip_prefix("int") {
            (true, bits)
        } else {
            return Err(PrimitiveError::unsupported_type(name));
        };
        match bits.parse::<u16>() {
            Ok(n) if n % 8 == 0 && (8..=256).contains(&n) => {
                if !NATIVE_INT_BITS.contains(&n) {
                    Ok(SemanticType::BigInt)
                } else if signed {
                    Ok(SemanticType::Int(n))
                } else {
                    Ok(SemanticType::Uint(n))
                }
            }
            _ => Err(PrimitiveError::unsupported_type(name)),
        }
    }

    /// Returns the canonical ABI spelling used when hashing signatures:
    /// `uint` becomes `uint256`, `int[]` becomes `int256[]`.
    pub fn canonical_abi_name(name: &str) -> PrimitiveResult<String> {
        let name = name.trim();
        // Validates the whole name, including array element types.
        Self::parse_abi(name)?;
        if let Some(inner) = name.strip_suffix("[]") {
            return Ok(format!("{}[]", Self::canonical_abi_name(inner)?));
        }
        Ok(match name {
            "int" => "int256".to_string(),
            "uint" => "uint256".to_string(),
            other => other.to_string(),
        })
    }

    /// Whether this type only appears in routine signatures, never in interface documents.
    #[must_use]
    pub fn is_implicit(&self) -> bool {
        matches!(
            self,
            SemanticType::Receiver | SemanticType::State | SemanticType::Error
        )
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Address => write!(f, "address"),
            SemanticType::Bool => write!(f, "bool"),
            SemanticType::Int(bits) => write!(f, "int{bits}"),
            SemanticType::Uint(bits) => write!(f, "uint{bits}"),
            SemanticType::BigInt => write!(f, "bigint"),
            SemanticType::FixedBytes(n) => write!(f, "bytes{n}"),
            SemanticType::Bytes => write!(f, "bytes"),
            SemanticType::String => write!(f, "string"),
            SemanticType::Array(inner) => write!(f, "{inner}[]"),
            SemanticType::Receiver => write!(f, "self"),
            SemanticType::State => write!(f, "state"),
            SemanticType::Error => write!(f, "error"),
        }
    }
}
