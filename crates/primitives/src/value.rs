//! Already-decoded call values.

use crate::{Address, SemanticType};
use num_bigint::BigInt;

/// A typed argument or return value. Each variant corresponds to exactly one
/// [`SemanticType`]; there is no implicit conversion between variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    BigInt(BigInt),
    Address(Address),
    Bool(bool),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    Array {
        element: SemanticType,
        items: Vec<Value>,
    },
}

impl Value {
    /// The exact semantic type of this value.
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            Value::I8(_) => SemanticType::Int(8),
            Value::I16(_) => SemanticType::Int(16),
            Value::I32(_) => SemanticType::Int(32),
            Value::I64(_) => SemanticType::Int(64),
            Value::U8(_) => SemanticType::Uint(8),
            Value::U16(_) => SemanticType::Uint(16),
            Value::U32(_) => SemanticType::Uint(32),
            Value::U64(_) => SemanticType::Uint(64),
            Value::BigInt(_) => SemanticType::BigInt,
            Value::Address(_) => SemanticType::Address,
            Value::Bool(_) => SemanticType::Bool,
            // Widths above 32 are rejected when the value is matched against a slot.
            Value::FixedBytes(bytes) => SemanticType::FixedBytes(bytes.len().min(255) as u8),
            Value::Bytes(_) => SemanticType::Bytes,
            Value::String(_) => SemanticType::String,
            Value::Array { element, .. } => SemanticType::Array(Box::new(element.clone())),
        }
    }

    /// Builds an array value. Items are expected to share `element`'s type;
    /// [`Value::is_well_formed`] checks it.
    pub fn array(element: SemanticType, items: Vec<Value>) -> Self {
        Value::Array { element, items }
    }

    /// Checks that array items all carry the declared element type, recursively.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Value::Array { element, items } => items
                .iter()
                .all(|item| &item.semantic_type() == element && item.is_well_formed()),
            Value::FixedBytes(bytes) => (1..=32).contains(&bytes.len()),
            _ => true,
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

value_from! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    BigInt => BigInt,
    Address => Address,
    bool => Bool,
    String => String,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_types_are_exact() {
        assert_eq!(Value::from(7i32).semantic_type(), SemanticType::Int(32));
        assert_eq!(Value::from(7u64).semantic_type(), SemanticType::Uint(64));
        assert_ne!(Value::from(7i32).semantic_type(), Value::from(7i64).semantic_type());
        assert_eq!(
            Value::from(BigInt::from(5)).semantic_type(),
            SemanticType::BigInt
        );
        assert_eq!(
            Value::FixedBytes(vec![0; 32]).semantic_type(),
            SemanticType::FixedBytes(32)
        );
    }

    #[test]
    fn arrays_report_element_type_even_when_empty() {
        let empty = Value::array(SemanticType::Address, vec![]);
        assert_eq!(
            empty.semantic_type(),
            SemanticType::Array(Box::new(SemanticType::Address))
        );
        assert!(empty.is_well_formed());

        let mixed = Value::array(
            SemanticType::Address,
            vec![Value::from(Address::zero()), Value::from(true)],
        );
        assert!(!mixed.is_well_formed());
    }

    #[test]
    fn oversized_fixed_bytes_are_not_well_formed() {
        assert!(!Value::FixedBytes(vec![0; 33]).is_well_formed());
        assert!(!Value::FixedBytes(vec![]).is_well_formed());
    }
}
