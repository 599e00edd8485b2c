//! Mapping between Rust types and the semantic type vocabulary.
//!
//! A routine's signature is read off its Rust parameter and return types
//! through these traits, so a handler's shape is fixed at compile time and the
//! verifier only compares the derived type lists.

use crate::error::HandlerError;
use arbos_primitives::{Address, SemanticType, Value};
use num_bigint::BigInt;

/// A Rust type that carries exactly one semantic type.
pub trait AbiValue: Sized + Send + 'static {
    fn semantic_type() -> SemanticType;

    /// Extracts the value, or `None` when the variant does not match exactly.
    fn from_value(value: Value) -> Option<Self>;

    fn into_value(self) -> Value;
}

macro_rules! abi_scalar {
    ($($ty:ty => $variant:ident, $semantic:expr;)*) => {
        $(
            impl AbiValue for $ty {
                fn semantic_type() -> SemanticType {
                    $semantic
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }
        )*
    };
}

abi_scalar! {
    i8 => I8, SemanticType::Int(8);
    i16 => I16, SemanticType::Int(16);
    i32 => I32, SemanticType::Int(32);
    i64 => I64, SemanticType::Int(64);
    u8 => U8, SemanticType::Uint(8);
    u16 => U16, SemanticType::Uint(16);
    u32 => U32, SemanticType::Uint(32);
    u64 => U64, SemanticType::Uint(64);
    BigInt => BigInt, SemanticType::BigInt;
    Address => Address, SemanticType::Address;
    bool => Bool, SemanticType::Bool;
    String => String, SemanticType::String;
    Vec<u8> => Bytes, SemanticType::Bytes;
}

impl<const N: usize> AbiValue for [u8; N] {
    fn semantic_type() -> SemanticType {
        // Widths beyond 32 produce a type no document can declare, so the
        // verifier rejects such handlers.
        SemanticType::FixedBytes(N.min(u8::MAX as usize) as u8)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::FixedBytes(bytes) => bytes.try_into().ok(),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::FixedBytes(self.to_vec())
    }
}

macro_rules! abi_array {
    ($($ty:ty),*) => {
        $(
            impl AbiValue for Vec<$ty> {
                fn semantic_type() -> SemanticType {
                    SemanticType::Array(Box::new(<$ty as AbiValue>::semantic_type()))
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::Array { element, items }
                            if element == <$ty as AbiValue>::semantic_type() =>
                        {
                            items.into_iter().map(<$ty as AbiValue>::from_value).collect()
                        }
                        _ => None,
                    }
                }

                fn into_value(self) -> Value {
                    Value::array(
                        <$ty as AbiValue>::semantic_type(),
                        self.into_iter().map(AbiValue::into_value).collect(),
                    )
                }
            }
        )*
    };
}

abi_array!(i8, i16, i32, i64, u16, u32, u64, BigInt, Address, bool, String, Vec<u8>);

// `uint8[]` has no Rust form: `Vec<u8>` is `bytes`.
impl<const N: usize> AbiValue for Vec<[u8; N]> {
    fn semantic_type() -> SemanticType {
        SemanticType::Array(Box::new(<[u8; N]>::semantic_type()))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array { element, items } if element == <[u8; N]>::semantic_type() => {
                items.into_iter().map(<[u8; N]>::from_value).collect()
            }
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::array(
            <[u8; N]>::semantic_type(),
            self.into_iter().map(AbiValue::into_value).collect(),
        )
    }
}

/// The declared outputs of a routine: one value, none, or a tuple.
pub trait Values {
    fn types() -> Vec<SemanticType>;

    fn into_values(self) -> Vec<Value>;
}

impl<T: AbiValue> Values for T {
    fn types() -> Vec<SemanticType> {
        vec![T::semantic_type()]
    }

    fn into_values(self) -> Vec<Value> {
        vec![self.into_value()]
    }
}

impl Values for () {
    fn types() -> Vec<SemanticType> {
        Vec::new()
    }

    fn into_values(self) -> Vec<Value> {
        Vec::new()
    }
}

macro_rules! values_tuple {
    ($($ty:ident $var:ident),+) => {
        impl<$($ty: AbiValue),+> Values for ($($ty,)+) {
            fn types() -> Vec<SemanticType> {
                vec![$($ty::semantic_type()),+]
            }

            fn into_values(self) -> Vec<Value> {
                let ($($var,)+) = self;
                vec![$($var.into_value()),+]
            }
        }
    };
}

values_tuple!(A a, B b);
values_tuple!(A a, B b, C c);
values_tuple!(A a, B b, C c, D d);

/// What a routine produced: its declared outputs and, for handlers, the error slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Returned {
    pub values: Vec<Value>,
    pub error: Option<HandlerError>,
}

/// A routine's full return signature.
///
/// Plain [`Values`] describe cost estimators and other routines without an
/// error slot; `Result<T, HandlerError>` appends the trailing `error` slot
/// every handler must have.
pub trait Returns {
    fn types() -> Vec<SemanticType>;

    fn into_returned(self) -> Returned;
}

impl<T: Values> Returns for T {
    fn types() -> Vec<SemanticType> {
        T::types()
    }

    fn into_returned(self) -> Returned {
        Returned {
            values: self.into_values(),
            error: None,
        }
    }
}

impl<T: Values> Returns for Result<T, HandlerError> {
    fn types() -> Vec<SemanticType> {
        let mut types = T::types();
        types.push(SemanticType::Error);
        types
    }

    fn into_returned(self) -> Returned {
        match self {
            Ok(values) => Returned {
                values: values.into_values(),
                error: None,
            },
            Err(error) => Returned {
                values: Vec::new(),
                error: Some(error),
            },
        }
    }
}
