//! # ArbOS Primitives
//!
//! Fundamental types shared by the precompile registry.
//!
//! - `Address`: 20-byte account identifier
//! - `Selector`: 4-byte method identifier
//! - `SemanticType`: normalized parameter/return type vocabulary
//! - `Value`: an already-decoded call argument or return value
//!
//! ## Example
//!
//! ```rust
//! use arbos_primitives::{Address, Selector, SemanticType};
//!
//! let owner = Address::parse("0x107").unwrap();
//! assert_eq!(owner, Address::from_low_u64(0x107));
//!
//! let selector = Selector::from_signature("transfer(address,uint256)");
//! assert_eq!(selector.to_string(), "0xa9059cbb");
//!
//! assert_eq!(SemanticType::parse_abi("uint256").unwrap(), SemanticType::BigInt);
//! ```

pub mod address;
pub mod error;
pub mod selector;
pub mod semantic_type;
pub mod value;

// Re-exports
pub use address::Address;
pub use arbos_config::{ADDRESS_SIZE, SELECTOR_SIZE, SLOT_SIZE};
pub use error::{PrimitiveError, PrimitiveResult};
pub use num_bigint::BigInt;
pub use selector::Selector;
pub use semantic_type::SemanticType;
pub use value::Value;
