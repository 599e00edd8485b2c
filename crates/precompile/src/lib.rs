//! # ArbOS Precompile Registry
//!
//! Verifies that a native implementation matches a declared contract
//! interface and routes selector-addressed calls to it.
//!
//! Construction runs once per interface:
//!
//! 1. [`OperationSet::load`] normalizes an [`InterfaceDocument`].
//! 2. [`verify`] checks every operation against a [`Candidate`]'s routines
//!    and binds them into a [`DispatchTable`].
//! 3. [`Precompile`] serves [`PrecompileCall::dispatch`] and
//!    [`PrecompileCall::cost_of`] from that table.
//!
//! ## Example
//!
//! ```rust
//! use arbos_config::RegistryConfig;
//! use arbos_precompile::{
//!     AbiEntry, CallContext, Caller, Candidate, HandlerError, InterfaceDocument, Precompile,
//!     PrecompileCall,
//! };
//! use arbos_primitives::{Address, Selector, Value};
//! use num_bigint::BigInt;
//!
//! struct Echo;
//!
//! impl Echo {
//!     fn echo(&self, _caller: Caller, x: i32) -> Result<i32, HandlerError> {
//!         Ok(x)
//!     }
//!
//!     fn echo_gas_cost(&self, _x: i32) -> BigInt {
//!         BigInt::from(10)
//!     }
//! }
//!
//! let document = InterfaceDocument::new(
//!     "Echo",
//!     vec![AbiEntry::function("echo", "pure", &["int32"], &["int32"]).with_selector("0xAABBCCDD")],
//! );
//! let candidate = Candidate::new("Echo", Echo)
//!     .routine("Echo", Echo::echo)
//!     .routine("EchoGasCost", Echo::echo_gas_cost);
//! let precompile = Precompile::new(&document, &candidate, RegistryConfig::default()).unwrap();
//!
//! let ctx = CallContext::new(Address::from_low_u64(1), Address::from_low_u64(0x200));
//! let outcome = precompile
//!     .dispatch(Selector::from_u32(0xAABBCCDD), &ctx, vec![Value::I32(7)])
//!     .unwrap();
//! assert_eq!(outcome.returns, vec![Value::I32(7)]);
//! assert_eq!(outcome.error, None);
//! ```

pub mod abi;
pub mod candidate;
pub mod codec;
pub mod context;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod mutability;
pub mod routine;
pub mod router;
pub mod set;
pub mod verifier;

// Re-exports
pub use abi::{AbiValue, Returned, Returns, Values};
pub use candidate::Candidate;
pub use codec::ArgumentCodec;
pub use context::{CallContext, Caller, ExecutionTracer, MemoryState, Slot, StateAccess, StateHandle};
pub use descriptor::{AbiEntry, AbiParameter, InterfaceDocument, OperationDescriptor, OperationSet};
pub use dispatch::{DispatchTable, HandlerBinding};
pub use error::{
    CodecError, ConformanceError, DispatchError, DispatchResult, HandlerError, LoadError,
    RegistryError, RegistryResult,
};
pub use mutability::{ContextKind, Mutability};
pub use routine::{Argument, ArgumentFault, BoundRoutine, Param, Routine, RoutineFn};
pub use router::{CallOutcome, Precompile, PrecompileCall, RawOutcome};
pub use set::{PrecompileSet, PrecompileSetBuilder};
pub use verifier::{cost_estimator_name, handler_name, verify};
