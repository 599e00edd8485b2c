//! # ArbOS-RS
//!
//! Precompile registry for an ArbOS-style chain.
//!
//! Each precompile pairs a declared interface (an ABI document) with a Rust
//! implementation. Before any call is served the implementation is checked
//! against the interface: every declared operation must have a handler and a
//! gas cost estimator whose parameter and return types line up with the
//! declaration. Conforming implementations are bound into a selector-keyed
//! dispatch table; calls are routed through it with mutability and value
//! checks applied.
//!
//! ## Crates
//!
//! - [`config`]: protocol constants and registry policy
//! - [`primitives`]: addresses, selectors, semantic types and values
//! - [`precompile`]: conformance verification and call dispatch
//!
//! ## Example
//!
//! ```rust
//! use arbos_rs::prelude::*;
//!
//! let set = arbos_rs::standard_precompiles(RegistryConfig::default()).unwrap();
//! assert!(set.contains(&arbos_rs::ARB_OWNER_ADDRESS));
//! ```

pub mod arb_owner;

pub use arbos_config as config;
pub use arbos_precompile as precompile;
pub use arbos_primitives as primitives;

use arbos_config::RegistryConfig;
use arbos_precompile::{PrecompileSet, RegistryResult};
use arbos_primitives::Address;
use tracing::info;

/// Current version of ArbOS-RS
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Address of the chain owner precompile.
pub const ARB_OWNER_ADDRESS: Address = Address::from_low_u64(0x107);

/// Builds the set of standard precompiles.
///
/// Every member is verified against its interface; the first call to this
/// function on a broken build reports every defect at once.
pub fn standard_precompiles(config: RegistryConfig) -> RegistryResult<PrecompileSet> {
    let set = PrecompileSet::builder_with_config(config)
        .register(ARB_OWNER_ADDRESS, &arb_owner::interface(), &arb_owner::candidate())
        .build()?;
    info!("Standard precompiles ready: {} registered", set.len());
    Ok(set)
}

/// Prelude module for common imports
pub mod prelude {
    pub use arbos_config::{ForwardedCallPolicy, RegistryConfig};
    pub use arbos_precompile::{
        AbiEntry, CallContext, CallOutcome, Caller, Candidate, DispatchError, HandlerError,
        InterfaceDocument, MemoryState, Precompile, PrecompileCall, PrecompileSet, RegistryError,
        StateHandle,
    };
    pub use arbos_primitives::{Address, SemanticType, Selector, Value};
}
