//! Error types for loading, verifying and calling precompiles.

use arbos_primitives::{Address, SemanticType, Selector};
use std::fmt;
use thiserror::Error;

/// Renders an optional signature slot; an absent slot is shown as `nothing`.
fn slot(ty: &Option<SemanticType>) -> String {
    match ty {
        Some(ty) => ty.to_string(),
        None => "nothing".to_string(),
    }
}

fn join<E: fmt::Display>(errors: &[E]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Problems found while normalizing an interface document into operation descriptors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Two operations resolve to the same selector.
    #[error("Duplicate selector {selector}: {first} and {second}")]
    DuplicateSelector {
        /// The colliding selector.
        selector: Selector,
        /// Operation that claimed the selector first.
        first: String,
        /// Operation that collided with it.
        second: String,
    },

    /// An explicit selector that is not exactly four bytes of hex.
    #[error("Operation {operation} has malformed selector {selector:?}")]
    MalformedSelector {
        /// Operation name.
        operation: String,
        /// The selector text as written.
        selector: String,
    },

    /// State mutability outside pure, view, nonpayable and payable.
    #[error("Operation {operation} has unknown state mutability {mutability:?}")]
    UnknownMutability {
        /// Operation name.
        operation: String,
        /// The rejected mutability tag.
        mutability: String,
    },

    /// A parameter or return type outside the supported vocabulary.
    #[error("Operation {operation} uses unsupported type {ty:?}")]
    UnsupportedType {
        /// Operation name.
        operation: String,
        /// The rejected type name.
        ty: String,
    },

    /// An operation name declared more than once.
    #[error("Operation {operation} is declared more than once")]
    DuplicateOperation {
        /// Operation name.
        operation: String,
    },
}

/// A structural mismatch between a declared operation and a candidate's routines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConformanceError {
    /// The candidate has no handler for the operation.
    #[error("Operation {operation} must be implemented by {handler}")]
    MissingHandler {
        /// Operation name.
        operation: String,
        /// Routine name that was looked up.
        handler: String,
    },

    /// A handler parameter differs from the expected signature.
    #[error(
        "{handler} for {operation}: arg {position} is {} instead of {}",
        slot(.actual),
        slot(.expected)
    )]
    SignatureMismatch {
        /// Operation name.
        operation: String,
        /// Handler name.
        handler: String,
        /// Parameter position, the receiver being position 0.
        position: usize,
        /// Expected type, `None` past the end of the expected list.
        expected: Option<SemanticType>,
        /// Actual type, `None` past the end of the handler's parameters.
        actual: Option<SemanticType>,
    },

    /// A handler return slot differs from the declared outputs plus the error slot.
    #[error(
        "{handler} for {operation}: return value {position} is {} instead of {}",
        slot(.actual),
        slot(.expected)
    )]
    ReturnMismatch {
        /// Operation name.
        operation: String,
        /// Handler name.
        handler: String,
        /// Return position.
        position: usize,
        /// Expected type.
        expected: Option<SemanticType>,
        /// Actual type.
        actual: Option<SemanticType>,
    },

    /// The candidate has no cost estimator for the operation.
    #[error("Operation {operation} must be priced by {estimator}")]
    MissingCostEstimator {
        /// Operation name.
        operation: String,
        /// Routine name that was looked up.
        estimator: String,
    },

    /// A cost estimator parameter differs from the receiver plus declared parameters.
    #[error(
        "{estimator} for {operation}: arg {position} is {} instead of {}",
        slot(.actual),
        slot(.expected)
    )]
    CostSignatureMismatch {
        /// Operation name.
        operation: String,
        /// Estimator name.
        estimator: String,
        /// Parameter position, the receiver being position 0.
        position: usize,
        /// Expected type.
        expected: Option<SemanticType>,
        /// Actual type.
        actual: Option<SemanticType>,
    },

    /// A cost estimator that does not return exactly one `bigint`.
    #[error("{estimator} for {operation} must return a bigint, returns {actual:?}")]
    CostReturnMismatch {
        /// Operation name.
        operation: String,
        /// Estimator name.
        estimator: String,
        /// The estimator's actual return types.
        actual: Vec<SemanticType>,
    },
}

impl ConformanceError {
    /// The operation this error is about.
    pub fn operation(&self) -> &str {
        match self {
            ConformanceError::MissingHandler { operation, .. }
            | ConformanceError::SignatureMismatch { operation, .. }
            | ConformanceError::ReturnMismatch { operation, .. }
            | ConformanceError::MissingCostEstimator { operation, .. }
            | ConformanceError::CostSignatureMismatch { operation, .. }
            | ConformanceError::CostReturnMismatch { operation, .. } => operation,
        }
    }
}

/// Failure surfaced by a handler through its error slot. The router never
/// interprets it; it is handed back to the host verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The operation exists but has no behavior yet.
    #[error("unimplemented")]
    Unimplemented,

    /// The operation reverted.
    #[error("execution reverted: {reason}")]
    Revert {
        /// Revert reason.
        reason: String,
    },

    /// The caller may not perform the operation.
    #[error("unauthorized caller {caller}")]
    Unauthorized {
        /// The refused caller.
        caller: Address,
    },
}

impl HandlerError {
    /// Create a revert error.
    pub fn revert<S: Into<String>>(reason: S) -> Self {
        Self::Revert {
            reason: reason.into(),
        }
    }
}

/// Failure from the host's argument codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Codec error: {message}")]
pub struct CodecError {
    /// Error message.
    pub message: String,
}

impl CodecError {
    /// Create a codec error.
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Call-time errors raised by the router before a handler runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No operation is bound to the selector.
    #[error("Operation not found: {selector}")]
    UnknownSelector {
        /// The unmatched selector.
        selector: Selector,
    },

    /// The call payload is shorter than a selector.
    #[error("Input too short: {length} bytes")]
    InputTooShort {
        /// Payload length.
        length: usize,
    },

    /// Wrong number of declared arguments.
    #[error("{operation} takes {expected} arguments, got {actual}")]
    ArgumentCount {
        /// Operation name.
        operation: String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        actual: usize,
    },

    /// A declared argument of the wrong type.
    #[error("{operation} argument {position} is {actual} instead of {expected}")]
    ArgumentMismatch {
        /// Operation name.
        operation: String,
        /// Index among the declared arguments.
        position: usize,
        /// Declared type.
        expected: SemanticType,
        /// Supplied type.
        actual: SemanticType,
    },

    /// A non-pure operation called without a state handle.
    #[error("{operation} requires state access but the call has none")]
    MissingState {
        /// Operation name.
        operation: String,
    },

    /// A state-writing operation called in a read-only context.
    #[error("{operation} writes state and cannot run in a read-only call")]
    WriteProtection {
        /// Operation name.
        operation: String,
    },

    /// Value sent to an operation that is not payable.
    #[error("{operation} is not payable")]
    NonPayable {
        /// Operation name.
        operation: String,
    },

    /// A forwarded call to an operation that is not pure.
    #[error("{operation} refuses forwarded call acting as {acting_as} on {target}")]
    ForwardedCall {
        /// Operation name.
        operation: String,
        /// Address the call acts as.
        acting_as: Address,
        /// Address the call targets.
        target: Address,
    },

    /// The cost estimator produced no `bigint`.
    #[error("Cost estimator for {operation} produced no bigint")]
    CostUnavailable {
        /// Operation name.
        operation: String,
    },

    /// Argument decoding or return encoding failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Errors raised while constructing a precompile or a precompile set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The interface document did not load.
    #[error("Interface {interface} failed to load: {}", join(.errors))]
    Load {
        /// Interface name.
        interface: String,
        /// Every load error found.
        errors: Vec<LoadError>,
    },

    /// The candidate does not conform to the interface.
    #[error("Candidate {candidate} does not conform to {interface}: {}", join(.errors))]
    Conformance {
        /// Interface name.
        interface: String,
        /// Candidate name.
        candidate: String,
        /// Every conformance error found.
        errors: Vec<ConformanceError>,
    },

    /// Two precompiles registered at one address.
    #[error("Address {address} is registered more than once")]
    DuplicateAddress {
        /// The contested address.
        address: Address,
    },

    /// Failures across a whole precompile set.
    #[error("Precompile set failed to build: {}", join(.errors))]
    Set {
        /// Every registration failure.
        errors: Vec<RegistryError>,
    },
}

/// Result type for router calls.
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;

/// Result type for registry construction.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
