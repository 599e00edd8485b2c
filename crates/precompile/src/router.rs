//! Call routing: selector lookup, pre-call checks, context injection.

use crate::candidate::Candidate;
use crate::codec::ArgumentCodec;
use crate::context::CallContext;
use crate::descriptor::{InterfaceDocument, OperationSet};
use crate::dispatch::{DispatchTable, HandlerBinding};
use crate::error::{DispatchError, DispatchResult, HandlerError, RegistryError, RegistryResult};
use crate::mutability::ContextKind;
use crate::routine::{Argument, ArgumentFault};
use crate::verifier::verify;
use arbos_config::{ForwardedCallPolicy, RegistryConfig};
use arbos_primitives::{Selector, Value};
use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};
use tracing::{debug, trace};

/// Outputs of a handler and its error slot, exactly as the handler produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOutcome {
    pub returns: Vec<Value>,
    pub error: Option<HandlerError>,
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Encoded outputs of a raw call. `output` is empty when the handler failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutcome {
    pub output: Vec<u8>,
    pub error: Option<HandlerError>,
}

/// The surface a host calls a registered precompile through.
pub trait PrecompileCall: Send + Sync {
    /// Interface name.
    fn name(&self) -> &str;

    fn table(&self) -> &DispatchTable;

    /// Price of a call, computed from its declared arguments only.
    fn cost_of(&self, selector: Selector, args: Vec<Value>) -> DispatchResult<BigInt>;

    /// Runs the operation bound to `selector`.
    fn dispatch(
        &self,
        selector: Selector,
        ctx: &CallContext,
        args: Vec<Value>,
    ) -> DispatchResult<CallOutcome>;

    /// Price of a raw call payload, clamped to `u64`.
    fn gas_to_charge(&self, input: &[u8], codec: &dyn ArgumentCodec) -> DispatchResult<u64> {
        let (selector, payload) = split(input)?;
        let binding = lookup(self.table(), selector)?;
        let args = codec.decode(binding.parameter_types(), payload)?;
        let cost = self.cost_of(selector, args)?;
        Ok(match cost.sign() {
            Sign::Minus => 0,
            _ => cost.to_u64().unwrap_or(u64::MAX),
        })
    }

    /// Decodes a raw call payload, dispatches it and encodes the outputs.
    fn call_raw(
        &self,
        input: &[u8],
        ctx: &CallContext,
        codec: &dyn ArgumentCodec,
    ) -> DispatchResult<RawOutcome> {
        let (selector, payload) = split(input)?;
        let binding = lookup(self.table(), selector)?;
        let args = codec.decode(binding.parameter_types(), payload)?;
        let outcome = self.dispatch(selector, ctx, args)?;
        let output = match outcome.error {
            None => codec.encode(binding.return_types(), &outcome.returns)?,
            Some(_) => Vec::new(),
        };
        Ok(RawOutcome {
            output,
            error: outcome.error,
        })
    }
}

fn split(input: &[u8]) -> DispatchResult<(Selector, &[u8])> {
    Selector::split_input(input).ok_or(DispatchError::InputTooShort {
        length: input.len(),
    })
}

fn lookup(table: &DispatchTable, selector: Selector) -> DispatchResult<&HandlerBinding> {
    table.get(&selector).ok_or_else(|| {
        debug!(%selector, "operation not found");
        DispatchError::UnknownSelector { selector }
    })
}

/// A verified interface implementation ready to serve calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Precompile {
    name: String,
    config: RegistryConfig,
    table: DispatchTable,
}

impl Precompile {
    /// Loads `document`, verifies `candidate` against it and builds the table.
    pub fn new<C>(
        document: &InterfaceDocument,
        candidate: &Candidate<C>,
        config: RegistryConfig,
    ) -> RegistryResult<Self>
    where
        C: Send + Sync + 'static,
    {
        let operations = OperationSet::load(document).map_err(|errors| RegistryError::Load {
            interface: document.name.clone(),
            errors,
        })?;
        let table = verify(&operations, candidate).map_err(|errors| {
            RegistryError::Conformance {
                interface: document.name.clone(),
                candidate: candidate.name().to_string(),
                errors,
            }
        })?;
        Ok(Self::from_table(document.name.clone(), table, config))
    }

    /// Wraps an already verified table.
    pub fn from_table(
        name: impl Into<String>,
        table: DispatchTable,
        config: RegistryConfig,
    ) -> Self {
        Self {
            name: name.into(),
            config,
            table,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn check_arguments(binding: &HandlerBinding, args: &[Value]) -> DispatchResult<()> {
        let declared = binding.parameter_types();
        if declared.len() != args.len() {
            return Err(DispatchError::ArgumentCount {
                operation: binding.operation().to_string(),
                expected: declared.len(),
                actual: args.len(),
            });
        }
        for (position, (expected, value)) in declared.iter().zip(args).enumerate() {
            let actual = value.semantic_type();
            if &actual != expected || !value.is_well_formed() {
                return Err(DispatchError::ArgumentMismatch {
                    operation: binding.operation().to_string(),
                    position,
                    expected: expected.clone(),
                    actual,
                });
            }
        }
        Ok(())
    }

    fn check_policy(&self, binding: &HandlerBinding, ctx: &CallContext) -> DispatchResult<()> {
        let mutability = binding.mutability();
        let operation = || binding.operation().to_string();

        if self.config.forwarded_calls == ForwardedCallPolicy::RejectNonPure
            && !mutability.is_pure()
            && ctx.is_forwarded()
        {
            return Err(DispatchError::ForwardedCall {
                operation: operation(),
                acting_as: ctx.acting_as,
                target: ctx.target,
            });
        }
        if self.config.enforce_read_only && ctx.read_only && mutability.writes_state() {
            return Err(DispatchError::WriteProtection {
                operation: operation(),
            });
        }
        if self.config.reject_value_to_non_payable
            && !mutability.is_payable()
            && !ctx.value.is_zero()
        {
            return Err(DispatchError::NonPayable {
                operation: operation(),
            });
        }
        Ok(())
    }

    fn context_arguments(
        binding: &HandlerBinding,
        ctx: &CallContext,
    ) -> DispatchResult<Vec<Argument>> {
        binding
            .mutability()
            .context()
            .iter()
            .map(|kind| match kind {
                ContextKind::Caller => Ok(Argument::Caller(ctx.caller())),
                ContextKind::State => ctx.state.clone().map(Argument::State).ok_or_else(|| {
                    DispatchError::MissingState {
                        operation: binding.operation().to_string(),
                    }
                }),
                ContextKind::Value => Ok(Argument::Value(Value::BigInt(ctx.value.clone()))),
            })
            .collect()
    }
}

/// Maps a routine's argument fault back to declared-argument positions.
fn fault(binding: &HandlerBinding, fault: ArgumentFault, injected: usize) -> DispatchError {
    match fault {
        ArgumentFault::Count { expected, actual } => DispatchError::ArgumentCount {
            operation: binding.operation().to_string(),
            expected: expected.saturating_sub(injected),
            actual: actual.saturating_sub(injected),
        },
        ArgumentFault::Type {
            index,
            expected,
            actual,
        } => DispatchError::ArgumentMismatch {
            operation: binding.operation().to_string(),
            position: index.saturating_sub(injected),
            expected,
            actual,
        },
    }
}

impl PrecompileCall for Precompile {
    fn name(&self) -> &str {
        &self.name
    }

    fn table(&self) -> &DispatchTable {
        &self.table
    }

    fn cost_of(&self, selector: Selector, args: Vec<Value>) -> DispatchResult<BigInt> {
        let binding = lookup(&self.table, selector)?;
        Self::check_arguments(binding, &args)?;

        let returned = binding
            .gas_cost()
            .call(args.into_iter().map(Argument::Value).collect())
            .map_err(|f| fault(binding, f, 0))?;
        match returned.values.into_iter().next() {
            Some(Value::BigInt(cost)) => Ok(cost),
            _ => Err(DispatchError::CostUnavailable {
                operation: binding.operation().to_string(),
            }),
        }
    }

    fn dispatch(
        &self,
        selector: Selector,
        ctx: &CallContext,
        args: Vec<Value>,
    ) -> DispatchResult<CallOutcome> {
        let binding = lookup(&self.table, selector)?;
        Self::check_arguments(binding, &args)?;
        self.check_policy(binding, ctx)?;

        let mut arguments = Self::context_arguments(binding, ctx)?;
        let injected = arguments.len();
        arguments.extend(args.into_iter().map(Argument::Value));

        if let Some(tracer) = &ctx.tracer {
            tracer.on_enter(ctx.target, binding.operation(), selector);
        }
        let returned = binding.handler().call(arguments);
        if let Some(tracer) = &ctx.tracer {
            let failed = returned.as_ref().map_or(true, |r| r.error.is_some());
            tracer.on_exit(ctx.target, binding.operation(), failed);
        }
        let returned = returned.map_err(|f| fault(binding, f, injected))?;

        trace!(
            precompile = %self.name,
            operation = %binding.operation(),
            failed = returned.error.is_some(),
            "call dispatched"
        );
        Ok(CallOutcome {
            returns: returned.values,
            error: returned.error,
        })
    }
}
