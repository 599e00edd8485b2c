//! Conformance verification of a candidate against an operation set.
//!
//! For every declared operation `name` the candidate must provide:
//!
//! - a handler `Name(self, <context>, <declared params>) -> (<declared returns>, error)`
//!   where the context is fixed by the operation's mutability;
//! - a cost estimator `NameGasCost(self, <declared params>) -> bigint`.
//!
//! Types are compared position by position and exactly. Every mismatch in
//! every operation is reported; a single one is enough to refuse the table.

use crate::candidate::Candidate;
use crate::descriptor::{OperationDescriptor, OperationSet};
use crate::dispatch::{DispatchTable, HandlerBinding};
use crate::error::ConformanceError;
use crate::routine::Routine;
use arbos_primitives::SemanticType;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Suffix appended to a handler name to find its cost estimator.
pub const GAS_COST_SUFFIX: &str = "GasCost";

/// Handler name for an operation: the name with its first character upper-cased.
pub fn handler_name(operation: &str) -> String {
    let mut chars = operation.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cost estimator name for an operation.
pub fn cost_estimator_name(operation: &str) -> String {
    format!("{}{}", handler_name(operation), GAS_COST_SUFFIX)
}

/// Parameters the handler of `descriptor` must take, receiver first.
pub fn expected_handler_inputs(descriptor: &OperationDescriptor) -> Vec<SemanticType> {
    let mut inputs = vec![SemanticType::Receiver];
    inputs.extend(descriptor.mutability().context_types());
    inputs.extend(descriptor.parameter_types().iter().cloned());
    inputs
}

/// Returns the handler of `descriptor` must produce, error slot last.
pub fn expected_handler_outputs(descriptor: &OperationDescriptor) -> Vec<SemanticType> {
    let mut outputs = descriptor.return_types().to_vec();
    outputs.push(SemanticType::Error);
    outputs
}

/// Parameters the cost estimator of `descriptor` must take: no context.
pub fn expected_cost_inputs(descriptor: &OperationDescriptor) -> Vec<SemanticType> {
    let mut inputs = vec![SemanticType::Receiver];
    inputs.extend(descriptor.parameter_types().iter().cloned());
    inputs
}

type Mismatch = (usize, Option<SemanticType>, Option<SemanticType>);

/// Every position where `actual` differs from `expected`, arity included.
fn mismatches(expected: &[SemanticType], actual: &[SemanticType]) -> Vec<Mismatch> {
    (0..expected.len().max(actual.len()))
        .filter_map(|position| {
            let want = expected.get(position);
            let have = actual.get(position);
            (want != have).then(|| (position, want.cloned(), have.cloned()))
        })
        .collect()
}

/// Checks `candidate` against `operations` and binds the verified routines.
///
/// Verification is all-or-nothing: any error means no table.
pub fn verify<C>(
    operations: &OperationSet,
    candidate: &Candidate<C>,
) -> Result<DispatchTable, Vec<ConformanceError>>
where
    C: Send + Sync + 'static,
{
    let mut errors = Vec::new();
    let mut bindings = Vec::with_capacity(operations.len());

    for descriptor in operations.iter() {
        let handler = check_handler(descriptor, candidate, &mut errors);
        let gas_cost = check_cost_estimator(descriptor, candidate, &mut errors);
        if let (Some(handler), Some(gas_cost)) = (handler, gas_cost) {
            debug!(
                candidate = %candidate.name(),
                operation = %descriptor.name(),
                selector = %descriptor.selector(),
                mutability = %descriptor.mutability(),
                "operation verified"
            );
            let receiver = candidate.receiver();
            bindings.push(HandlerBinding::new(
                descriptor.selector(),
                descriptor.name().to_string(),
                descriptor.mutability(),
                descriptor.parameter_types().to_vec(),
                descriptor.return_types().to_vec(),
                handler.bind(Arc::clone(receiver)),
                gas_cost.bind(Arc::clone(receiver)),
            ));
        }
    }

    if !errors.is_empty() {
        for error in &errors {
            warn!(candidate = %candidate.name(), interface = %operations.interface(), "{}", error);
        }
        return Err(errors);
    }

    info!(
        candidate = %candidate.name(),
        interface = %operations.interface(),
        operations = bindings.len(),
        "candidate conforms"
    );
    Ok(DispatchTable::build(bindings))
}

fn check_handler<'c, C>(
    descriptor: &OperationDescriptor,
    candidate: &'c Candidate<C>,
    errors: &mut Vec<ConformanceError>,
) -> Option<&'c Routine<C>> {
    let operation = descriptor.name();
    let name = handler_name(operation);
    let Some(handler) = candidate.get(&name) else {
        errors.push(ConformanceError::MissingHandler {
            operation: operation.to_string(),
            handler: name,
        });
        return None;
    };

    let before = errors.len();
    for (position, expected, actual) in
        mismatches(&expected_handler_inputs(descriptor), handler.inputs())
    {
        errors.push(ConformanceError::SignatureMismatch {
            operation: operation.to_string(),
            handler: name.clone(),
            position,
            expected,
            actual,
        });
    }
    for (position, expected, actual) in
        mismatches(&expected_handler_outputs(descriptor), handler.outputs())
    {
        errors.push(ConformanceError::ReturnMismatch {
            operation: operation.to_string(),
            handler: name.clone(),
            position,
            expected,
            actual,
        });
    }
    (errors.len() == before).then_some(handler)
}

fn check_cost_estimator<'c, C>(
    descriptor: &OperationDescriptor,
    candidate: &'c Candidate<C>,
    errors: &mut Vec<ConformanceError>,
) -> Option<&'c Routine<C>> {
    let operation = descriptor.name();
    let name = cost_estimator_name(operation);
    let Some(estimator) = candidate.get(&name) else {
        errors.push(ConformanceError::MissingCostEstimator {
            operation: operation.to_string(),
            estimator: name,
        });
        return None;
    };

    let before = errors.len();
    for (position, expected, actual) in
        mismatches(&expected_cost_inputs(descriptor), estimator.inputs())
    {
        errors.push(ConformanceError::CostSignatureMismatch {
            operation: operation.to_string(),
            estimator: name.clone(),
            position,
            expected,
            actual,
        });
    }
    if estimator.outputs() != [SemanticType::BigInt].as_slice() {
        errors.push(ConformanceError::CostReturnMismatch {
            operation: operation.to_string(),
            estimator: name.clone(),
            actual: estimator.outputs().to_vec(),
        });
    }
    (errors.len() == before).then_some(estimator)
}
