//! Verified selector bindings and the table that holds them.

use crate::mutability::Mutability;
use crate::routine::BoundRoutine;
use arbos_primitives::{SemanticType, Selector};
use hashbrown::HashMap;

/// One verified operation: its declaration plus the handler and cost
/// estimator bound to the candidate's receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerBinding {
    selector: Selector,
    operation: String,
    mutability: Mutability,
    parameter_types: Vec<SemanticType>,
    return_types: Vec<SemanticType>,
    handler: BoundRoutine,
    gas_cost: BoundRoutine,
}

impl HandlerBinding {
    pub(crate) fn new(
        selector: Selector,
        operation: String,
        mutability: Mutability,
        parameter_types: Vec<SemanticType>,
        return_types: Vec<SemanticType>,
        handler: BoundRoutine,
        gas_cost: BoundRoutine,
    ) -> Self {
        Self {
            selector,
            operation,
            mutability,
            parameter_types,
            return_types,
            handler,
            gas_cost,
        }
    }

    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// Operation name as declared in the interface.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Name of the routine that handles the operation.
    pub fn handler_name(&self) -> &str {
        self.handler.name()
    }

    pub fn mutability(&self) -> Mutability {
        self.mutability
    }

    pub fn parameter_types(&self) -> &[SemanticType] {
        &self.parameter_types
    }

    pub fn return_types(&self) -> &[SemanticType] {
        &self.return_types
    }

    pub fn handler(&self) -> &BoundRoutine {
        &self.handler
    }

    pub fn gas_cost(&self) -> &BoundRoutine {
        &self.gas_cost
    }
}

/// Selector to binding map. Immutable once built and safe to share.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchTable {
    bindings: HashMap<Selector, HandlerBinding>,
}

impl DispatchTable {
    /// Assembles verified bindings. Selectors are unique by the time bindings
    /// are verified, so no further validation happens here.
    pub fn build(bindings: Vec<HandlerBinding>) -> Self {
        Self {
            bindings: bindings
                .into_iter()
                .map(|binding| (binding.selector, binding))
                .collect(),
        }
    }

    #[inline]
    pub fn get(&self, selector: &Selector) -> Option<&HandlerBinding> {
        self.bindings.get(selector)
    }

    pub fn contains(&self, selector: &Selector) -> bool {
        self.bindings.contains_key(selector)
    }

    /// Bound selectors, sorted.
    pub fn selectors(&self) -> Vec<Selector> {
        let mut selectors: Vec<Selector> = self.bindings.keys().copied().collect();
        selectors.sort_unstable();
        selectors
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandlerBinding> {
        self.bindings.values()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routine::Routine;
    use num_bigint::BigInt;
    use std::sync::Arc;

    struct Nop;

    fn binding(selector: u32, operation: &str) -> HandlerBinding {
        let receiver = Arc::new(Nop);
        HandlerBinding::new(
            Selector::from_u32(selector),
            operation.to_string(),
            Mutability::Pure,
            vec![],
            vec![],
            Routine::new("Handler", |_: &Nop| {}).bind(Arc::clone(&receiver)),
            Routine::new("HandlerGasCost", |_: &Nop| BigInt::from(0)).bind(receiver),
        )
    }

    #[test]
    fn lookup_by_selector() {
        let table = DispatchTable::build(vec![binding(1, "one"), binding(2, "two")]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get(&Selector::from_u32(2)).map(HandlerBinding::operation),
            Some("two")
        );
        assert!(!table.contains(&Selector::from_u32(3)));
        assert_eq!(
            table.selectors(),
            vec![Selector::from_u32(1), Selector::from_u32(2)]
        );
    }

    #[test]
    fn rebuilt_tables_are_equal() {
        let first = DispatchTable::build(vec![binding(1, "one"), binding(2, "two")]);
        let second = DispatchTable::build(vec![binding(2, "two"), binding(1, "one")]);
        assert_eq!(first, second);
        assert_ne!(first, DispatchTable::build(vec![binding(1, "one")]));
    }
}
