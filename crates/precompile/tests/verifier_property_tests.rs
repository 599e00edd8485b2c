//! Property tests for verification and table building.

use arbos_precompile::*;
use arbos_primitives::{Address, Selector};
use num_bigint::BigInt;
use proptest::prelude::*;

struct Unit;

/// Operation shapes: (ABI mutability, inputs, outputs).
const SHAPES: [(&str, &[&str], &[&str]); 4] = [
    ("pure", &[], &[]),
    ("pure", &["int32"], &["int32"]),
    ("view", &["address"], &["uint256"]),
    ("payable", &[], &["bool"]),
];

fn operation_name(index: usize) -> String {
    format!("op{index}")
}

fn document(selectors: &[u32], shapes: &[usize]) -> InterfaceDocument {
    let entries = selectors
        .iter()
        .zip(shapes)
        .enumerate()
        .map(|(i, (selector, &shape))| {
            let (mutability, inputs, outputs) = SHAPES[shape];
            AbiEntry::function(operation_name(i), mutability, inputs, outputs)
                .with_selector(format!("0x{selector:08x}"))
        })
        .collect();
    InterfaceDocument::new("Generated", entries)
}

fn with_routines(candidate: Candidate<Unit>, index: usize, shape: usize) -> Candidate<Unit> {
    let handler = handler_name(&operation_name(index));
    let cost = cost_estimator_name(&operation_name(index));
    match shape {
        0 => candidate
            .routine(handler, |_: &Unit, _c: Caller| -> Result<(), HandlerError> { Ok(()) })
            .routine(cost, |_: &Unit| BigInt::from(0)),
        1 => candidate
            .routine(handler, |_: &Unit, _c: Caller, x: i32| -> Result<i32, HandlerError> {
                Ok(x)
            })
            .routine(cost, |_: &Unit, _x: i32| BigInt::from(1)),
        2 => candidate
            .routine(
                handler,
                |_: &Unit, _c: Caller, _s: StateHandle, _a: Address| -> Result<BigInt, HandlerError> {
                    Ok(BigInt::from(0))
                },
            )
            .routine(cost, |_: &Unit, _a: Address| BigInt::from(2)),
        _ => candidate
            .routine(
                handler,
                |_: &Unit, _c: Caller, _s: StateHandle, _v: BigInt| -> Result<bool, HandlerError> {
                    Ok(true)
                },
            )
            .routine(cost, |_: &Unit| BigInt::from(3)),
    }
}

fn candidate(shapes: &[usize]) -> Candidate<Unit> {
    shapes
        .iter()
        .enumerate()
        .fold(Candidate::new("Generated", Unit), |c, (i, &shape)| {
            with_routines(c, i, shape)
        })
}

fn interface() -> impl Strategy<Value = (Vec<u32>, Vec<usize>)> {
    prop::collection::hash_set(any::<u32>(), 1..16).prop_flat_map(|selectors| {
        let selectors: Vec<u32> = selectors.into_iter().collect();
        let len = selectors.len();
        (Just(selectors), prop::collection::vec(0..SHAPES.len(), len))
    })
}

proptest! {
    #[test]
    fn table_keys_equal_declared_selectors((selectors, shapes) in interface()) {
        let operations = OperationSet::load(&document(&selectors, &shapes)).unwrap();
        let table = verify(&operations, &candidate(&shapes)).unwrap();

        let mut expected: Vec<Selector> = selectors.iter().copied().map(Selector::from_u32).collect();
        expected.sort_unstable();
        prop_assert_eq!(table.selectors(), expected);
    }

    #[test]
    fn verification_is_idempotent((selectors, shapes) in interface()) {
        let operations = OperationSet::load(&document(&selectors, &shapes)).unwrap();
        let candidate = candidate(&shapes);
        let first = verify(&operations, &candidate).unwrap();
        let second = verify(&operations, &candidate).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn colliding_selectors_never_build((selectors, shapes) in interface(), pick in any::<prop::sample::Index>()) {
        let mut selectors = selectors;
        let duplicate = selectors[pick.index(selectors.len())];
        selectors.push(duplicate);
        let mut shapes = shapes;
        shapes.push(0);

        let errors = OperationSet::load(&document(&selectors, &shapes)).unwrap_err();
        prop_assert_eq!(errors.len(), 1);
        let is_duplicate = matches!(
            &errors[0],
            LoadError::DuplicateSelector { selector, .. } if *selector == Selector::from_u32(duplicate)
        );
        prop_assert!(is_duplicate);
    }

    #[test]
    fn one_missing_handler_is_reported_once((selectors, shapes) in interface(), pick in any::<prop::sample::Index>()) {
        let missing = pick.index(shapes.len());
        let operations = OperationSet::load(&document(&selectors, &shapes)).unwrap();
        let candidate = shapes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != missing)
            .fold(Candidate::new("Generated", Unit), |c, (i, &shape)| with_routines(c, i, shape));

        let errors = verify(&operations, &candidate).unwrap_err();
        prop_assert_eq!(
            errors,
            vec![
                ConformanceError::MissingHandler {
                    operation: operation_name(missing),
                    handler: handler_name(&operation_name(missing)),
                },
                ConformanceError::MissingCostEstimator {
                    operation: operation_name(missing),
                    estimator: cost_estimator_name(&operation_name(missing)),
                },
            ]
        );
    }
}
