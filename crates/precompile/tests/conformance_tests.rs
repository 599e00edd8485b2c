//! Conformance Verification Tests
//!
//! These tests check that candidates are accepted exactly when every declared
//! operation has a correctly typed handler and cost estimator, and that every
//! defect is reported.

use arbos_config::RegistryConfig;
use arbos_precompile::*;
use arbos_primitives::{Address, SemanticType, Selector, Value};
use num_bigint::BigInt;

struct Echo;

impl Echo {
    fn echo(&self, _caller: Caller, x: i32) -> Result<i32, HandlerError> {
        Ok(x)
    }

    fn echo_gas_cost(&self, _x: i32) -> BigInt {
        BigInt::from(10)
    }
}

/// Takes the widest handler shape: payable context plus eight declared parameters.
struct Ledger;

impl Ledger {
    #[allow(clippy::too_many_arguments)]
    fn settle(
        &self,
        _caller: Caller,
        _state: StateHandle,
        value: BigInt,
        a: i8,
        b: i16,
        c: i32,
        d: i64,
        e: u8,
        f: u16,
        g: u32,
        h: u64,
    ) -> Result<BigInt, HandlerError> {
        let total = i64::from(a) + i64::from(b) + i64::from(c) + d;
        let unsigned = u64::from(e) + u64::from(f) + u64::from(g) + h;
        Ok(value + BigInt::from(total) + BigInt::from(unsigned))
    }

    #[allow(clippy::too_many_arguments)]
    fn settle_gas_cost(
        &self,
        _a: i8,
        _b: i16,
        _c: i32,
        _d: i64,
        _e: u8,
        _f: u16,
        _g: u32,
        _h: u64,
    ) -> BigInt {
        BigInt::from(8)
    }
}

fn echo_document() -> InterfaceDocument {
    InterfaceDocument::new(
        "Echo",
        vec![AbiEntry::function("Echo", "pure", &["int32"], &["int32"]).with_selector("0xAABBCCDD")],
    )
}

fn echo_operations() -> OperationSet {
    OperationSet::load(&echo_document()).unwrap()
}

#[cfg(test)]
mod conformance_tests {
    use super::*;

    /// A conforming Echo candidate verifies and binds exactly its selector
    #[test]
    fn test_echo_candidate_conforms() {
        let candidate = Candidate::new("Echo", Echo)
            .routine("Echo", Echo::echo)
            .routine("EchoGasCost", Echo::echo_gas_cost);

        let table = verify(&echo_operations(), &candidate).expect("echo conforms");
        assert_eq!(table.selectors(), vec![Selector::from_u32(0xAABBCCDD)]);

        let binding = table.get(&Selector::from_u32(0xAABBCCDD)).unwrap();
        assert_eq!(binding.operation(), "Echo");
        assert_eq!(binding.handler_name(), "Echo");
        assert_eq!(binding.mutability(), Mutability::Pure);
        assert_eq!(binding.gas_cost().name(), "EchoGasCost");
    }

    /// An Echo handler without the caller parameter is a mismatch at position 1
    #[test]
    fn test_echo_without_caller_is_signature_mismatch() {
        let candidate = Candidate::new("Echo", Echo)
            .routine("Echo", |_: &Echo, x: i32| -> Result<i32, HandlerError> { Ok(x) })
            .routine("EchoGasCost", Echo::echo_gas_cost);

        let errors = verify(&echo_operations(), &candidate).unwrap_err();
        assert!(errors.contains(&ConformanceError::SignatureMismatch {
            operation: "Echo".into(),
            handler: "Echo".into(),
            position: 1,
            expected: Some(SemanticType::Address),
            actual: Some(SemanticType::Int(32)),
        }));
        // The shortened arity shows up as a missing final slot.
        assert!(errors.contains(&ConformanceError::SignatureMismatch {
            operation: "Echo".into(),
            handler: "Echo".into(),
            position: 2,
            expected: Some(SemanticType::Int(32)),
            actual: None,
        }));
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0].to_string(),
            "Echo for Echo: arg 1 is int32 instead of address"
        );
    }

    /// A pure handler taking state fails right after the caller slot
    #[test]
    fn test_pure_handler_taking_state_fails_after_caller() {
        let candidate = Candidate::new("Echo", Echo)
            .routine(
                "Echo",
                |_: &Echo, _caller: Caller, _state: StateHandle, x: i32| -> Result<i32, HandlerError> {
                    Ok(x)
                },
            )
            .routine("EchoGasCost", Echo::echo_gas_cost);

        let errors = verify(&echo_operations(), &candidate).unwrap_err();
        assert_eq!(
            errors.first(),
            Some(&ConformanceError::SignatureMismatch {
                operation: "Echo".into(),
                handler: "Echo".into(),
                position: 2,
                expected: Some(SemanticType::Int(32)),
                actual: Some(SemanticType::State),
            })
        );
    }

    /// Missing handler and missing estimator are both reported
    #[test]
    fn test_missing_handler_and_estimator_reported_together() {
        let candidate: Candidate<Echo> = Candidate::new("Echo", Echo);
        let errors = verify(&echo_operations(), &candidate).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ConformanceError::MissingHandler {
                    operation: "Echo".into(),
                    handler: "Echo".into(),
                },
                ConformanceError::MissingCostEstimator {
                    operation: "Echo".into(),
                    estimator: "EchoGasCost".into(),
                },
            ]
        );
    }

    /// Handler names come from capitalizing the declared operation name
    #[test]
    fn test_lower_case_operations_bind_capitalized_handlers() {
        let document = InterfaceDocument::new(
            "Echo",
            vec![AbiEntry::function("echo", "pure", &["int32"], &["int32"])],
        );
        let operations = OperationSet::load(&document).unwrap();

        let lower = Candidate::new("Echo", Echo)
            .routine("echo", Echo::echo)
            .routine("echoGasCost", Echo::echo_gas_cost);
        let errors = verify(&operations, &lower).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            &errors[0],
            ConformanceError::MissingHandler { handler, .. } if handler == "Echo"
        ));

        let upper = Candidate::new("Echo", Echo)
            .routine("Echo", Echo::echo)
            .routine("EchoGasCost", Echo::echo_gas_cost);
        let table = verify(&operations, &upper).unwrap();
        assert!(table.contains(&Selector::from_signature("echo(int32)")));
    }

    /// Errors from every operation are collected in one run
    #[test]
    fn test_errors_across_operations_are_collected() {
        let document = InterfaceDocument::new(
            "Mixed",
            vec![
                AbiEntry::function("echo", "pure", &["int32"], &["int32"]),
                AbiEntry::function("balance", "view", &["address"], &["uint256"]),
                AbiEntry::function("deposit", "payable", &[], &[]),
            ],
        );
        let operations = OperationSet::load(&document).unwrap();
        let candidate = Candidate::new("Mixed", Echo)
            .routine("Echo", Echo::echo)
            .routine("EchoGasCost", Echo::echo_gas_cost)
            // View handler missing its state handle.
            .routine(
                "Balance",
                |_: &Echo, _caller: Caller, _who: Address| -> Result<BigInt, HandlerError> {
                    Ok(BigInt::from(0))
                },
            )
            .routine("BalanceGasCost", |_: &Echo, _who: Address| BigInt::from(0));

        let errors = verify(&operations, &candidate).unwrap_err();
        let operations: Vec<&str> = errors.iter().map(ConformanceError::operation).collect();
        assert!(operations.contains(&"balance"));
        assert!(operations.contains(&"deposit"));
        assert!(!operations.contains(&"echo"));
        assert!(errors.contains(&ConformanceError::MissingHandler {
            operation: "deposit".into(),
            handler: "Deposit".into(),
        }));
        assert!(errors.contains(&ConformanceError::SignatureMismatch {
            operation: "balance".into(),
            handler: "Balance".into(),
            position: 2,
            expected: Some(SemanticType::State),
            actual: Some(SemanticType::Address),
        }));
    }

    /// Integers are matched by exact width, never coerced
    #[test]
    fn test_integer_widths_are_exact() {
        let candidate = Candidate::new("Echo", Echo)
            .routine(
                "Echo",
                |_: &Echo, _caller: Caller, x: i64| -> Result<i64, HandlerError> { Ok(x) },
            )
            .routine("EchoGasCost", |_: &Echo, _x: i64| BigInt::from(0));

        let errors = verify(&echo_operations(), &candidate).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| matches!(
            e,
            ConformanceError::ReturnMismatch { position: 0, expected: Some(SemanticType::Int(32)), actual: Some(SemanticType::Int(64)), .. }
        )));
        assert!(errors.iter().any(|e| matches!(
            e,
            ConformanceError::CostSignatureMismatch { position: 1, .. }
        )));
    }

    /// A registry failing verification never becomes usable
    #[test]
    fn test_precompile_construction_reports_conformance_errors() {
        let candidate: Candidate<Echo> = Candidate::new("Empty", Echo);
        let err = Precompile::new(&echo_document(), &candidate, RegistryConfig::default())
            .unwrap_err();
        match err {
            RegistryError::Conformance {
                interface,
                candidate,
                errors,
            } => {
                assert_eq!(interface, "Echo");
                assert_eq!(candidate, "Empty");
                assert_eq!(errors.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    /// Selector collisions fail at load time and no table is produced
    #[test]
    fn test_duplicate_selector_fails_construction() {
        let document = InterfaceDocument::new(
            "Echo",
            vec![
                AbiEntry::function("Echo", "pure", &["int32"], &["int32"]).with_selector("0xAABBCCDD"),
                AbiEntry::function("Shout", "pure", &["int32"], &["int32"]).with_selector("0xaabbccdd"),
            ],
        );
        let candidate = Candidate::new("Echo", Echo)
            .routine("Echo", Echo::echo)
            .routine("EchoGasCost", Echo::echo_gas_cost)
            .routine("Shout", Echo::echo)
            .routine("ShoutGasCost", Echo::echo_gas_cost);

        let err = Precompile::new(&document, &candidate, RegistryConfig::default()).unwrap_err();
        assert_eq!(
            err,
            RegistryError::Load {
                interface: "Echo".into(),
                errors: vec![LoadError::DuplicateSelector {
                    selector: Selector::from_u32(0xAABBCCDD),
                    first: "Echo".into(),
                    second: "Shout".into(),
                }],
            }
        );
    }

    /// A payable handler with eight declared parameters conforms and runs
    #[test]
    fn test_payable_handler_with_eight_parameters() {
        let params = ["int8", "int16", "int32", "int64", "uint8", "uint16", "uint32", "uint64"];
        let document = InterfaceDocument::new(
            "Ledger",
            vec![AbiEntry::function("settle", "payable", &params, &["uint256"])],
        );
        let candidate = Candidate::new("Ledger", Ledger)
            .routine("Settle", Ledger::settle)
            .routine("SettleGasCost", Ledger::settle_gas_cost);

        let precompile = Precompile::new(&document, &candidate, RegistryConfig::default())
            .expect("eight declared parameters conform");
        let selector = Selector::from_signature(
            "settle(int8,int16,int32,int64,uint8,uint16,uint32,uint64)",
        );
        let args = vec![
            Value::I8(1),
            Value::I16(2),
            Value::I32(3),
            Value::I64(4),
            Value::U8(5),
            Value::U16(6),
            Value::U32(7),
            Value::U64(8),
        ];
        let ctx = CallContext::new(Address::from_low_u64(1), Address::from_low_u64(0x70))
            .with_state(StateHandle::new(MemoryState::new()))
            .with_value(100);

        assert_eq!(precompile.cost_of(selector, args.clone()).unwrap(), BigInt::from(8));
        let outcome = precompile.dispatch(selector, &ctx, args).unwrap();
        assert_eq!(outcome.returns, vec![Value::BigInt(BigInt::from(136))]);
    }
}
