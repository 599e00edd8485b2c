//! Precompile Set Tests
//!
//! Registration of several interfaces at fixed addresses, with every failure
//! collected into one error.

use arbos_config::RegistryConfig;
use arbos_precompile::*;
use arbos_primitives::{Address, Selector, Value};
use num_bigint::BigInt;

struct Info;

impl Info {
    fn get_version(&self, _caller: Caller) -> Result<u64, HandlerError> {
        Ok(3)
    }

    fn get_version_gas_cost(&self) -> BigInt {
        BigInt::from(0)
    }
}

fn info_document() -> InterfaceDocument {
    InterfaceDocument::new(
        "ArbInfo",
        vec![AbiEntry::function("getVersion", "pure", &[], &["uint64"])],
    )
}

fn info_candidate() -> Candidate<Info> {
    Candidate::new("ArbInfo", Info)
        .routine("GetVersion", Info::get_version)
        .routine("GetVersionGasCost", Info::get_version_gas_cost)
}

#[cfg(test)]
mod precompile_set_tests {
    use super::*;

    /// Registered precompiles are reachable by address
    #[test]
    fn test_lookup_and_call_by_address() {
        let address = Address::parse("0x65").unwrap();
        let set = PrecompileSet::builder()
            .register(address, &info_document(), &info_candidate())
            .build()
            .unwrap();

        assert!(set.contains(&address));
        assert!(!set.contains(&Address::parse("0x66").unwrap()));
        let info = set.get(&address).unwrap();
        let outcome = info
            .dispatch(
                Selector::from_signature("getVersion()"),
                &CallContext::new(Address::from_low_u64(1), address),
                vec![],
            )
            .unwrap();
        assert_eq!(outcome.returns, vec![Value::U64(3)]);
    }

    /// Every failing registration is reported, not just the first
    #[test]
    fn test_all_registration_failures_are_collected() {
        let broken_document = InterfaceDocument::new(
            "Broken",
            vec![AbiEntry::function("odd", "sometimes", &[], &[])],
        );
        let empty: Candidate<Info> = Candidate::new("Empty", Info);

        let err = PrecompileSet::builder_with_config(RegistryConfig::permissive())
            .register(Address::from_low_u64(0x65), &info_document(), &info_candidate())
            .register(Address::from_low_u64(0x66), &broken_document, &info_candidate())
            .register(Address::from_low_u64(0x67), &info_document(), &empty)
            .register(Address::from_low_u64(0x65), &info_document(), &info_candidate())
            .build()
            .unwrap_err();

        let RegistryError::Set { errors } = err else {
            panic!("expected a set error");
        };
        assert_eq!(errors.len(), 3);
        assert!(matches!(&errors[0], RegistryError::Load { interface, .. } if interface == "Broken"));
        assert!(matches!(
            &errors[1],
            RegistryError::Conformance { candidate, errors, .. } if candidate == "Empty" && errors.len() == 2
        ));
        assert_eq!(
            errors[2],
            RegistryError::DuplicateAddress {
                address: Address::from_low_u64(0x65),
            }
        );
    }

    /// Prebuilt precompiles can be inserted directly
    #[test]
    fn test_insert_prebuilt_precompile() {
        let precompile =
            Precompile::new(&info_document(), &info_candidate(), RegistryConfig::default())
                .unwrap();
        let set = PrecompileSet::builder()
            .insert(Address::from_low_u64(0x65), std::sync::Arc::new(precompile))
            .build()
            .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.addresses(), vec![Address::from_low_u64(0x65)]);
        assert_eq!(
            set.get(&Address::from_low_u64(0x65)).unwrap().table().len(),
            1
        );
    }
}
