//! The address-keyed set of precompiles a host serves.

use crate::candidate::Candidate;
use crate::descriptor::InterfaceDocument;
use crate::error::{RegistryError, RegistryResult};
use crate::router::{Precompile, PrecompileCall};
use arbos_config::RegistryConfig;
use arbos_primitives::Address;
use hashbrown::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Immutable mapping from precompile address to precompile.
#[derive(Clone, Default)]
pub struct PrecompileSet {
    precompiles: HashMap<Address, Arc<dyn PrecompileCall>>,
}

impl PrecompileSet {
    pub fn builder() -> PrecompileSetBuilder {
        PrecompileSetBuilder::new(RegistryConfig::default())
    }

    pub fn builder_with_config(config: RegistryConfig) -> PrecompileSetBuilder {
        PrecompileSetBuilder::new(config)
    }

    pub fn get(&self, address: &Address) -> Option<Arc<dyn PrecompileCall>> {
        self.precompiles.get(address).cloned()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.precompiles.contains_key(address)
    }

    /// Registered addresses, sorted.
    pub fn addresses(&self) -> Vec<Address> {
        let mut addresses: Vec<Address> = self.precompiles.keys().copied().collect();
        addresses.sort_unstable();
        addresses
    }

    pub fn len(&self) -> usize {
        self.precompiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.precompiles.is_empty()
    }
}

impl fmt::Debug for PrecompileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.addresses()
                    .into_iter()
                    .filter_map(|a| self.precompiles.get(&a).map(|p| (a, p.name().to_string()))),
            )
            .finish()
    }
}

/// Collects registrations; [`PrecompileSetBuilder::build`] reports every
/// failure at once.
pub struct PrecompileSetBuilder {
    config: RegistryConfig,
    precompiles: HashMap<Address, Arc<dyn PrecompileCall>>,
    errors: Vec<RegistryError>,
}

impl PrecompileSetBuilder {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            precompiles: HashMap::new(),
            errors: Vec::new(),
        }
    }

    /// Verifies `candidate` against `document` and registers the result at `address`.
    pub fn register<C>(
        mut self,
        address: Address,
        document: &InterfaceDocument,
        candidate: &Candidate<C>,
    ) -> Self
    where
        C: Send + Sync + 'static,
    {
        match Precompile::new(document, candidate, self.config.clone()) {
            Ok(precompile) => self.insert(address, Arc::new(precompile)),
            Err(error) => {
                warn!(%address, interface = %document.name, "precompile rejected");
                self.errors.push(error);
                self
            }
        }
    }

    /// Registers an already constructed precompile.
    pub fn insert(mut self, address: Address, precompile: Arc<dyn PrecompileCall>) -> Self {
        if self.precompiles.contains_key(&address) {
            warn!(%address, "address registered twice");
            self.errors.push(RegistryError::DuplicateAddress { address });
        } else {
            self.precompiles.insert(address, precompile);
        }
        self
    }

    pub fn build(self) -> RegistryResult<PrecompileSet> {
        if !self.errors.is_empty() {
            return Err(RegistryError::Set {
                errors: self.errors,
            });
        }
        info!(precompiles = self.precompiles.len(), "precompile set built");
        Ok(PrecompileSet {
            precompiles: self.precompiles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Caller;
    use crate::descriptor::AbiEntry;
    use crate::error::HandlerError;
    use num_bigint::BigInt;

    struct Version;

    fn document() -> InterfaceDocument {
        InterfaceDocument::new(
            "Version",
            vec![AbiEntry::function("version", "pure", &[], &["uint64"])],
        )
    }

    fn candidate() -> Candidate<Version> {
        Candidate::new("Version", Version)
            .routine("Version", |_: &Version, _caller: Caller| -> Result<u64, HandlerError> {
                Ok(1)
            })
            .routine("VersionGasCost", |_: &Version| BigInt::from(0))
    }

    #[test]
    fn addresses_are_sorted() {
        let set = PrecompileSet::builder()
            .register(Address::from_low_u64(0x65), &document(), &candidate())
            .register(Address::from_low_u64(0x64), &document(), &candidate())
            .build()
            .unwrap();
        assert_eq!(
            set.addresses(),
            vec![Address::from_low_u64(0x64), Address::from_low_u64(0x65)]
        );
        assert_eq!(set.get(&Address::from_low_u64(0x64)).unwrap().name(), "Version");
    }

    #[test]
    fn duplicate_address_fails_the_set() {
        let err = PrecompileSet::builder()
            .register(Address::from_low_u64(0x65), &document(), &candidate())
            .register(Address::from_low_u64(0x65), &document(), &candidate())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::Set {
                errors: vec![RegistryError::DuplicateAddress {
                    address: Address::from_low_u64(0x65),
                }],
            }
        );
    }
}
