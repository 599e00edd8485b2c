//! Interface documents and their normalized operation descriptors.

use crate::error::LoadError;
use crate::mutability::Mutability;
use arbos_primitives::{SemanticType, Selector};
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

const FUNCTION: &str = "function";

fn function_kind() -> String {
    FUNCTION.to_string()
}

/// One named, typed parameter of an ABI entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl AbiParameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// One entry of a contract ABI. Only `function` entries describe operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiEntry {
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    /// Explicit hex selector; computed from the signature when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(rename = "stateMutability", default)]
    pub state_mutability: String,
    #[serde(default)]
    pub inputs: Vec<AbiParameter>,
    #[serde(default)]
    pub outputs: Vec<AbiParameter>,
}

impl AbiEntry {
    /// A function entry with unnamed parameters.
    pub fn function(
        name: impl Into<String>,
        state_mutability: impl Into<String>,
        inputs: &[&str],
        outputs: &[&str],
    ) -> Self {
        let params = |types: &[&str]| {
            types
                .iter()
                .map(|ty| AbiParameter::new("", *ty))
                .collect::<Vec<_>>()
        };
        Self {
            kind: function_kind(),
            name: name.into(),
            selector: None,
            state_mutability: state_mutability.into(),
            inputs: params(inputs),
            outputs: params(outputs),
        }
    }

    /// Pins the selector instead of deriving it from the signature.
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn is_function(&self) -> bool {
        self.kind == FUNCTION
    }
}

/// A parsed interface description: a name and its ABI entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDocument {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<AbiEntry>,
}

impl InterfaceDocument {
    pub fn new(name: impl Into<String>, entries: Vec<AbiEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }
}

/// A normalized, immutable operation declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    name: String,
    selector: Selector,
    mutability: Mutability,
    parameter_types: Vec<SemanticType>,
    return_types: Vec<SemanticType>,
}

impl OperationDescriptor {
    pub fn new(
        name: impl Into<String>,
        selector: Selector,
        mutability: Mutability,
        parameter_types: Vec<SemanticType>,
        return_types: Vec<SemanticType>,
    ) -> Self {
        Self {
            name: name.into(),
            selector,
            mutability,
            parameter_types,
            return_types,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selector(&self) -> Selector {
        self.selector
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
}

/// The operations of one interface, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationSet {
    interface: String,
    operations: Vec<OperationDescriptor>,
    by_selector: HashMap<Selector, usize>,
}

impl OperationSet {
    /// Normalizes every function entry of `document`.
    ///
    /// All problems across the document are collected; no set is produced if
    /// there is any.
    pub fn load(document: &InterfaceDocument) -> Result<Self, Vec<LoadError>> {
        let mut errors = Vec::new();
        let mut set = OperationSet {
            interface: document.name.clone(),
            ..Default::default()
        };
        let mut names: HashSet<&str> = HashSet::new();

        for entry in document.entries.iter().filter(|e| e.is_function()) {
            let repeated = !names.insert(entry.name.as_str());
            if repeated {
                errors.push(LoadError::DuplicateOperation {
                    operation: entry.name.clone(),
                });
            }
            // A repeated name still has its selector checked against the others.
            match describe(entry) {
                Ok(descriptor) => {
                    let selector = descriptor.selector();
                    if let Some(&first) = set.by_selector.get(&selector) {
                        errors.push(LoadError::DuplicateSelector {
                            selector,
                            first: set.operations[first].name.clone(),
                            second: descriptor.name.clone(),
                        });
                        continue;
                    }
                    if repeated {
                        continue;
                    }
                    trace!(operation = %descriptor.name, %selector, "operation loaded");
                    set.by_selector.insert(selector, set.operations.len());
                    set.operations.push(descriptor);
                }
                Err(mut entry_errors) => errors.append(&mut entry_errors),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        debug!(
            interface = %set.interface,
            operations = set.operations.len(),
            "interface loaded"
        );
        Ok(set)
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn get(&self, selector: Selector) -> Option<&OperationDescriptor> {
        self.by_selector.get(&selector).map(|&i| &self.operations[i])
    }

    pub fn by_name(&self, name: &str) -> Option<&OperationDescriptor> {
        self.operations.iter().find(|op| op.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.operations.iter()
    }

    pub fn selectors(&self) -> impl Iterator<Item = Selector> + '_ {
        self.operations.iter().map(|op| op.selector)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Whether some handler parameter or return type can carry `ty`.
///
/// `uint8[]` collides with `bytes` (`Vec<u8>`) and nested arrays have no
/// mapping.
fn has_rust_form(ty: &SemanticType) -> bool {
    match ty {
        SemanticType::Array(element) => {
            !matches!(**element, SemanticType::Array(_) | SemanticType::Uint(8))
        }
        _ => true,
    }
}

fn describe(entry: &AbiEntry) -> Result<OperationDescriptor, Vec<LoadError>> {
    let mut errors = Vec::new();
    let operation = entry.name.as_str();

    let mutability = Mutability::from_abi(&entry.state_mutability);
    if mutability.is_none() {
        errors.push(LoadError::UnknownMutability {
            operation: operation.to_string(),
            mutability: entry.state_mutability.clone(),
        });
    }

    let mut types = |params: &[AbiParameter]| -> Vec<SemanticType> {
        params
            .iter()
            .filter_map(|param| match SemanticType::parse_abi(&param.ty) {
                Ok(ty) if has_rust_form(&ty) => Some(ty),
                _ => {
                    errors.push(LoadError::UnsupportedType {
                        operation: operation.to_string(),
                        ty: param.ty.clone(),
                    });
                    None
                }
            })
            .collect()
    };
    let parameter_types = types(&entry.inputs);
    let return_types = types(&entry.outputs);

    let selector = match &entry.selector {
        Some(text) => match Selector::parse(text) {
            Ok(selector) => Some(selector),
            Err(_) => {
                errors.push(LoadError::MalformedSelector {
                    operation: operation.to_string(),
                    selector: text.clone(),
                });
                None
            }
        },
        // Types already failed to parse when the signature cannot be built.
        None => canonical_signature(entry)
            .ok()
            .map(|signature| Selector::from_signature(&signature)),
    };

    match (mutability, selector) {
        (Some(mutability), Some(selector)) if errors.is_empty() => Ok(OperationDescriptor {
            name: operation.to_string(),
            selector,
            mutability,
            parameter_types,
            return_types,
        }),
        _ => Err(errors),
    }
}

/// The `name(type,…)` form hashed into a selector.
pub fn canonical_signature(entry: &AbiEntry) -> Result<String, LoadError> {
    let types = entry
        .inputs
        .iter()
        .map(|param| {
            SemanticType::canonical_abi_name(&param.ty).map_err(|_| LoadError::UnsupportedType {
                operation: entry.name.clone(),
                ty: param.ty.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{}({})", entry.name, types.join(",")))
}
