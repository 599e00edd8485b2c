//! Mutability classes and the context each class injects into its handlers.

use arbos_primitives::SemanticType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared state mutability of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mutability {
    /// Touches neither state nor value.
    #[serde(rename = "pure")]
    Pure,
    /// Reads state.
    #[serde(rename = "view")]
    View,
    /// Reads and writes state.
    #[serde(rename = "nonpayable")]
    Mutate,
    /// Reads and writes state and receives value.
    #[serde(rename = "payable")]
    Payable,
}

/// One contextual argument injected ahead of the declared arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    /// The calling address.
    Caller,
    /// The state-access handle.
    State,
    /// The value sent with the call.
    Value,
}

const PURE_CONTEXT: &[ContextKind] = &[ContextKind::Caller];
const STATE_CONTEXT: &[ContextKind] = &[ContextKind::Caller, ContextKind::State];
const PAYABLE_CONTEXT: &[ContextKind] =
    &[ContextKind::Caller, ContextKind::State, ContextKind::Value];

impl Mutability {
    /// Parses an ABI `stateMutability` tag.
    pub fn from_abi(tag: &str) -> Option<Self> {
        match tag {
            "pure" => Some(Mutability::Pure),
            "view" => Some(Mutability::View),
            "nonpayable" => Some(Mutability::Mutate),
            "payable" => Some(Mutability::Payable),
            _ => None,
        }
    }

    /// The ABI tag for this class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mutability::Pure => "pure",
            Mutability::View => "view",
            Mutability::Mutate => "nonpayable",
            Mutability::Payable => "payable",
        }
    }

    /// Context every handler of this class takes, in order, right after the receiver.
    pub fn context(&self) -> &'static [ContextKind] {
        match self {
            Mutability::Pure => PURE_CONTEXT,
            Mutability::View | Mutability::Mutate => STATE_CONTEXT,
            Mutability::Payable => PAYABLE_CONTEXT,
        }
    }

    /// Semantic types of [`Mutability::context`].
    pub fn context_types(&self) -> Vec<SemanticType> {
        self.context().iter().map(ContextKind::semantic_type).collect()
    }

    pub fn is_pure(&self) -> bool {
        matches!(self, Mutability::Pure)
    }

    pub fn writes_state(&self) -> bool {
        matches!(self, Mutability::Mutate | Mutability::Payable)
    }

    pub fn is_payable(&self) -> bool {
        matches!(self, Mutability::Payable)
    }
}

impl ContextKind {
    /// The slot type a handler declares for this context.
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            ContextKind::Caller => SemanticType::Address,
            ContextKind::State => SemanticType::State,
            ContextKind::Value => SemanticType::BigInt,
        }
    }
}

impl fmt::Display for Mutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mutability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_abi(s).ok_or_else(|| format!("Unknown state mutability: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_order_is_caller_state_value() {
        assert_eq!(Mutability::Pure.context_types(), vec![SemanticType::Address]);
        assert_eq!(
            Mutability::View.context_types(),
            vec![SemanticType::Address, SemanticType::State]
        );
        assert_eq!(Mutability::Mutate.context(), Mutability::View.context());
        assert_eq!(
            Mutability::Payable.context_types(),
            vec![SemanticType::Address, SemanticType::State, SemanticType::BigInt]
        );
    }

    #[test]
    fn abi_tags() {
        for m in [
            Mutability::Pure,
            Mutability::View,
            Mutability::Mutate,
            Mutability::Payable,
        ] {
            assert_eq!(m.as_str().parse::<Mutability>().unwrap(), m);
        }
        assert!("constant".parse::<Mutability>().is_err());
        assert!(Mutability::Payable.writes_state());
        assert!(!Mutability::View.writes_state());
    }
}
