//! ArbOS Configuration Module
//!
//! This module provides the protocol constants and the registry configuration
//! consumed by the precompile registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Size of an account address in bytes
pub const ADDRESS_SIZE: usize = 20;
/// Size of a method selector in bytes
pub const SELECTOR_SIZE: usize = 4;
/// Size of a storage slot key or value in bytes
pub const SLOT_SIZE: usize = 32;
/// Widest integer (in bits) that is carried as a native integer; wider ones are arbitrary precision
pub const MAX_NATIVE_INT_BITS: u16 = 64;

/// What the router does with a call that reached a precompile indirectly
/// (delegate call or call code), i.e. when the acting-as address differs
/// from the precompile's own address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ForwardedCallPolicy {
    /// Pass the call through. Handlers see `Caller::is_forwarded` and decide.
    #[default]
    Permit,
    /// Refuse forwarded calls to every operation that is not pure.
    RejectNonPure,
}

impl fmt::Display for ForwardedCallPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForwardedCallPolicy::Permit => write!(f, "permit"),
            ForwardedCallPolicy::RejectNonPure => write!(f, "reject-non-pure"),
        }
    }
}

impl FromStr for ForwardedCallPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "permit" | "allow" => Ok(ForwardedCallPolicy::Permit),
            "reject-non-pure" | "reject" => Ok(ForwardedCallPolicy::RejectNonPure),
            _ => Err(format!("Unknown forwarded call policy: {}", s)),
        }
    }
}

/// Errors raised while reading a registry configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for [`RegistryConfig`].
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Handling of calls that arrive through a delegate call.
    pub forwarded_calls: ForwardedCallPolicy,
    /// Refuse state-writing operations inside a read-only (static) call.
    pub enforce_read_only: bool,
    /// Refuse calls carrying value to operations that are not payable.
    pub reject_value_to_non_payable: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            forwarded_calls: ForwardedCallPolicy::Permit,
            enforce_read_only: true,
            reject_value_to_non_payable: true,
        }
    }
}

impl RegistryConfig {
    /// A configuration that performs no policy checks at all; the router only
    /// resolves selectors and checks argument shapes.
    pub fn permissive() -> Self {
        Self {
            forwarded_calls: ForwardedCallPolicy::Permit,
            enforce_read_only: false,
            reject_value_to_non_payable: false,
        }
    }

    /// Parses a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keeps_forwarded_calls_permissive() {
        let config = RegistryConfig::default();
        assert_eq!(config.forwarded_calls, ForwardedCallPolicy::Permit);
        assert!(config.enforce_read_only);
        assert!(config.reject_value_to_non_payable);
    }

    #[test]
    fn policy_round_trips_through_strings() {
        for policy in [ForwardedCallPolicy::Permit, ForwardedCallPolicy::RejectNonPure] {
            let parsed: ForwardedCallPolicy = policy.to_string().parse().unwrap();
            assert_eq!(parsed, policy);
        }
        assert!("sometimes".parse::<ForwardedCallPolicy>().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = RegistryConfig::from_toml_str("forwarded_calls = \"reject-non-pure\"\n")
            .expect("valid config");
        assert_eq!(config.forwarded_calls, ForwardedCallPolicy::RejectNonPure);
        assert!(config.enforce_read_only);
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = RegistryConfig::from_toml_str("enforce_read_only = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
