//! Host-provided argument encoding.

use crate::error::CodecError;
use arbos_primitives::{SemanticType, Value};

/// Converts between raw call payloads and typed values. The router only uses
/// it on the raw byte surface ([`crate::Precompile::call_raw`]); the encoding
/// itself belongs to the host.
pub trait ArgumentCodec: Send + Sync {
    /// Decodes `payload` (selector already stripped) into values of `types`.
    fn decode(&self, types: &[SemanticType], payload: &[u8]) -> Result<Vec<Value>, CodecError>;

    /// Encodes handler outputs of `types`.
    fn encode(&self, types: &[SemanticType], values: &[Value]) -> Result<Vec<u8>, CodecError>;
}
