//! Record encoding.
//!
//! A [`Codec`] turns an entity into the bytes of one record and back. The
//! store appends the record boundary (`\n`) itself, so an encoding must not
//! contain a line terminator.

use chal_types::Entity;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Envelope format version written by [`JsonLinesCodec`].
pub const RECORD_FORMAT: u32 = 1;

/// Encode/decode pair between an entity and its record bytes.
pub trait Codec<E>: Send + Sync {
    /// Encode one entity. The output must not contain `\n`.
    fn encode(&self, entity: &E) -> StoreResult<Vec<u8>>;

    /// Decode one record, without its line terminator.
    fn decode(&self, bytes: &[u8]) -> StoreResult<E>;
}

/// Compact JSON inside a versioned envelope:
///
/// ```text
/// {"format":1,"kind":"challenge","entity":{...}}
/// ```
///
/// Decoding rejects unknown formats and records of another entity kind.
/// Compact serde_json output escapes newlines inside strings, so an encoded
/// record is always a single line.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonLinesCodec;

#[derive(Serialize)]
struct EnvelopeRef<'a, E> {
    format: u32,
    kind: &'a str,
    entity: &'a E,
}

#[derive(Deserialize)]
struct Envelope {
    format: u32,
    kind: String,
    entity: serde_json::Value,
}

impl<E> Codec<E> for JsonLinesCodec
where
    E: Entity + Serialize + DeserializeOwned,
{
    fn encode(&self, entity: &E) -> StoreResult<Vec<u8>> {
        let envelope = EnvelopeRef {
            format: RECORD_FORMAT,
            kind: E::KIND,
            entity,
        };
        serde_json::to_vec(&envelope).map_err(|e| StoreError::Codec(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> StoreResult<E> {
        let envelope: Envelope =
            serde_json::from_slice(bytes).map_err(|e| StoreError::Codec(e.to_string()))?;
        if envelope.format != RECORD_FORMAT {
            return Err(StoreError::UnsupportedFormat {
                found: envelope.format,
                supported: RECORD_FORMAT,
            });
        }
        if envelope.kind != E::KIND {
            return Err(StoreError::KindMismatch {
                expected: E::KIND.to_string(),
                found: envelope.kind,
            });
        }
        serde_json::from_value(envelope.entity).map_err(|e| StoreError::Codec(e.to_string()))
    }
}
