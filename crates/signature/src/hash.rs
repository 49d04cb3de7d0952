use crate::{error::SignatureError, types::Digest};
use serde::Serialize;
use tiny_keccak::{Hasher, Keccak};

pub fn keccak256(bytes: &[u8]) -> Digest {
    let mut hasher = Keccak::v256();
    hasher.update(bytes);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// Keccak-256 over the canonical bincode encoding of `message`.
///
/// bincode writes struct fields in declaration order, integers as fixed-width
/// little endian, and prefixes every sequence, string and byte blob with its
/// u64 length, so equal values always produce equal digests.
pub fn digest<T: Serialize + ?Sized>(message: &T) -> Result<Digest, SignatureError> {
    let bytes = bincode::serialize(message)?;
    Ok(keccak256(&bytes))
}
