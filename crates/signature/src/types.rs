use crate::{digest, error::SignatureError, ecdsa::RecoverableSignature};
use serde::Serialize;
use std::str::FromStr;

/// 32-byte Keccak-256 digest, the unit that gets signed.
pub type Digest = [u8; 32];

pub trait Signer: FromStr<Err = SignatureError> + Sized {
    fn from_slice(slice: &[u8]) -> Result<Self, SignatureError>;

    fn sign_digest(&self, digest: &Digest) -> Result<RecoverableSignature, SignatureError>;

    fn sign<T: Serialize>(&self, message: &T) -> Result<RecoverableSignature, SignatureError> {
        let digest = digest(message)?;
        self.sign_digest(&digest)
    }
}

pub trait Verifier: FromStr<Err = SignatureError> + Sized {
    fn from_slice(slice: &[u8]) -> Result<Self, SignatureError>;

    /// Returns `Ok(false)` when the signature is well formed but was not
    /// produced by this key over `digest`.
    fn verify_digest(
        &self,
        digest: &Digest,
        signature: &RecoverableSignature,
    ) -> Result<bool, SignatureError>;

    fn verify<T: Serialize>(
        &self,
        message: &T,
        signature: &RecoverableSignature,
    ) -> Result<bool, SignatureError> {
        let digest = digest(message)?;
        self.verify_digest(&digest, signature)
    }
}
