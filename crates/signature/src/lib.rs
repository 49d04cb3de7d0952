//! Keccak digests and recoverable secp256k1 signatures.
//!
//! Workers sign the Keccak-256 digest of a message; the coordinator recovers
//! the worker's public key from the signature alone, so no key registration
//! is needed before the first submission.

mod ecdsa;
pub mod error;
mod hash;
mod types;

pub use ecdsa::{RecoverableSignature, SigningKey, VerifyingKey};
pub use error::SignatureError;
pub use hash::{digest, keccak256};
pub use types::{Digest, Signer, Verifier};
