use scoria_signature::SignatureError;

pub type Result<T> = core::result::Result<T, Error>;

/// Protocol-level failures. A message that produced one of these must be
/// rejected; a signature that is well formed but does not match is reported
/// as `Ok(false)` by [`crate::ProofMsg::verify`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to sign the proof message: {0}")]
    Signing(#[source] SignatureError),
    #[error("Failed to verify the proof message: {0}")]
    Verification(#[source] SignatureError),
    #[error("Failed to generate a token: {0}")]
    Entropy(#[from] rand::Error),
    #[error("Batch task has {chunk_infos} chunk infos but {chunk_proofs} chunk proofs")]
    ChunkCountMismatch {
        chunk_infos: usize,
        chunk_proofs: usize,
    },
}

/// Structural defects of a batch proof, detected before any expensive
/// verification. Always recoverable by asking the worker to resubmit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanityError {
    #[error("agg_proof is nil")]
    Missing,
    #[error("proof not ready")]
    NotReady,
    #[error("proof buffer has wrong length, expected a multiple of 32, got: {0}")]
    WrongLength(usize),
}
