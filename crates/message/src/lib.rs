//! Messages exchanged between the coordinator and proving workers.
//!
//! The coordinator sends [`TaskMsg`]s out; workers answer with a signed
//! [`ProofMsg`]. The worker's identity is recovered from the signature.

mod codec;
mod detail;
mod error;
mod proof;
mod proof_msg;
mod task_msg;
mod token;
mod types;

pub use codec::Hash32;
pub use detail::{ProofDetail, ProofOutcome, ProofPayload};
pub use error::{Error, Result, SanityError};
pub use proof::{BatchProof, ChunkInfo, ChunkProof, SubCircuitRowUsage, sanity_check};
pub use proof_msg::ProofMsg;
pub use task_msg::{BatchTaskDetail, ChunkTaskDetail, TaskDetail, TaskMsg};
pub use token::{TOKEN_BYTE_LENGTH, generate_token, generate_token_with_len};
pub use types::{ProofFailureType, ProofType, RespStatus};
