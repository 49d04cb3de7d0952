use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a proving attempt failed. Informational, it does not affect whether a
/// message is valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofFailureType {
    #[default]
    Undefined,
    /// The worker crashed while proving.
    Panic,
    /// The worker returned a controlled error.
    NoPanic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespStatus {
    Ok,
    ProofError,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ProofType {
    #[default]
    Undefined = 0,
    /// Proves the blocks of a single chunk from their traces.
    Chunk = 1,
    /// Aggregates chunk proofs into one proof.
    Batch = 2,
}

impl fmt::Display for ProofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofType::Chunk => f.write_str("proof type chunk"),
            ProofType::Batch => f.write_str("proof type batch"),
            ProofType::Undefined => write!(f, "illegal proof type: {}", *self as u8),
        }
    }
}
