use crate::{
    codec::{Hash32, hex_bytes},
    error::SanityError,
};
use scoria_signature::{Digest, keccak256};
use serde::{Deserialize, Serialize};

/// Public-input material of a chunk. The coordinator computes it for every
/// chunk task and the worker embeds its own copy in the [`ChunkProof`], so
/// the two can be cross-checked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkInfo {
    pub chain_id: u64,
    pub prev_state_root: Hash32,
    pub post_state_root: Hash32,
    pub withdraw_root: Hash32,
    pub data_hash: Hash32,
    pub is_padding: bool,
    #[serde(with = "hex_bytes")]
    pub tx_bytes: Vec<u8>,
}

impl ChunkInfo {
    /// `keccak(chain_id_be || prev_state_root || post_state_root ||
    /// withdraw_root || data_hash)`
    pub fn public_input_hash(&self) -> Digest {
        let mut preimage = Vec::with_capacity(8 + 4 * 32);
        preimage.extend_from_slice(&self.chain_id.to_be_bytes());
        preimage.extend_from_slice(self.prev_state_root.as_bytes());
        preimage.extend_from_slice(self.post_state_root.as_bytes());
        preimage.extend_from_slice(self.withdraw_root.as_bytes());
        preimage.extend_from_slice(self.data_hash.as_bytes());
        keccak256(&preimage)
    }
}

/// Row usage reported by one sub-circuit, passed through untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCircuitRowUsage {
    pub name: String,
    pub row_number: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkProof {
    #[serde(default, with = "hex_bytes::option")]
    pub storage_trace: Option<Vec<u8>>,
    #[serde(with = "hex_bytes")]
    pub protocol: Vec<u8>,
    #[serde(with = "hex_bytes")]
    pub proof: Vec<u8>,
    #[serde(with = "hex_bytes")]
    pub instances: Vec<u8>,
    #[serde(with = "hex_bytes")]
    pub vk: Vec<u8>,
    #[serde(default)]
    pub chunk_info: Option<ChunkInfo>,
    #[serde(default)]
    pub git_version: String,
    #[serde(default)]
    pub row_usages: Vec<SubCircuitRowUsage>,
}

impl ChunkProof {
    /// Whether the chunk info embedded by the worker is the one the
    /// coordinator expects. A proof without chunk info never matches.
    pub fn matches_chunk_info(&self, expected: &ChunkInfo) -> bool {
        self.chunk_info.as_ref() == Some(expected)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProof {
    #[serde(with = "hex_bytes")]
    pub proof: Vec<u8>,
    #[serde(with = "hex_bytes")]
    pub instances: Vec<u8>,
    #[serde(with = "hex_bytes")]
    pub vk: Vec<u8>,
    #[serde(default)]
    pub git_version: String,
}

impl BatchProof {
    /// Proof bytes are a sequence of 32-byte field elements.
    pub const FIELD_ELEMENT_SIZE: usize = 32;

    pub fn sanity_check(&self) -> Result<(), SanityError> {
        if self.proof.is_empty() {
            return Err(SanityError::NotReady);
        }
        if self.proof.len() % Self::FIELD_ELEMENT_SIZE != 0 {
            return Err(SanityError::WrongLength(self.proof.len()));
        }
        Ok(())
    }
}

/// Sanity check for a batch proof that may not have been submitted at all.
pub fn sanity_check(proof: Option<&BatchProof>) -> Result<(), SanityError> {
    proof.ok_or(SanityError::Missing)?.sanity_check()
}
