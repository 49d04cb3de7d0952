use scoria_message::Hash32;
use scoria_signature::keccak256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An L2 block as seen by the proposer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    pub number: u64,
    pub hash: Hash32,
    pub parent_hash: Hash32,
    pub gas_used: u64,
    pub tx_num: u64,
    /// Unix seconds.
    pub block_timestamp: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub Hash32);

impl BatchId {
    /// keccak256(index big-endian || parent hash || end block hash).
    pub fn derive(index: u64, parent_hash: &Hash32, end_block_hash: &Hash32) -> Self {
        let mut preimage = Vec::with_capacity(8 + 32 + 32);
        preimage.extend_from_slice(&index.to_be_bytes());
        preimage.extend_from_slice(parent_hash.as_bytes());
        preimage.extend_from_slice(end_block_hash.as_bytes());
        Self(Hash32(keccak256(&preimage)))
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BatchId({})", self.0)
    }
}

/// A batch about to be written. The store assigns its id and index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBatch {
    pub start_block_number: u64,
    pub start_block_hash: Hash32,
    pub end_block_number: u64,
    pub end_block_hash: Hash32,
    pub parent_hash: Hash32,
    pub total_tx_num: u64,
    pub total_gas_used: u64,
}

impl NewBatch {
    /// Spans `blocks`, which must be a non-empty run in ascending order.
    pub(crate) fn spanning(blocks: &[BlockInfo]) -> Option<Self> {
        let (first, last) = (blocks.first()?, blocks.last()?);
        Some(Self {
            start_block_number: first.number,
            start_block_hash: first.hash,
            end_block_number: last.number,
            end_block_hash: last.hash,
            parent_hash: first.parent_hash,
            total_tx_num: blocks
                .iter()
                .fold(0u64, |acc, block| acc.saturating_add(block.tx_num)),
            total_gas_used: blocks
                .iter()
                .fold(0u64, |acc, block| acc.saturating_add(block.gas_used)),
        })
    }
}

/// A persisted batch. Created once and never changed by the proposer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub id: BatchId,
    pub index: u64,
    pub start_block_number: u64,
    pub start_block_hash: Hash32,
    pub end_block_number: u64,
    pub end_block_hash: Hash32,
    pub parent_hash: Hash32,
    pub total_tx_num: u64,
    pub total_gas_used: u64,
}

impl Batch {
    pub fn new(id: BatchId, index: u64, batch: NewBatch) -> Self {
        Self {
            id,
            index,
            start_block_number: batch.start_block_number,
            start_block_hash: batch.start_block_hash,
            end_block_number: batch.end_block_number,
            end_block_hash: batch.end_block_hash,
            parent_hash: batch.parent_hash,
            total_tx_num: batch.total_tx_num,
            total_gas_used: batch.total_gas_used,
        }
    }
}

/// Result of one [`crate::BatchProposer::try_propose_batch`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProposalOutcome {
    /// No unbatched blocks.
    Idle,
    /// Too little gas and the oldest block is still fresh; nothing written.
    Deferred,
    Proposed(Batch),
}

impl ProposalOutcome {
    pub fn batch(&self) -> Option<&Batch> {
        match self {
            Self::Proposed(batch) => Some(batch),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum Request {
    ProposeBatch,
}
