use crate::types::{Batch, BatchId, BlockInfo, NewBatch};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),
    #[error("Block {0} not found")]
    BlockNotFound(u64),
    #[error("Block {number} is already assigned to batch {batch_id}")]
    AlreadyBatched { number: u64, batch_id: BatchId },
    #[error("Batch index {0} was taken by a concurrent writer")]
    IndexConflict(u64),
    #[error("Batch {0} not found")]
    BatchNotFound(BatchId),
}

/// Read side of the block and batch tables.
#[trait_variant::make(Send)]
pub trait BlockStore: Send + Sync + 'static {
    type Transaction: StoreTransaction;

    /// Blocks with no batch, ascending by number, at most `limit` of them.
    async fn get_unbatched_blocks(&self, limit: usize) -> Result<Vec<BlockInfo>, StoreError>;

    async fn begin_transaction(&self) -> Result<Self::Transaction, StoreError>;
}

/// Writes staged in a transaction become visible together on
/// [`StoreTransaction::commit`], or not at all.
#[trait_variant::make(Send)]
pub trait StoreTransaction: Send + Sized {
    /// Inserts a batch row and returns it with its assigned id and index.
    async fn create_batch(&mut self, batch: NewBatch) -> Result<Batch, StoreError>;

    async fn assign_batch_to_blocks(
        &mut self,
        block_numbers: &[u64],
        batch_id: &BatchId,
    ) -> Result<(), StoreError>;

    /// Applies every staged write. A store whose commit fails must leave
    /// none of them applied, rolling back internally if needed.
    async fn commit(self) -> Result<(), StoreError>;

    async fn rollback(self) -> Result<(), StoreError>;
}
