use crate::{
    store::{BlockStore, StoreError, StoreTransaction},
    types::{Batch, BatchId, BlockInfo, NewBatch},
};
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::Mutex;

/// Store operation at which [`MemoryStore::fail_next`] injects an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePoint {
    GetUnbatchedBlocks,
    BeginTransaction,
    CreateBatch,
    AssignBatchToBlocks,
    Commit,
}

#[derive(Default)]
struct MemoryState {
    blocks: BTreeMap<u64, (BlockInfo, Option<BatchId>)>,
    batches: Vec<Batch>,
    fail_at: Option<FailurePoint>,
    rollbacks: u64,
}

impl MemoryState {
    fn take_failure(&mut self, point: FailurePoint) -> Result<(), StoreError> {
        if self.fail_at == Some(point) {
            self.fail_at = None;
            return Err(StoreError::Backend(format!("injected failure at {point:?}")));
        }
        Ok(())
    }
}

/// In-process [`BlockStore`]. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds blocks, replacing the stored info of known ones. A block that is
    /// already batched keeps its batch.
    pub async fn insert_blocks(&self, blocks: impl IntoIterator<Item = BlockInfo>) {
        let mut state = self.state.lock().await;
        for block in blocks {
            let batch_id = state
                .blocks
                .get(&block.number)
                .and_then(|(_, batch_id)| *batch_id);
            state.blocks.insert(block.number, (block, batch_id));
        }
    }

    pub async fn batches(&self) -> Vec<Batch> {
        self.state.lock().await.batches.clone()
    }

    pub async fn batch_of(&self, block_number: u64) -> Option<BatchId> {
        self.state
            .lock()
            .await
            .blocks
            .get(&block_number)
            .and_then(|(_, batch_id)| *batch_id)
    }

    pub async fn rollback_count(&self) -> u64 {
        self.state.lock().await.rollbacks
    }

    /// Makes the next call of the given operation fail once.
    pub async fn fail_next(&self, point: FailurePoint) {
        self.state.lock().await.fail_at = Some(point);
    }
}

impl BlockStore for MemoryStore {
    type Transaction = MemoryTransaction;

    async fn get_unbatched_blocks(&self, limit: usize) -> Result<Vec<BlockInfo>, StoreError> {
        let mut state = self.state.lock().await;
        state.take_failure(FailurePoint::GetUnbatchedBlocks)?;
        Ok(state
            .blocks
            .values()
            .filter(|(_, batch_id)| batch_id.is_none())
            .map(|(block, _)| block.clone())
            .take(limit)
            .collect())
    }

    async fn begin_transaction(&self) -> Result<MemoryTransaction, StoreError> {
        let mut state = self.state.lock().await;
        state.take_failure(FailurePoint::BeginTransaction)?;
        Ok(MemoryTransaction {
            state: self.state.clone(),
            base_index: state.batches.len() as u64,
            batches: Vec::new(),
            assignments: Vec::new(),
        })
    }
}

/// Staged writes against a [`MemoryStore`]. Conflicts with writes committed
/// since the transaction began are detected on commit.
pub struct MemoryTransaction {
    state: Arc<Mutex<MemoryState>>,
    base_index: u64,
    batches: Vec<Batch>,
    assignments: Vec<(u64, BatchId)>,
}

impl StoreTransaction for MemoryTransaction {
    async fn create_batch(&mut self, batch: NewBatch) -> Result<Batch, StoreError> {
        self.state
            .lock()
            .await
            .take_failure(FailurePoint::CreateBatch)?;

        let index = self.base_index + self.batches.len() as u64;
        let id = BatchId::derive(index, &batch.parent_hash, &batch.end_block_hash);
        let batch = Batch::new(id, index, batch);
        self.batches.push(batch.clone());
        Ok(batch)
    }

    async fn assign_batch_to_blocks(
        &mut self,
        block_numbers: &[u64],
        batch_id: &BatchId,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.take_failure(FailurePoint::AssignBatchToBlocks)?;

        if !self.batches.iter().any(|batch| batch.id == *batch_id)
            && !state.batches.iter().any(|batch| batch.id == *batch_id)
        {
            return Err(StoreError::BatchNotFound(*batch_id));
        }
        for number in block_numbers {
            match state.blocks.get(number) {
                None => return Err(StoreError::BlockNotFound(*number)),
                Some((_, Some(existing))) => {
                    return Err(StoreError::AlreadyBatched {
                        number: *number,
                        batch_id: *existing,
                    });
                }
                Some((_, None)) => {}
            }
        }
        self.assignments
            .extend(block_numbers.iter().map(|number| (*number, *batch_id)));
        Ok(())
    }

    async fn commit(self) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.take_failure(FailurePoint::Commit)?;

        if state.batches.len() as u64 != self.base_index {
            return Err(StoreError::IndexConflict(self.base_index));
        }
        for (number, _) in &self.assignments {
            match state.blocks.get(number) {
                None => return Err(StoreError::BlockNotFound(*number)),
                Some((_, Some(existing))) => {
                    return Err(StoreError::AlreadyBatched {
                        number: *number,
                        batch_id: *existing,
                    });
                }
                Some((_, None)) => {}
            }
        }

        state.batches.extend(self.batches);
        for (number, batch_id) in self.assignments {
            if let Some((_, slot)) = state.blocks.get_mut(&number) {
                *slot = Some(batch_id);
            }
        }
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.state.lock().await.rollbacks += 1;
        Ok(())
    }
}
