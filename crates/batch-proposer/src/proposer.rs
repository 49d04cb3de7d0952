use crate::{
    clock::{Clock, SystemClock},
    config::BatchProposerConfig,
    error::Result,
    selection::{Plan, plan_batch},
    store::{BlockStore, StoreError, StoreTransaction},
    types::{Batch, NewBatch, ProposalOutcome},
};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// Groups unbatched blocks into batches.
///
/// Proposals made through one instance never overlap. Separate instances
/// over the same store rely on the store's transactions instead.
pub struct BatchProposer<S, C = SystemClock> {
    store: S,
    clock: C,
    config: BatchProposerConfig,
    lock: Mutex<()>,
}

impl<S: BlockStore> BatchProposer<S> {
    pub fn new(store: S, config: BatchProposerConfig) -> Result<Self> {
        Self::with_clock(store, SystemClock, config)
    }
}

impl<S: BlockStore, C: Clock> BatchProposer<S, C> {
    pub fn with_clock(store: S, clock: C, config: BatchProposerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            clock,
            config,
            lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &BatchProposerConfig {
        &self.config
    }

    /// Makes one admission decision over the oldest unbatched blocks and, if
    /// a batch is due, writes it and assigns its blocks in one transaction.
    pub async fn try_propose_batch(&self) -> Result<ProposalOutcome> {
        let _guard = self.lock.lock().await;

        let blocks = self
            .store
            .get_unbatched_blocks(self.config.max_blocks)
            .await?;
        if blocks.is_empty() {
            debug!("No unbatched blocks");
            return Ok(ProposalOutcome::Idle);
        }
        debug!(count = blocks.len(), "Fetched unbatched blocks");

        let now = self.clock.unix_now()?;
        let (new_batch, block_numbers) = match plan_batch(&blocks, &self.config, now)? {
            Plan::Defer => {
                debug!(
                    count = blocks.len(),
                    oldest_block_timestamp = blocks[0].block_timestamp,
                    "Not enough gas for a batch yet, waiting for more blocks"
                );
                return Ok(ProposalOutcome::Deferred);
            }
            Plan::Propose {
                batch,
                block_numbers,
            } => (batch, block_numbers),
        };

        let batch = self
            .create_batch_for_blocks(new_batch, &block_numbers)
            .await?;
        info!(
            batch_id = %batch.id,
            index = batch.index,
            start_block = batch.start_block_number,
            end_block = batch.end_block_number,
            gas_used = batch.total_gas_used,
            tx_num = batch.total_tx_num,
            "Proposed batch"
        );
        Ok(ProposalOutcome::Proposed(batch))
    }

    async fn create_batch_for_blocks(
        &self,
        new_batch: NewBatch,
        block_numbers: &[u64],
    ) -> Result<Batch> {
        let mut tx = self.store.begin_transaction().await?;

        let staged = stage_batch(&mut tx, new_batch, block_numbers).await;
        match staged {
            Ok(batch) => {
                if let Err(commit_error) = tx.commit().await {
                    error!(
                        batch_id = %batch.id,
                        %commit_error,
                        "Failed to commit batch transaction"
                    );
                    return Err(commit_error.into());
                }
                Ok(batch)
            }
            Err(error) => {
                if let Err(rollback_error) = tx.rollback().await {
                    error!(%rollback_error, "Failed to roll back batch transaction");
                }
                Err(error.into())
            }
        }
    }
}

async fn stage_batch<T: StoreTransaction>(
    tx: &mut T,
    new_batch: NewBatch,
    block_numbers: &[u64],
) -> core::result::Result<Batch, StoreError> {
    let batch = tx.create_batch(new_batch).await?;
    tx.assign_batch_to_blocks(block_numbers, &batch.id).await?;
    Ok(batch)
}
