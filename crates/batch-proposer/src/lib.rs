//! Groups unbatched L2 blocks into batches under a gas budget.
//!
//! [`BatchProposer::try_propose_batch`] takes the longest run of the oldest
//! unbatched blocks that fits in the gas threshold and writes it as one
//! batch. An under-filled run waits until its oldest block is old enough.
//! A block that alone exceeds the threshold is a fatal
//! [`Error::UnbatchableBlock`](prelude::Error::UnbatchableBlock).

mod clock;
mod config;
mod error;
mod memory;
mod proposer;
mod selection;
mod service;
mod store;
mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    BatchProposerConfig, DEFAULT_BATCH_TIME_SEC, DEFAULT_GAS_THRESHOLD, DEFAULT_MAX_BLOCKS,
    DEFAULT_PROPOSE_INTERVAL_MS,
};
pub use memory::{FailurePoint, MemoryStore, MemoryTransaction};
pub use proposer::BatchProposer;
pub use service::BatchProposerService;
pub use store::{BlockStore, StoreError, StoreTransaction};
pub use types::{Batch, BatchId, BlockInfo, NewBatch, ProposalOutcome, Request};

pub mod prelude {
    pub use crate::error::{Error, Result};
}
