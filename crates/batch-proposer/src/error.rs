use crate::store::StoreError;
use std::time::SystemTimeError;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("BatchProposer failed because of a store error: {0}")]
    Store(#[from] StoreError),
    #[error(
        "Block {number} uses {gas_used} gas, over the batch gas threshold of {threshold}; it can never be batched"
    )]
    UnbatchableBlock {
        number: u64,
        gas_used: u64,
        threshold: u64,
    },
    #[error("BatchProposer failed to read the current time: {0}")]
    FailedToGetSystemTime(#[from] SystemTimeError),
    #[error("BatchProposer failed to load its configuration: {0}")]
    Config(#[from] scoria_utils::Error),
    #[error("Invalid batch proposer configuration: {0}")]
    InvalidConfig(&'static str),
}

impl Error {
    /// Only an unbatchable block is fatal: every later attempt would fetch
    /// the same block first and fail the same way.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnbatchableBlock { .. })
    }
}
