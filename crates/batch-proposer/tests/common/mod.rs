#![allow(dead_code)]

use scoria_batch_proposer::{BlockInfo, MemoryStore};
use scoria_message::Hash32;

pub const GENESIS_TIME: u64 = 1_700_000_000;

pub fn hash(n: u64) -> Hash32 {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&n.to_be_bytes());
    Hash32(bytes)
}

/// Block `number` chained onto block `number - 1`.
pub fn block(number: u64, gas_used: u64, block_timestamp: u64) -> BlockInfo {
    BlockInfo {
        number,
        hash: hash(number),
        parent_hash: hash(number - 1),
        gas_used,
        tx_num: 3,
        block_timestamp,
    }
}

/// A store holding one block per entry of `gas`, numbered from 1.
pub async fn store_with_gas(gas: &[u64], block_timestamp: u64) -> MemoryStore {
    let store = MemoryStore::new();
    store
        .insert_blocks(
            gas.iter()
                .enumerate()
                .map(|(i, gas_used)| block(i as u64 + 1, *gas_used, block_timestamp)),
        )
        .await;
    store
}
