use crate::{
    config::BatchProposerConfig,
    error::{Error, Result},
    types::{BlockInfo, NewBatch},
};

/// What to do with one fetch of unbatched blocks.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Plan {
    Defer,
    Propose {
        batch: NewBatch,
        block_numbers: Vec<u64>,
    },
}

/// Greedy prefix of `blocks` whose cumulative gas stays within the
/// threshold. `blocks` must be non-empty and ascending by number.
pub(crate) fn plan_batch(
    blocks: &[BlockInfo],
    config: &BatchProposerConfig,
    now: u64,
) -> Result<Plan> {
    let mut gas_used = 0u64;
    let mut taken = 0;
    for block in blocks {
        match gas_used.checked_add(block.gas_used) {
            Some(next) if next <= config.gas_threshold => {
                gas_used = next;
                taken += 1;
            }
            _ => break,
        }
    }

    let still_fresh = blocks
        .first()
        .is_some_and(|oldest| oldest.block_timestamp.saturating_add(config.batch_time_sec) > now);
    if taken == blocks.len() && gas_used < config.gas_threshold && still_fresh {
        return Ok(Plan::Defer);
    }

    let selected = &blocks[..taken];
    let Some(batch) = NewBatch::spanning(selected) else {
        let (number, gas_used) = blocks
            .first()
            .map(|block| (block.number, block.gas_used))
            .unwrap_or_default();
        return Err(Error::UnbatchableBlock {
            number,
            gas_used,
            threshold: config.gas_threshold,
        });
    };

    Ok(Plan::Propose {
        batch,
        block_numbers: selected.iter().map(|block| block.number).collect(),
    })
}
