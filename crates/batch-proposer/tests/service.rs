mod common;

use common::{GENESIS_TIME, store_with_gas};
use scoria_batch_proposer::{
    BatchProposer, BatchProposerConfig, BatchProposerService, FailurePoint, ManualClock,
    MemoryStore, ProposalOutcome, Request, prelude::Error,
};
use scoria_task::Task;
use std::time::Duration;

fn service(
    store: MemoryStore,
    clock: ManualClock,
    propose_interval_ms: u64,
) -> BatchProposerService<MemoryStore, ManualClock> {
    let config = BatchProposerConfig {
        propose_interval_ms,
        ..Default::default()
    };
    BatchProposerService::new(BatchProposer::with_clock(store, clock, config).unwrap())
}

async fn wait_until_stopped<T: Task>(handle: &scoria_task::TaskHandle<T>) {
    for _ in 0..100 {
        if handle.is_stopped() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("task did not stop");
}

#[tokio::test]
async fn test_request_proposes_batch() {
    let store = store_with_gas(&[21_000, 21_000], GENESIS_TIME).await;
    let clock = ManualClock::new(GENESIS_TIME);
    let handle = service(store.clone(), clock.clone(), 1_000).spawn();

    let outcome = handle.request(Request::ProposeBatch).await.unwrap().unwrap();
    assert_eq!(outcome, ProposalOutcome::Deferred);

    clock.advance(300);
    let outcome = handle.request(Request::ProposeBatch).await.unwrap().unwrap();
    assert_eq!(outcome.batch().unwrap().end_block_number, 2);
    assert_eq!(store.batches().await.len(), 1);

    handle.shutdown().await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_ticks_propose_batches() {
    let store = store_with_gas(&[2_000_000, 2_000_000, 2_000_000], GENESIS_TIME).await;
    let handle = service(store.clone(), ManualClock::new(GENESIS_TIME + 3_600), 100).start();

    tokio::time::sleep(Duration::from_millis(350)).await;

    let batches = store.batches().await;
    assert_eq!(batches.len(), 3);
    assert!(!handle.is_stopped());
    handle.shutdown().await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_transient_error_is_retried_on_next_tick() {
    let store = store_with_gas(&[1_000], GENESIS_TIME).await;
    store.fail_next(FailurePoint::CreateBatch).await;
    let handle = service(store.clone(), ManualClock::new(GENESIS_TIME + 3_600), 100).start();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(store.batches().await.is_empty());
    assert_eq!(store.rollback_count().await, 1);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(store.batches().await.len(), 1);
    assert!(!handle.is_stopped());
}

#[tokio::test(start_paused = true)]
async fn test_unbatchable_block_halts_service() {
    let store = store_with_gas(&[3_000_001], GENESIS_TIME).await;
    let handle = service(store.clone(), ManualClock::new(GENESIS_TIME + 3_600), 100).start();

    wait_until_stopped(&handle).await;
    assert!(store.batches().await.is_empty());
    assert!(handle.request(Request::ProposeBatch).await.is_err());
}

#[tokio::test]
async fn test_request_error_does_not_halt_service() {
    let store = store_with_gas(&[3_000_001], GENESIS_TIME).await;
    let handle = service(store, ManualClock::new(GENESIS_TIME + 3_600), 1_000).spawn();

    let result = handle.request(Request::ProposeBatch).await.unwrap();
    assert!(matches!(result, Err(Error::UnbatchableBlock { number: 1, .. })));
    assert!(!handle.is_stopped());
}
