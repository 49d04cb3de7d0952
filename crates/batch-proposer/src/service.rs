use crate::{
    clock::{Clock, SystemClock},
    error::{Error, Result},
    proposer::BatchProposer,
    store::BlockStore,
    types::{ProposalOutcome, Request},
};
use scoria_task::{Task, TaskHandle};
use tracing::{debug, info};

/// Runs a [`BatchProposer`] as a task: on request, and periodically once
/// started with [`BatchProposerService::start`].
pub struct BatchProposerService<S, C = SystemClock> {
    proposer: BatchProposer<S, C>,
}

impl<S: BlockStore, C: Clock> BatchProposerService<S, C> {
    pub fn new(proposer: BatchProposer<S, C>) -> Self {
        Self { proposer }
    }

    /// Spawns the service, proposing every `propose_interval_ms`.
    pub fn start(self) -> TaskHandle<Self> {
        let period = self.proposer.config().propose_interval();
        info!(?period, "Starting batch proposer");
        self.spawn_periodic(period)
    }
}

impl<S: BlockStore, C: Clock> Task for BatchProposerService<S, C> {
    type Request = Request;
    type Response = ProposalOutcome;
    type Error = Error;

    async fn handle_request(&self, request: Request) -> Result<ProposalOutcome> {
        match request {
            Request::ProposeBatch => self.proposer.try_propose_batch().await,
        }
    }

    async fn on_tick(&self) -> Result<()> {
        let outcome = self.proposer.try_propose_batch().await?;
        if let ProposalOutcome::Proposed(batch) = outcome {
            debug!(batch_id = %batch.id, "Batch proposed on tick");
        }
        Ok(())
    }

    async fn on_shutdown(&self) -> Result<()> {
        info!("Shutting down batch proposer");
        Ok(())
    }

    fn is_fatal(error: &Error) -> bool {
        error.is_fatal()
    }
}
