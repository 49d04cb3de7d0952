use crate::{handle::TaskHandle, traits::Task};
use std::time::Duration;
use tokio::{
    sync::{mpsc, oneshot},
    time::{Interval, MissedTickBehavior},
};
use tracing::{debug, error, warn};

pub type RequestSignal<T> = (
    <T as Task>::Request,
    oneshot::Sender<Result<<T as Task>::Response, <T as Task>::Error>>,
);
pub type ShutdownSignal<T> = oneshot::Sender<Result<(), <T as Task>::Error>>;

const REQUEST_CHANNEL_CAPACITY: usize = 64;

pub(crate) fn spawn<T: Task>(task: T, period: Option<Duration>) -> TaskHandle<T> {
    let (request_sender, request_receiver) = mpsc::channel(REQUEST_CHANNEL_CAPACITY);
    let (shutdown_sender, shutdown_receiver) = mpsc::channel(1);

    let ticker = period.map(|period| {
        let mut ticker = tokio::time::interval(period.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });

    let runner = TaskRunner::new(request_receiver, shutdown_receiver, ticker, task);
    tokio::spawn(runner.listen());
    TaskHandle::new(request_sender, shutdown_sender)
}

pub struct TaskRunner<T: Task + 'static> {
    request: mpsc::Receiver<RequestSignal<T>>,
    shutdown: mpsc::Receiver<ShutdownSignal<T>>,
    ticker: Option<Interval>,
    task: T,
}

impl<T: Task + 'static> TaskRunner<T> {
    pub fn new(
        request: mpsc::Receiver<RequestSignal<T>>,
        shutdown: mpsc::Receiver<ShutdownSignal<T>>,
        ticker: Option<Interval>,
        task: T,
    ) -> Self {
        Self {
            request,
            shutdown,
            ticker,
            task,
        }
    }

    /// Serves requests, ticks and the shutdown signal one at a time, so the
    /// task never runs two operations concurrently.
    pub async fn listen(mut self) {
        loop {
            tokio::select! {
                request = self.request.recv() => {
                    let Some((request, sender)) = request else {
                        debug!("All task handles dropped, shutting down");
                        self.stop().await;
                        return;
                    };
                    let response = self.task.handle_request(request).await;
                    let _ = sender.send(response);
                }
                shutdown = self.shutdown.recv() => {
                    let Some(sender) = shutdown else {
                        self.stop().await;
                        return;
                    };
                    let response = self.task.on_shutdown().await;
                    let _ = sender.send(response);
                    return;
                }
                _ = next_tick(&mut self.ticker) => {
                    let Err(error) = self.task.on_tick().await else {
                        continue;
                    };
                    if T::is_fatal(&error) {
                        error!(%error, "Task stopped on a fatal error, operator intervention required");
                        self.stop().await;
                        return;
                    }
                    warn!(%error, "Task tick failed, retrying on the next tick");
                }
            }
        }
    }

    async fn stop(&self) {
        if let Err(error) = self.task.on_shutdown().await {
            error!(%error, "Task failed to shut down cleanly");
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
