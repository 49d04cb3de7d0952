use crate::{
    Error, Task,
    runner::{RequestSignal, ShutdownSignal},
};
use tokio::sync::{mpsc, oneshot};

/// Cloneable handle to a spawned [`Task`]. The task shuts itself down once
/// every handle has been dropped.
pub struct TaskHandle<T: Task> {
    requests: mpsc::Sender<RequestSignal<T>>,
    shutdown: mpsc::Sender<ShutdownSignal<T>>,
}

impl<T: Task> Clone for TaskHandle<T> {
    fn clone(&self) -> Self {
        Self {
            requests: self.requests.clone(),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<T: Task> TaskHandle<T> {
    pub(crate) fn new(
        requests: mpsc::Sender<RequestSignal<T>>,
        shutdown: mpsc::Sender<ShutdownSignal<T>>,
    ) -> Self {
        Self { requests, shutdown }
    }

    /// Queues `request` behind any earlier ones and waits for the answer.
    /// The outer error means the task never answered.
    pub async fn request(
        &self,
        request: T::Request,
    ) -> Result<Result<T::Response, T::Error>, Error> {
        let (reply, answer) = oneshot::channel();
        self.requests
            .send((request, reply))
            .await
            .map_err(|_| Error::Stopped)?;
        Ok(answer.await?)
    }

    pub async fn shutdown(&self) -> Result<Result<(), T::Error>, Error> {
        let (reply, answer) = oneshot::channel();
        self.shutdown.send(reply).await.map_err(|_| Error::Stopped)?;
        Ok(answer.await?)
    }

    /// Whether the task has stopped, either through [`TaskHandle::shutdown`]
    /// or because a tick returned a fatal error.
    pub fn is_stopped(&self) -> bool {
        self.requests.is_closed()
    }
}
