use crate::{handle::TaskHandle, runner};
use std::time::Duration;

#[trait_variant::make(Send)]
pub trait Task: Sized + Send + Sync + 'static {
    type Request: Send + 'static;
    type Response: std::fmt::Debug + Send + 'static;
    type Error: std::error::Error + Send + 'static;

    async fn handle_request(&self, request: Self::Request) -> Result<Self::Response, Self::Error>;

    /// Runs on every tick of a task started with [`Task::spawn_periodic`].
    async fn on_tick(&self) -> Result<(), Self::Error>;

    async fn on_shutdown(&self) -> Result<(), Self::Error>;

    /// Errors for which retrying on the next tick cannot help. A tick that
    /// fails with one stops the task.
    fn is_fatal(_error: &Self::Error) -> bool {
        false
    }

    fn spawn(self) -> TaskHandle<Self> {
        runner::spawn(self, None)
    }

    fn spawn_periodic(self, period: Duration) -> TaskHandle<Self> {
        runner::spawn(self, Some(period))
    }
}
