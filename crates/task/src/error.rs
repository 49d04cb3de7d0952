#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Task is no longer running")]
    Stopped,
    #[error("Task dropped the reply channel: {0}")]
    Receive(#[from] tokio::sync::oneshot::error::RecvError),
}
