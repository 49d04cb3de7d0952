#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to install the global subscriber: {0}")]
    SetSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
    #[error("Failed to update log level: {0}")]
    Reload(#[from] tracing_subscriber::reload::Error),
    #[error("Logger not initialized; call init() first")]
    LoggerNotInitialized,
}
