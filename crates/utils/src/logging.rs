use crate::error::Error;
use std::sync::OnceLock;
use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Registry, filter::Directive, fmt, layer::SubscriberExt, reload,
};

static RELOAD_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// Installs the global subscriber: `RUST_LOG` if set, `INFO` otherwise.
pub fn init() -> Result<(), Error> {
    let base_filter = EnvFilter::builder()
        .with_default_directive(Directive::from(Level::INFO))
        .from_env_lossy();

    let (filter_layer, handle) = reload::Layer::new(base_filter);

    let subscriber = Registry::default().with(filter_layer).with(fmt::layer());

    tracing::subscriber::set_global_default(subscriber)?;
    RELOAD_HANDLE.set(handle).ok();
    Ok(())
}

pub fn change_level(log_level: Level) -> Result<(), Error> {
    let handle = RELOAD_HANDLE.get().ok_or(Error::LoggerNotInitialized)?;
    let new_filter = EnvFilter::default().add_directive(log_level.into());
    handle.modify(|filter| *filter = new_filter)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_once_then_change_level() {
        assert!(matches!(
            change_level(Level::DEBUG),
            Err(Error::LoggerNotInitialized)
        ));

        init().unwrap();
        assert!(matches!(init(), Err(Error::SetSubscriber(_))));

        change_level(Level::DEBUG).unwrap();
        tracing::debug!("debug level enabled");
    }
}
