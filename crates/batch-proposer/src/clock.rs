use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{SystemTime, SystemTimeError, UNIX_EPOCH},
};

/// Source of the current time in unix seconds.
pub trait Clock: Send + Sync + 'static {
    fn unix_now(&self) -> Result<u64, SystemTimeError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_now(&self) -> Result<u64, SystemTimeError> {
        Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock(Arc<AtomicU64>);

impl ManualClock {
    pub fn new(unix_now: u64) -> Self {
        Self(Arc::new(AtomicU64::new(unix_now)))
    }

    pub fn set(&self, unix_now: u64) {
        self.0.store(unix_now, Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: u64) {
        self.0.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn unix_now(&self) -> Result<u64, SystemTimeError> {
        Ok(self.0.load(Ordering::SeqCst))
    }
}
