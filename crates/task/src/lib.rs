mod error;
mod handle;
mod runner;
mod traits;

pub use error::Error;
pub use handle::TaskHandle;
pub use traits::Task;
