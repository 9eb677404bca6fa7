mod basic;
mod persona;
mod state;
#[cfg(feature = "thread-local")]
mod thread_local;

pub use basic::*;
pub use persona::*;
pub(crate) use state::GeneratorState;
pub use state::ROTATION_INTERVAL_SECS;
