//! Process lifecycle: signal handling and graceful shutdown.

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::spawn_signal_listener;
