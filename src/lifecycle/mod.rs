//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Build registry → Spawn bootstrap → Serve page
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Cancel pending bootstrap step → Stop server
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
pub use signals::listen_for_signals;
