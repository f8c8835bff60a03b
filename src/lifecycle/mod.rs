//! Lifecycle management.
//!
//! ```text
//! Startup (main.rs):  load config → validate → init logging → bind → serve
//! Shutdown:           Ctrl+C or Shutdown::trigger → stop accepting → drain → exit
//! ```

pub mod shutdown;

pub use shutdown::{wait_for_shutdown, Shutdown};
