//! Observability subsystem.
//!
//! Structured logging through `tracing`. Resolution events are emitted at
//! `trace`, request spans by `tower_http`'s trace layer.

pub mod logging;

pub use logging::init_logging;
