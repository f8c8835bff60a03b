//! HTTP service exposing resolved URLs.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, Transport extension)
//!     → request.rs (request ID)
//!     → ResolvedBase extractor
//!     → JSON report of derived URLs
//! ```

pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{HttpServer, UrlReport};
