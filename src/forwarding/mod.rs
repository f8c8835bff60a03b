//! Reverse-proxy aware URL derivation.
//!
//! # Data Flow
//! ```text
//! inbound request (target, Host, TLS, X-Forwarded-*)
//!     → request.rs  (RequestMeta view over http types)
//!     → resolver.rs (ResolvedBase::resolve)
//!     → current / scheme_and_host / join_path* / set_path*
//!         → path.rs  (clean, join, escape)
//!         → query.rs (QueryParams encoding)
//! ```
//!
//! # Design Decisions
//! - `ResolvedBase` is immutable; derived URLs never alter it
//! - Prefix application is an explicit config flag, not global state
//! - Forwarded header values are trusted verbatim

pub mod extract;
pub mod headers;
pub mod path;
pub mod query;
pub mod request;
pub mod resolver;

pub use query::QueryParams;
pub use request::{RequestMeta, Transport};
pub use resolver::{ResolveError, ResolvedBase};
