//! Reverse-proxy aware URL resolution.
//!
//! Behind a proxy the request an application sees carries internal host,
//! scheme and path information. [`ResolvedBase`] reconstructs the URL the
//! client actually used from `X-Forwarded-Host`, `X-Forwarded-Proto` and
//! `X-Forwarded-Path-Prefix`, and builds sibling or absolute URLs from it.
//!
//! ```
//! use axum::http::Request;
//! use forwarded_url::{ForwardingConfig, QueryParams, ResolvedBase};
//!
//! let request = Request::builder()
//!     .uri("/some/path?test=123")
//!     .header("Host", "10.0.0.7")
//!     .header("X-Forwarded-Host", "api.example.dev")
//!     .header("X-Forwarded-Proto", "https")
//!     .body(())
//!     .unwrap();
//!
//! let base = ResolvedBase::resolve(&request, &ForwardingConfig::default()).unwrap();
//! assert_eq!(base.current(), "https://api.example.dev/some/path?test=123");
//! assert_eq!(base.join_path(".."), "https://api.example.dev/some?test=123");
//!
//! let mut page = QueryParams::new();
//! page.add("page", "2");
//! assert_eq!(base.set_path_with_query("/items", &page), "https://api.example.dev/items?page=2");
//! ```

pub mod config;
pub mod forwarding;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::{AppConfig, ForwardingConfig};
pub use forwarding::{QueryParams, RequestMeta, ResolveError, ResolvedBase, Transport};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
