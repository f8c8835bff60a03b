//! Network layer.
//!
//! Plain TCP is served by axum directly; TLS is terminated by
//! `axum-server` with rustls. Either way the handler learns which one it
//! was through the [`Transport`](crate::forwarding::Transport) extension.

pub mod tls;
