//! Forwarding header names.
//!
//! These are set by the reverse proxy or load balancer in front of the
//! application. Whoever sets them is trusted to send well-formed values;
//! nothing here checks that the proxy is allowed to.

/// Host the client originally connected to.
pub const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Scheme the client originally used (`http` or `https`).
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Path the proxy mounts this application under, e.g. `/api`.
///
/// Only honoured when prefix application is enabled in
/// [`ForwardingConfig`](crate::config::ForwardingConfig).
pub const X_FORWARDED_PATH_PREFIX: &str = "x-forwarded-path-prefix";
