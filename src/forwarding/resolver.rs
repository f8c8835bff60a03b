//! Reverse-proxy aware base URL of a request.
//!
//! # Resolution
//! ```text
//! host   = X-Forwarded-Host   | request host
//! scheme = X-Forwarded-Proto  | "https" if encrypted else "http"
//! path   = join(X-Forwarded-Path-Prefix, request path)   (prefix enabled)
//!        | request path                                  (prefix disabled)
//! query  = request query, verbatim
//! ```
//!
//! A [`ResolvedBase`] is immutable once built. Every derived URL is built
//! from a local copy of its parts, so calls never influence each other.

use std::fmt;

use axum::http::uri::{InvalidUri, Uri};

use crate::config::ForwardingConfig;
use crate::forwarding::headers::{X_FORWARDED_HOST, X_FORWARDED_PATH_PREFIX, X_FORWARDED_PROTO};
use crate::forwarding::path;
use crate::forwarding::query::QueryParams;
use crate::forwarding::request::RequestMeta;

/// Error raised while resolving a request's base URL.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The request-target is not a valid URL reference.
    #[error("invalid request target {target:?}: {source}")]
    InvalidTarget { target: String, source: InvalidUri },
}

/// The externally visible URL of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBase {
    scheme: String,
    host: String,
    /// Escaped path, prefix already applied.
    path: String,
    raw_query: String,
}

impl ResolvedBase {
    /// Resolve the base URL of `request`.
    ///
    /// Header values are used verbatim; trusting them is up to whoever
    /// deploys the proxy in front of this server.
    pub fn resolve<R>(request: &R, config: &ForwardingConfig) -> Result<Self, ResolveError>
    where
        R: RequestMeta + ?Sized,
    {
        let target = request.request_target();
        let uri: Uri = target.parse().map_err(|source| ResolveError::InvalidTarget {
            target: target.to_string(),
            source,
        })?;

        let host = non_empty_header(request, X_FORWARDED_HOST)
            .or_else(|| request.host())
            .unwrap_or_default()
            .to_string();

        let scheme = match non_empty_header(request, X_FORWARDED_PROTO) {
            Some(proto) => proto.to_string(),
            None if request.is_encrypted() => "https".to_string(),
            None => "http".to_string(),
        };

        let mut request_path = match uri.path() {
            "" => "/".to_string(),
            p => p.to_string(),
        };
        if config.path_prefix_enabled {
            let prefix = request.header(X_FORWARDED_PATH_PREFIX).unwrap_or_default();
            request_path = path::absolute(&path::join(&path::escape(prefix), &request_path));
        }

        let base = Self {
            scheme,
            host,
            path: request_path,
            raw_query: uri.query().unwrap_or_default().to_string(),
        };

        tracing::trace!(
            scheme = %base.scheme,
            host = %base.host,
            path = %base.path,
            "Resolved request base URL"
        );

        Ok(base)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Escaped path, including any forwarded prefix.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Original query string, without the leading `?`.
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    /// Original query, decoded.
    pub fn query(&self) -> QueryParams {
        QueryParams::parse(&self.raw_query)
    }

    /// The full URL as resolved.
    pub fn current(&self) -> String {
        self.build(&self.path, &self.raw_query)
    }

    /// `scheme://host`, without path or query.
    pub fn scheme_and_host(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// Join `segment` onto the current path, keeping the original query.
    ///
    /// `segment` is relative to the current path: `..` moves up one level,
    /// `.` and the empty string leave it unchanged.
    pub fn join_path(&self, segment: &str) -> String {
        self.build(&self.joined(segment), &self.raw_query)
    }

    /// Join `segment` onto the current path and replace the query with `query`.
    pub fn join_path_with_query(&self, segment: &str, query: &QueryParams) -> String {
        self.build(&self.joined(segment), &query.encode())
    }

    /// Replace the path with `pathname`, dropping the query.
    pub fn set_path(&self, pathname: &str) -> String {
        self.build(&Self::replaced(pathname), "")
    }

    /// Replace the path with `pathname` and the query with `query`.
    pub fn set_path_with_query(&self, pathname: &str, query: &QueryParams) -> String {
        self.build(&Self::replaced(pathname), &query.encode())
    }

    fn joined(&self, segment: &str) -> String {
        path::absolute(&path::join(&self.path, &path::escape(segment)))
    }

    fn replaced(pathname: &str) -> String {
        path::absolute(&path::escape(pathname))
    }

    fn build(&self, path: &str, query: &str) -> String {
        let mut url = String::with_capacity(
            self.scheme.len() + self.host.len() + path.len() + query.len() + 4,
        );
        url.push_str(&self.scheme);
        url.push_str("://");
        url.push_str(&self.host);
        // Asterisk-form targets have no leading slash.
        if !path.is_empty() && !path.starts_with('/') {
            url.push('/');
        }
        url.push_str(path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
        url
    }
}

impl fmt::Display for ResolvedBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.current())
    }
}

fn non_empty_header<'a, R>(request: &'a R, name: &str) -> Option<&'a str>
where
    R: RequestMeta + ?Sized,
{
    request.header(name).filter(|v| !v.is_empty())
}
