//! The request metadata the resolver reads.

use axum::http::{header, request::Parts, uri::Scheme, Extensions, HeaderMap, Request, Uri};

/// How the client connection reached this server.
///
/// Inserted as a request extension by the server that terminates the
/// connection. A request without it is treated as [`Transport::Plain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    #[default]
    Plain,
    Tls,
}

impl Transport {
    pub fn is_encrypted(self) -> bool {
        matches!(self, Transport::Tls)
    }
}

/// Read-only view of an inbound request, as far as URL resolution cares.
pub trait RequestMeta {
    /// Raw request-target: path plus optional `?query`.
    fn request_target(&self) -> &str;

    /// The host the request was addressed to, if known.
    fn host(&self) -> Option<&str>;

    /// Whether the connection to this server was encrypted.
    fn is_encrypted(&self) -> bool;

    /// First value of the header `name`, if it is valid visible ASCII.
    fn header(&self, name: &str) -> Option<&str>;
}

impl RequestMeta for Parts {
    fn request_target(&self) -> &str {
        target_of(&self.uri)
    }

    fn host(&self) -> Option<&str> {
        host_of(&self.uri, &self.headers)
    }

    fn is_encrypted(&self) -> bool {
        encrypted(&self.uri, &self.extensions)
    }

    fn header(&self, name: &str) -> Option<&str> {
        header_of(&self.headers, name)
    }
}

impl<B> RequestMeta for Request<B> {
    fn request_target(&self) -> &str {
        target_of(self.uri())
    }

    fn host(&self) -> Option<&str> {
        host_of(self.uri(), self.headers())
    }

    fn is_encrypted(&self) -> bool {
        encrypted(self.uri(), self.extensions())
    }

    fn header(&self, name: &str) -> Option<&str> {
        header_of(self.headers(), name)
    }
}

fn target_of(uri: &Uri) -> &str {
    uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/")
}

// HTTP/2 requests carry the host in the URI authority instead of a header.
fn host_of<'a>(uri: &'a Uri, headers: &'a HeaderMap) -> Option<&'a str> {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
}

fn encrypted(uri: &Uri, extensions: &Extensions) -> bool {
    extensions
        .get::<Transport>()
        .is_some_and(|t| t.is_encrypted())
        || uri.scheme() == Some(&Scheme::HTTPS)
}

fn header_of<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
