//! axum integration.
//!
//! ```ignore
//! async fn handler(base: ResolvedBase) -> Redirect {
//!     Redirect::to(&base.join_path(".."))
//! }
//! ```
//!
//! The router state must provide a [`ForwardingConfig`] via `FromRef`.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::config::ForwardingConfig;
use crate::forwarding::resolver::{ResolveError, ResolvedBase};

impl<S> FromRequestParts<S> for ResolvedBase
where
    ForwardingConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ResolveError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = ForwardingConfig::from_ref(state);
        ResolvedBase::resolve(&*parts, &config)
    }
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Rejecting request with unresolvable URL");
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, Uri};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    async fn current(base: ResolvedBase) -> String {
        base.current()
    }

    fn app(path_prefix_enabled: bool) -> Router {
        Router::new()
            .route("/{*path}", get(current))
            .with_state(ForwardingConfig {
                path_prefix_enabled,
            })
    }

    async fn body_of(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn extracts_from_router_state() {
        let request = Request::builder()
            .uri("/some/path?test=123")
            .header("Host", "1.2.3.4")
            .header("X-Forwarded-Host", "api.example.dev")
            .header("X-Forwarded-Proto", "https")
            .header("X-Forwarded-Path-Prefix", "/prefix")
            .body(Body::empty())
            .unwrap();

        let response = app(true).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_of(response).await,
            "https://api.example.dev/prefix/some/path?test=123"
        );
    }

    #[tokio::test]
    async fn prefix_flag_comes_from_state() {
        let request = Request::builder()
            .uri("/some/path")
            .header("Host", "1.2.3.4")
            .header("X-Forwarded-Path-Prefix", "/prefix")
            .body(Body::empty())
            .unwrap();

        let response = app(false).oneshot(request).await.unwrap();
        assert_eq!(body_of(response).await, "http://1.2.3.4/some/path");
    }

    #[tokio::test]
    async fn rejection_is_bad_request() {
        let source = "/bad path".parse::<Uri>().unwrap_err();
        let err = ResolveError::InvalidTarget {
            target: "/bad path".to_string(),
            source,
        };

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_of(response).await.contains("/bad path"));
    }
}
