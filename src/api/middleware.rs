//! Caller identity middleware.
//!
//! Identity is established upstream (gateway or auth proxy) and forwarded in a
//! request header. This layer only lifts that header into a [`CallerId`]
//! request extension. It never rejects: a request without identity reaches the
//! handler, and the service answers `401`.

use axum::{
    extract::{Request, State},
    http::HeaderName,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Default header carrying the authenticated user id.
pub const DEFAULT_IDENTITY_HEADER: &str = "x-user-id";

/// Authenticated caller, as resolved from the identity header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerId(pub String);

impl CallerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Read `header` and attach a [`CallerId`] when it holds a non-blank value.
pub async fn resolve_caller(
    State(header): State<HeaderName>,
    mut request: Request,
    next: Next,
) -> Response {
    let caller = request
        .headers()
        .get(&header)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| CallerId(v.to_string()));

    match caller {
        Some(caller) => {
            request.extensions_mut().insert(caller);
        }
        None => debug!(header = %header, "request carries no caller identity"),
    }

    next.run(request).await
}
