//! Mutation Gate
//!
//! Second check on the server-rendered admin pages, on top of the `Admin`
//! role. Besides being authenticated, the caller must pass `user=admin` in the
//! query string or, failing that, in the submitted form.
//!
//! Routes that allow anonymous access are simply not mounted behind this layer.

use axum::{
    body::{self, Body},
    extract::Request,
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::Response,
};
use tracing::info;

use super::Principal;
use crate::error::{CatalogError, Result};

/// Parameter carrying the caller-supplied marker
pub const MARKER_PARAM: &str = "user";

/// The only accepted marker value
pub const ADMIN_MARKER: &str = "admin";

/// Largest form body the gate will buffer while looking for the marker
pub const MAX_FORM_BYTES: usize = 64 * 1024;

/// 401 without a principal, 403 unless the marker equals `admin`.
pub async fn mutation_gate(request: Request, next: Next) -> Result<Response> {
    if request.extensions().get::<Principal>().is_none() {
        info!(path = %request.uri().path(), "Mutation gate: blocking anonymous request");
        return Err(CatalogError::Unauthorized);
    }

    let (marker, request) = caller_marker(request).await?;
    if marker.as_deref() != Some(ADMIN_MARKER) {
        info!(path = %request.uri().path(), "Mutation gate: marker missing or wrong");
        return Err(CatalogError::Forbidden);
    }

    Ok(next.run(request).await)
}

/// Finds the marker in the query string, then in a url-encoded form body.
///
/// The body is buffered and handed back so the handler can still read it.
async fn caller_marker(request: Request) -> Result<(Option<String>, Request)> {
    if let Some(value) = request.uri().query().and_then(find_marker) {
        return Ok((Some(value), request));
    }

    if !is_form(&request) {
        return Ok((None, request));
    }

    let (parts, body) = request.into_parts();
    let bytes = body::to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|_| CatalogError::InvalidRequest("Form body too large or unreadable".to_string()))?;
    let marker = find_marker_bytes(&bytes);

    Ok((marker, Request::from_parts(parts, Body::from(bytes))))
}

fn is_form(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"))
}

fn find_marker(query: &str) -> Option<String> {
    find_marker_bytes(query.as_bytes())
}

/// First non-empty `user` value.
fn find_marker_bytes(encoded: &[u8]) -> Option<String> {
    url::form_urlencoded::parse(encoded)
        .filter(|(key, value)| key == MARKER_PARAM && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_marker() {
        assert_eq!(find_marker("user=admin"), Some("admin".to_string()));
        assert_eq!(find_marker("page=2&user=guest"), Some("guest".to_string()));
        assert_eq!(find_marker("user=&user=admin"), Some("admin".to_string()));
        assert_eq!(find_marker("username=admin"), None);
        assert_eq!(find_marker(""), None);
    }

    #[test]
    fn test_find_marker_decodes() {
        assert_eq!(
            find_marker_bytes(b"name=Ball+Pump&user=%61dmin"),
            Some("admin".to_string())
        );
    }
}
