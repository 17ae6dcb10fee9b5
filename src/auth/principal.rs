//! Caller Identity
//!
//! How a caller authenticated is decided upstream (reverse proxy, SSO). That
//! layer forwards the result as headers, which become a `Principal` here.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::CatalogError;

/// Header carrying the authenticated user name
pub const USER_HEADER: &str = "x-auth-user";

/// Header carrying the caller's roles, comma separated
pub const ROLES_HEADER: &str = "x-auth-roles";

/// Role allowed to mutate the catalog
pub const ADMIN_ROLE: &str = "Admin";

// == Principal ==
/// An authenticated caller and the roles it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub name: String,
    pub roles: Vec<String>,
}

impl Principal {
    pub fn new(name: impl Into<String>, roles: &[&str]) -> Self {
        Self {
            name: name.into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn is_in_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Reads the identity headers. `None` when no user is named.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let name = headers
            .get(USER_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())?;

        let roles = headers
            .get(ROLES_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            name: name.to_string(),
            roles,
        })
    }
}

/// Attaches the caller's `Principal`, if any, to the request extensions.
pub async fn identity_middleware(mut request: Request, next: Next) -> Response {
    if let Some(principal) = Principal::from_headers(request.headers()) {
        request.extensions_mut().insert(principal);
    }
    next.run(request).await
}

// == Require Admin ==
/// Extractor that only succeeds for authenticated callers in the `Admin` role.
///
/// 401 without a principal, 403 without the role.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or(CatalogError::Unauthorized)?;

        if principal.is_in_role(ADMIN_ROLE) {
            Ok(RequireAdmin(principal))
        } else {
            Err(CatalogError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_HEADER, HeaderValue::from_static("alice"));
        headers.insert(ROLES_HEADER, HeaderValue::from_static("User, Admin"));

        let principal = Principal::from_headers(&headers).unwrap();
        assert_eq!(principal.name, "alice");
        assert!(principal.is_in_role("Admin"));
        assert!(principal.is_in_role("User"));
        assert!(!principal.is_in_role("admin"));
    }

    #[test]
    fn test_no_user_no_principal() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLES_HEADER, HeaderValue::from_static("Admin"));
        assert!(Principal::from_headers(&headers).is_none());

        headers.insert(USER_HEADER, HeaderValue::from_static("  "));
        assert!(Principal::from_headers(&headers).is_none());
    }

    #[tokio::test]
    async fn test_require_admin() {
        let (mut parts, _) = Request::new(axum::body::Body::empty()).into_parts();
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(CatalogError::Unauthorized)));

        parts.extensions.insert(Principal::new("bob", &["User"]));
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(CatalogError::Forbidden)));

        parts.extensions.insert(Principal::new("carol", &["Admin"]));
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert_eq!(result.unwrap().0.name, "carol");
    }
}
