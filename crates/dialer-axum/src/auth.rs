//! HTTP Basic authentication and throttling middleware.
//!
//! Every `/api/v1` request must carry `Authorization: Basic ...` for an
//! account in the local user store. The resolved account is stored in the
//! request extensions as a [`Caller`] for handlers to pick up.

use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use dialer_core::{AuthError, User};
use tracing::warn;

use crate::error::HttpError;
use crate::state::AppState;

/// The authenticated account behind a request.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user: User,
    /// Peer address, when the server was started with connect info.
    pub ip: Option<IpAddr>,
}

/// Extract `(username, password)` from a Basic `Authorization` header.
pub(crate) fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Authenticate, then throttle, then hand the request on.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let Some((username, password)) = basic_credentials(req.headers()) else {
        warn!(path = %req.uri().path(), "API request without Basic credentials");
        return Err(HttpError::Unauthorized);
    };

    let user = match state.core.auth().authenticate(&username, &password).await {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            warn!(path = %req.uri().path(), %username, "API request with invalid credentials");
            return Err(HttpError::Unauthorized);
        }
        Err(e) => return Err(e.into()),
    };

    if !state.throttle.hit(&user.username).await {
        warn!(username = %user.username, "Request throttled");
        return Err(HttpError::TooManyRequests);
    }

    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    req.extensions_mut().insert(Caller { user, ip });
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_basic_credentials_decoded() {
        let encoded = STANDARD.encode("alice:pa:ss");
        assert_eq!(
            basic_credentials(&headers(&format!("Basic {encoded}"))),
            Some(("alice".to_string(), "pa:ss".to_string()))
        );
        assert!(basic_credentials(&headers(&format!("basic {encoded}"))).is_some());
    }

    #[test]
    fn test_other_schemes_rejected() {
        assert_eq!(basic_credentials(&HeaderMap::new()), None);
        assert_eq!(basic_credentials(&headers("Bearer abc")), None);
        assert_eq!(basic_credentials(&headers("Basic !!!")), None);
        let no_colon = STANDARD.encode("alice");
        assert_eq!(basic_credentials(&headers(&format!("Basic {no_colon}"))), None);
    }
}
