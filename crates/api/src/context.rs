use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderName, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};

use consultdesk_auth::{CallerIdentity, Role, UserId};

use crate::app::errors::json_error;

/// Header carrying the verified account id to downstream handlers.
pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// Header carrying the verified role to downstream handlers.
pub const USER_ROLE_HEADER: HeaderName = HeaderName::from_static("x-user-role");

/// Identity attached by the authorization gate.
///
/// Handlers behind the gate take this instead of touching the session cookie.
/// It is read from the trusted identity headers, which the gate overwrites on
/// every authorized request; a handler reachable without the gate must not
/// use it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedIdentity(pub CallerIdentity);

impl TrustedIdentity {
    pub fn user_id(&self) -> &UserId {
        &self.0.user_id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

}

/// Read the gate-attached identity from request headers.
///
/// The user id is decoded as UTF-8 rather than visible ASCII: the gate copies
/// the token's `userId` into the header byte-for-byte.
pub fn identity_from_headers(headers: &HeaderMap) -> Option<CallerIdentity> {
    let user_id = std::str::from_utf8(headers.get(USER_ID_HEADER)?.as_bytes()).ok()?;
    if user_id.is_empty() {
        return None;
    }
    let role: Role = headers.get(USER_ROLE_HEADER)?.to_str().ok()?.parse().ok()?;
    Some(CallerIdentity::new(user_id, role))
}

#[async_trait]
impl<S> FromRequestParts<S> for TrustedIdentity
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        identity_from_headers(&parts.headers)
            .map(TrustedIdentity)
            .ok_or_else(|| {
                json_error(StatusCode::UNAUTHORIZED, "unauthorized", "not authorized").into_response()
            })
    }
}
