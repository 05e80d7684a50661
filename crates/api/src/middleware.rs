use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, header::InvalidHeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use chrono::Utc;

use consultdesk_auth::{CallerIdentity, Gate, GateOutcome};

use crate::context::{USER_ID_HEADER, USER_ROLE_HEADER};
use crate::cookies::clear_session_cookie;

#[derive(Clone)]
pub struct GateState {
    pub gate: Gate,
    pub cookie_name: Arc<str>,
    pub login_path: Arc<str>,
}

/// Authorization gate middleware.
///
/// Every denial is a temporary redirect to the login path; an invalid session
/// additionally clears the session cookie. Authorized requests are forwarded
/// with `x-user-id` / `x-user-role` set from the verified token, replacing
/// anything the client sent under those names.
pub async fn auth_gate(
    State(state): State<GateState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();
    let token = jar.get(&state.cookie_name).map(|c| c.value().to_owned());

    let outcome = state.gate.evaluate(&path, token.as_deref(), Utc::now());
    let kind = outcome.kind();
    match outcome {
        GateOutcome::PublicPass => next.run(req).await,
        GateOutcome::Authorized(identity) => {
            if let Err(e) = attach_identity(req.headers_mut(), &identity) {
                // The token verified but its userId cannot travel in a header.
                tracing::warn!(path = %path, error = %e, "session identity not representable as header");
                return invalid_session(jar, &state);
            }
            tracing::debug!(path = %path, outcome = kind, user_id = %identity.user_id, role = %identity.role, "forwarding");
            next.run(req).await
        }
        GateOutcome::NoToken => {
            tracing::debug!(path = %path, outcome = kind, "redirecting to login");
            to_login(&state)
        }
        GateOutcome::TokenInvalid(err) => {
            tracing::warn!(path = %path, outcome = kind, error = %err, "clearing session");
            invalid_session(jar, &state)
        }
        GateOutcome::RoleDenied { identity, required } => {
            tracing::warn!(
                path = %path,
                outcome = kind,
                user_id = %identity.user_id,
                role = %identity.role,
                required = %required,
                "redirecting to login"
            );
            to_login(&state)
        }
    }
}

fn attach_identity(headers: &mut HeaderMap, identity: &CallerIdentity) -> Result<(), InvalidHeaderValue> {
    let user_id = HeaderValue::from_str(identity.user_id.as_str())?;
    headers.insert(USER_ID_HEADER, user_id);
    headers.insert(USER_ROLE_HEADER, HeaderValue::from_static(identity.role.as_str()));
    Ok(())
}

fn to_login(state: &GateState) -> Response {
    Redirect::temporary(&state.login_path).into_response()
}

fn invalid_session(jar: CookieJar, state: &GateState) -> Response {
    let jar = jar.add(clear_session_cookie(&state.cookie_name));
    (jar, Redirect::temporary(&state.login_path)).into_response()
}
