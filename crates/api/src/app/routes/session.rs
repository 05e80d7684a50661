//! Session lifecycle: login sets the cookie, logout clears it, `me` reports
//! the identity the gate attached.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use consultdesk_auth::SessionTokens;

use crate::accounts::AccountDirectory;
use crate::app::errors::json_error;
use crate::context::TrustedIdentity;
use crate::cookies::{clear_session_cookie, session_cookie};

#[derive(Clone)]
pub struct SessionState {
    pub tokens: Arc<SessionTokens>,
    pub accounts: Arc<dyn AccountDirectory>,
    pub cookie_name: Arc<str>,
    pub secure_cookies: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub senha: Option<String>,
}

pub async fn login(
    Extension(session): Extension<SessionState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Response {
    let email = body.email.filter(|e| !e.trim().is_empty());
    let password = body.senha.filter(|p| !p.is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "email and senha are required",
        );
    };

    let identity = match session.accounts.authenticate(&email, &password).await {
        Ok(Some(identity)) => identity,
        Ok(None) => {
            tracing::info!("login rejected");
            return json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", "invalid credentials");
        }
        Err(e) => {
            tracing::error!(error = %e, "account lookup failed");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal server error");
        }
    };

    let token = match session.tokens.issue(&identity, Utc::now()) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "failed to sign session token");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal server error");
        }
    };

    tracing::info!(user_id = %identity.user_id, role = %identity.role, "session started");

    let cookie = session_cookie(
        &session.cookie_name,
        token,
        session.tokens.ttl(),
        session.secure_cookies,
    );
    (
        jar.add(cookie),
        Json(json!({
            "message": "login ok",
            "user_id": identity.user_id.as_str(),
            "role": identity.role.as_str(),
        })),
    )
        .into_response()
}

pub async fn logout(Extension(session): Extension<SessionState>, jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(clear_session_cookie(&session.cookie_name)),
        Json(json!({ "success": true, "message": "logged out" })),
    )
}

pub async fn me(identity: TrustedIdentity) -> impl IntoResponse {
    Json(json!({
        "user_id": identity.user_id().as_str(),
        "role": identity.role().as_str(),
    }))
}
