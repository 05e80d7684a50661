//! HTTP application wiring (Axum router + gate).
//!
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `errors.rs`: consistent error responses
//!
//! The gate wraps the whole router, fallback included, so no path can reach a
//! handler without being classified first.

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use consultdesk_auth::{Gate, PathRules, SessionTokens};

use crate::accounts::AccountDirectory;
use crate::config::GateConfig;
use crate::middleware::{self, GateState};

pub mod errors;
pub mod routes;

use routes::session::SessionState;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &GateConfig, accounts: Arc<dyn AccountDirectory>) -> Router {
    let tokens = Arc::new(SessionTokens::new(config.jwt_secret(), config.session_ttl));
    let cookie_name: Arc<str> = Arc::from(config.cookie_name.as_str());

    let rules = PathRules::standard().with_public(config.login_path.clone());
    let gate_state = GateState {
        gate: Gate::new(tokens.clone(), rules),
        cookie_name: cookie_name.clone(),
        login_path: Arc::from(config.login_path.as_str()),
    };

    let session = SessionState {
        tokens,
        accounts,
        cookie_name,
        secure_cookies: config.secure_cookies,
    };

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .fallback(routes::system::not_found)
        .layer(Extension(session))
        .layer(axum::middleware::from_fn_with_state(
            gate_state,
            middleware::auth_gate,
        ))
}
