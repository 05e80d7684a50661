use axum::{
    routing::{get, post},
    Router,
};

pub mod areas;
pub mod session;
pub mod system;

/// Every route except `/health`; classification is left to the gate.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::home))
        .route("/login", get(system::login_page))
        .route("/cadastro", get(system::signup_page))
        .route("/api/auth/login", post(session::login))
        .route("/api/auth/logout", post(session::logout))
        .route("/api/auth/me", get(session::me))
        .route("/admin", get(areas::admin_area))
        .route("/admin/*rest", get(areas::admin_area))
        .route("/dashboard", get(areas::tenant_area))
        .route("/dashboard/*rest", get(areas::tenant_area))
}
