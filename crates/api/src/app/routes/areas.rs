//! Admin and company dashboard areas.
//!
//! The handlers only report who the gate let through; the pages themselves
//! are rendered elsewhere.

use axum::{http::Uri, Json};
use serde::Serialize;

use crate::context::TrustedIdentity;

#[derive(Debug, Serialize)]
pub struct AreaView {
    pub area: &'static str,
    pub path: String,
    pub user_id: String,
    pub role: String,
}

fn view(area: &'static str, uri: &Uri, identity: &TrustedIdentity) -> Json<AreaView> {
    Json(AreaView {
        area,
        path: uri.path().to_string(),
        user_id: identity.user_id().to_string(),
        role: identity.role().to_string(),
    })
}

pub async fn admin_area(identity: TrustedIdentity, uri: Uri) -> Json<AreaView> {
    view("admin", &uri, &identity)
}

pub async fn tenant_area(identity: TrustedIdentity, uri: Uri) -> Json<AreaView> {
    view("dashboard", &uri, &identity)
}
