use axum::{
    http::{StatusCode, Uri},
    response::{Html, Response},
};

use crate::app::errors::json_error;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

// Page bodies are rendered by the frontend; these only anchor the public paths.

pub async fn home() -> Html<&'static str> {
    Html("<!doctype html><title>Consultoria</title><main id=\"home\"></main>")
}

pub async fn login_page() -> Html<&'static str> {
    Html("<!doctype html><title>Entrar</title><main id=\"login\"></main>")
}

pub async fn signup_page() -> Html<&'static str> {
    Html("<!doctype html><title>Cadastro</title><main id=\"cadastro\"></main>")
}

pub async fn not_found(uri: Uri) -> Response {
    json_error(StatusCode::NOT_FOUND, "not_found", format!("no route for {}", uri.path()))
}
