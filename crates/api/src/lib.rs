//! HTTP API: authorization gate, session routes and router wiring.

pub mod accounts;
pub mod app;
pub mod config;
pub mod context;
pub mod cookies;
pub mod middleware;
