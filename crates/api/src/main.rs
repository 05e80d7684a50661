use std::sync::Arc;

use anyhow::Context;

use consultdesk_api::accounts::InMemoryAccounts;
use consultdesk_api::config::GateConfig;
use consultdesk_auth::{CallerIdentity, Role};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    consultdesk_observability::init();

    // No secret, no server: verification without it would be meaningless.
    let config = GateConfig::from_env().context("invalid configuration")?;

    let mut accounts = InMemoryAccounts::new();
    if let Some(seed) = &config.admin_seed {
        accounts = accounts.with_account(
            seed.email.clone(),
            seed.password.clone(),
            CallerIdentity::new("admin", Role::Admin),
        );
        tracing::info!(email = %seed.email, "seeded administrator account");
    }

    let app = consultdesk_api::app::build_app(&config, Arc::new(accounts));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
