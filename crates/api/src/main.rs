use anyhow::Context;

use claimtrack_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    claimtrack_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let app = claimtrack_api::app::build_app(config.jwt_secret.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
