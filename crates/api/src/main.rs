use anyhow::{Context, Result};
use factbox_api::{build_app, ApiConfig};
use factbox_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("factbox_api");

    let config = ApiConfig::from_env();
    let app = build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(
        bind = %config.bind,
        catalog = %config
            .catalog_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "builtin".to_string()),
        "factbox api started"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
