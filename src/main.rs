use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use homescape_api::{
    api::{create_router, AppState},
    config::Config,
    db::{DatasetLoader, JsonFileLoader},
    services::LinearDemandModel,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Never serve traffic with a partially loaded dataset
    let loader = JsonFileLoader::new(
        &config.dataset_path,
        config.locations_path.as_ref().map(PathBuf::from),
    );
    let dataset = loader
        .load()
        .await
        .context("Failed to load property dataset")?;

    let mut state = AppState::new(dataset);
    if let Some(model_path) = &config.model_path {
        let model = LinearDemandModel::load(Path::new(model_path))
            .await
            .context("Failed to load demand model")?;
        tracing::info!(path = %model_path, "Using linear demand model");
        state = state.with_model(Arc::new(model));
    }

    let app = create_router(state, config.cors_allow_any_origin);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
