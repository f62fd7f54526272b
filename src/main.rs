use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mergington_activities::config::Config;
use mergington_activities::database::ActivityRegistry;
use mergington_activities::web::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // 1. Logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mergington_activities=info,tower_http=info")),
        )
        .init();

    // 2. Registry: seeded fresh on every start
    let registry = ActivityRegistry::seeded();
    let app = build_router(AppState::new(registry));

    // 3. Bind (one fallback port, like before)
    let config = Config::from_env();
    let addr = config.bind_addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback = config
                .fallback_addr()
                .with_context(|| format!("cannot bind {} and no fallback port left", addr))?;
            warn!("could not bind {}: {}. trying fallback {}", addr, e, fallback);
            TcpListener::bind(&fallback)
                .await
                .with_context(|| format!("cannot bind fallback {}", fallback))?
        }
    };

    let bound_addr = listener.local_addr()?;
    info!("server listening on http://{}", bound_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
