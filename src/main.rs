use anyhow::Context;
use tokio::signal;
use tracing::info;

use school_portal_api::{
    auth::JwtKeys, config::AppConfig, database::Database, router, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and JWT_SECRET
    let _ = dotenvy::dotenv();
    school_portal_api::init_tracing();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    info!("Starting School Portal API in {:?} mode", config.environment);

    let db = Database::connect_lazy(&config.database).context("failed to configure database pool")?;
    if config.database.run_migrations {
        db.run_migrations()
            .await
            .context("failed to run database migrations")?;
    }

    let jwt = JwtKeys::new(&config.security.jwt_secret).context("invalid JWT secret")?;
    let bind_addr = config.bind_address();
    let state = AppState::new(config, db.clone(), jwt);
    state
        .uploads
        .ensure_dir()
        .await
        .with_context(|| format!("failed to create upload dir {}", state.uploads.root().display()))?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("School Portal API listening on http://{}", bind_addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
