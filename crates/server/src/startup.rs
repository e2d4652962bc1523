use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth::ServerState};
use service::auth::{
    password::Argon2Hasher, repo::seaorm::SeaOrmAuthRepository, token::JwtIssuer, AuthConfig, AuthService,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    let raw = format!("{}:{}", cfg.server.host, cfg.server.port);
    raw.parse().with_context(|| format!("invalid bind address {raw}"))
}

/// Wire storage, hashing and token issuance into the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&cfg.database).await.context("connecting to database")?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await.context("running migrations")?;
        info!("migrations applied");
    }

    let argon = &cfg.auth.argon2;
    let hasher = Argon2Hasher::new(argon.memory_kib, argon.iterations, argon.parallelism)
        .context("building password hasher")?;
    let svc = AuthService::new(
        Arc::new(SeaOrmAuthRepository { db }),
        hasher,
        JwtIssuer,
        AuthConfig { token_ttl: cfg.auth.token_ttl() },
    );

    let state = ServerState { auth: Arc::new(svc), request_timeout: cfg.server.request_timeout() };
    Ok(routes::build_router(state, build_cors()))
}

/// Serve until SIGINT/SIGTERM, then drain in-flight requests.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await.with_context(|| format!("binding {addr}"))?;
    info!(%addr, token_ttl_secs = cfg.auth.token_ttl_secs, "auth server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("auth server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(signal = "SIGINT", "shutdown signal received"),
        _ = terminate => info!(signal = "SIGTERM", "shutdown signal received"),
    }
}
