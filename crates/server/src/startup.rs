use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, DatabaseConfig, StoreBackend};
use service::{InMemoryStudentRepository, MongoStudentRepository, StudentRepository};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the configured store once and wrap it in request state.
pub async fn build_state(cfg: &DatabaseConfig) -> anyhow::Result<ServerState> {
    let repo: Arc<dyn StudentRepository> = match cfg.backend {
        StoreBackend::Mongodb => {
            let collection = models::db::connect(cfg).await?;
            Arc::new(MongoStudentRepository::new(collection))
        }
        StoreBackend::Memory => {
            warn!(event = "memory_backend", "using in-memory student store; records are lost on exit");
            Arc::new(InMemoryStudentRepository::new())
        }
    };
    Ok(ServerState::new(repo))
}

/// Resolves on Ctrl+C. If the handler cannot be installed the server runs until killed.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(event = "signal_handler_failed", error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining in-flight requests");
}

/// Serve `app` until `shutdown` resolves, then let in-flight requests finish.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Public entry: open the store from an already validated config and run the HTTP server.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg.database).await?;
    let app = routes::build_router(state, build_cors());

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, backend = ?cfg.database.backend, "starting student records server");
    let listener = TcpListener::bind(addr).await?;
    serve(listener, app, shutdown_signal()).await?;
    info!(event = "stop", "server stopped");
    Ok(())
}
