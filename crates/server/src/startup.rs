use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::{file::todo_store::JsonTodoStore, runtime, todos::TodoStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;

/// Any origin, any method: the browser client runs on another port.
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the todo store named by the config and build the router over it.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let static_dir = cfg.server.static_dir.as_deref();
    runtime::ensure_env(&cfg.storage.data_file, static_dir).await?;

    let store: Arc<dyn TodoStore> = JsonTodoStore::new(&cfg.storage.data_file).await?;
    info!(data_file = %cfg.storage.data_file.display(), "todo store ready");

    let state = ServerState::new(store);
    Ok(routes::build_router(state, build_cors(), static_dir))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = cfg.bind_addr().parse()?;
    info!(%addr, "starting todo server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
