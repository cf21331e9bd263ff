use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::storage::EmployeeStore;
use crate::table::Table;

pub mod routes;

/// Server state, shared read-only across requests
pub struct AppState {
    /// Full presentation dataset; every request filters it afresh
    pub dataset: Table,
    /// Stored employees, when the store initialized
    pub store: Option<EmployeeStore>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/options", get(routes::get_options))
        .route("/api/report", get(routes::get_report))
        .route("/api/employees", get(routes::get_employees))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, state: AppState) -> anyhow::Result<()> {
    let app = router(Arc::new(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    crate::ui::info("Server running at", &format!("http://{}", addr));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
