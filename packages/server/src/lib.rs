//! # Funnel Server
//!
//! HTTP surface over a [`FunnelStore`]:
//!
//! ```text
//! GET   /healthz
//! GET   /api/funnels[?slug=…]
//! POST  /api/funnels                  { id?, name, slug }
//! GET   /api/funnels/:id
//! PATCH /api/funnels/:id              { publishedData }
//! POST  /api/funnels/:id/publish      { isPublished }
//! GET   /p/*slug                      public HTML
//! ```
//!
//! Errors are returned as `{ "error": "…" }` with a matching status code.

mod error;
mod routes;

pub use error::ApiError;

use axum::{
    routing::{get, post},
    Router,
};
use funnel_renderer::RenderOptions;
use funnel_store::FunnelStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state for all handlers
pub struct AppState {
    pub store: Arc<dyn FunnelStore>,
    pub render: RenderOptions,
}

impl AppState {
    pub fn new(store: Arc<dyn FunnelStore>) -> Self {
        Self {
            store,
            render: RenderOptions::default(),
        }
    }

    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(routes::health))
        .route(
            "/api/funnels",
            get(routes::list_funnels).post(routes::create_funnel),
        )
        .route(
            "/api/funnels/:id",
            get(routes::get_funnel).patch(routes::update_funnel),
        )
        .route("/api/funnels/:id/publish", post(routes::publish_funnel))
        .route("/p/*slug", get(routes::public_page))
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve `router` on `listener` until the process stops
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Funnel server listening on http://{}", addr);
    }
    axum::serve(listener, router).await
}
