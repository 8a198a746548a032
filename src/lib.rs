// Biblioteca da integração ClickUp
// Expõe módulos para uso em testes e no binário

pub mod config;
pub mod handlers;
pub mod resync;
pub mod setup;
pub mod sink;
pub mod utils;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// AppState é definido aqui para ser compartilhado
#[derive(Clone)]
pub struct AppState {
    pub clickup: clickup::ClickUpClient,
    pub sink: Arc<dyn sink::IngestSink>,
}

/// Rotas públicas da integração
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(clickup::webhooks::WEBHOOK_PATH, post(handlers::handle_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
