use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Instala o subscriber `fmt` global (nível via `RUST_LOG`, padrão `info`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init: em testes o subscriber pode já estar instalado
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub fn log_request_received(endpoint: &str, method: &str) {
    info!("Request received: {} {}", method, endpoint);
}

pub fn log_request_processed(endpoint: &str, status: u16, duration_ms: u64) {
    info!("Request processed: {} - Status: {} - Duration: {}ms",
          endpoint, status, duration_ms);
}

pub fn log_clickup_api_error(operation: &str, status: Option<u16>, error: &str) {
    error!("ClickUp API error: {} - Status: {:?} - Error: {}", operation, status, error);
}

pub fn log_batch_received(kind: &str, count: usize) {
    info!("Received {} batch with {} items", kind, count);
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_server_startup(port: u16) {
    info!("🚀 ClickUp integration server starting on port {}", port);
}

pub fn log_server_ready(host: &str, port: u16) {
    info!("✅ Server ready and listening on http://{}:{}", host, port);
}

pub fn log_health_check() {
    debug!("Health check requested");
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
