/// Integração ClickUp → framework de ingestão
///
/// Arquitetura:
/// - Na inicialização garante os webhooks de list/task em cada team
/// - Opcionalmente executa resync completo (teams, projetos, issues) em background
/// - Servidor HTTP recebe eventos em /integration/webhook e rebusca a entidade
use std::sync::Arc;
use tokio::net::TcpListener;

use clickup_integration::config::Settings;
use clickup_integration::sink::{IngestSink, LoggingSink};
use clickup_integration::utils::{logging::*, AppError};
use clickup_integration::{build_router, resync, setup, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 🔧 Carregar variáveis de ambiente do arquivo .env (se existir)
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // Inicializar tracing
    init_tracing();

    if dotenv_loaded {
        log_info("✅ Arquivo .env carregado com sucesso");
    } else {
        tracing::debug!("Arquivo .env não encontrado - usando variáveis de ambiente do sistema");
    }

    // Carregar configurações
    let settings = Settings::new().map_err(AppError::from)?;

    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    let clickup_client = settings
        .clickup
        .build_client()
        .map_err(|e| AppError::ConfigError(format!("Failed to create ClickUp client: {}", e)))?;

    // Falha nos webhooks não impede o servidor de subir
    match setup::on_start(&settings.integration, &clickup_client).await {
        Ok(outcome) => log_info(&format!("Webhook setup: {:?}", outcome)),
        Err(e) => log_error(&format!("❌ Falha ao configurar webhooks do ClickUp: {}", e)),
    }

    let sink: Arc<dyn IngestSink> = Arc::new(LoggingSink);

    if settings.integration.resync_on_start {
        let client = clickup_client.clone();
        let sink = sink.clone();
        tokio::spawn(async move {
            if let Err(e) = resync::resync_all(&client, sink.as_ref()).await {
                log_error(&format!("❌ Resync inicial falhou: {}", e));
            }
        });
        log_info("🔄 Resync inicial iniciado em background");
    }

    let app_state = Arc::new(AppState {
        clickup: clickup_client,
        sink,
    });

    let app = build_router(app_state);

    // Iniciar servidor
    let port = settings.server.port;
    let listener = TcpListener::bind(format!("{}:{}", settings.server.host, port)).await?;

    log_server_startup(port);
    log_server_ready(&settings.server.host, port);

    // Graceful shutdown com signal handling
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info("🛑 Server shut down gracefully");
    Ok(())
}

/// Signal handler para graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log_error(&format!("failed to install Ctrl+C handler: {}", e));
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log_error(&format!("failed to install SIGTERM handler: {}", e));
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_info("🛑 Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log_info("🛑 Received SIGTERM, shutting down gracefully...");
        }
    }
}
