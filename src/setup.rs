//! Bootstrap de inicialização: webhooks em tempo real

use clickup::ClickUpClient;

use crate::config::{EventListenerType, IntegrationSettings};
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

/// O que o bootstrap fez com os webhooks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookSetup {
    /// Listener ONCE: execução única, sem eventos em tempo real
    SkippedOnceListener,
    /// Sem `app_host` não há endpoint para registrar
    SkippedNoAppHost,
    /// Webhooks garantidos em todos os teams
    Ensured,
}

pub async fn on_start(
    integration: &IntegrationSettings,
    client: &ClickUpClient,
) -> AppResult<WebhookSetup> {
    log_info("Starting ClickUp integration");

    if integration.event_listener == EventListenerType::Once {
        log_info("Skipping webhook creation because the event listener is ONCE");
        return Ok(WebhookSetup::SkippedOnceListener);
    }

    let Some(app_host) = integration.app_host.as_deref().filter(|h| !h.trim().is_empty()) else {
        log_warning(
            "No app host provided, skipping webhook creation. \
             Without the webhook the integration will not export live changes from ClickUp",
        );
        return Ok(WebhookSetup::SkippedNoAppHost);
    };

    client
        .ensure_webhooks(app_host)
        .await
        .map_err(|e| AppError::clickup("ensure_webhooks", e))?;
    Ok(WebhookSetup::Ensured)
}
