//! ClickUp Webhooks API
//!
//! Bootstrap idempotente dos webhooks de ingestão: para cada team deve existir
//! exatamente um webhook apontando para `{app_host}/integration/webhook`,
//! inscrito nos eventos de list e task (create/update/delete).
//!
//! ## Exemplo de Uso
//!
//! ```rust,no_run
//! use clickup::ClickUpClient;
//!
//! # async fn example() -> clickup::Result<()> {
//! let client = ClickUpClient::new("pk_token")?;
//! client.ensure_webhooks("https://integracao.example.com").await?;
//! # Ok(())
//! # }
//! ```
//!
//! **Limitação conhecida**: um webhook existente com o mesmo endpoint mas com
//! outro conjunto de eventos não é detectado nem corrigido.

use crate::types::deserialize_id_flexible;
use crate::{ClickUpClient, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caminho, relativo ao app host, que recebe os eventos
pub const WEBHOOK_PATH: &str = "/integration/webhook";

/// Monta o endpoint do webhook a partir do app host
pub fn webhook_endpoint(app_host: &str) -> String {
    format!("{}{}", app_host.trim_end_matches('/'), WEBHOOK_PATH)
}

/// Configuração de webhook para criação
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// URL do endpoint que receberá os eventos
    pub endpoint: String,

    /// Lista de eventos a monitorar
    pub events: Vec<WebhookEvent>,
}

impl WebhookConfig {
    /// Configuração usada pela ingestão (eventos de list e task)
    pub fn for_ingestion(app_host: &str) -> Self {
        Self {
            endpoint: webhook_endpoint(app_host),
            events: WebhookEvent::ingestion_events(),
        }
    }
}

/// Webhook registrado no ClickUp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
    /// ID único do webhook
    pub id: String,

    /// URL do endpoint que recebe eventos
    pub endpoint: String,

    /// Lista de eventos monitorados
    #[serde(default)]
    pub events: Vec<WebhookEvent>,

    /// userid, team_id, health, secret, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resposta do `POST /team/{team_id}/webhook`
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedWebhook {
    pub id: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resultado do bootstrap de um team
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Já existia webhook para o endpoint (ID do existente)
    AlreadyExists(String),
    /// Webhook criado (ID do novo)
    Created(String),
}

/// Tipos de eventos do ClickUp usados pela ingestão
///
/// Lista completa: https://developer.clickup.com/docs/webhookevents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WebhookEvent {
    // ========== LIST EVENTS ==========
    #[serde(rename = "listCreated")]
    ListCreated,

    #[serde(rename = "listUpdated")]
    ListUpdated,

    #[serde(rename = "listDeleted")]
    ListDeleted,

    // ========== TASK EVENTS ==========
    #[serde(rename = "taskCreated")]
    TaskCreated,

    #[serde(rename = "taskUpdated")]
    TaskUpdated,

    #[serde(rename = "taskDeleted")]
    TaskDeleted,

    /// Eventos não mapeados (taskMoved, folderCreated, "*", ...)
    #[serde(untagged)]
    Other(String),
}

impl WebhookEvent {
    /// Eventos de list (projeto)
    pub fn all_list_events() -> Vec<Self> {
        vec![Self::ListCreated, Self::ListUpdated, Self::ListDeleted]
    }

    /// Eventos essenciais de task (create, update, delete)
    pub fn essential_task_events() -> Vec<Self> {
        vec![Self::TaskCreated, Self::TaskUpdated, Self::TaskDeleted]
    }

    /// Conjunto fixo registrado pelo bootstrap
    pub fn ingestion_events() -> Vec<Self> {
        let mut events = Self::all_list_events();
        events.extend(Self::essential_task_events());
        events
    }

    /// Nome do evento como enviado pelo ClickUp
    pub fn as_str(&self) -> &str {
        match self {
            Self::ListCreated => "listCreated",
            Self::ListUpdated => "listUpdated",
            Self::ListDeleted => "listDeleted",
            Self::TaskCreated => "taskCreated",
            Self::TaskUpdated => "taskUpdated",
            Self::TaskDeleted => "taskDeleted",
            Self::Other(name) => name,
        }
    }

    /// Evento sobre uma list (projeto)
    pub fn is_list_event(&self) -> bool {
        self.as_str().contains("list")
    }

    /// Evento sobre uma task (issue)
    pub fn is_task_event(&self) -> bool {
        self.as_str().contains("task")
    }
}

/// Payload recebido do webhook do ClickUp
///
/// Só os IDs necessários para rebuscar a entidade são tipados; o payload não
/// é validado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// Tipo do evento
    pub event: WebhookEvent,

    /// ID do webhook que enviou
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_id: Option<String>,

    /// Task ID (eventos de task)
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub task_id: Option<String>,

    /// List ID (eventos de list)
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub list_id: Option<String>,

    /// Demais dados do evento (history_items, ...)
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Id(#[serde(deserialize_with = "deserialize_id_flexible")] String);

    Ok(Option::<Id>::deserialize(deserializer)?.map(|Id(id)| id))
}

impl ClickUpClient {
    /// Lista os webhooks de um team
    ///
    /// **IMPORTANTE**: Retorna apenas webhooks criados pelo usuário autenticado.
    pub async fn list_webhooks(&self, team_id: &str) -> Result<Vec<Webhook>> {
        #[derive(Deserialize)]
        struct WebhooksResponse {
            webhooks: Vec<Webhook>,
        }

        let endpoint = format!("/team/{}/webhook", team_id);
        let response: WebhooksResponse = self.get_json(&endpoint, &[]).await?;
        Ok(response.webhooks)
    }

    /// Cria um webhook no team
    pub async fn create_webhook(&self, team_id: &str, config: &WebhookConfig) -> Result<CreatedWebhook> {
        let endpoint = format!("/team/{}/webhook", team_id);

        let body = serde_json::json!({
            "endpoint": config.endpoint,
            "events": config.events,
        });

        self.post_json(&endpoint, &body).await
    }

    /// Garante o webhook de ingestão em todos os teams
    pub async fn ensure_webhooks(&self, app_host: &str) -> Result<()> {
        let config = WebhookConfig::for_ingestion(app_host);

        for team in self.list_teams(&[]).await? {
            self.ensure_team_webhook(&team.id, &config).await?;
        }

        Ok(())
    }

    /// Cria o webhook no team se nenhum existente tiver o mesmo endpoint
    pub async fn ensure_team_webhook(
        &self,
        team_id: &str,
        config: &WebhookConfig,
    ) -> Result<WebhookOutcome> {
        let existing = self
            .list_webhooks(team_id)
            .await?
            .into_iter()
            .find(|w| w.endpoint == config.endpoint);

        if let Some(webhook) = existing {
            tracing::info!(
                "Webhook de ingestão do ClickUp já existe [ID: {}, Team ID: {}]",
                webhook.id,
                team_id
            );
            return Ok(WebhookOutcome::AlreadyExists(webhook.id));
        }

        let created = self.create_webhook(team_id, config).await?;
        tracing::info!(
            "✅ Webhook de ingestão do ClickUp criado [ID: {}, Team ID: {}]",
            created.id,
            team_id
        );

        Ok(WebhookOutcome::Created(created.id))
    }
}
