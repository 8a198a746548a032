use clickup::{ClickUpClient, CLICKUP_API_URL};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub clickup: ClickUpSettings,
    #[serde(default)]
    pub integration: IntegrationSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClickUpSettings {
    pub personal_token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl ClickUpSettings {
    /// Cria o cliente ClickUp com o token e os timeouts configurados
    pub fn build_client(&self) -> clickup::Result<ClickUpClient> {
        Ok(
            ClickUpClient::with_timeouts(
                self.personal_token.clone(),
                self.timeout_secs,
                self.connect_timeout_secs,
            )?
            .with_base_url(self.base_url.clone()),
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct IntegrationSettings {
    /// URL pública desta integração; sem ela os webhooks não são criados
    #[serde(default)]
    pub app_host: Option<String>,
    #[serde(default)]
    pub event_listener: EventListenerType,
    /// Executa resync completo (teams, projetos, issues) na inicialização
    #[serde(default)]
    pub resync_on_start: bool,
}

/// Modo de escuta de eventos do framework de ingestão
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventListenerType {
    #[default]
    Polling,
    Webhook,
    /// Execução única: sem webhooks em tempo real
    Once,
}

fn default_base_url() -> String {
    CLICKUP_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    5
}

/// Variáveis de ambiente com nome "curto" → chave da configuração
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("CLICKUP_PERSONAL_TOKEN", "clickup.personal_token"),
    ("APP_HOST", "integration.app_host"),
    ("EVENT_LISTENER_TYPE", "integration.event_listener"),
];

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                Environment::with_prefix("CLICKUP_INTEGRATION")
                    .prefix_separator("_")
                    .separator("__"),
            );

        for (var, key) in ENV_OVERRIDES {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_override(*key, value)?;
            }
        }

        // No Cloud Run a porta vem de PORT
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<i64>().ok()) {
            builder = builder.set_override("server.port", port)?;
        }

        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;

        if settings.clickup.personal_token.trim().is_empty() {
            return Err(ConfigError::Message(
                "clickup.personal_token (CLICKUP_PERSONAL_TOKEN) não configurado".to_string(),
            ));
        }

        Ok(settings)
    }
}
