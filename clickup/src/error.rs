//! Tipos de erro para o crate clickup

use thiserror::Error;

/// Erros do cliente ClickUp
#[derive(Debug, Error)]
pub enum ClickUpError {
    /// Erro de requisição HTTP (transporte)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Erro da API do ClickUp (status code fora de 2xx)
    ///
    /// Não há distinção entre 4xx e 5xx nesta camada: o status e o body
    /// são repassados como vieram.
    #[error("ClickUp API request failed (status {status}): {body}")]
    ApiError { status: u16, body: String },

    /// Erro de parsing JSON
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Erro de configuração
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ClickUpError {
    /// Status HTTP retornado pela API, se o erro veio de uma resposta
    pub fn status(&self) -> Option<u16> {
        match self {
            ClickUpError::ApiError { status, .. } => Some(*status),
            ClickUpError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// `true` quando a API respondeu 404
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Tipo Result padrão para o crate
pub type Result<T> = std::result::Result<T, ClickUpError>;
