//! Cliente HTTP para a API do ClickUp

use crate::error::{ClickUpError, Result};
use crate::projects::TeamCache;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// URL base fixa da API v2 do ClickUp
pub const CLICKUP_API_URL: &str = "https://api.clickup.com/api/v2";

/// Cliente para interagir com a API do ClickUp (v2 apenas)
///
/// O token é gravado uma única vez nos headers default do transporte. Clones
/// compartilham o mesmo transporte e o mesmo cache de team-por-projeto.
#[derive(Clone, Debug)]
pub struct ClickUpClient {
    http_client: HttpClient,
    base_url: String,
    pub(crate) team_cache: TeamCache,
}

impl ClickUpClient {
    /// Cria um novo cliente ClickUp
    ///
    /// # Argumentos
    ///
    /// * `api_token` - Personal Token do ClickUp (enviado como está no header `Authorization`)
    ///
    /// # Timeouts
    ///
    /// - Total: 30s
    /// - Connect: 5s
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_timeouts(api_token, 30, 5)
    }

    /// Cria um novo cliente com timeouts customizados
    pub fn with_timeouts(
        api_token: impl Into<String>,
        total_timeout_secs: u64,
        connect_timeout_secs: u64,
    ) -> Result<Self> {
        let api_token = api_token.into();

        let mut auth = HeaderValue::from_str(&api_token).map_err(|e| {
            ClickUpError::ConfigError(format!("Invalid ClickUp token for Authorization header: {}", e))
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(total_timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .build()
            .map_err(|e| {
                ClickUpError::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            base_url: CLICKUP_API_URL.to_string(),
            team_cache: TeamCache::default(),
        })
    }

    /// Troca a URL base (servidores mock em testes, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Obtém a URL base da API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Executa uma requisição GET com query params
    pub(crate) async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);

        tracing::debug!("GET {} {:?}", url, query);

        let response = self.http_client.get(&url).query(query).send().await?;

        self.handle_response(response).await
    }

    /// Executa uma requisição GET e parseia JSON
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.get(endpoint, query).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Executa uma requisição POST
    pub(crate) async fn post(&self, endpoint: &str, body: &Value) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);

        tracing::debug!("POST {} with body: {}", url, body);

        let response = self.http_client.post(&url).json(body).send().await?;

        self.handle_response(response).await
    }

    /// Executa uma requisição POST e parseia JSON
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Value,
    ) -> Result<T> {
        let response = self.post(endpoint, body).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Processa a resposta HTTP: qualquer status fora de 2xx vira `ApiError`
    async fn handle_response(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let url = response.url().to_string();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        tracing::error!("ClickUp API error ({}) on {}: {}", status_code, url, body);

        Err(ClickUpError::ApiError {
            status: status_code,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = ClickUpClient::new("pk_test").unwrap();
        assert_eq!(client.base_url(), "https://api.clickup.com/api/v2");
    }

    #[test]
    fn test_client_with_custom_timeouts() {
        let client = ClickUpClient::with_timeouts("pk_test", 60, 10)
            .unwrap()
            .with_base_url("http://localhost:9999/");
        assert_eq!(client.base_url(), "http://localhost:9999");
    }

    #[test]
    fn test_invalid_token_is_config_error() {
        let err = ClickUpClient::new("bad\ntoken").unwrap_err();
        assert!(matches!(err, ClickUpError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_sends_token_in_authorization_header() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/team").header("Authorization", "pk_test");
                then.status(200).json_body(json!({ "teams": [] }));
            })
            .await;

        let client = ClickUpClient::new("pk_test")
            .unwrap()
            .with_base_url(server.base_url());
        let value: Value = client.get_json("/team", &[]).await.unwrap();

        assert_eq!(value, json!({ "teams": [] }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/team");
                then.status(503).body("upstream down");
            })
            .await;

        let client = ClickUpClient::new("pk_test")
            .unwrap()
            .with_base_url(server.base_url());
        let err = client.get_json::<Value>("/team", &[]).await.unwrap_err();

        match err {
            ClickUpError::ApiError { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
