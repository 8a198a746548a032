//! Teams e Spaces
//!
//! - **Teams**: `GET /team` → `{ "teams": [...] }`
//! - **Spaces**: `GET /team/{team_id}/space` → `{ "spaces": [...] }`

use crate::types::{Space, Team};
use crate::{ClickUpClient, Result};
use serde::Deserialize;

impl ClickUpClient {
    /// Lista todos os teams (workspaces) acessíveis pelo token
    pub async fn list_teams(&self, params: &[(&str, &str)]) -> Result<Vec<Team>> {
        #[derive(Deserialize)]
        struct TeamsResponse {
            teams: Vec<Team>,
        }

        let response: TeamsResponse = self.get_json("/team", params).await?;
        tracing::debug!("📋 {} teams encontrados", response.teams.len());
        Ok(response.teams)
    }

    /// Lista os spaces de um team
    pub async fn list_spaces(&self, team_id: &str, params: &[(&str, &str)]) -> Result<Vec<Space>> {
        #[derive(Deserialize)]
        struct SpacesResponse {
            spaces: Vec<Space>,
        }

        let endpoint = format!("/team/{}/space", team_id);
        let response: SpacesResponse = self.get_json(&endpoint, params).await?;
        tracing::debug!("📋 {} spaces no team {}", response.spaces.len(), team_id);
        Ok(response.spaces)
    }
}
