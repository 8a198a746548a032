//! Projetos (lists do ClickUp) e resolução do team dono
//!
//! O ClickUp não informa a qual team uma list pertence. Para a listagem
//! completa o team é conhecido durante a varredura team → space → list; para a
//! busca de um projeto isolado o team é resolvido por [`ClickUpClient::find_team_for_project`],
//! que memoriza o resultado por ID de projeto durante toda a vida do processo.

use crate::types::{Project, Team};
use crate::{ClickUpClient, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cache project_id → team dono (`None` = nenhum team contém o projeto)
///
/// Sem TTL nem invalidação: a hierarquia é tratada como estática até o restart.
pub(crate) type TeamCache = Arc<RwLock<HashMap<String, Option<Team>>>>;

impl ClickUpClient {
    /// Lista os projetos (lists) de um space, sem o team anotado
    pub async fn list_space_projects(
        &self,
        space_id: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<Project>> {
        #[derive(Deserialize)]
        struct ListsResponse {
            lists: Vec<Project>,
        }

        let endpoint = format!("/space/{}/list", space_id);
        let response: ListsResponse = self.get_json(&endpoint, params).await?;
        Ok(response.lists)
    }

    /// Lista todos os projetos de todos os teams, cada um anotado com o team dono
    ///
    /// A ordem é a da iteração aninhada (teams por fora, spaces por dentro),
    /// sem ordenação adicional.
    pub async fn list_projects(&self, params: &[(&str, &str)]) -> Result<Vec<Project>> {
        let mut projects = Vec::new();

        for team in self.list_teams(params).await? {
            for space in self.list_spaces(&team.id, params).await? {
                let lists = self.list_space_projects(&space.id, params).await?;
                projects.extend(
                    lists
                        .into_iter()
                        .map(|project| project.with_team(Some(team.clone()))),
                );
            }
        }

        tracing::info!("📁 {} projetos encontrados", projects.len());
        Ok(projects)
    }

    /// Busca um projeto pelo ID e anexa o team dono
    ///
    /// # Retorna
    ///
    /// `Ok(Some(project))` se o projeto existir; `project.team` é `None` quando
    /// nenhum team visível contém o projeto (serializado como `{}`)
    /// `Ok(None)` se a API responder 404 para o projeto
    /// `Err(...)` para qualquer outra falha
    pub async fn get_project(&self, project_id: &str) -> Result<Option<Project>> {
        let endpoint = format!("/list/{}", project_id);

        let project: Project = match self.get_json(&endpoint, &[]).await {
            Ok(project) => project,
            Err(e) if e.is_not_found() => {
                tracing::info!("⚠️ Projeto {} não encontrado", project_id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let team = self.find_team_for_project(project_id).await?;
        if team.is_none() {
            tracing::warn!("⚠️ Nenhum team contém o projeto {}", project_id);
        }

        Ok(Some(project.with_team(team)))
    }

    /// Resolve o team dono de um projeto (memoizado por project_id)
    ///
    /// No cache miss percorre teams → spaces → lists e para no primeiro team
    /// que contém o projeto. O resultado, inclusive "nenhum team", vai para o
    /// cache; erros não são memorizados.
    pub async fn find_team_for_project(&self, project_id: &str) -> Result<Option<Team>> {
        if let Some(cached) = self.team_cache.read().await.get(project_id) {
            tracing::debug!("✅ Team do projeto {} encontrado em cache", project_id);
            return Ok(cached.clone());
        }

        let team = self.scan_team_for_project(project_id).await?;
        self.team_cache
            .write()
            .await
            .insert(project_id.to_string(), team.clone());

        Ok(team)
    }

    async fn scan_team_for_project(&self, project_id: &str) -> Result<Option<Team>> {
        tracing::debug!("🔍 Procurando team do projeto {}", project_id);

        for team in self.list_teams(&[]).await? {
            for space in self.list_spaces(&team.id, &[]).await? {
                let lists = self.list_space_projects(&space.id, &[]).await?;
                if lists.iter().any(|project| project.id == project_id) {
                    tracing::debug!("✅ Projeto {} pertence ao team {}", project_id, team.id);
                    return Ok(Some(team));
                }
            }
        }

        Ok(None)
    }
}
