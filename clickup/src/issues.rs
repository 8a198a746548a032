//! Issues (tasks do ClickUp)
//!
//! `GET /list/{project_id}/task?page=N` → `{ "tasks": [...], "last_page": bool }`
//!
//! A paginação é exposta como um `Stream` de lotes: cada página vira um
//! `Vec<Issue>` e a próxima página só é pedida quando o consumidor faz poll de
//! novo. Cada projeto começa do `start_page` com seu próprio cursor.

use crate::types::Issue;
use crate::{ClickUpClient, Result};
use futures_util::stream::{self, Stream};
use serde::Deserialize;
use std::collections::VecDeque;

const PAGE_PARAM: &str = "page";

/// Parâmetros da varredura de issues
#[derive(Debug, Clone, Default)]
pub struct IssueParams {
    /// Página inicial de cada projeto (a API começa em 0)
    pub start_page: u32,

    /// Query params extras repassados para a listagem de projetos e de tasks
    /// (ex.: `archived`, `include_closed`). `page` é controlado pelo stream e
    /// é descartado daqui.
    pub filters: Vec<(String, String)>,
}

impl IssueParams {
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    fn filter_pairs(&self) -> Vec<(&str, &str)> {
        self.filters
            .iter()
            .filter(|(k, _)| k.as_str() != PAGE_PARAM)
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

/// Uma página de tasks de um projeto
#[derive(Debug, Deserialize)]
struct TasksPage {
    tasks: Vec<Issue>,
    #[serde(default)]
    last_page: bool,
}

struct IssueStreamState {
    client: ClickUpClient,
    params: IssueParams,
    /// Projetos ainda não visitados; `None` até o primeiro poll
    projects: Option<VecDeque<String>>,
    /// Projeto em andamento e a próxima página a pedir
    cursor: Option<(String, u32)>,
}

impl ClickUpClient {
    /// Stream lazy de lotes de issues de todos os projetos
    ///
    /// Os projetos são listados no primeiro poll. Para cada projeto as páginas
    /// são pedidas a partir de `params.start_page` até a API indicar
    /// `last_page` (ou devolver uma página vazia). Um erro encerra o stream.
    pub fn stream_issues(
        &self,
        params: IssueParams,
    ) -> impl Stream<Item = Result<Vec<Issue>>> + Send + 'static {
        let state = IssueStreamState {
            client: self.clone(),
            params,
            projects: None,
            cursor: None,
        };

        stream::try_unfold(state, next_issue_page)
    }

    /// Busca uma issue pelo ID (sem fallback: 404 é erro)
    pub async fn get_issue(&self, issue_id: &str) -> Result<Issue> {
        let endpoint = format!("/task/{}", issue_id);
        self.get_json(&endpoint, &[]).await
    }

    async fn fetch_issue_page(
        &self,
        project_id: &str,
        page: u32,
        params: &IssueParams,
    ) -> Result<TasksPage> {
        let endpoint = format!("/list/{}/task", project_id);
        let page_param = page.to_string();

        let mut query = vec![(PAGE_PARAM, page_param.as_str())];
        query.extend(params.filter_pairs());

        let tasks_page: TasksPage = self.get_json(&endpoint, &query).await?;
        tracing::debug!(
            "📄 Projeto {} página {}: {} tasks (last_page={})",
            project_id,
            page,
            tasks_page.tasks.len(),
            tasks_page.last_page
        );
        Ok(tasks_page)
    }
}

async fn next_issue_page(
    mut state: IssueStreamState,
) -> Result<Option<(Vec<Issue>, IssueStreamState)>> {
    if state.projects.is_none() {
        let projects = {
            let filters = state.params.filter_pairs();
            state.client.list_projects(&filters).await?
        };
        state.projects = Some(projects.into_iter().map(|p| p.id).collect());
    }

    let (project_id, page) = match state.cursor.take() {
        Some(cursor) => cursor,
        None => match state.projects.as_mut().and_then(VecDeque::pop_front) {
            Some(project_id) => (project_id, state.params.start_page),
            None => return Ok(None),
        },
    };

    let tasks_page = state
        .client
        .fetch_issue_page(&project_id, page, &state.params)
        .await?;

    if !tasks_page.last_page && !tasks_page.tasks.is_empty() {
        state.cursor = Some((project_id, page + 1));
    }

    Ok(Some((tasks_page.tasks, state)))
}
