//! Cliente da API ClickUp para ingestão
//!
//! Este crate adapta a API v2 do ClickUp ao formato esperado pelo framework
//! de ingestão:
//!
//! - Teams e spaces (primitivas de navegação da hierarquia)
//! - Projetos (lists) anotados com o team dono, com cache team-por-projeto
//! - Issues (tasks) como stream paginado de lotes
//! - Bootstrap idempotente de webhooks por team
//!
//! # API ClickUp v2
//!
//! - **Teams**: `/team`
//! - **Spaces**: `/team/{team_id}/space`
//! - **Lists**: `/space/{space_id}/list`, `/list/{list_id}`
//! - **Tasks**: `/list/{list_id}/task?page=N`, `/task/{task_id}`
//! - **Webhooks**: `/team/{team_id}/webhook`
//!
//! ## Nomenclatura
//! - "project" = list do ClickUp
//! - "issue" = task do ClickUp
//!
//! # Exemplo Básico
//!
//! ```rust,no_run
//! use clickup::{ClickUpClient, IssueParams};
//! use futures_util::TryStreamExt;
//!
//! # async fn example() -> clickup::Result<()> {
//! let client = ClickUpClient::new(std::env::var("CLICKUP_PERSONAL_TOKEN").unwrap_or_default())?;
//!
//! for project in client.list_projects(&[]).await? {
//!     println!("{} (team {:?})", project.id, project.team_id());
//! }
//!
//! let mut pages = Box::pin(client.stream_issues(IssueParams::default()));
//! while let Some(batch) = pages.try_next().await? {
//!     println!("{} issues", batch.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod issues;
pub mod projects;
pub mod teams;
pub mod types;
pub mod webhooks;

// Re-exports principais
pub use client::{ClickUpClient, CLICKUP_API_URL};
pub use error::{ClickUpError, Result};
pub use issues::IssueParams;
pub use types::{Issue, Project, Space, Team};
pub use webhooks::{Webhook, WebhookConfig, WebhookEvent, WebhookOutcome, WebhookPayload};
