//! Handlers de resync por tipo de objeto
//!
//! Cada handler devolve um stream de lotes brutos (JSON) prontos para o
//! framework de ingestão. Teams e projetos saem em um único lote; issues saem
//! página a página.

use clickup::{ClickUpClient, IssueParams};
use futures_util::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::Serialize;
use serde_json::Value;

use crate::sink::{IngestSink, ObjectKind};
use crate::utils::logging::log_batch_received;
use crate::utils::{AppError, AppResult};

pub type BatchStream = BoxStream<'static, clickup::Result<Vec<Value>>>;

fn to_raw<T: Serialize>(items: Vec<T>) -> clickup::Result<Vec<Value>> {
    items
        .into_iter()
        .map(|item| serde_json::to_value(item).map_err(Into::into))
        .collect()
}

pub fn resync_teams(client: &ClickUpClient) -> BatchStream {
    let client = client.clone();
    stream::once(async move { to_raw(client.list_teams(&[]).await?) }).boxed()
}

pub fn resync_projects(client: &ClickUpClient) -> BatchStream {
    let client = client.clone();
    stream::once(async move { to_raw(client.list_projects(&[]).await?) }).boxed()
}

pub fn resync_issues(client: &ClickUpClient) -> BatchStream {
    client
        .stream_issues(IssueParams::default())
        .map(|batch| batch.and_then(to_raw))
        .boxed()
}

pub fn resync(kind: ObjectKind, client: &ClickUpClient) -> BatchStream {
    match kind {
        ObjectKind::Team => resync_teams(client),
        ObjectKind::Project => resync_projects(client),
        ObjectKind::Issue => resync_issues(client),
    }
}

/// Drena o resync de um tipo para o sink; retorna o total de itens
pub async fn run_resync(
    kind: ObjectKind,
    client: &ClickUpClient,
    sink: &dyn IngestSink,
) -> AppResult<usize> {
    let mut batches = resync(kind, client);
    let mut total = 0;

    while let Some(batch) = batches
        .try_next()
        .await
        .map_err(|e| AppError::clickup(&format!("resync {}", kind), e))?
    {
        log_batch_received(kind.as_str(), batch.len());
        total += batch.len();
        sink.register_raw(kind, batch).await?;
    }

    tracing::info!("✅ Resync de '{}' concluído: {} itens", kind, total);
    Ok(total)
}

/// Resync de todos os tipos, na ordem team → project → issue
pub async fn resync_all(client: &ClickUpClient, sink: &dyn IngestSink) -> AppResult<()> {
    for kind in ObjectKind::ALL {
        run_resync(kind, client, sink).await?;
    }
    Ok(())
}
