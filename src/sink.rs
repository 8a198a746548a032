//! Seam com o framework de ingestão
//!
//! O framework (mapeamento, persistência, despacho) é externo. A integração
//! só entrega lotes brutos de JSON por tipo de objeto através de [`IngestSink`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tokio::sync::Mutex;

use crate::utils::AppResult;

/// Tipos de objeto exportados pela integração
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Team,
    Project,
    Issue,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 3] = [ObjectKind::Team, ObjectKind::Project, ObjectKind::Issue];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Team => "team",
            ObjectKind::Project => "project",
            ObjectKind::Issue => "issue",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destino dos lotes brutos
#[async_trait]
pub trait IngestSink: Send + Sync {
    async fn register_raw(&self, kind: ObjectKind, items: Vec<Value>) -> AppResult<()>;
}

/// Sink que apenas registra os lotes no log
#[derive(Debug, Default)]
pub struct LoggingSink;

#[async_trait]
impl IngestSink for LoggingSink {
    async fn register_raw(&self, kind: ObjectKind, items: Vec<Value>) -> AppResult<()> {
        tracing::info!("📦 {} objetos do tipo '{}' registrados", items.len(), kind);
        tracing::debug!("{}", serde_json::Value::Array(items));
        Ok(())
    }
}

/// Sink em memória (testes e execuções locais)
#[derive(Debug, Default)]
pub struct MemorySink {
    batches: Mutex<Vec<(ObjectKind, Vec<Value>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cópia dos lotes recebidos, em ordem de chegada
    pub async fn batches(&self) -> Vec<(ObjectKind, Vec<Value>)> {
        self.batches.lock().await.clone()
    }

    /// Todos os itens recebidos de um tipo
    pub async fn items(&self, kind: ObjectKind) -> Vec<Value> {
        self.batches
            .lock()
            .await
            .iter()
            .filter(|(k, _)| *k == kind)
            .flat_map(|(_, items)| items.clone())
            .collect()
    }
}

#[async_trait]
impl IngestSink for MemorySink {
    async fn register_raw(&self, kind: ObjectKind, items: Vec<Value>) -> AppResult<()> {
        self.batches.lock().await.push((kind, items));
        Ok(())
    }
}
