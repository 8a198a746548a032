/// Handler para eventos em tempo real do ClickUp
///
/// Fluxo:
/// 1. ClickUp envia evento HTTP POST para /integration/webhook
/// 2. Eventos de list → rebusca o projeto (com o team dono) e registra
/// 3. Eventos de task → rebusca a issue e registra
/// 4. Demais eventos são apenas logados
///
/// O payload não é validado (sem assinatura): só `event`, `list_id` e
/// `task_id` são lidos.

use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::time::Instant;

use crate::sink::ObjectKind;
use crate::utils::logging::*;
use crate::utils::AppError;
use crate::AppState;
use clickup::WebhookPayload;

pub async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WebhookPayload>,
) -> Result<Json<Value>, AppError> {
    let start_time = Instant::now();
    log_request_received(clickup::webhooks::WEBHOOK_PATH, "POST");

    let event = payload.event.as_str();
    log_info(&format!("📥 Evento ClickUp recebido: {}", event));

    if payload.event.is_list_event() {
        let list_id = payload.list_id.as_deref().ok_or_else(|| {
            AppError::ValidationError(format!("Missing 'list_id' for event {}", event))
        })?;
        log_info(&format!("Evento de projeto: {}", list_id));

        let project = state
            .clickup
            .get_project(list_id)
            .await
            .map_err(|e| AppError::clickup("get_project", e))?;

        match project {
            Some(project) => register(&state, ObjectKind::Project, serde_json::to_value(project)).await?,
            None => log_warning(&format!("⚠️ Projeto {} não existe mais, nada a registrar", list_id)),
        }
    } else if payload.event.is_task_event() {
        let task_id = payload.task_id.as_deref().ok_or_else(|| {
            AppError::ValidationError(format!("Missing 'task_id' for event {}", event))
        })?;
        log_info(&format!("Evento de issue: {}", task_id));

        let issue = state
            .clickup
            .get_issue(task_id)
            .await
            .map_err(|e| AppError::clickup("get_issue", e))?;
        register(&state, ObjectKind::Issue, serde_json::to_value(issue)).await?;
    } else {
        log_info(&format!("Evento {} ignorado", event));
    }

    let processing_time = start_time.elapsed().as_millis() as u64;
    log_request_processed(clickup::webhooks::WEBHOOK_PATH, 200, processing_time);

    Ok(Json(json!({ "status": "ok" })))
}

async fn register(
    state: &AppState,
    kind: ObjectKind,
    raw: Result<Value, serde_json::Error>,
) -> Result<(), AppError> {
    let raw = raw.map_err(|e| AppError::InternalError(format!("Failed to serialize {}: {}", kind, e)))?;

    state.sink.register_raw(kind, vec![raw]).await
}

#[cfg(test)]
mod tests {
    use crate::sink::{MemorySink, ObjectKind};
    use crate::{build_router, AppState};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use clickup::ClickUpClient;
    use httpmock::prelude::*;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(server: &MockServer, sink: Arc<MemorySink>) -> Arc<AppState> {
        let clickup = ClickUpClient::new("pk_test").unwrap().with_base_url(server.base_url());

        Arc::new(AppState { clickup, sink })
    }

    async fn post_event(state: Arc<AppState>, payload: Value) -> (StatusCode, Value) {
        let response = build_router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/integration/webhook")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn mock_team_of_l1(server: &MockServer) {
        server
            .mock_async(|when, then| {
                when.method(GET).path("/team");
                then.status(200).json_body(json!({ "teams": [{ "id": "t1" }] }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/team/t1/space");
                then.status(200).json_body(json!({ "spaces": [{ "id": "s1" }] }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/space/s1/list");
                then.status(200).json_body(json!({ "lists": [{ "id": "l1" }] }));
            })
            .await;
    }

    #[tokio::test]
    async fn test_list_event_registers_project_with_team() {
        let server = MockServer::start_async().await;
        mock_team_of_l1(&server).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/list/l1");
                then.status(200).json_body(json!({ "id": "l1", "name": "Backlog" }));
            })
            .await;
        let sink = Arc::new(MemorySink::new());

        let (status, body) = post_event(
            state(&server, sink.clone()),
            json!({ "event": "listUpdated", "list_id": "l1", "webhook_id": "wh" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
        let projects = sink.items(ObjectKind::Project).await;
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0]["__team"]["id"], "t1");
    }

    #[tokio::test]
    async fn test_deleted_list_registers_nothing() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/list/gone");
                then.status(404).json_body(json!({ "err": "List not found" }));
            })
            .await;
        let sink = Arc::new(MemorySink::new());

        let (status, _) = post_event(
            state(&server, sink.clone()),
            json!({ "event": "listDeleted", "list_id": "gone" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(sink.batches().await.is_empty());
    }

    #[tokio::test]
    async fn test_task_event_registers_issue() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/task/abc");
                then.status(200).json_body(json!({ "id": "abc", "name": "Fix login" }));
            })
            .await;
        let sink = Arc::new(MemorySink::new());

        let (status, _) = post_event(
            state(&server, sink.clone()),
            json!({ "event": "taskCreated", "task_id": "abc" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let issues = sink.items(ObjectKind::Issue).await;
        assert_eq!(issues, vec![json!({ "id": "abc", "name": "Fix login" })]);
    }

    #[tokio::test]
    async fn test_task_fetch_failure_is_bad_gateway() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/task/abc");
                then.status(500);
            })
            .await;
        let sink = Arc::new(MemorySink::new());

        let (status, body) = post_event(
            state(&server, sink.clone()),
            json!({ "event": "taskUpdated", "task_id": "abc" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], 502);
        assert!(sink.batches().await.is_empty());
    }

    #[tokio::test]
    async fn test_project_fetch_failure_is_bad_gateway() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/list/l1");
                then.status(500).body("boom");
            })
            .await;
        let sink = Arc::new(MemorySink::new());

        let (status, body) = post_event(
            state(&server, sink.clone()),
            json!({ "event": "listCreated", "list_id": "l1" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("status 500"));
        assert!(sink.batches().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_id_is_bad_request() {
        let server = MockServer::start_async().await;
        let sink = Arc::new(MemorySink::new());

        let (status, _) = post_event(
            state(&server, sink),
            json!({ "event": "taskCreated" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unrelated_event_is_ignored() {
        let server = MockServer::start_async().await;
        let sink = Arc::new(MemorySink::new());

        let (status, _) = post_event(
            state(&server, sink.clone()),
            json!({ "event": "folderCreated", "folder_id": "f1" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(sink.batches().await.is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start_async().await;
        let response = build_router(state(&server, Arc::new(MemorySink::new())))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
