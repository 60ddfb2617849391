//! HttpTaskStore - タスク API の HTTP クライアント
//!
//! - `GET   {base}/api/tasks/{userId}` -> `{"tasks": [...]}`
//! - `PATCH {base}/api/tasks/{id}`     -> `{"task": {...}}`
//!
//! タイムアウトはトランスポート層（reqwest の Client）に任せます。
//! セッション側では別途タイムアウトを持ちません。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::{StoreError, Task, TaskId, TaskPatch, UserId};
use crate::ports::TaskStore;

#[derive(Debug, Deserialize)]
struct TaskListResponse {
    tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
struct TaskResponse {
    task: Task,
}

pub struct HttpTaskStore {
    client: Client,
    base_url: String,
}

impl HttpTaskStore {
    /// `base_url` を起点とする API のクライアントを作る
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(StoreError::Config("empty base url".to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self, id: u64) -> String {
        format!("{}/api/tasks/{}", self.base_url, id)
    }

    async fn error_from(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        StoreError::Status { status, body }
    }
}

#[async_trait]
impl TaskStore for HttpTaskStore {
    async fn list_tasks(&self, user_id: UserId) -> Result<Vec<Task>, StoreError> {
        let response = self.client.get(self.tasks_url(user_id.get())).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let body: TaskListResponse = response.json().await?;
        Ok(body.tasks)
    }

    async fn update_task(&self, task_id: TaskId, patch: TaskPatch) -> Result<Task, StoreError> {
        let response = self
            .client
            .patch(self.tasks_url(task_id.get()))
            .json(&patch)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(task_id)),
            status if status.is_success() => {
                let body: TaskResponse = response.json().await?;
                Ok(body.task)
            }
            _ => Err(Self::error_from(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn task_json(id: u64, done: bool) -> serde_json::Value {
        json!({
            "id": id,
            "userId": 7,
            "title": format!("task {id}"),
            "done": done,
            "createdAt": "2026-10-19T08:00:00Z",
            "updatedAt": "2026-10-19T09:00:00Z"
        })
    }

    async fn store_for(server: &MockServer) -> HttpTaskStore {
        HttpTaskStore::new(server.uri(), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn patch_sends_done_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/tasks/1"))
            .and(body_json(json!({ "done": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "task": task_json(1, true) })))
            .expect(1)
            .mount(&server)
            .await;

        let task = store_for(&server)
            .await
            .update_task(TaskId::new(1), TaskPatch::done(true))
            .await
            .unwrap();
        assert!(task.done);
    }

    #[tokio::test]
    async fn list_unwraps_tasks_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks/7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "tasks": [task_json(1, false), task_json(2, true)] })),
            )
            .mount(&server)
            .await;

        let tasks = store_for(&server).await.list_tasks(UserId::new(7)).await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks[1].done);
    }

    #[tokio::test]
    async fn server_error_keeps_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/tasks/1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = store_for(&server)
            .await
            .update_task(TaskId::new(1), TaskPatch::done(true))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 500, ref body } if body == "boom"));
    }

    #[tokio::test]
    async fn missing_task_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/tasks/4"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = store_for(&server)
            .await
            .update_task(TaskId::new(4), TaskPatch::done(true))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks/7"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = store_for(&server).await.list_tasks(UserId::new(7)).await.unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let store = HttpTaskStore::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(store.tasks_url(3), "http://localhost:3000/api/tasks/3");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        assert!(matches!(
            HttpTaskStore::new("", Duration::from_secs(1)),
            Err(StoreError::Config(_))
        ));
    }
}
