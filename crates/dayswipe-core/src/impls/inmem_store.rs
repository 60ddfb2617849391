//! InMemoryTaskStore - オフライン実行・テスト用のタスクストア
//!
//! # 実装詳細
//! - tokio の Mutex で `Vec<Task>` を保護（ロックを跨いで await しない）
//! - update 呼び出しはすべて記録する（失敗した呼び出しも含む）
//! - 失敗注入・遅延注入でネットワーク障害を再現できる

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{StoreError, Task, TaskId, TaskPatch, UserId};
use crate::ports::{Clock, SystemClock, TaskStore};

/// `update_task` に注入する失敗
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedFailure {
    /// この HTTP ステータス相当で応答する
    Status(u16),
    /// 接続断のように振る舞う
    Transport,
}

impl InjectedFailure {
    fn to_error(self) -> StoreError {
        match self {
            InjectedFailure::Status(status) => StoreError::Status {
                status,
                body: "injected failure".to_string(),
            },
            InjectedFailure::Transport => StoreError::Transport("injected failure".to_string()),
        }
    }
}

#[derive(Default)]
struct InMemoryState {
    tasks: Vec<Task>,
    update_calls: Vec<(TaskId, TaskPatch)>,
    failure: Option<InjectedFailure>,
    latency: Option<Duration>,
}

pub struct InMemoryTaskStore {
    state: Arc<Mutex<InMemoryState>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            state: Arc::new(Mutex::new(InMemoryState {
                tasks,
                ..InMemoryState::default()
            })),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// 以降の `update_task` をすべて失敗させる
    pub async fn fail_updates(&self, failure: InjectedFailure) {
        self.state.lock().await.failure = Some(failure);
    }

    /// 以降の `update_task` をすべて遅延させる
    pub async fn set_latency(&self, latency: Duration) {
        self.state.lock().await.latency = Some(latency);
    }

    /// これまでの `update_task` 呼び出し（到着順）
    pub async fn update_calls(&self) -> Vec<(TaskId, TaskPatch)> {
        self.state.lock().await.update_calls.clone()
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.state.lock().await.tasks.clone()
    }

    pub async fn get(&self, task_id: TaskId) -> Option<Task> {
        self.state
            .lock()
            .await
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list_tasks(&self, user_id: UserId) -> Result<Vec<Task>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .tasks
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_task(&self, task_id: TaskId, patch: TaskPatch) -> Result<Task, StoreError> {
        let latency = {
            let mut state = self.state.lock().await;
            state.update_calls.push((task_id, patch.clone()));
            state.latency
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let now = self.clock.now();
        let mut state = self.state.lock().await;
        if let Some(failure) = state.failure {
            return Err(failure.to_error());
        }
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(StoreError::NotFound(task_id))?;
        *task = task.patched(&patch, now);
        Ok(task.clone())
    }
}
