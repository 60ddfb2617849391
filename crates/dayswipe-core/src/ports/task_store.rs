//! TaskStore port - リモートのタスク API（正本）
//!
//! Triage エンジンから見たストアは小さな CRUD インターフェースだけです。
//! スキーマや永続化の詳細はサーバー側の関心事なので、ここでは扱いません。
//!
//! # 実装
//! - **HttpTaskStore**: `reqwest` による本番用
//! - **InMemoryTaskStore**: オフライン実行・テスト用

use async_trait::async_trait;

use crate::domain::{StoreError, Task, TaskId, TaskPatch, UserId};

/// リモートのタスクストア
///
/// # 設計原則
/// - last-write-wins: クライアント側ではロックしない
/// - 呼び出しは高々 1 回（リトライは呼び出し側の方針でも行わない）
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// `user_id` のタスクすべて（サーバーの順序のまま）
    async fn list_tasks(&self, user_id: UserId) -> Result<Vec<Task>, StoreError>;

    /// 部分更新を適用し、保存後のタスクを返す
    async fn update_task(&self, task_id: TaskId, patch: TaskPatch) -> Result<Task, StoreError>;
}
