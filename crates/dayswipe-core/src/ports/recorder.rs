//! DecisionRecorder port - 判定結果のリモート反映
//!
//! `record` は fire-and-forget です。セッションの遷移はこの呼び出しの
//! 完了を待ちません。

use crate::domain::TaskId;

/// DecisionRecorder は判定 1 件をベストエフォートで永続化
///
/// 実装は即座に戻り、panic も失敗の報告もしてはならない。
/// ここで何が起きてもセッションはローカルに判定を記録する。
pub trait DecisionRecorder: Send + Sync {
    fn record(&self, task_id: TaskId, outcome: bool);
}

/// 何も永続化しない recorder（プレビュー・dry run 用）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

impl DecisionRecorder for NoopRecorder {
    fn record(&self, _task_id: TaskId, _outcome: bool) {}
}
