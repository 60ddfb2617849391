//! RemoteDecisionRecorder - 判定結果をタスクストアへ fire-and-forget で送る
//!
//! # 方針
//! - `true`（done）だけ `PATCH {done: true}` を 1 回だけ送る
//! - `false`（not done）はリモートに何も送らない（サーバー側の既定値が not done）
//! - 失敗はログに残して捨てる。リトライしない
//! - 送信は tokio タスクとして spawn し、呼び出し元は待たない
//! - spawn 先の runtime は生成時に捕まえる。`record` は tokio の外の
//!   スレッド（UI スレッドなど）から呼ばれてもよい

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::runtime::Handle;
use tokio::sync::Notify;
use tracing::{debug, warn};

use crate::domain::{TaskId, TaskPatch};
use crate::ports::{DecisionRecorder, TaskStore};

/// spawn した更新の数。終了時の drain で待つために数える
#[derive(Default)]
struct InFlight {
    count: AtomicUsize,
    idle: Notify,
}

impl InFlight {
    fn start(&self) {
        self.count.fetch_add(1, Ordering::AcqRel);
    }

    fn finish(&self) {
        if self.count.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.idle.notify_waiters();
        }
    }
}

/// 更新タスクが abort されてもカウントを減らす
struct InFlightGuard(Arc<InFlight>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.finish();
    }
}

pub struct RemoteDecisionRecorder {
    store: Arc<dyn TaskStore>,
    runtime: Option<Handle>,
    in_flight: Arc<InFlight>,
}

impl RemoteDecisionRecorder {
    /// 現在の tokio runtime（あれば）を送信先として捕まえる
    ///
    /// runtime の外で生成した場合は `record` 時点の runtime を探す。
    /// それも無ければ更新は捨てられる。
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self {
            store,
            runtime: Handle::try_current().ok(),
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// 指定した runtime 上で更新を送る
    pub fn with_runtime(store: Arc<dyn TaskStore>, runtime: Handle) -> Self {
        Self {
            store,
            runtime: Some(runtime),
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// 送信済みでまだ終わっていない更新の数
    pub fn in_flight(&self) -> usize {
        self.in_flight.count.load(Ordering::Acquire)
    }

    /// 送信済みの更新がすべて終わる（成功・失敗を問わず）まで待つ
    ///
    /// セッションからは呼ばない。プロセス終了時用。
    pub async fn drain(&self) {
        loop {
            let idle = self.in_flight.idle.notified();
            if self.in_flight() == 0 {
                return;
            }
            idle.await;
        }
    }
}

impl DecisionRecorder for RemoteDecisionRecorder {
    fn record(&self, task_id: TaskId, outcome: bool) {
        if !outcome {
            debug!(%task_id, "not-done decision kept local");
            return;
        }

        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            warn!(%task_id, "no async runtime, remote update dropped");
            return;
        };

        let store = Arc::clone(&self.store);
        self.in_flight.start();
        let guard = InFlightGuard(Arc::clone(&self.in_flight));

        runtime.spawn(async move {
            let _guard = guard;
            match store.update_task(task_id, TaskPatch::done(true)).await {
                Ok(_) => debug!(%task_id, "task marked done remotely"),
                Err(e) => warn!(
                    %task_id,
                    error = %e,
                    kind = e.kind().as_str(),
                    "failed to mark task done remotely"
                ),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Task, TaskTitle, UserId};
    use crate::impls::{InMemoryTaskStore, InjectedFailure};
    use chrono::Utc;
    use std::time::Duration;

    fn store_with(ids: &[u64]) -> Arc<InMemoryTaskStore> {
        let now = Utc::now();
        Arc::new(InMemoryTaskStore::with_tasks(
            ids.iter()
                .map(|&id| {
                    Task::new(
                        TaskId::new(id),
                        UserId::new(1),
                        TaskTitle::new("t").unwrap(),
                        now,
                    )
                })
                .collect(),
        ))
    }

    #[tokio::test]
    async fn done_issues_exactly_one_patch() {
        let store = store_with(&[1]);
        let recorder = RemoteDecisionRecorder::new(store.clone());

        recorder.record(TaskId::new(1), true);
        recorder.drain().await;

        assert_eq!(
            store.update_calls().await,
            vec![(TaskId::new(1), TaskPatch::done(true))]
        );
        assert!(store.get(TaskId::new(1)).await.unwrap().done);
    }

    #[tokio::test]
    async fn not_done_issues_nothing() {
        let store = store_with(&[1]);
        let recorder = RemoteDecisionRecorder::new(store.clone());

        recorder.record(TaskId::new(1), false);
        assert_eq!(recorder.in_flight(), 0);
        recorder.drain().await;

        assert!(store.update_calls().await.is_empty());
    }

    #[tokio::test]
    async fn failures_are_swallowed_without_retry() {
        let store = store_with(&[1]);
        store.fail_updates(InjectedFailure::Transport).await;
        let recorder = RemoteDecisionRecorder::new(store.clone());

        recorder.record(TaskId::new(1), true);
        recorder.drain().await;

        assert_eq!(store.update_calls().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn record_returns_before_the_update_finishes() {
        let store = store_with(&[1, 2]);
        store.set_latency(Duration::from_secs(5)).await;
        let recorder = RemoteDecisionRecorder::new(store.clone());

        recorder.record(TaskId::new(1), true);
        recorder.record(TaskId::new(2), true);
        assert_eq!(recorder.in_flight(), 2);

        recorder.drain().await;
        assert_eq!(recorder.in_flight(), 0);
        assert_eq!(store.update_calls().await.len(), 2);
    }

    #[test]
    fn record_from_a_thread_outside_the_runtime_still_sends() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let store = store_with(&[1]);
        let recorder =
            RemoteDecisionRecorder::with_runtime(store.clone(), runtime.handle().clone());

        let recorder = Arc::new(recorder);
        let sender = Arc::clone(&recorder);
        std::thread::spawn(move || sender.record(TaskId::new(1), true))
            .join()
            .unwrap();
        runtime.block_on(recorder.drain());

        let calls = runtime.block_on(store.update_calls());
        assert_eq!(calls, vec![(TaskId::new(1), TaskPatch::done(true))]);
    }

    #[test]
    fn new_captures_the_runtime_it_was_created_in() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let store = store_with(&[1]);
        let recorder = runtime.block_on(async { RemoteDecisionRecorder::new(store.clone()) });

        recorder.record(TaskId::new(1), true);
        runtime.block_on(recorder.drain());

        assert_eq!(runtime.block_on(store.update_calls()).len(), 1);
    }

    #[test]
    fn without_any_runtime_the_update_is_dropped() {
        let store = store_with(&[1]);
        let recorder = RemoteDecisionRecorder::new(store);
        recorder.record(TaskId::new(1), true);
        assert_eq!(recorder.in_flight(), 0);
    }
}
