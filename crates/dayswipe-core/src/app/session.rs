//! TriageSession - スワイプ判定セッションの駆動部
//!
//! # フロー
//! 1. View が drag / release / button を転送
//! 2. GestureInterpreter が commit / cancel を判定
//! 3. commit なら SessionState に Decision を追加し、DecisionRecorder へ
//!    fire-and-forget で通知
//! 4. advance delay（既定 300ms）後に次のカードへ、最後なら on_complete
//!
//! # 並行性
//! - 入力イベントは 1 つずつ処理（std Mutex、await を跨がない）
//! - 遅延後の advance は spawn したタイマーで行い、generation で保護する。
//!   dispose / drop されたセッションのタイマーは何もしない
//! - タイマーの runtime は start 時に捕まえる。入力は tokio の外の
//!   スレッドから来てもよい（runtime が無ければ OS スレッドで待つ）

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{Instrument, Span, debug, info, info_span};

use super::snapshot::{Progress, SessionSnapshot};
use crate::config::SessionConfig;
use crate::domain::{Advance, Decision, SessionId, SessionPhase, SessionState, TaskId, TriageBatch};
use crate::gesture::{DragFeedback, ExitDirection, GestureInterpreter, GestureOutcome};
use crate::ports::{DecisionRecorder, IdGenerator, SystemClock, UlidGenerator};

/// 完了時に 1 回だけ、全 Decision をバッチ順で受け取る
pub type CompletionCallback = Box<dyn FnOnce(Vec<Decision>) + Send + 'static>;

/// 入力イベント 1 件の処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// 判定を記録した。カードは `exit` 方向へ退場する
    Committed {
        task_id: TaskId,
        outcome: bool,
        exit: ExitDirection,
    },

    /// 閾値内でリリースされ、カードは元の位置に戻った
    Cancelled,

    /// 受け付けなかった（完了済み、dispose 済み、または commit 待ち）
    Ignored,
}

impl Submission {
    pub fn is_committed(&self) -> bool {
        matches!(self, Submission::Committed { .. })
    }
}

struct SessionInner {
    state: SessionState,
    offset: f64,
    exit: Option<ExitDirection>,
    generation: u64,
    disposed: bool,
    on_complete: Option<CompletionCallback>,
}

struct Shared {
    id: SessionId,
    batch: TriageBatch,
    interpreter: GestureInterpreter,
    advance_delay: Duration,
    runtime: Option<Handle>,
    recorder: Arc<dyn DecisionRecorder>,
    inner: Mutex<SessionInner>,
    snapshots: watch::Sender<SessionSnapshot>,
    span: Span,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot_of(&self, inner: &SessionInner) -> SessionSnapshot {
        let phase = inner.state.phase();
        let current_task = match phase {
            SessionPhase::Active { position } => self.batch.get(position).cloned(),
            SessionPhase::Complete => None,
        };
        SessionSnapshot {
            session_id: self.id,
            phase,
            progress: Progress::new(inner.state.position(), self.batch.len()),
            current_task,
            pending_outcome: inner.state.pending_outcome(),
            feedback: DragFeedback::at(inner.offset),
            exit: inner.exit,
        }
    }

    fn publish(&self, inner: &SessionInner) {
        self.snapshots.send_replace(self.snapshot_of(inner));
    }

    fn accepts_input(inner: &SessionInner) -> bool {
        !inner.disposed
            && !inner.state.phase().is_terminal()
            && inner.state.pending_outcome().is_none()
    }

    /// 遅延満了時の処理。古い generation は無視する
    fn advance(&self, generation: u64) {
        let _enter = self.span.enter();
        let completion = {
            let mut inner = self.lock();
            if inner.disposed || inner.generation != generation {
                debug!(generation, "stale advance ignored");
                return;
            }
            let Some(advance) = inner.state.advance() else {
                return;
            };
            inner.offset = 0.0;
            inner.exit = None;
            self.publish(&inner);

            match advance {
                Advance::Next { position } => {
                    debug!(position, "next card");
                    None
                }
                Advance::Complete(decisions) => {
                    let done = decisions.iter().filter(|d| d.outcome).count();
                    info!(decisions = decisions.len(), done, "session complete");
                    inner.on_complete.take().map(|cb| (cb, decisions))
                }
            }
        };

        if let Some((on_complete, decisions)) = completion {
            on_complete(decisions);
        }
    }
}

/// TriageSession のビルダー
pub struct SessionBuilder {
    recorder: Arc<dyn DecisionRecorder>,
    config: SessionConfig,
    id_generator: Box<dyn IdGenerator>,
    runtime: Option<Handle>,
}

impl SessionBuilder {
    pub fn new(recorder: Arc<dyn DecisionRecorder>) -> Self {
        Self {
            recorder,
            config: SessionConfig::default(),
            id_generator: Box::new(UlidGenerator::new(SystemClock)),
            runtime: None,
        }
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn advance_delay(mut self, delay: Duration) -> Self {
        self.config.advance_delay = delay;
        self
    }

    pub fn swipe_threshold(mut self, threshold: f64) -> Self {
        self.config.swipe_threshold = threshold;
        self
    }

    pub fn id_generator(mut self, id_generator: impl IdGenerator + 'static) -> Self {
        self.id_generator = Box::new(id_generator);
        self
    }

    /// advance タイマーを動かす runtime
    ///
    /// 省略時は `start` を呼んだ時点の runtime を使う。
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// セッションを開始する
    ///
    /// 空のバッチは即座に完了し、`on_complete(vec![])` はこの関数が
    /// 戻る前に呼ばれる。
    pub fn start<F>(self, batch: TriageBatch, on_complete: F) -> TriageSession
    where
        F: FnOnce(Vec<Decision>) + Send + 'static,
    {
        let id = self.id_generator.generate_session_id();
        let span = info_span!("triage_session", session_id = %id, tasks = batch.len());
        let state = SessionState::new(batch.len());
        let is_empty = batch.is_empty();

        let mut inner = SessionInner {
            state,
            offset: 0.0,
            exit: None,
            generation: 0,
            disposed: false,
            on_complete: None,
        };
        let on_complete: CompletionCallback = Box::new(on_complete);
        let immediate = if is_empty {
            Some(on_complete)
        } else {
            inner.on_complete = Some(on_complete);
            None
        };

        let (snapshots, _) = watch::channel(SessionSnapshot {
            session_id: id,
            phase: inner.state.phase(),
            progress: Progress::new(0, batch.len()),
            current_task: batch.get(0).cloned(),
            pending_outcome: None,
            feedback: DragFeedback::rest(),
            exit: None,
        });

        let shared = Arc::new(Shared {
            id,
            batch,
            interpreter: GestureInterpreter::new(self.config.swipe_threshold),
            advance_delay: self.config.advance_delay,
            runtime: self.runtime.or_else(|| Handle::try_current().ok()),
            recorder: self.recorder,
            inner: Mutex::new(inner),
            snapshots,
            span,
        });

        {
            let _enter = shared.span.enter();
            info!("session started");
            if let Some(on_complete) = immediate {
                info!("empty batch, session complete");
                on_complete(Vec::new());
            }
        }

        TriageSession { shared }
    }
}

/// 実行中のセッションへのハンドル
///
/// drop すると dispose される。保留中の advance は無効になり、
/// 完了コールバックは呼ばれない。
pub struct TriageSession {
    shared: Arc<Shared>,
}

impl TriageSession {
    pub fn builder(recorder: Arc<dyn DecisionRecorder>) -> SessionBuilder {
        SessionBuilder::new(recorder)
    }

    pub fn id(&self) -> SessionId {
        self.shared.id
    }

    pub fn batch(&self) -> &TriageBatch {
        &self.shared.batch
    }

    /// このセッションがリリース判定に使う interpreter
    pub fn interpreter(&self) -> GestureInterpreter {
        self.shared.interpreter
    }

    pub fn phase(&self) -> SessionPhase {
        self.shared.lock().state.phase()
    }

    pub fn position(&self) -> usize {
        self.shared.lock().state.position()
    }

    /// ここまでの Decision。完了後はコールバックに渡したので空
    pub fn decisions(&self) -> Vec<Decision> {
        self.shared.lock().state.decisions().to_vec()
    }

    pub fn pending_outcome(&self) -> Option<bool> {
        self.shared.lock().state.pending_outcome()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.snapshots.borrow().clone()
    }

    /// 表示が変わるたびに新しいスナップショットを受け取る
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.snapshots.subscribe()
    }

    /// ドラッグ中のサンプル
    ///
    /// 入力を受け付けていない（完了済み、dispose 済み、退場中）ときは `None`。
    pub fn drag(&self, offset: f64) -> Option<DragFeedback> {
        let mut inner = self.shared.lock();
        if !Shared::accepts_input(&inner) {
            return None;
        }
        let feedback = self.shared.interpreter.feedback(offset);
        inner.offset = feedback.offset;
        self.shared.publish(&inner);
        Some(feedback)
    }

    /// `offset` でリリース
    pub fn release(&self, offset: f64) -> Submission {
        match self.shared.interpreter.release(offset) {
            GestureOutcome::Commit { outcome, .. } => self.submit_decision(outcome),
            GestureOutcome::Cancel => self.cancel(offset),
        }
    }

    /// ボタン入力。閾値チェックなしで commit する
    pub fn press(&self, outcome: bool) -> Submission {
        match self.shared.interpreter.button(outcome) {
            GestureOutcome::Commit { outcome, .. } => self.submit_decision(outcome),
            GestureOutcome::Cancel => Submission::Ignored,
        }
    }

    /// 現在のカードに `outcome` を記録し、advance を予約する
    ///
    /// Active でない、またはこのカードの判定が保留中なら何もしない
    /// （`Submission::Ignored`）。
    pub fn submit_decision(&self, outcome: bool) -> Submission {
        let shared = &self.shared;
        let _enter = shared.span.enter();

        let (commit, generation) = {
            let mut inner = shared.lock();
            if inner.disposed {
                debug!(outcome, "submission on disposed session ignored");
                return Submission::Ignored;
            }
            let batch = &shared.batch;
            let Some(commit) = inner.state.commit(batch, outcome) else {
                debug!(outcome, "submission ignored");
                return Submission::Ignored;
            };
            let exit = ExitDirection::for_outcome(outcome);
            inner.exit = Some(exit);
            inner.offset = 0.0;
            shared.publish(&inner);
            (commit, inner.generation)
        };

        info!(
            task_id = %commit.task_id,
            outcome = commit.outcome,
            position = commit.position,
            "decision committed"
        );

        // Not awaited: the advance never waits on the network.
        shared.recorder.record(commit.task_id, commit.outcome);
        self.schedule_advance(generation);

        Submission::Committed {
            task_id: commit.task_id,
            outcome: commit.outcome,
            exit: ExitDirection::for_outcome(commit.outcome),
        }
    }

    /// セッションを破棄する。予約済みの advance は何もしなくなり、
    /// 完了コールバックは呼ばれずに捨てられる。
    pub fn dispose(&self) {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        inner.generation += 1;
        inner.on_complete = None;
        let _enter = self.shared.span.enter();
        debug!("session disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.lock().disposed
    }

    fn cancel(&self, offset: f64) -> Submission {
        let mut inner = self.shared.lock();
        if !Shared::accepts_input(&inner) {
            return Submission::Ignored;
        }
        inner.offset = 0.0;
        self.shared.publish(&inner);
        let _enter = self.shared.span.enter();
        debug!(offset, "gesture cancelled");
        Submission::Cancelled
    }

    fn schedule_advance(&self, generation: u64) {
        let delay = self.shared.advance_delay;
        if delay.is_zero() {
            self.shared.advance(generation);
            return;
        }

        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let runtime = self.shared.runtime.clone().or_else(|| Handle::try_current().ok());
        let Some(runtime) = runtime else {
            debug!("no async runtime, advance timer on a plain thread");
            std::thread::spawn(move || {
                std::thread::sleep(delay);
                if let Some(shared) = weak.upgrade() {
                    shared.advance(generation);
                }
            });
            return;
        };

        let span = self.shared.span.clone();
        runtime.spawn(
            async move {
                tokio::time::sleep(delay).await;
                if let Some(shared) = weak.upgrade() {
                    shared.advance(generation);
                }
            }
            .instrument(span),
        );
    }
}

impl Drop for TriageSession {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// 既定の設定でセッションを開始する
pub fn start_session<F>(
    batch: TriageBatch,
    recorder: Arc<dyn DecisionRecorder>,
    on_complete: F,
) -> TriageSession
where
    F: FnOnce(Vec<Decision>) + Send + 'static,
{
    SessionBuilder::new(recorder).start(batch, on_complete)
}
