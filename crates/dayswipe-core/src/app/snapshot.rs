//! Snapshot - ビュー向けのセッション状態
//!
//! SessionView はこのスナップショットだけを見て描画します。
//! 値はすべて現在のオフセットと状態から計算される純粋な値です。

use crate::domain::{SessionId, SessionPhase, Task};
use crate::gesture::{DragFeedback, ExitDirection};

/// 進捗表示。`total` 枚中 `current` 枚目（1 始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(position: usize, total: usize) -> Self {
        Self {
            current: (position + 1).min(total),
            total,
        }
    }

    /// プログレスバーの幅（0-100）
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.current as f64 / self.total as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub phase: SessionPhase,
    pub progress: Progress,

    /// 表示中のカード。完了後は `None`
    pub current_task: Option<Task>,

    /// 退場アニメーション中のカードに対して受け付けた判定
    pub pending_outcome: Option<bool>,

    /// 現在のドラッグ変形（操作していなければ静止位置）
    pub feedback: DragFeedback,

    /// commit したカードが退場している間だけ Some
    pub exit: Option<ExitDirection>,
}

impl SessionSnapshot {
    pub fn is_complete(&self) -> bool {
        self.phase.is_terminal()
    }

    /// 退場アニメーションの目標 x オフセット
    pub fn exit_offset(&self) -> Option<f64> {
        self.exit.map(ExitDirection::exit_offset)
    }

    /// いま View がジェスチャーを転送してよいか
    pub fn accepts_input(&self) -> bool {
        !self.is_complete() && self.pending_outcome.is_none()
    }
}
