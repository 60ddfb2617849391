//! Gesture - ドラッグ／ボタン入力の解釈
//!
//! 純粋関数だけで構成し、描画ツールキットには依存しません。
//! - **feedback**: オフセット → 回転・不透明度（表示専用）
//! - **interpreter**: リリース位置 → commit / cancel
//! - **drag**: 1 回のドラッグのサンプル列を追跡

pub mod drag;
pub mod feedback;
pub mod interpreter;

pub use self::drag::DragGesture;
pub use self::feedback::{DragFeedback, interpolate};
pub use self::interpreter::{
    DEFAULT_SWIPE_THRESHOLD, EXIT_OFFSET, ExitDirection, GestureInterpreter, GestureOutcome,
};
