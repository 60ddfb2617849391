//! App - セッションの駆動
//!
//! domain の純粋な状態機械と ports（DecisionRecorder）を組み合わせ、
//! 時間（advance delay）と並行性を扱います。
//!
//! # 主要コンポーネント
//! - **TriageSession**: 入力を受けて判定を記録し、カードを進めるハンドル
//! - **SessionBuilder**: 設定・ID 生成器・recorder のワイヤリング
//! - **SessionSnapshot**: ビューに渡す読み取り専用の状態

pub mod session;
pub mod snapshot;

pub use self::session::{
    CompletionCallback, SessionBuilder, Submission, TriageSession, start_session,
};
pub use self::snapshot::{Progress, SessionSnapshot};
