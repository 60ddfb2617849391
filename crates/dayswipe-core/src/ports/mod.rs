//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義します。
//! Triage セッションは外部システム（タスク API、時刻、ID 採番）に
//! この trait 経由でだけ触れます。

pub mod clock;
pub mod id_generator;
pub mod recorder;
pub mod task_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::recorder::{DecisionRecorder, NoopRecorder};
pub use self::task_store::TaskStore;
