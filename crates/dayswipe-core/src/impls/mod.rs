//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **HttpTaskStore**: タスク API の HTTP クライアント（本番用）
//! - **InMemoryTaskStore**: オフライン実行・テスト用
//! - **RemoteDecisionRecorder**: TaskStore を使う fire-and-forget recorder

pub mod http_store;
pub mod inmem_store;
pub mod remote_recorder;

pub use self::http_store::HttpTaskStore;
pub use self::inmem_store::{InMemoryTaskStore, InjectedFailure};
pub use self::remote_recorder::RemoteDecisionRecorder;
