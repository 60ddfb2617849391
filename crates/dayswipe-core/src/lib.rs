//! dayswipe-core
//!
//! Swipe-triage session engine: one card per pending task, swipe right for
//! done and left for not done, remote update fired for "done" only.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, task, batch, decision, state, summary, errors）
//! - **gesture**: ドラッグ／ボタン入力の解釈（描画に依存しない純粋関数）
//! - **ports**: 抽象化レイヤー（TaskStore, DecisionRecorder, Clock, IdGenerator）
//! - **impls**: 実装（HttpTaskStore, InMemoryTaskStore, RemoteDecisionRecorder）
//! - **app**: セッションの駆動（TriageSession, SessionSnapshot）
//! - **config**: 環境変数からの設定読み込み

pub mod app;
pub mod config;
pub mod domain;
pub mod gesture;
pub mod impls;
pub mod ports;
