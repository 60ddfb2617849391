//! Errors - エラー型と分類
//!
//! Triage の流れ自体はエラーを呼び出し元に返しません。
//! ここの型はリモートストア・設定・入力検証の境界でだけ使います。

use thiserror::Error;

use super::ids::TaskId;

/// ErrorKind は運用上の分類（ログのフィールドに載せる）
///
/// - Transient: 一時的（タイムアウト、5xx、接続断）
/// - Permanent: 恒久的（4xx、デコード不能）
/// - Infrastructure: クライアント側の構成・ランタイムの問題
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transient,
    Permanent,
    Infrastructure,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Transient => "transient",
            ErrorKind::Permanent => "permanent",
            ErrorKind::Infrastructure => "infrastructure",
        }
    }
}

/// タスクデータの検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task title must not be empty")]
    EmptyTitle,
}

/// `TaskStore` 実装のエラー
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("{0} not found")]
    NotFound(TaskId),

    #[error("invalid store configuration: {0}")]
    Config(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Transport(_) | StoreError::Timeout(_) => ErrorKind::Transient,
            StoreError::Status { status, .. } if *status >= 500 || *status == 429 => {
                ErrorKind::Transient
            }
            StoreError::Status { .. } | StoreError::Decode(_) | StoreError::NotFound(_) => {
                ErrorKind::Permanent
            }
            StoreError::Config(_) => ErrorKind::Infrastructure,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            StoreError::Timeout(e.to_string())
        } else if e.is_decode() {
            StoreError::Decode(e.to_string())
        } else if e.is_builder() {
            StoreError::Config(e.to_string())
        } else {
            StoreError::Transport(e.to_string())
        }
    }
}

/// `TriageConfig` 読み込み時のエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}
