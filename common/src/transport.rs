//! 通信・タイマーの抽象
//!
//! ブラウザでは fetch + gloo タイマー、ターミナルでは reqwest + tokio を
//! それぞれのクレートで実装する。WASM の Future は Send でないため
//! `async_trait(?Send)` で定義する。

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::protocol::{ClearLogsResponse, LogsResponse, SymbolizeRequest, SymbolizeResponse};

/// 通信エラー
///
/// Display は「网络错误: 」の後ろにそのまま表示される。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// 接続失敗・送信失敗
    #[error("{0}")]
    Network(String),

    /// レスポンスが JSON として読めない
    #[error("{0}")]
    Decode(String),

    /// 送信内容を組み立てられない（ファイル読込失敗など）
    #[error("{0}")]
    Input(String),
}

/// バックエンドへの HTTP 呼び出し
#[async_trait(?Send)]
pub trait Transport {
    /// `POST /symbolize`
    async fn symbolize(&self, request: &SymbolizeRequest)
        -> Result<SymbolizeResponse, TransportError>;

    /// `GET /logs`
    async fn fetch_logs(&self) -> Result<LogsResponse, TransportError>;

    /// `POST /clear-logs`
    async fn clear_logs(&self) -> Result<ClearLogsResponse, TransportError> {
        Err(TransportError::Network("clear-logs is not supported".to_string()))
    }
}

/// 非同期スリープ
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_message() {
        assert_eq!(
            TransportError::Network("Failed to fetch".into()).to_string(),
            "Failed to fetch"
        );
        assert_eq!(
            TransportError::Decode("expected value at line 1 column 1".into()).to_string(),
            "expected value at line 1 column 1"
        );
    }
}
