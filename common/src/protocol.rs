//! バックエンドとの通信データ
//!
//! - `POST /symbolize` (multipart) → `SymbolizeResponse`
//! - `GET /logs` → `LogsResponse`
//! - `POST /clear-logs` → `ClearLogsResponse`

use serde::{Deserialize, Serialize};

use crate::types::{Arch, SelectedFile};

pub const SYMBOLIZE_PATH: &str = "/symbolize";
pub const LOGS_PATH: &str = "/logs";
pub const CLEAR_LOGS_PATH: &str = "/clear-logs";

pub const FIELD_VERSION: &str = "version";
pub const FIELD_ARCH: &str = "arch";
pub const FIELD_NDI: &str = "isNDI";
pub const FIELD_STACK_CONTENT: &str = "stack_content";
pub const FIELD_CRASH_FILE: &str = "crash_file";

/// 送信するクラッシュ情報（どちらか一方のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrashPayload {
    Stack(String),
    File(SelectedFile),
}

/// `/symbolize` へ送るフォーム内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolizeRequest {
    pub version: String,
    pub arch: Arch,
    pub ndi: bool,
    pub payload: CrashPayload,
}

impl SymbolizeRequest {
    /// multipart のテキストフィールド一覧
    ///
    /// ファイル本体は含まない。`crash_file` はホスト側のトランスポートが
    /// `file()` のメタデータを元に添付する。
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            (FIELD_VERSION, self.version.clone()),
            (FIELD_ARCH, self.arch.as_str().to_string()),
        ];
        if self.ndi {
            fields.push((FIELD_NDI, "true".to_string()));
        }
        if let CrashPayload::Stack(stack) = &self.payload {
            fields.push((FIELD_STACK_CONTENT, stack.clone()));
        }
        fields
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        match &self.payload {
            CrashPayload::File(file) => Some(file),
            CrashPayload::Stack(_) => None,
        }
    }
}

/// `/symbolize` のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolizeResponse {
    /// エラー時に `{"detail": ...}` だけが返る場合は false 扱い
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub logs: Option<Vec<String>>,
}

impl SymbolizeResponse {
    pub fn success(output: impl Into<String>, logs: Vec<String>) -> Self {
        Self {
            success: true,
            output: Some(output.into()),
            error: None,
            logs: Some(logs),
        }
    }

    pub fn failure(error: impl Into<String>, logs: Vec<String>) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(error.into()),
            logs: Some(logs),
        }
    }
}

/// `/logs` のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Option<Vec<String>>,
}

impl LogsResponse {
    /// 空でないログを改行で連結（空なら None）
    pub fn joined(&self) -> Option<String> {
        join_logs(self.logs.as_deref())
    }
}

/// `/clear-logs` のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearLogsResponse {
    #[serde(default)]
    pub message: String,
}

pub(crate) fn join_logs(logs: Option<&[String]>) -> Option<String> {
    match logs {
        Some(lines) if !lines.is_empty() => Some(lines.join("\n")),
        _ => None,
    }
}
