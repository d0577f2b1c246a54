//! フォーム状態の型定義
//!
//! Web(WASM)とターミナルクライアントで共有される型:
//! - Lang / Arch: 言語設定とアーキテクチャ
//! - InputMethod / OutputTab: 入力方式と出力タブ
//! - SelectedFile / FormFields: フォーム入力値
//! - Notification: 通知バナー

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::validation::format_file_size;

/// 表示言語
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Zh,
    En,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Zh, Lang::En];

    /// 保存・属性キー用のコード（"zh" / "en"）
    pub fn code(self) -> &'static str {
        match self {
            Lang::Zh => "zh",
            Lang::En => "en",
        }
    }

    /// `<html lang>` に設定する値
    pub fn html_lang(self) -> &'static str {
        match self {
            Lang::Zh => "zh-CN",
            Lang::En => "en",
        }
    }

    /// 言語メニューの表示名
    pub fn display_name(self) -> &'static str {
        match self {
            Lang::Zh => "中文",
            Lang::En => "English",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Lang::Zh => "🇨🇳",
            Lang::En => "🇺🇸",
        }
    }

    /// 保存値から復元（不明な値は既定の中国語）
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for Lang {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "zh" => Ok(Lang::Zh),
            "en" => Ok(Lang::En),
            other => Err(Error::UnknownLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// 対象アーキテクチャ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    Arm64,
    X86,
}

impl Arch {
    pub const ALL: [Arch; 2] = [Arch::Arm64, Arch::X86];

    /// フォーム送信値
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Arm64 => "arm64",
            Arch::X86 => "x86",
        }
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "arm64" => Ok(Arch::Arm64),
            "x86" | "x86_64" => Ok(Arch::X86),
            other => Err(Error::UnknownArch(other.to_string())),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// クラッシュ情報の入力方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMethod {
    #[default]
    Text,
    File,
}

impl InputMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            InputMethod::Text => "text",
            InputMethod::File => "file",
        }
    }
}

impl FromStr for InputMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(InputMethod::Text),
            "file" => Ok(InputMethod::File),
            other => Err(Error::Config(format!("unknown input method: {}", other))),
        }
    }
}

/// 出力エリアのタブ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputTab {
    #[default]
    Result,
    Logs,
}

impl OutputTab {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputTab::Result => "result",
            OutputTab::Logs => "logs",
        }
    }

    /// ダウンロード時のファイル名
    pub fn download_file_name(self) -> &'static str {
        match self {
            OutputTab::Result => "symbolize_result.txt",
            OutputTab::Logs => "symbolize_logs.txt",
        }
    }
}

/// 選択されたクラッシュファイルのメタデータ
///
/// 実体（ブラウザの `File` やローカルパス）は各ホスト側が保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// "crash.ips (1.5 KB)" 形式の表示ラベル
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, format_file_size(self.size))
    }
}

/// フォーム入力値
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub version: String,
    pub arch: Option<Arch>,
    pub stack_content: String,
    pub file: Option<SelectedFile>,
    /// NDIモード（バックエンドの `isNDI`）
    pub ndi: bool,
}

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            NoticeKind::Success => "octicon octicon-check",
            NoticeKind::Error => "octicon octicon-alert",
            NoticeKind::Info => "octicon octicon-info",
        }
    }
}

/// 通知バナー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}
