//! 中国語/英語の表示テキスト
//!
//! 画面上の全ラベル・プレースホルダ・通知文言をここに集約する。
//! ホスト側は `Msg::text(lang)` で現在の言語の文字列を取り出す。

use crate::types::{Lang, OutputTab};

/// 出力エリアがプレースホルダ表示中かを判定するキーワード（両言語）
const PLACEHOLDER_KEYWORDS: [&str; 8] = [
    "等待开始符号化",
    "Waiting for symbolization",
    "暂无日志信息",
    "No log information",
    "Click",
    "点击",
    "Start Symbolization",
    "available",
];

/// 表示テキストのキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Msg {
    // ページ
    PageTitle,
    HeaderSubtitle,

    // フォーム
    VersionLabel,
    VersionPlaceholder,
    VersionHint,
    ArchLabel,
    ArchPlaceholder,
    NdiLabel,
    InputMethodLabel,
    InputText,
    InputFile,
    StackLabel,
    StackPlaceholder,
    UploadPrompt,
    UploadHint,
    RemoveFile,
    SubmitIdle,
    SubmitBusy,
    Clear,

    // 出力
    OutputTitle,
    TabResult,
    TabLogs,
    Copy,
    Download,
    EmptyResult,
    EmptyLogs,
    Processing,
    NoOutput,
    NoLogs,

    // バリデーション
    VersionRequired,
    VersionInvalid,
    ArchRequired,
    StackRequired,
    FileRequired,

    // 通知
    Completed,
    ProcessingFailed,
    UnknownError,
    NetworkError,
    Copied,
    CopyFailed,
    Downloaded,
    Cleared,
}

impl Msg {
    /// 指定言語の文字列
    pub fn text(self, lang: Lang) -> &'static str {
        let (zh, en) = self.pair();
        match lang {
            Lang::Zh => zh,
            Lang::En => en,
        }
    }

    fn pair(self) -> (&'static str, &'static str) {
        match self {
            Msg::PageTitle => ("MacCrash 自动符号化工具", "MacCrash Auto Symbolizer"),
            Msg::HeaderSubtitle => (
                "上传崩溃日志或粘贴堆栈，自动完成符号化",
                "Upload a crash log or paste a stack to symbolize it",
            ),

            Msg::VersionLabel => ("版本号", "Version"),
            Msg::VersionPlaceholder => ("例如: 45.8.0.32875", "e.g., 45.8.0.32875"),
            Msg::VersionHint => (
                "请输入有效的版本号格式，例如: 45.8.0.32875",
                "Please enter a valid version format, e.g., 45.8.0.32875",
            ),
            Msg::ArchLabel => ("架构", "Architecture"),
            Msg::ArchPlaceholder => ("请选择架构", "Select architecture"),
            Msg::NdiLabel => ("启用 NDI", "Enable NDI"),
            Msg::InputMethodLabel => ("输入方式", "Input method"),
            Msg::InputText => ("粘贴文本", "Paste text"),
            Msg::InputFile => ("上传文件", "Upload file"),
            Msg::StackLabel => ("Stack 内容", "Stack content"),
            Msg::StackPlaceholder => (
                "在此粘贴崩溃堆栈内容...",
                "Paste the crash stack content here...",
            ),
            Msg::UploadPrompt => (
                "拖拽崩溃文件到此处，或点击选择文件",
                "Drag a crash file here, or click to select",
            ),
            Msg::UploadHint => ("支持 .ips / .crash / .txt", "Supports .ips / .crash / .txt"),
            Msg::RemoveFile => ("移除文件", "Remove file"),
            Msg::SubmitIdle => ("开始符号化", "Start Symbolization"),
            Msg::SubmitBusy => ("处理中...", "Processing..."),
            Msg::Clear => ("清空", "Clear"),

            Msg::OutputTitle => ("输出", "Output"),
            Msg::TabResult => ("符号化结果", "Result"),
            Msg::TabLogs => ("处理日志", "Logs"),
            Msg::Copy => ("复制", "Copy"),
            Msg::Download => ("下载", "Download"),
            Msg::EmptyResult => (
                "等待开始符号化处理...\n点击\"开始符号化\"按钮来处理崩溃日志。",
                "Waiting for symbolization to start...\nClick \"Start Symbolization\" to process crash logs.",
            ),
            Msg::EmptyLogs => ("暂无日志信息...", "No log information available..."),
            Msg::Processing => ("正在处理，请稍候...", "Processing, please wait..."),
            Msg::NoOutput => (
                "符号化完成，但没有输出内容。",
                "Symbolization completed, but no output content.",
            ),
            Msg::NoLogs => ("没有日志信息。", "No log information."),

            Msg::VersionRequired => ("请输入版本号", "Please enter version number"),
            Msg::VersionInvalid => ("版本号格式不正确", "Invalid version format"),
            Msg::ArchRequired => ("请选择架构", "Please select architecture"),
            Msg::StackRequired => ("请输入Stack内容", "Please enter stack content"),
            Msg::FileRequired => ("请选择崩溃文件", "Please select crash file"),

            Msg::Completed => ("符号化处理完成！", "Symbolization completed!"),
            Msg::ProcessingFailed => ("处理失败", "Processing failed"),
            Msg::UnknownError => ("未知错误", "Unknown error"),
            Msg::NetworkError => ("网络错误", "Network error"),
            Msg::Copied => ("已复制到剪贴板", "Copied to clipboard"),
            Msg::CopyFailed => ("复制失败，请手动复制", "Copy failed, please copy manually"),
            Msg::Downloaded => ("文件已下载", "File downloaded"),
            Msg::Cleared => ("结果已清空", "Results cleared"),
        }
    }

    /// 出力エリアの空表示テキスト
    pub fn empty_pane(tab: OutputTab) -> Msg {
        match tab {
            OutputTab::Result => Msg::EmptyResult,
            OutputTab::Logs => Msg::EmptyLogs,
        }
    }

    pub fn tab_label(tab: OutputTab) -> Msg {
        match tab {
            OutputTab::Result => Msg::TabResult,
            OutputTab::Logs => Msg::TabLogs,
        }
    }
}

/// "处理失败:\n<error>" 形式の結果エリア表示
pub fn failure_text(lang: Lang, error: Option<&str>) -> String {
    format!(
        "{}:\n{}",
        Msg::ProcessingFailed.text(lang),
        error.unwrap_or(Msg::UnknownError.text(lang))
    )
}

/// "处理失败: <error>" 形式の通知文言
pub fn failure_notice(lang: Lang, error: Option<&str>) -> String {
    format!(
        "{}: {}",
        Msg::ProcessingFailed.text(lang),
        error.unwrap_or(Msg::UnknownError.text(lang))
    )
}

/// "网络错误: <message>"
pub fn network_error_text(lang: Lang, message: &str) -> String {
    format!("{}: {}", Msg::NetworkError.text(lang), message)
}

/// "文件已下载: <file_name>"
pub fn downloaded_notice(lang: Lang, file_name: &str) -> String {
    format!("{}: {}", Msg::Downloaded.text(lang), file_name)
}

/// プレースホルダ用キーワードを含むか
///
/// 結果本文にキーワード（例: "Click"）が含まれていても true になる。
pub fn is_placeholder_text(text: &str) -> bool {
    PLACEHOLDER_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

/// 出力エリアが空またはプレースホルダ表示中か
pub fn is_empty_or_placeholder(text: &str, tab: OutputTab) -> bool {
    let current = text.trim();
    if current.is_empty() || is_placeholder_text(current) {
        return true;
    }
    let empty = Msg::empty_pane(tab);
    Lang::ALL.iter().any(|lang| current == empty.text(*lang))
}
