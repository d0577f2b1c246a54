//! 入力バリデーション
//!
//! 送信前のフォームチェックとファイルサイズ表記。
//! どちらも状態を持たない純粋関数。

use lazy_static::lazy_static;
use regex::Regex;

use crate::i18n::Msg;
use crate::types::{FormFields, InputMethod};

lazy_static! {
    static ref VERSION_PATTERN: Regex = Regex::new(r"^\d+\.\d+\.\d+\.\d+$").unwrap();
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const SIZE_BASE: f64 = 1024.0;

/// バリデーション結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    /// 最初に失敗したルール（None なら送信可能）
    pub error: Option<Msg>,
}

impl Validation {
    pub fn ok() -> Self {
        Self { error: None }
    }

    pub fn fail(msg: Msg) -> Self {
        Self { error: Some(msg) }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// バージョン番号が "45.8.0.32875" 形式（4つの数値をドット区切り）か判定
pub fn is_valid_version(version: &str) -> bool {
    VERSION_PATTERN.is_match(version)
}

/// フォーム入力を検証する
///
/// ルールは上から順に評価し、最初に失敗したものを返す。
/// 1. バージョン入力あり
/// 2. バージョン形式
/// 3. アーキテクチャ選択あり
/// 4. テキスト入力時: Stack内容あり
/// 5. ファイル入力時: ファイル選択あり
pub fn validate_fields(fields: &FormFields, method: InputMethod) -> Validation {
    let version = fields.version.trim();

    if version.is_empty() {
        return Validation::fail(Msg::VersionRequired);
    }
    if !is_valid_version(version) {
        return Validation::fail(Msg::VersionInvalid);
    }
    if fields.arch.is_none() {
        return Validation::fail(Msg::ArchRequired);
    }

    match method {
        InputMethod::Text if fields.stack_content.trim().is_empty() => {
            Validation::fail(Msg::StackRequired)
        }
        InputMethod::File if fields.file.is_none() => Validation::fail(Msg::FileRequired),
        _ => Validation::ok(),
    }
}

/// バイト数を "1.5 KB" のような表記に変換
///
/// 1024 を基数に Bytes/KB/MB/GB を選び、小数2桁で丸めて末尾の0は落とす。
/// GB を超えるサイズも GB で表記する。
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut index = 0;
    let mut value = bytes as f64;
    while value >= SIZE_BASE && index < SIZE_UNITS.len() - 1 {
        value /= SIZE_BASE;
        index += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Arch, SelectedFile};

    fn filled_fields() -> FormFields {
        FormFields {
            version: "45.8.0.32875".to_string(),
            arch: Some(Arch::Arm64),
            stack_content: "0 libsystem_kernel.dylib 0x1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_versions() {
        assert!(is_valid_version("45.8.0.32875"));
        assert!(is_valid_version("0.0.0.0"));
        assert!(is_valid_version("1.22.333.4444"));
    }

    #[test]
    fn test_invalid_versions() {
        assert!(!is_valid_version("45.8.0"));
        assert!(!is_valid_version("a.b.c.d"));
        assert!(!is_valid_version("45.8.0.32875.1"));
        assert!(!is_valid_version("45..0.1"));
        assert!(!is_valid_version("-1.2.3.4"));
        assert!(!is_valid_version(" 45.8.0.1"));
        assert!(!is_valid_version(""));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5 GB");
    }

    #[test]
    fn test_format_file_size_two_decimals() {
        // 1234 / 1024 = 1.205078...
        assert_eq!(format_file_size(1234), "1.21 KB");
    }

    #[test]
    fn test_format_file_size_beyond_gb() {
        assert_eq!(format_file_size(2 * 1024u64.pow(4)), "2048 GB");
    }

    #[test]
    fn test_validate_ok_text() {
        let result = validate_fields(&filled_fields(), InputMethod::Text);
        assert!(result.is_valid());
    }

    #[test]
    fn test_validate_rule_order() {
        let mut fields = FormFields::default();
        assert_eq!(
            validate_fields(&fields, InputMethod::Text).error,
            Some(Msg::VersionRequired)
        );

        fields.version = "45.8".to_string();
        assert_eq!(
            validate_fields(&fields, InputMethod::Text).error,
            Some(Msg::VersionInvalid)
        );

        fields.version = "  45.8.0.32875  ".to_string();
        assert_eq!(
            validate_fields(&fields, InputMethod::Text).error,
            Some(Msg::ArchRequired)
        );

        fields.arch = Some(Arch::X86);
        assert_eq!(
            validate_fields(&fields, InputMethod::Text).error,
            Some(Msg::StackRequired)
        );
        assert_eq!(
            validate_fields(&fields, InputMethod::File).error,
            Some(Msg::FileRequired)
        );
    }

    #[test]
    fn test_validate_whitespace_stack_is_empty() {
        let mut fields = filled_fields();
        fields.stack_content = " \n\t ".to_string();
        assert_eq!(
            validate_fields(&fields, InputMethod::Text).error,
            Some(Msg::StackRequired)
        );
    }

    #[test]
    fn test_validate_file_method() {
        let mut fields = filled_fields();
        fields.stack_content.clear();
        fields.file = Some(SelectedFile::new("crash.ips", 10));
        assert!(validate_fields(&fields, InputMethod::File).is_valid());
    }
}
