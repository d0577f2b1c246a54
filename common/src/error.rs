//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown architecture: {0}")]
    UnknownArch(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
