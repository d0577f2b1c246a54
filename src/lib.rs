//! MacCrash 自動シンボル化ツール（ターミナルクライアント）
//!
//! Web 版と同じ `FormController` を reqwest + tokio で動かす。

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod transport;
