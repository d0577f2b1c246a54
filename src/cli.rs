use clap::{Args, Parser, Subcommand};
use crash_symbolizer_common::{Arch, Lang};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "symbolize")]
#[command(about = "MacCrash crash log symbolizer client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドURL（設定ファイルより優先）
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// クラッシュログを送信してシンボル化
    Submit(SubmitArgs),

    /// サーバー側の処理ログを表示
    Logs,

    /// サーバー側の処理ログを消去
    ClearLogs,

    /// 設定の表示・変更
    Config {
        /// 表示言語を設定 (zh/en)
        #[arg(long)]
        set_lang: Option<Lang>,

        /// バックエンドURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// タイムアウト秒数を設定（0で無制限）
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    /// アプリのバージョン（例: 45.8.0.32875）
    #[arg(long)]
    pub version: String,

    /// アーキテクチャ (arm64/x86)
    #[arg(short, long)]
    pub arch: Arch,

    /// NDI 版のクラッシュ
    #[arg(long)]
    pub ndi: bool,

    /// クラッシュスタックのテキストファイル（`-` で標準入力）
    #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
    pub stack: Option<PathBuf>,

    /// クラッシュファイル（.ips/.crash/.txt/.log）をそのまま送る
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// 結果をファイルに保存
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 処理ログをファイルに保存
    #[arg(long)]
    pub save_logs: Option<PathBuf>,
}
