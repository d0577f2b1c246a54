//! サブコマンドの実行
//!
//! `submit` は送信とログポーリングを1つのタスクで `tokio::select!` し、
//! 新しく届いたログ行をその都度標準エラーへ流す。
//! ポーリング中も送信側の future は止めない。

use std::cell::RefCell;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use crash_symbolizer_common::i18n::is_empty_or_placeholder;
use crash_symbolizer_common::{
    poll_logs_once, submit, FormController, InputMethod, LanguageStore, Msg, NoticeKind,
    Notification, OutputTab, SelectedFile, SubmitOutcome, Transport, POLL_INTERVAL,
};
use log::debug;
use tokio::io::AsyncReadExt;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::cli::SubmitArgs;
use crate::error::{Result, SymbolizerError};
use crate::transport::{HttpTransport, TokioTimer};

/// 送信前のフォームを組み立てる
///
/// 入力不備は最初のエラーメッセージ（表示言語）で返す。
pub async fn prepare_form(
    args: &SubmitArgs,
    store: &impl LanguageStore,
) -> Result<FormController> {
    let mut controller = FormController::from_store(store);
    controller.set_version(args.version.clone());
    controller.set_arch(Some(args.arch));
    controller.set_ndi(args.ndi);

    match (&args.file, &args.stack) {
        (Some(path), _) => {
            controller.switch_input_method(InputMethod::File);
            controller.select_file(selected_file(path).await?);
        }
        (None, Some(path)) => {
            controller.set_stack_content(read_stack(path).await?);
        }
        (None, None) => {}
    }

    if let Some(msg) = controller.validate().error {
        return Err(SymbolizerError::InvalidInput(controller.text(msg).to_string()));
    }
    Ok(controller)
}

async fn selected_file(path: &Path) -> Result<SelectedFile> {
    let meta = tokio::fs::metadata(path)
        .await
        .map_err(|_| SymbolizerError::FileNotFound(path.display().to_string()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SelectedFile::new(name, meta.len()))
}

async fn read_stack(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        tokio::io::stdin().read_to_string(&mut content).await?;
        return Ok(content);
    }
    tokio::fs::read_to_string(path)
        .await
        .map_err(|_| SymbolizerError::FileNotFound(path.display().to_string()))
}

/// 送信してポーリングしながら完了を待つ
pub async fn run_submit(
    controller: FormController,
    transport: &impl Transport,
) -> (FormController, SubmitOutcome) {
    let cell = RefCell::new(controller);
    let mut printed = 0usize;

    let timer = TokioTimer;

    let outcome = {
        let submission = submit(&cell, transport, &timer);
        tokio::pin!(submission);

        let mut ticker = interval_at(Instant::now() + POLL_INTERVAL, POLL_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // 実行中の `/logs` 取得（同時に1本まで）
        let mut polling: Option<Pin<Box<dyn Future<Output = bool> + '_>>> = None;

        loop {
            tokio::select! {
                outcome = &mut submission => break outcome,
                updated = async {
                    match polling.as_mut() {
                        Some(poll) => poll.await,
                        None => std::future::pending::<bool>().await,
                    }
                }, if polling.is_some() => {
                    polling = None;
                    if updated {
                        print_log_lines(&unprinted_log_lines(&cell.borrow(), &mut printed));
                    }
                }
                _ = ticker.tick() => {
                    if polling.is_none() {
                        polling = Some(Box::pin(poll_logs_once(&cell, transport)));
                    } else {
                        debug!("previous log poll still running, skipping tick");
                    }
                }
            }
        }
    };

    let controller = cell.into_inner();
    print_log_lines(&final_log_lines(&controller, outcome, &mut printed));
    (controller, outcome)
}

/// ログペインのうちまだ表示していない行
fn unprinted_log_lines<'a>(controller: &'a FormController, printed: &mut usize) -> Vec<&'a str> {
    let logs = controller.logs_text();
    if is_empty_or_placeholder(logs, OutputTab::Logs) {
        return Vec::new();
    }
    let lines: Vec<&str> = logs.lines().collect();
    // サーバー側でログが消去された
    if lines.len() < *printed {
        *printed = 0;
    }
    let fresh = lines[*printed..].to_vec();
    *printed = lines.len();
    fresh
}

/// 送信完了後の残りのログ行
///
/// 通信エラー時のログペインはエラー文言なので通知側にだけ出す。
fn final_log_lines<'a>(
    controller: &'a FormController,
    outcome: SubmitOutcome,
    printed: &mut usize,
) -> Vec<&'a str> {
    if outcome == SubmitOutcome::TransportFailed {
        return Vec::new();
    }
    unprinted_log_lines(controller, printed)
}

fn print_log_lines(lines: &[&str]) {
    for line in lines {
        eprintln!("  {}", line);
    }
}

/// `submit` サブコマンド
pub async fn submit_command(
    args: &SubmitArgs,
    store: &impl LanguageStore,
    transport: HttpTransport,
) -> Result<()> {
    let controller = prepare_form(args, store).await?;
    let transport = transport.with_crash_file(args.file.clone());
    eprintln!("{}", controller.text(Msg::Processing));

    let (controller, outcome) = run_submit(controller, &transport).await;
    debug!("submit outcome: {:?}", outcome);

    print_notifications(controller.notifications());
    println!("{}", controller.result_text());

    if let Some(path) = &args.output {
        write_pane(path, controller.result_text())?;
    }
    if let Some(path) = &args.save_logs {
        write_pane(path, controller.logs_text())?;
    }

    match outcome {
        SubmitOutcome::Completed => Ok(()),
        _ => Err(SymbolizerError::SymbolizeFailed),
    }
}

fn write_pane(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text)?;
    eprintln!("✔ {}", path.display());
    Ok(())
}

fn print_notifications(notices: &[Notification]) {
    for notice in notices {
        let mark = match notice.kind {
            NoticeKind::Success => "✔",
            NoticeKind::Error => "✖",
            NoticeKind::Info => "ℹ",
        };
        eprintln!("{} {}", mark, notice.message);
    }
}

/// `logs` サブコマンド
pub async fn logs_command(store: &impl LanguageStore, transport: &impl Transport) -> Result<()> {
    let lang = store.load().unwrap_or_default();
    let logs = transport.fetch_logs().await?;
    match logs.joined() {
        Some(text) => println!("{}", text),
        None => println!("{}", Msg::NoLogs.text(lang)),
    }
    Ok(())
}

/// `clear-logs` サブコマンド
pub async fn clear_logs_command(transport: &impl Transport) -> Result<()> {
    let response = transport.clear_logs().await?;
    println!("✔ {}", response.message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crash_symbolizer_common::{Arch, Lang, LogsResponse, SymbolizeResponse, TransportError};
    use std::cell::Cell;
    use std::path::PathBuf;
    use tempfile::tempdir;

    struct FixedStore(Cell<Lang>);

    impl LanguageStore for FixedStore {
        fn load(&self) -> Option<Lang> {
            Some(self.0.get())
        }

        fn save(&self, lang: Lang) {
            self.0.set(lang);
        }
    }

    fn args() -> SubmitArgs {
        SubmitArgs {
            version: "45.8.0.32875".to_string(),
            arch: Arch::Arm64,
            ndi: false,
            stack: None,
            file: None,
            output: None,
            save_logs: None,
        }
    }

    #[tokio::test]
    async fn test_prepare_form_from_stack_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stack.txt");
        std::fs::write(&path, "Thread 0 Crashed").unwrap();

        let mut args = args();
        args.stack = Some(path);
        let controller = prepare_form(&args, &FixedStore(Cell::new(Lang::En))).await.unwrap();

        assert_eq!(controller.input_method(), InputMethod::Text);
        assert_eq!(controller.fields().stack_content, "Thread 0 Crashed");
        assert!(controller.submit_control().enabled);
    }

    #[tokio::test]
    async fn test_prepare_form_from_crash_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.ips");
        std::fs::write(&path, vec![0u8; 1536]).unwrap();

        let mut args = args();
        args.file = Some(path);
        let controller = prepare_form(&args, &FixedStore(Cell::new(Lang::En))).await.unwrap();

        assert_eq!(controller.input_method(), InputMethod::File);
        assert_eq!(controller.file_label().as_deref(), Some("app.ips (1.5 KB)"));
        assert!(controller.fields().stack_content.is_empty());
    }

    #[tokio::test]
    async fn test_prepare_form_rejects_bad_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stack.txt");
        std::fs::write(&path, "Thread 0 Crashed").unwrap();

        let mut args = args();
        args.version = "45.8".to_string();
        args.stack = Some(path);
        let err = prepare_form(&args, &FixedStore(Cell::new(Lang::En))).await.unwrap_err();

        match err {
            SymbolizerError::InvalidInput(message) => {
                assert_eq!(message, Msg::VersionInvalid.text(Lang::En));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_prepare_form_rejects_empty_stack() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "   \n").unwrap();

        let mut args = args();
        args.stack = Some(path);
        let err = prepare_form(&args, &FixedStore(Cell::new(Lang::Zh))).await.unwrap_err();

        assert!(matches!(
            err,
            SymbolizerError::InvalidInput(m) if m == Msg::StackRequired.text(Lang::Zh)
        ));
    }

    #[tokio::test]
    async fn test_missing_crash_file() {
        let mut args = args();
        args.file = Some(PathBuf::from("/nonexistent/crash-12345.ips"));
        let err = prepare_form(&args, &FixedStore(Cell::new(Lang::En))).await.unwrap_err();

        assert!(matches!(err, SymbolizerError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_stack_file() {
        let mut args = args();
        args.stack = Some(PathBuf::from("/nonexistent/stack-12345.txt"));
        let err = prepare_form(&args, &FixedStore(Cell::new(Lang::En))).await.unwrap_err();

        assert!(matches!(err, SymbolizerError::FileNotFound(_)));
    }

    fn processing_controller() -> FormController {
        let mut controller = FormController::new(Lang::En);
        controller.set_version("45.8.0.32875");
        controller.set_arch(Some(Arch::X86));
        controller.set_stack_content("Thread 0");
        controller.begin_submit();
        controller
    }

    #[test]
    fn test_unprinted_log_lines_tracks_progress() {
        let mut printed = 0;

        // プレースホルダは出さない
        let idle = FormController::new(Lang::En);
        assert!(unprinted_log_lines(&idle, &mut printed).is_empty());
        assert_eq!(printed, 0);

        let mut controller = processing_controller();
        controller.apply_polled_logs(&LogsResponse {
            logs: Some(vec!["one".into(), "two".into()]),
        });
        assert_eq!(unprinted_log_lines(&controller, &mut printed), vec!["one", "two"]);

        controller.apply_polled_logs(&LogsResponse {
            logs: Some(vec!["one".into(), "two".into(), "three".into()]),
        });
        assert_eq!(unprinted_log_lines(&controller, &mut printed), vec!["three"]);

        controller.apply_polled_logs(&LogsResponse {
            logs: Some(vec!["fresh".into()]),
        });
        assert_eq!(unprinted_log_lines(&controller, &mut printed), vec!["fresh"]);
        assert_eq!(printed, 1);
    }

    #[test]
    fn test_final_log_lines_skip_network_error() {
        let mut controller = processing_controller();
        controller.finish_submit(Err(TransportError::Network("connection refused".into())));
        assert!(controller.logs_text().starts_with("Network error"));

        let mut printed = 0;
        let lines = final_log_lines(&controller, SubmitOutcome::TransportFailed, &mut printed);
        assert!(lines.is_empty());
        assert_eq!(printed, 0);
    }

    #[test]
    fn test_final_log_lines_after_completion() {
        let mut controller = processing_controller();
        controller.finish_submit(Ok(SymbolizeResponse::success(
            "SYM",
            vec!["a".into(), "b".into()],
        )));

        let mut printed = 1;
        let lines = final_log_lines(&controller, SubmitOutcome::Completed, &mut printed);
        assert_eq!(lines, vec!["b"]);
    }
}
