//! 送信ライフサイクルの結合テスト
//!
//! ローカルに立てた最小の HTTP サーバーに対して reqwest トランスポートで送信する

use crash_symbolizer::transport::HttpTransport;
use crash_symbolizer::runner::run_submit;
use crash_symbolizer_common::{
    Arch, FormController, InputMethod, Lang, OutputTab, SelectedFile, SubmitOutcome, Transport,
    TransportError,
};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// `"METHOD /path"` ごとの固定レスポンス
#[derive(Clone)]
struct Route {
    request_line: &'static str,
    body: &'static str,
    delay: Duration,
}

fn route(request_line: &'static str, body: &'static str) -> Route {
    Route {
        request_line,
        body,
        delay: Duration::ZERO,
    }
}

type Received = Arc<Mutex<Vec<String>>>;

async fn spawn_stub(routes: Vec<Route>) -> (String, Received) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let received: Received = Arc::new(Mutex::new(Vec::new()));

    let log = received.clone();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let routes = routes.clone();
            let log = log.clone();
            tokio::spawn(async move {
                let _ = serve(stream, &routes, &log).await;
            });
        }
    });

    (format!("http://{}", addr), received)
}

async fn serve(mut stream: TcpStream, routes: &[Route], log: &Received) -> std::io::Result<()> {
    let request = read_request(&mut stream).await?;
    log.lock().unwrap().push(request.clone());

    let matched = routes
        .iter()
        .find(|r| request.starts_with(&format!("{} ", r.request_line)));
    let (status, body, delay) = match matched {
        Some(r) => ("200 OK", r.body, r.delay),
        None => ("404 Not Found", r#"{"detail":"Not Found"}"#, Duration::ZERO),
    };
    tokio::time::sleep(delay).await;

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

/// ヘッダーと Content-Length 分の本文を読む
async fn read_request(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    Ok(String::from_utf8_lossy(&buf).to_string())
}

fn ready_controller() -> FormController {
    let mut c = FormController::new(Lang::En);
    c.set_version("45.8.0.32875");
    c.set_arch(Some(Arch::Arm64));
    c.set_stack_content("Thread 0 Crashed");
    c
}

fn transport(base_url: &str) -> HttpTransport {
    HttpTransport::new(base_url, Some(Duration::from_secs(10))).expect("client")
}

#[tokio::test]
async fn test_submit_success() {
    let (url, received) = spawn_stub(vec![
        route(
            "POST /symbolize",
            r#"{"success":true,"output":"SYM","logs":["a","b"]}"#,
        ),
        route("GET /logs", r#"{"logs":["a"]}"#),
    ])
    .await;

    let (controller, outcome) = run_submit(ready_controller(), &transport(&url)).await;

    assert_eq!(outcome, SubmitOutcome::Completed);
    assert_eq!(controller.result_text(), "SYM");
    assert_eq!(controller.logs_text(), "a\nb");
    assert_eq!(controller.output_tab(), OutputTab::Result);
    assert!(!controller.is_processing());

    let requests = received.lock().unwrap();
    let symbolize = requests
        .iter()
        .find(|r| r.starts_with("POST /symbolize "))
        .expect("symbolize request");
    assert!(symbolize.contains("name=\"version\""));
    assert!(symbolize.contains("45.8.0.32875"));
    assert!(symbolize.contains("name=\"arch\""));
    assert!(symbolize.contains("name=\"stack_content\""));
    assert!(!symbolize.contains("name=\"crash_file\""));
    assert!(!symbolize.contains("name=\"isNDI\""));
}

#[tokio::test]
async fn test_submit_crash_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("app.ips");
    std::fs::write(&path, "{\"bug_type\":\"309\"}").unwrap();

    let (url, received) = spawn_stub(vec![route(
        "POST /symbolize",
        r#"{"success":true,"output":"SYM","logs":[]}"#,
    )])
    .await;

    let mut controller = ready_controller();
    controller.set_ndi(true);
    controller.switch_input_method(InputMethod::File);
    controller.select_file(SelectedFile::new("app.ips", 18));

    let transport = transport(&url).with_crash_file(Some(path));
    let (_, outcome) = run_submit(controller, &transport).await;
    assert_eq!(outcome, SubmitOutcome::Completed);

    let requests = received.lock().unwrap();
    let symbolize = &requests[0];
    assert!(symbolize.contains("name=\"crash_file\"; filename=\"app.ips\""));
    assert!(symbolize.contains("bug_type"));
    assert!(symbolize.contains("name=\"isNDI\""));
    assert!(!symbolize.contains("name=\"stack_content\""));
}

#[tokio::test]
async fn test_submit_server_failure() {
    let (url, _) = spawn_stub(vec![route(
        "POST /symbolize",
        r#"{"success":false,"error":"bad input","logs":["[ERROR] bad input"]}"#,
    )])
    .await;

    let (controller, outcome) = run_submit(ready_controller(), &transport(&url)).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert!(controller.result_text().contains("Processing failed"));
    assert!(controller.result_text().contains("bad input"));
    assert_eq!(controller.logs_text(), "[ERROR] bad input");
    assert!(!controller.is_processing());
    assert!(controller.submit_control().enabled);
}

/// FastAPI の `{"detail": ...}` は失敗扱い
#[tokio::test]
async fn test_submit_detail_body_is_failure() {
    let (url, _) = spawn_stub(vec![route(
        "POST /symbolize",
        r#"{"detail":"Field required"}"#,
    )])
    .await;

    let (controller, outcome) = run_submit(ready_controller(), &transport(&url)).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert!(!controller.is_processing());
}

#[tokio::test]
async fn test_submit_network_error() {
    // 一度 bind して閉じたポートには繋がらない
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (controller, outcome) =
        run_submit(ready_controller(), &transport(&format!("http://{}", addr))).await;

    assert_eq!(outcome, SubmitOutcome::TransportFailed);
    assert!(controller.result_text().starts_with("Network error: "));
    assert!(controller.logs_text().starts_with("Network error: "));
    assert!(!controller.is_processing());
}

#[tokio::test]
async fn test_submit_invalid_json() {
    let (url, _) = spawn_stub(vec![route("POST /symbolize", "<html>oops</html>")]).await;

    let (controller, outcome) = run_submit(ready_controller(), &transport(&url)).await;

    assert_eq!(outcome, SubmitOutcome::TransportFailed);
    assert!(controller.result_text().contains("invalid JSON"));
}

/// 処理が長引くとポーリングで途中のログが取られる
#[tokio::test]
async fn test_logs_polled_while_processing() {
    let (url, received) = spawn_stub(vec![
        Route {
            request_line: "POST /symbolize",
            body: r#"{"success":true,"output":"SYM","logs":["done"]}"#,
            delay: Duration::from_millis(1600),
        },
        route("GET /logs", r#"{"logs":["[INFO] working"]}"#),
    ])
    .await;

    let (controller, outcome) = run_submit(ready_controller(), &transport(&url)).await;

    assert_eq!(outcome, SubmitOutcome::Completed);
    assert_eq!(controller.logs_text(), "done");

    let requests = received.lock().unwrap();
    assert!(requests.iter().any(|r| r.starts_with("GET /logs ")));
}

/// `/logs` が遅くても送信の完了は待たされない
#[tokio::test]
async fn test_slow_log_poll_does_not_hold_submit() {
    let (url, received) = spawn_stub(vec![
        Route {
            request_line: "POST /symbolize",
            body: r#"{"success":true,"output":"SYM","logs":["done"]}"#,
            delay: Duration::from_millis(1200),
        },
        Route {
            request_line: "GET /logs",
            body: r#"{"logs":["[INFO] working"]}"#,
            delay: Duration::from_secs(5),
        },
    ])
    .await;

    let started = Instant::now();
    let (controller, outcome) = run_submit(ready_controller(), &transport(&url)).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome, SubmitOutcome::Completed);
    assert_eq!(controller.result_text(), "SYM");
    assert_eq!(controller.logs_text(), "done");
    assert!(elapsed < Duration::from_secs(4), "submit took {:?}", elapsed);

    let requests = received.lock().unwrap();
    assert!(requests.iter().any(|r| r.starts_with("GET /logs ")));
}

#[tokio::test]
async fn test_fetch_and_clear_logs() {
    let (url, _) = spawn_stub(vec![
        route("GET /logs", r#"{"logs":["one","two"]}"#),
        route("POST /clear-logs", r#"{"message":"Logs cleared"}"#),
    ])
    .await;
    let transport = transport(&url);

    let logs = transport.fetch_logs().await.expect("logs");
    assert_eq!(logs.joined().as_deref(), Some("one\ntwo"));

    let cleared = transport.clear_logs().await.expect("clear");
    assert_eq!(cleared.message, "Logs cleared");
}

#[tokio::test]
async fn test_file_mode_without_path_is_input_error() {
    let (url, _) = spawn_stub(vec![]).await;
    let transport = transport(&url);

    let mut controller = ready_controller();
    controller.switch_input_method(InputMethod::File);
    controller.select_file(SelectedFile::new("gone.ips", 1));
    let request = controller.begin_submit().expect("request");

    let result = transport.symbolize(&request).await;
    assert!(matches!(result, Err(TransportError::Input(_))));
}
