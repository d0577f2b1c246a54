//! fetch によるシンボル化バックエンド呼び出し

use std::time::Duration;

use async_trait::async_trait;
use crash_symbolizer_common::protocol::{FIELD_CRASH_FILE, LOGS_PATH, SYMBOLIZE_PATH};
use crash_symbolizer_common::{
    LogsResponse, SymbolizeRequest, SymbolizeResponse, Timer, Transport, TransportError,
};
use gloo::net::http::{Request, Response};
use gloo::timers::future::TimeoutFuture;
use log::debug;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

/// ビルド時に `SYMBOLIZER_BACKEND_URL` があればそちらへ、なければ同一オリジンへ送る
const fn backend_url() -> &'static str {
    match option_env!("SYMBOLIZER_BACKEND_URL") {
        Some(url) => url,
        None => "",
    }
}

const BACKEND_URL: &str = backend_url();

/// ブラウザの fetch を使う `Transport`
///
/// ファイル入力モードのときは `<input type="file">` から取り出した `File` を
/// `with_crash_file` で渡しておく。
pub struct FetchTransport {
    base_url: String,
    crash_file: Option<File>,
}

impl FetchTransport {
    pub fn new() -> Self {
        Self {
            base_url: BACKEND_URL.trim_end_matches('/').to_string(),
            crash_file: None,
        }
    }

    pub fn with_crash_file(mut self, file: Option<File>) -> Self {
        self.crash_file = file;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build_form(&self, request: &SymbolizeRequest) -> Result<FormData, TransportError> {
        let form = FormData::new().map_err(input_error)?;
        for (name, value) in request.text_fields() {
            form.append_with_str(name, &value).map_err(input_error)?;
        }

        if let Some(selected) = request.file() {
            let file = self.crash_file.as_ref().ok_or_else(|| {
                TransportError::Input(format!("file is no longer available: {}", selected.name))
            })?;
            form.append_with_blob_and_filename(FIELD_CRASH_FILE, file, &selected.name)
                .map_err(input_error)?;
        }

        Ok(form)
    }
}

impl Default for FetchTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn symbolize(
        &self,
        request: &SymbolizeRequest,
    ) -> Result<SymbolizeResponse, TransportError> {
        let form = self.build_form(request)?;
        let url = self.url(SYMBOLIZE_PATH);
        debug!("POST {}", url);

        let response = Request::post(&url)
            .body(form)
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;
        decode(response).await
    }

    async fn fetch_logs(&self) -> Result<LogsResponse, TransportError> {
        let response = Request::get(&self.url(LOGS_PATH))
            .send()
            .await
            .map_err(network_error)?;
        decode(response).await
    }
}

/// ステータスコードに関係なく本文を JSON として読む
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let status = response.status();
    let body = response.text().await.map_err(network_error)?;
    serde_json::from_str(&body).map_err(|e| {
        TransportError::Decode(format!("HTTP {}: invalid JSON response ({})", status, e))
    })
}

fn network_error(err: gloo::net::Error) -> TransportError {
    TransportError::Network(err.to_string())
}

fn input_error(err: JsValue) -> TransportError {
    TransportError::Input(format!("{:?}", err))
}

/// `setTimeout` ベースの `Timer`
pub struct GlooTimer;

#[async_trait(?Send)]
impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        TimeoutFuture::new(duration.as_millis() as u32).await;
    }
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use crash_symbolizer_common::{Arch, CrashPayload, SelectedFile};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn request(payload: CrashPayload) -> SymbolizeRequest {
        SymbolizeRequest {
            version: "45.8.0.32875".to_string(),
            arch: Arch::Arm64,
            ndi: false,
            payload,
        }
    }

    #[wasm_bindgen_test]
    fn wasm_stack_request_builds_form() {
        let form = FetchTransport::new()
            .build_form(&request(CrashPayload::Stack("Thread 0".to_string())))
            .expect("form");
        assert_eq!(form.get("version").as_string().as_deref(), Some("45.8.0.32875"));
        assert_eq!(form.get("arch").as_string().as_deref(), Some("arm64"));
        assert_eq!(form.get("stack_content").as_string().as_deref(), Some("Thread 0"));
        assert!(!form.has("crash_file"));
    }

    #[wasm_bindgen_test]
    fn wasm_file_request_without_file_fails() {
        let result = FetchTransport::new().build_form(&request(CrashPayload::File(
            SelectedFile::new("a.ips", 10),
        )));
        assert!(matches!(result, Err(TransportError::Input(_))));
    }
}
