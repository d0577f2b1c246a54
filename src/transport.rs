//! reqwest によるバックエンド呼び出し

use async_trait::async_trait;
use crash_symbolizer_common::protocol::{CLEAR_LOGS_PATH, FIELD_CRASH_FILE, LOGS_PATH, SYMBOLIZE_PATH};
use crash_symbolizer_common::{
    ClearLogsResponse, LogsResponse, SymbolizeRequest, SymbolizeResponse, Timer, Transport,
    TransportError,
};
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, SymbolizerError};

pub struct HttpTransport {
    client: Client,
    base_url: String,
    crash_file: Option<PathBuf>,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SymbolizerError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            crash_file: None,
        })
    }

    /// ファイル入力で送るときの実ファイル
    pub fn with_crash_file(mut self, path: Option<PathBuf>) -> Self {
        self.crash_file = path;
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn build_form(
        &self,
        request: &SymbolizeRequest,
    ) -> std::result::Result<Form, TransportError> {
        let mut form = Form::new();
        for (name, value) in request.text_fields() {
            form = form.text(name, value);
        }

        if let Some(selected) = request.file() {
            let path = self.crash_file.as_ref().ok_or_else(|| {
                TransportError::Input(format!("no file attached for {}", selected.name))
            })?;
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| TransportError::Input(format!("{}: {}", path.display(), e)))?;
            let part = Part::bytes(bytes).file_name(selected.name.clone());
            form = form.part(FIELD_CRASH_FILE, part);
        }

        Ok(form)
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn symbolize(
        &self,
        request: &SymbolizeRequest,
    ) -> std::result::Result<SymbolizeResponse, TransportError> {
        let form = self.build_form(request).await?;
        let url = self.url(SYMBOLIZE_PATH);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;
        decode(response).await
    }

    async fn fetch_logs(&self) -> std::result::Result<LogsResponse, TransportError> {
        let response = self
            .client
            .get(self.url(LOGS_PATH))
            .send()
            .await
            .map_err(network_error)?;
        decode(response).await
    }

    async fn clear_logs(&self) -> std::result::Result<ClearLogsResponse, TransportError> {
        let response = self
            .client
            .post(self.url(CLEAR_LOGS_PATH))
            .send()
            .await
            .map_err(network_error)?;
        decode(response).await
    }
}

/// ステータスコードに関係なく本文を JSON として読む
async fn decode<T: DeserializeOwned>(
    response: Response,
) -> std::result::Result<T, TransportError> {
    let status = response.status();
    let body = response.text().await.map_err(network_error)?;
    serde_json::from_str(&body).map_err(|e| {
        TransportError::Decode(format!("HTTP {}: invalid JSON response ({})", status, e))
    })
}

fn network_error(err: reqwest::Error) -> TransportError {
    TransportError::Network(err.to_string())
}

pub struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
