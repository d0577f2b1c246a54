use crate::error::{Result, SymbolizerError};
use crash_symbolizer_common::{Lang, LanguageStore};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub language: Lang,
    /// リクエストのタイムアウト秒数（0 なら無制限）
    pub timeout_seconds: u64,

    /// 読み込み元（保存先）
    #[serde(skip)]
    source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込む。ファイルがなければデフォルト値
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str::<Config>(&content)?
        } else {
            Self::default_config()
        };
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        match &self.source {
            Some(path) => self.save_to(path),
            None => self.save_to(&Self::config_path()?),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SymbolizerError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("crash-symbolizer").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            language: Lang::default(),
            timeout_seconds: 0,
            source: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }

    pub fn set_language(&mut self, lang: Lang) -> Result<()> {
        self.language = lang;
        self.save()
    }

    pub fn set_server_url(&mut self, url: String) -> Result<()> {
        self.server_url = url.trim_end_matches('/').to_string();
        self.save()
    }
}

/// 設定ファイルの `language` を表示言語の保存先として使う
impl LanguageStore for Config {
    fn load(&self) -> Option<Lang> {
        Some(self.language)
    }

    fn save(&self, lang: Lang) {
        let mut updated = self.clone();
        if let Err(err) = updated.set_language(lang) {
            warn!("failed to persist language: {}", err);
        }
    }
}
