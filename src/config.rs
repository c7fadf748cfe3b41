use crate::error::{FaceguardError, Result};
use faceguard_common::config::{ApiConfig, API_URL_ENV, DEFAULT_TIMEOUT_SECONDS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: Option<String>,
    pub timeout_seconds: u64,
    pub advisory_upload: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            advisory_upload: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
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
            .ok_or_else(|| FaceguardError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("faceguard").join("config.json"))
    }

    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FaceguardError::Config(format!(
                "APIのURLは http:// または https:// で始まる必要があります: {}",
                url
            )));
        }
        self.api_url = Some(url.trim_end_matches('/').to_string());
        Ok(())
    }

    /// 接続設定を決定する
    ///
    /// 優先順位: `--api-url` > 環境変数 > 設定ファイル > デフォルト
    pub fn resolve(
        &self,
        flag_url: Option<&str>,
        env_url: Option<&str>,
        flag_timeout: Option<u64>,
    ) -> ApiConfig {
        let url = [flag_url, env_url, self.api_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty());

        ApiConfig::from_base_url(url)
            .with_timeout(flag_timeout.unwrap_or(self.timeout_seconds))
            .with_advisory_upload(self.advisory_upload)
    }

    /// 環境変数 `FACEGUARD_API_URL` を読んで接続設定を決定する
    pub fn api_config(&self, flag_url: Option<&str>, flag_timeout: Option<u64>) -> ApiConfig {
        let env_url = std::env::var(API_URL_ENV).ok();
        self.resolve(flag_url, env_url.as_deref(), flag_timeout)
    }
}
