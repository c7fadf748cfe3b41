//! API接続設定
//!
//! ベースURLは環境から与えられる（ブラウザはビルド時、CLIは実行時）。

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
pub const API_URL_ENV: &str = "FACEGUARD_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    /// predictと並行して `/api/upload` を呼ぶ（結果は無視）
    pub advisory_upload: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            advisory_upload: false,
        }
    }
}

impl ApiConfig {
    /// 空文字・空白のみはデフォルトURLとして扱う
    pub fn from_base_url(base_url: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = base_url.map(str::trim).filter(|url| !url.is_empty()) {
            config.base_url = url.to_string();
        }
        config
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds.max(1);
        self
    }

    pub fn with_advisory_upload(mut self, enabled: bool) -> Self {
        self.advisory_upload = enabled;
        self
    }

    /// ベースURL + パス（スラッシュの重複を除去）
    pub fn endpoint_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn timeout_millis(&self) -> u64 {
        self.timeout_seconds.saturating_mul(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_seconds, 60);
        assert!(!config.advisory_upload);
    }

    #[test]
    fn test_from_base_url_absent_or_blank() {
        assert_eq!(ApiConfig::from_base_url(None).base_url, DEFAULT_BASE_URL);
        assert_eq!(ApiConfig::from_base_url(Some("  ")).base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_base_url_given() {
        let config = ApiConfig::from_base_url(Some("https://api.example.com "));
        assert_eq!(config.base_url, "https://api.example.com");
    }

    #[test]
    fn test_endpoint_url_joins_slashes() {
        let config = ApiConfig::from_base_url(Some("http://host:8000/"));
        assert_eq!(config.endpoint_url("/api/predict"), "http://host:8000/api/predict");
        assert_eq!(config.endpoint_url("api/restore"), "http://host:8000/api/restore");
    }

    #[test]
    fn test_endpoint_url_absolute_passthrough() {
        let config = ApiConfig::default();
        let url = "http://127.0.0.1:8001/data/restored/a.png";
        assert_eq!(config.endpoint_url(url), url);
    }

    #[test]
    fn test_timeout_never_zero() {
        let config = ApiConfig::default().with_timeout(0);
        assert_eq!(config.timeout_seconds, 1);
        assert_eq!(config.timeout_millis(), 1000);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ApiConfig = serde_json::from_str(r#"{"base_url": "http://x"}"#).unwrap();
        assert_eq!(config.base_url, "http://x");
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }
}
