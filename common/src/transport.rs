//! 通信層の抽象
//!
//! ブラウザ（fetch）とCLI（reqwest）で実装を差し替える。
//! 応答はバイト列のまま返し、JSONの解釈はワークフロー側で行う。

use crate::error::TransportError;
use crate::types::SelectedFile;
use async_trait::async_trait;
use std::sync::Arc;

/// multipart/form-data の内容
#[derive(Debug, Clone)]
pub struct MultipartBody {
    /// `file` フィールド
    pub file: Arc<SelectedFile>,
    /// テキストフィールド（`model_type` など）
    pub fields: Vec<(&'static str, String)>,
}

impl MultipartBody {
    pub fn new(file: Arc<SelectedFile>) -> Self {
        Self {
            file,
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<(&'static str, String)>) -> Self {
        self.fields = fields;
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// HTTP呼び出し
///
/// 2xx以外は `TransportError::Status` を返すこと。
#[async_trait(?Send)]
pub trait Transport {
    async fn post_multipart(
        &self,
        path: &str,
        body: MultipartBody,
    ) -> Result<Vec<u8>, TransportError>;

    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<Vec<u8>, TransportError>;

    /// 絶対URLまたはAPIパスからバイト列を取得
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for std::rc::Rc<T> {
    async fn post_multipart(
        &self,
        path: &str,
        body: MultipartBody,
    ) -> Result<Vec<u8>, TransportError> {
        (**self).post_multipart(path, body).await
    }

    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<Vec<u8>, TransportError> {
        (**self).post_json(path, body).await
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        (**self).get_bytes(url).await
    }
}
