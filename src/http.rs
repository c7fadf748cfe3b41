//! reqwestによるTransport実装

use crate::error::{FaceguardError, Result};
use async_trait::async_trait;
use faceguard_common::{ApiConfig, MultipartBody, Transport, TransportError};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

pub struct HttpTransport {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpTransport {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| FaceguardError::HttpClient(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> std::result::Result<Vec<u8>, TransportError> {
        let response = request.send().await.map_err(map_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "non-success response");
            return Err(TransportError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(map_error)?;
        Ok(bytes.to_vec())
    }
}

fn map_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_decode() || e.is_body() {
        TransportError::Decode(e.to_string())
    } else {
        TransportError::Network(e.to_string())
    }
}

fn build_form(body: MultipartBody) -> std::result::Result<Form, TransportError> {
    let file = body.file;
    let part = Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.mime_type)
        .map_err(|e| TransportError::Decode(e.to_string()))?;

    let mut form = Form::new().part("file", part);
    for (name, value) in body.fields {
        form = form.text(name, value);
    }
    Ok(form)
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn post_multipart(
        &self,
        path: &str,
        body: MultipartBody,
    ) -> std::result::Result<Vec<u8>, TransportError> {
        let url = self.config.endpoint_url(path);
        tracing::debug!(%url, "POST multipart");
        let form = build_form(body)?;
        self.send(self.client.post(url).multipart(form)).await
    }

    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> std::result::Result<Vec<u8>, TransportError> {
        let url = self.config.endpoint_url(path);
        tracing::debug!(%url, "POST json");
        self.send(self.client.post(url).json(body)).await
    }

    async fn get_bytes(&self, url: &str) -> std::result::Result<Vec<u8>, TransportError> {
        let url = self.config.endpoint_url(url);
        tracing::debug!(%url, "GET");
        self.send(self.client.get(url)).await
    }
}
