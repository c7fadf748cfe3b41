//! テスト用のTransport/Notifier/FileSink

use crate::error::TransportError;
use crate::export::{FileSink, Notifier};
use crate::transport::{MultipartBody, Transport};
use crate::types::SelectedFile;
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

pub fn jpeg(name: &str) -> SelectedFile {
    SelectedFile::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0])
}

#[derive(Debug, Clone)]
pub enum Reply {
    Bytes(Vec<u8>),
    Error(TransportError),
    /// 応答しない（タイムアウト前の遅い通信）
    Pending,
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Reply::Bytes(body.as_bytes().to_vec())
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub file_name: Option<String>,
    pub fields: Vec<(String, String)>,
    pub json: Option<serde_json::Value>,
}

impl RecordedCall {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Default)]
struct Inner {
    replies: HashMap<String, Reply>,
    calls: Vec<RecordedCall>,
    yield_first: bool,
}

/// パスごとに固定の応答を返すTransport
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Rc<RefCell<Inner>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, path: &str, reply: Reply) -> Self {
        self.inner.borrow_mut().replies.insert(path.to_string(), reply);
        self
    }

    /// 応答前に一度Pendingを返す（実際の通信と同じく他のタスクに制御を渡す）
    pub fn yield_first(self) -> Self {
        self.inner.borrow_mut().yield_first = true;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.borrow().calls.clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.inner.borrow().calls.iter().filter(|c| c.path == path).count()
    }

    async fn respond(&self, call: RecordedCall) -> Result<Vec<u8>, TransportError> {
        let (reply, yield_first) = {
            let mut inner = self.inner.borrow_mut();
            let reply = inner
                .replies
                .get(&call.path)
                .cloned()
                .unwrap_or(Reply::Error(TransportError::Status(404)));
            inner.calls.push(call);
            (reply, inner.yield_first)
        };
        if yield_first {
            YieldNow(false).await;
        }
        match reply {
            Reply::Bytes(bytes) => Ok(bytes),
            Reply::Error(e) => Err(e),
            Reply::Pending => futures::future::pending().await,
        }
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn post_multipart(
        &self,
        path: &str,
        body: MultipartBody,
    ) -> Result<Vec<u8>, TransportError> {
        self.respond(RecordedCall {
            path: path.to_string(),
            file_name: Some(body.file.file_name.clone()),
            fields: body
                .fields
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
            json: None,
        })
        .await
    }

    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<Vec<u8>, TransportError> {
        self.respond(RecordedCall {
            path: path.to_string(),
            file_name: None,
            fields: Vec::new(),
            json: Some(body.clone()),
        })
        .await
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.respond(RecordedCall {
            path: url.to_string(),
            file_name: None,
            fields: Vec::new(),
            json: None,
        })
        .await
    }
}

struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            return Poll::Ready(());
        }
        self.0 = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

/// 通知を記録し、確認ダイアログには固定の答えを返す
#[derive(Default)]
pub struct RecordingNotifier {
    pub confirm_answer: bool,
    pub alerts: RefCell<Vec<String>>,
    pub confirms: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn accepting() -> Self {
        Self {
            confirm_answer: true,
            ..Default::default()
        }
    }

    pub fn declining() -> Self {
        Self::default()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.confirm_answer
    }
}

/// 保存されたファイルを記録する
#[derive(Default)]
pub struct MemorySink {
    pub saved: RefCell<Vec<(String, String, Vec<u8>)>>,
    pub fail: bool,
}

impl FileSink for MemorySink {
    fn save(&self, file_name: &str, mime_type: &str, bytes: &[u8]) -> Result<(), String> {
        if self.fail {
            return Err("disk full".to_string());
        }
        self.saved
            .borrow_mut()
            .push((file_name.to_string(), mime_type.to_string(), bytes.to_vec()));
        Ok(())
    }
}
