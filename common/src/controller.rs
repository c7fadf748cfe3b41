//! ワークフローコントローラ
//!
//! 状態（Workflow）と通信（Transport）を束ね、送信の唯一の窓口になる。
//! 通信エラーは全てここで `Failure` に変換し、呼び出し側には漏らさない。

use crate::consent::ConsentItem;
use crate::error::Rejection;
use crate::operation::{Operation, UPLOAD_ENDPOINT};
use crate::transport::{MultipartBody, Transport};
use crate::types::SelectedFile;
use crate::workflow::{Completion, Failure, Outcome, Submission, Ticket, Workflow};
use futures::future::{self, Either};
use std::cell::RefCell;
use std::sync::Arc;

/// 送信の結末
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// 結果が状態に反映された
    Applied,
    /// 送信後にファイルが差し替えられたため結果を捨てた
    Stale,
}

type Listener<O> = Box<dyn Fn(&Workflow<O>)>;

pub struct WorkflowController<O: Operation, T: Transport> {
    transport: T,
    state: RefCell<Workflow<O>>,
    advisory_upload: bool,
    listeners: RefCell<Vec<Listener<O>>>,
}

impl<O: Operation, T: Transport> WorkflowController<O, T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: RefCell::new(Workflow::new()),
            advisory_upload: false,
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// `/api/upload` の並行呼び出しを有効化（Detectionのみ有効）
    pub fn with_advisory_upload(mut self, enabled: bool) -> Self {
        self.advisory_upload = enabled && O::ADVISORY_UPLOAD;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 状態変化の通知先を登録（登録時に現在の状態で1回呼ぶ）
    ///
    /// リスナー内からコントローラを操作してはならない。
    pub fn subscribe(&self, listener: impl Fn(&Workflow<O>) + 'static) {
        listener(&self.state.borrow());
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&Workflow<O>) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn select_file(&self, file: impl Into<Arc<SelectedFile>>) {
        let file = file.into();
        tracing::debug!(operation = O::NAME, file = %file.file_name, size = file.len(), "file selected");
        self.transition(|wf| wf.select_file(file));
    }

    pub fn reset(&self) {
        self.transition(Workflow::reset);
    }

    pub fn set_consent(&self, item: ConsentItem, checked: bool) {
        self.transition(|wf| wf.set_consent(item, checked));
    }

    pub fn toggle_consent(&self, item: ConsentItem) {
        self.transition(|wf| wf.toggle_consent(item));
    }

    pub fn set_params(&self, params: O::Params) {
        self.transition(|wf| wf.set_params(params));
    }

    /// 送信する
    ///
    /// 前提条件を満たさない場合は通信せず `Rejection` を返す。
    /// 通信結果（成功/失敗）は状態に反映され、Errにはならない。
    /// 参考アップロードが有効な場合、結果の反映後もアップロードの完了までは戻らない。
    pub async fn submit(&self) -> Result<Settlement, Rejection> {
        let submission = self.transition(Workflow::begin_submit)?;
        tracing::info!(
            operation = O::NAME,
            ticket = %submission.ticket,
            file = %submission.file.file_name,
            "submission started"
        );

        let predict = execute::<O, T>(&self.transport, &submission);
        futures::pin_mut!(predict);

        let outcome = if self.advisory_upload {
            // 参考アップロードの完了は待たずに結果を反映する
            let upload = advisory_upload(&self.transport, Arc::clone(&submission.file));
            futures::pin_mut!(upload);
            match future::select(predict, upload).await {
                Either::Left((outcome, upload)) => {
                    let settlement = self.settle(submission.ticket, outcome);
                    upload.await;
                    return Ok(settlement);
                }
                Either::Right(((), predict)) => predict.await,
            }
        } else {
            predict.await
        };

        Ok(self.settle(submission.ticket, outcome))
    }

    fn settle(&self, ticket: Ticket, outcome: Outcome<O::Payload>) -> Settlement {
        let applied = self.transition(|wf| wf.complete(Completion { ticket, outcome }));
        if applied {
            tracing::info!(operation = O::NAME, ticket = %ticket, "submission settled");
            Settlement::Applied
        } else {
            tracing::debug!(operation = O::NAME, ticket = %ticket, "stale completion discarded");
            Settlement::Stale
        }
    }

    fn transition<R>(&self, f: impl FnOnce(&mut Workflow<O>) -> R) -> R {
        let result = f(&mut self.state.borrow_mut());
        self.notify();
        result
    }

    fn notify(&self) {
        let state = self.state.borrow();
        for listener in self.listeners.borrow().iter() {
            listener(&state);
        }
    }
}

/// 送信を実行して結果を正規化する
pub async fn execute<O: Operation, T: Transport + ?Sized>(
    transport: &T,
    submission: &Submission<O>,
) -> Outcome<O::Payload> {
    let body = MultipartBody::new(Arc::clone(&submission.file))
        .with_fields(O::form_fields(&submission.params));

    match transport.post_multipart(O::ENDPOINT, body).await {
        Ok(bytes) => interpret::<O>(&bytes),
        Err(e) => {
            tracing::warn!(operation = O::NAME, error = %e, "request failed");
            Outcome::Failure(Failure::server())
        }
    }
}

/// 2xx応答の本文を解釈する
pub fn interpret<O: Operation>(bytes: &[u8]) -> Outcome<O::Payload> {
    let payload: O::Payload = match serde_json::from_slice(bytes) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(operation = O::NAME, error = %e, "malformed response body");
            return Outcome::Failure(Failure::server());
        }
    };

    match O::validate(payload) {
        Ok(payload) => Outcome::Success(payload),
        Err(failure) => {
            tracing::info!(operation = O::NAME, message = %failure.message, "server reported failure");
            Outcome::Failure(failure)
        }
    }
}

/// 参考用のアップロード（失敗しても結果には影響しない）
async fn advisory_upload<T: Transport + ?Sized>(transport: &T, file: Arc<SelectedFile>) {
    match transport
        .post_multipart(UPLOAD_ENDPOINT, MultipartBody::new(file))
        .await
    {
        Ok(_) => tracing::debug!("advisory upload accepted"),
        Err(e) => tracing::warn!(error = %e, "advisory upload failed (ignored)"),
    }
}
