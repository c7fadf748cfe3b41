//! 送信ワークフローの状態機械
//!
//! Idle → Ready → Submitting → Settled{Success|Failure}
//!
//! 状態は `Phase` の1つのenumで表し、遷移は名前付きメソッドだけで行う。
//! 送信ごとに `Ticket` を発行し、ファイル差し替え後に届いた古い応答は捨てる。
//! 捨てる応答でも、届くまでは次の送信を受け付けない（同時に通信するのは1件まで）。

use crate::consent::{ConsentGate, ConsentItem};
use crate::error::Rejection;
use crate::operation::Operation;
use crate::types::SelectedFile;
use std::fmt;
use std::sync::Arc;

/// 通信/プロトコルエラー時の失敗メッセージ
pub const SERVER_ERROR_MESSAGE: &str = "server error occurred";

/// 送信の識別子（ファイル世代 + 連番）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    generation: u64,
    sequence: u64,
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.generation, self.sequence)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 通信エラー、非2xx、JSON不正、タイムアウト
    Server,
    /// 2xxだが応答に `error` が含まれていた
    Domain,
}

/// 失敗（利用者に表示してよいメッセージのみ保持）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn server() -> Self {
        Self {
            kind: FailureKind::Server,
            message: SERVER_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Domain,
            message: message.into(),
        }
    }
}

/// 送信結果
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<P> {
    Success(P),
    Failure(Failure),
}

impl<P> Outcome<P> {
    pub fn success(&self) -> Option<&P> {
        match self {
            Outcome::Success(payload) => Some(payload),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase<P> {
    /// ファイル未選択
    Idle,
    /// ファイル選択済み（同意の有無は問わない）
    Ready,
    Submitting { ticket: Ticket },
    Settled { ticket: Ticket, outcome: Outcome<P> },
}

impl<P> Phase<P> {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Ready => "ready",
            Phase::Submitting { .. } => "submitting",
            Phase::Settled { .. } => "settled",
        }
    }
}

/// 送信開始時に切り出される内容
#[derive(Debug, Clone)]
pub struct Submission<O: Operation> {
    pub ticket: Ticket,
    pub file: Arc<SelectedFile>,
    pub params: O::Params,
}

/// 通信完了（どの送信に対する結果か）
#[derive(Debug, Clone, PartialEq)]
pub struct Completion<P> {
    pub ticket: Ticket,
    pub outcome: Outcome<P>,
}

/// 1ワークフローの状態
#[derive(Debug)]
pub struct Workflow<O: Operation> {
    file: Option<Arc<SelectedFile>>,
    consent: ConsentGate,
    params: O::Params,
    phase: Phase<O::Payload>,
    /// 応答待ちの送信（ファイル差し替え後も完了までは残る）
    in_flight: Option<Ticket>,
    /// 直近の送信で使ったパラメータ
    submitted_params: Option<O::Params>,
    generation: u64,
    sequence: u64,
}

impl<O: Operation> Default for Workflow<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Operation> Workflow<O> {
    pub fn new() -> Self {
        Self {
            file: None,
            consent: ConsentGate::new(O::required_consent()),
            params: O::Params::default(),
            phase: Phase::Idle,
            in_flight: None,
            submitted_params: None,
            generation: 0,
            sequence: 0,
        }
    }

    pub fn phase(&self) -> &Phase<O::Payload> {
        &self.phase
    }

    pub fn file(&self) -> Option<&Arc<SelectedFile>> {
        self.file.as_ref()
    }

    pub fn consent(&self) -> &ConsentGate {
        &self.consent
    }

    pub fn params(&self) -> &O::Params {
        &self.params
    }

    /// 表示中の結果を出した送信のパラメータ（Settled以外はNone）
    pub fn result_params(&self) -> Option<&O::Params> {
        match self.phase {
            Phase::Settled { .. } => self.submitted_params.as_ref(),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    /// 応答待ちの送信がある（ファイル差し替えで捨てられる送信も含む）
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn outcome(&self) -> Option<&Outcome<O::Payload>> {
        match &self.phase {
            Phase::Settled { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&O::Payload> {
        self.outcome().and_then(Outcome::success)
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.outcome().and_then(Outcome::failure)
    }

    pub fn can_submit(&self) -> bool {
        self.check_submit().is_ok()
    }

    /// 送信可否の判定（状態は変えない）
    pub fn check_submit(&self) -> Result<(), Rejection> {
        if self.is_busy() {
            return Err(Rejection::InFlight);
        }
        if self.file.is_none() {
            return Err(Rejection::NoFile);
        }
        if !self.consent.all_consented() {
            return Err(Rejection::ConsentIncomplete);
        }
        Ok(())
    }

    /// ファイル選択: どの状態からでもReadyへ。以前の結果と進行中の送信は無効になる
    pub fn select_file(&mut self, file: impl Into<Arc<SelectedFile>>) {
        self.file = Some(file.into());
        self.generation += 1;
        self.phase = Phase::Ready;
    }

    /// ファイルを外してIdleへ（同意は保持）
    pub fn reset(&mut self) {
        self.file = None;
        self.generation += 1;
        self.phase = Phase::Idle;
    }

    pub fn set_consent(&mut self, item: ConsentItem, checked: bool) {
        self.consent.set(item, checked);
    }

    pub fn toggle_consent(&mut self, item: ConsentItem) {
        self.consent.toggle(item);
    }

    pub fn set_params(&mut self, params: O::Params) {
        self.params = params;
    }

    /// 送信開始: Submittingへ遷移し、通信に必要な内容を返す
    pub fn begin_submit(&mut self) -> Result<Submission<O>, Rejection> {
        self.check_submit()?;
        let Some(file) = self.file.clone() else {
            return Err(Rejection::NoFile);
        };

        self.sequence += 1;
        let ticket = Ticket {
            generation: self.generation,
            sequence: self.sequence,
        };
        self.phase = Phase::Submitting { ticket };
        self.in_flight = Some(ticket);
        self.submitted_params = Some(self.params.clone());

        Ok(Submission {
            ticket,
            file,
            params: self.params.clone(),
        })
    }

    /// 通信完了: 現在の送信に対する結果ならSettledへ。古い結果はfalseを返して捨てる
    pub fn complete(&mut self, completion: Completion<O::Payload>) -> bool {
        if self.in_flight == Some(completion.ticket) {
            self.in_flight = None;
        }
        match self.phase {
            Phase::Submitting { ticket } if ticket == completion.ticket => {
                self.phase = Phase::Settled {
                    ticket,
                    outcome: completion.outcome,
                };
                true
            }
            _ => false,
        }
    }
}
