//! Faceguard Common Library
//!
//! CLIとWeb(WASM)で共有される送信ワークフローの中核:
//! 同意チェック、アップロード、状態機械、通信の正規化、要約文、エクスポート

pub mod config;
pub mod consent;
pub mod controller;
pub mod data_url;
pub mod error;
pub mod export;
pub mod operation;
pub mod presenter;
pub mod summary;
pub mod transport;
pub mod types;
pub mod upload;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ApiConfig;
pub use consent::{ConsentGate, ConsentItem};
pub use controller::{Settlement, WorkflowController};
pub use error::{ExportError, Rejection, TransportError};
pub use export::{FileSink, Notifier};
pub use operation::{Detection, Generation, ImageOperation, Operation, Restoration};
pub use presenter::{DetectionView, ImageView, ResultArea};
pub use summary::derive_summary;
pub use transport::{MultipartBody, Transport};
pub use types::{
    GenerateResponse, ModelType, PredictResponse, ReportRequest, RestoreResponse, SelectedFile,
};
pub use upload::{PendingRead, PreviewFactory, UploadBox};
pub use workflow::{Failure, FailureKind, Outcome, Phase, Workflow};
