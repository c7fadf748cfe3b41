//! Faceguard CLI
//!
//! 判別・復元・生成のワークフローを端末から実行する。
//! 状態機械と通信の正規化は `faceguard-common` と共有。

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod input;
pub mod terminal;
