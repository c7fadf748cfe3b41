//! バックエンドAPI呼び出し

mod client;

pub use client::FetchTransport;
