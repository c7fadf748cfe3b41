//! UIコンポーネント

pub mod consent_gate;
pub mod detect_page;
pub mod header;
pub mod image_page;
pub mod result_box;
pub mod upload_panel;
