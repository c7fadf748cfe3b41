//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use faceguard::error::FaceguardError;
use faceguard::input;
use faceguard_common::Rejection;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを読み込んだ場合
#[test]
fn test_load_nonexistent_file() {
    let result = input::load_image(Path::new("/nonexistent/path/12345.jpg"));
    assert!(matches!(result, Err(FaceguardError::FileNotFound(_))));
}

/// ディレクトリを指定した場合
#[test]
fn test_load_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = input::load_image(dir.path());
    assert!(matches!(result, Err(FaceguardError::FileNotFound(_))));
}

/// 画像以外の拡張子
#[test]
fn test_load_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    let result = input::load_image(&path);
    assert!(matches!(result, Err(FaceguardError::UnsupportedImage(_))));
}

/// 送信拒否はそのまま利用者向けの文言になる
#[test]
fn test_rejection_display() {
    let err = FaceguardError::from(Rejection::ConsentIncomplete);
    assert_eq!(
        err.to_string(),
        "送信できません: Please agree to all of the consent items."
    );
}

/// FaceguardErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        FaceguardError::Config("テスト設定エラー".to_string()),
        FaceguardError::FileNotFound("test.jpg".to_string()),
        FaceguardError::UnsupportedImage("test.txt".to_string()),
        FaceguardError::HttpClient("TLS初期化失敗".to_string()),
        FaceguardError::Rejected(Rejection::NoFile),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty());
    }
}

/// IOエラーの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: FaceguardError = io_err.into();
    assert!(matches!(err, FaceguardError::Io(_)));
}

/// JSONエラーの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
    let err: FaceguardError = json_err.into();
    assert!(matches!(err, FaceguardError::JsonParse(_)));
}
