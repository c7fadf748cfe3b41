use crate::error::{FaceguardError, Result};
use faceguard_common::SelectedFile;
use std::path::Path;

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("gif", "image/gif"),
];

/// 拡張子からMIMEタイプを判定（大文字小文字は区別しない）
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// 画像ファイルを読み込んで送信用の `SelectedFile` を作る
pub fn load_image(path: &Path) -> Result<SelectedFile> {
    if !path.is_file() {
        return Err(FaceguardError::FileNotFound(path.display().to_string()));
    }

    let mime_type = mime_type_for(path)
        .ok_or_else(|| FaceguardError::UnsupportedImage(path.display().to_string()))?;

    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(SelectedFile::new(file_name, mime_type, bytes))
}
