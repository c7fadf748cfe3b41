//! Data URLの組み立て/分解

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/png;base64,iVBORw0..." 形式のData URL
///
/// # Returns
/// Base64エンコードされたデータ部分、または抽出失敗時はNone
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    if !is_data_url(data_url) {
        return None;
    }
    data_url.split(',').nth(1)
}

/// Data URLからMIMEタイプを抽出（不明な場合は "image/png"）
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .filter(|mime| !mime.is_empty() && !mime.contains(','))
        .unwrap_or("image/png")
}

pub fn is_data_url(value: &str) -> bool {
    value.starts_with("data:")
}

/// Base64 PNG（Grad-CAM）を表示用のData URLにする
pub fn png_data_url(base64_png: &str) -> String {
    format!("data:image/png;base64,{}", base64_png)
}

/// Data URLをデコードしてバイト列にする
pub fn decode_data_url(data_url: &str) -> Option<Vec<u8>> {
    let data = extract_base64_from_data_url(data_url)?;
    STANDARD.decode(data.trim()).ok()
}

/// 生のBase64文字列をデコード
pub fn decode_base64(data: &str) -> Option<Vec<u8>> {
    STANDARD.decode(data.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_base64_from_data_url_png() {
        let data_url = "data:image/png;base64,iVBORw0KGgo=";
        assert_eq!(extract_base64_from_data_url(data_url), Some("iVBORw0KGgo="));
    }

    #[test]
    fn test_extract_base64_from_data_url_invalid() {
        assert_eq!(extract_base64_from_data_url("not a data url"), None);
        assert_eq!(extract_base64_from_data_url("http://host/a,b.png"), None);
        assert_eq!(extract_base64_from_data_url(""), None);
    }

    #[test]
    fn test_extract_mime_type() {
        assert_eq!(extract_mime_type_from_data_url("data:image/jpeg;base64,/9j/"), "image/jpeg");
        assert_eq!(extract_mime_type_from_data_url("data:image/webp;base64,UklGR"), "image/webp");
        assert_eq!(extract_mime_type_from_data_url("invalid"), "image/png");
    }

    #[test]
    fn test_png_data_url() {
        assert_eq!(png_data_url("AAAA"), "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_decode_data_url() {
        let bytes = decode_data_url("data:image/png;base64,aGVsbG8=").expect("デコード失敗");
        assert_eq!(bytes, b"hello");
        assert!(decode_data_url("data:image/png;base64,@@@").is_none());
    }
}
