//! 写真ファイルの読み込み
//!
//! ドラフトには data URL（`data:<mime>;base64,...`）として保存する。

use crate::error::{ReportError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

/// 拡張子から MIME タイプを決める
pub fn photo_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

/// 写真を読み込んで data URL にする
///
/// # Arguments
/// * `path` - 写真ファイル
/// * `max_bytes` - ファイルサイズの上限
pub fn load_photo_payload(path: &Path, max_bytes: u64) -> Result<String> {
    if !path.exists() {
        return Err(ReportError::FileNotFound(path.display().to_string()));
    }

    let mime = photo_mime(path)
        .ok_or_else(|| ReportError::UnsupportedPhoto(path.display().to_string()))?;

    let size = std::fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(ReportError::PhotoTooLarge { size, limit: max_bytes });
    }

    let bytes = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), size, mime, "写真を読み込み");
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use daily_report_common::export::decode_photo_payload;
    use tempfile::tempdir;

    #[test]
    fn test_photo_mime() {
        assert_eq!(photo_mime(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(photo_mime(Path::new("a.jpeg")), Some("image/jpeg"));
        assert_eq!(photo_mime(Path::new("a.png")), Some("image/png"));
        assert_eq!(photo_mime(Path::new("a.gif")), None);
        assert_eq!(photo_mime(Path::new("noext")), None);
    }

    #[test]
    fn test_load_photo_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("before.png");
        std::fs::write(&path, b"\x89PNG\r\n").unwrap();

        let payload = load_photo_payload(&path, 1024).unwrap();
        assert!(payload.starts_with("data:image/png;base64,"));
        assert_eq!(decode_photo_payload(&payload), Some(b"\x89PNG\r\n".to_vec()));
    }

    #[test]
    fn test_load_photo_payload_errors() {
        let dir = tempdir().unwrap();

        let missing = dir.path().join("missing.jpg");
        assert!(matches!(
            load_photo_payload(&missing, 1024),
            Err(ReportError::FileNotFound(_))
        ));

        let gif = dir.path().join("a.gif");
        std::fs::write(&gif, b"GIF89a").unwrap();
        assert!(matches!(
            load_photo_payload(&gif, 1024),
            Err(ReportError::UnsupportedPhoto(_))
        ));

        let big = dir.path().join("big.jpg");
        std::fs::write(&big, vec![0u8; 64]).unwrap();
        assert!(matches!(
            load_photo_payload(&big, 16),
            Err(ReportError::PhotoTooLarge { size: 64, limit: 16 })
        ));
    }
}
