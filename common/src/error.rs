//! エラー型定義
//!
//! 入力の誤りはエラーにしない（各操作が通知で知らせる）。
//! ここに来るのは永続化と帳票出力の失敗だけ。

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// スロットへの書き込み拒否（容量超過・不正なキーなど）
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let error = Error::Storage("容量超過".to_string());
        assert_eq!(error.to_string(), "Storage error: 容量超過");
    }

    #[test]
    fn test_io_error_keeps_source_message() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
        assert!(error.to_string().contains("read-only"));
    }

    #[test]
    fn test_broken_draft_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{\"jobType\":").unwrap_err();
        let error: Error = json_error.into();
        assert!(error.to_string().starts_with("JSON error"));
    }
}
