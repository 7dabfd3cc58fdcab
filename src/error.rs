use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("写真が大きすぎます: {size} bytes（上限 {limit} bytes）")]
    PhotoTooLarge { size: u64, limit: u64 },

    #[error("対応していない写真形式です: {0}")]
    UnsupportedPhoto(String),

    #[error("提出できません: {}", .0.join(" / "))]
    Validation(Vec<String>),

    #[error("帳票出力エラー: {0}")]
    Export(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] daily_report_common::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
