//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use daily_report::error::ReportError;
use daily_report::photo::load_photo_payload;
use daily_report::storage::FileStorage;
use daily_report_common::{DraftStore, NotifyLevel, RecordingNotifier, StationField};
use tempfile::tempdir;

/// 存在しない写真
#[test]
fn test_photo_not_found() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = load_photo_payload(&dir.path().join("none.jpg"), 1024);
    assert!(matches!(result, Err(ReportError::FileNotFound(_))));
}

/// ReportErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ReportError::Config("テスト設定エラー".to_string()),
        ReportError::FileNotFound("before.jpg".to_string()),
        ReportError::PhotoTooLarge { size: 10, limit: 5 },
        ReportError::UnsupportedPhoto("a.gif".to_string()),
        ReportError::Export("書き込み失敗".to_string()),
    ];

    for err in errors {
        let msg = err.to_string();
        assert!(!msg.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 提出エラーは全件をつなげて表示
#[test]
fn test_validation_error_display() {
    let err = ReportError::Validation(vec!["A".to_string(), "B".to_string()]);
    assert_eq!(err.to_string(), "提出できません: A / B");
}

/// 共通ライブラリのエラーはそのまま表示
#[test]
fn test_common_error_transparent() {
    let err: ReportError = daily_report_common::Error::Storage("容量超過".to_string()).into();
    assert_eq!(
        err.to_string(),
        daily_report_common::Error::Storage("容量超過".to_string()).to_string()
    );
}

/// 書き込めない保存先でも編集は続けられる
#[test]
fn test_save_failure_keeps_editing() {
    let dir = tempdir().expect("Failed to create temp dir");
    // 保存先ディレクトリの位置にファイルを置いて書き込みを失敗させる
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, "file").unwrap();

    let mut store = DraftStore::open(FileStorage::new(&blocked), RecordingNotifier::new());
    store.format_station(StationField::Start, "1250");

    assert_eq!(store.get().station_start, "1+250");
    assert!(store.notifier().count(NotifyLevel::Error) >= 1);
}

/// 不正な測点は保存するが延長はエラー表示
#[test]
fn test_invalid_station_soft_fail() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = DraftStore::open(FileStorage::new(dir.path()), RecordingNotifier::new());

    store.format_station(StationField::Start, "abc");
    store.format_station(StationField::End, "1+250");

    assert_eq!(store.get().station_start, "abc");
    assert_eq!(store.get().length, "Format STA tidak valid");
    assert_eq!(store.notifier().count(NotifyLevel::Warning), 0);
}
