//! ドラフトストア
//!
//! 作業中の日報 1 件を保持し、変更のたびにレコード全体を永続スロットへ書く。
//! 入力の各操作は `form` モジュールの `impl` にまとめている。
//!
//! ## 読み込み
//! - スロットが無い → 既定値
//! - JSON が壊れている → ログと通知を出して既定値
//! - それ以外 → 欠けているキーを既定値で補って復元

use crate::notify::{Notifier, NotifyLevel};
use crate::storage::Storage;
use crate::types::Draft;

/// 既定の保存キー
pub const DEFAULT_STORAGE_KEY: &str = "dailyReportDraft";

pub struct DraftStore<S: Storage, N: Notifier> {
    storage: S,
    notifier: N,
    key: String,
    draft: Draft,
}

impl<S: Storage, N: Notifier> DraftStore<S, N> {
    /// 既定キーのスロットから開く
    pub fn open(storage: S, notifier: N) -> Self {
        Self::open_with_key(storage, notifier, DEFAULT_STORAGE_KEY)
    }

    pub fn open_with_key(storage: S, notifier: N, key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            notifier,
            key: key.into(),
            draft: Draft::default(),
        };
        store.draft = store.load();
        store
    }

    /// スロットを読み、既定値とマージしたドラフトを返す
    pub fn load(&self) -> Draft {
        let json = match self.storage.get(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return Draft::default(),
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "ドラフトの読み込みに失敗");
                self.notify("ドラフトの読み込みに失敗しました", NotifyLevel::Error);
                return Draft::default();
            }
        };

        match serde_json::from_str::<Draft>(&json) {
            Ok(draft) => {
                tracing::debug!(key = %self.key, bytes = json.len(), "ドラフトを読み込み");
                self.notify("ドラフトを読み込みました", NotifyLevel::Success);
                draft
            }
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "ドラフトのJSONが不正");
                self.notify("ドラフトの読み込みに失敗しました", NotifyLevel::Error);
                Draft::default()
            }
        }
    }

    pub fn get(&self) -> &Draft {
        &self.draft
    }

    /// 帳票出力などに渡す読み取り専用のコピー
    pub fn snapshot(&self) -> Draft {
        self.draft.clone()
    }

    /// ドラフトを変更し、続けてレコード全体を保存する
    pub fn mutate<R>(&mut self, f: impl FnOnce(&mut Draft) -> R) -> R {
        let result = f(&mut self.draft);
        self.save();
        result
    }

    /// ドラフト全体を書き込む
    ///
    /// 失敗しても編集は続けられる（メモリ上の値が正）。前回保存した値は残る。
    pub fn save(&mut self) -> bool {
        let json = match serde_json::to_string(&self.draft) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "ドラフトのシリアライズに失敗");
                self.notify("ドラフトの保存に失敗しました", NotifyLevel::Error);
                return false;
            }
        };

        match self.storage.set(&self.key, &json) {
            Ok(()) => {
                tracing::trace!(key = %self.key, bytes = json.len(), "ドラフトを保存");
                true
            }
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "ドラフトの保存に失敗");
                self.notify("ドラフトの保存に失敗しました", NotifyLevel::Error);
                false
            }
        }
    }

    /// 既定値に戻し、スロットを消す
    pub fn reset(&mut self) {
        self.draft = Draft::default();
        if let Err(e) = self.storage.remove(&self.key) {
            tracing::error!(key = %self.key, error = %e, "ドラフトの削除に失敗");
            self.notify("ドラフトの削除に失敗しました", NotifyLevel::Error);
            return;
        }
        self.notify("フォームをリセットしました", NotifyLevel::Info);
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub(crate) fn notify(&self, message: &str, level: NotifyLevel) {
        self.notifier.notify(message, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::storage::MemoryStorage;

    fn open_empty() -> DraftStore<MemoryStorage, RecordingNotifier> {
        DraftStore::open(MemoryStorage::new(), RecordingNotifier::new())
    }

    #[test]
    fn test_open_without_slot_gives_defaults() {
        let store = open_empty();
        assert_eq!(store.get().job_type, "");
        assert_eq!(store.get().materials.len(), 1);
        assert!(store.notifier().messages().is_empty());
    }

    #[test]
    fn test_mutate_persists_whole_record() {
        let mut store = open_empty();
        store.mutate(|d| d.issue = "HUJAN".to_string());

        let json = store.storage().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let saved: Draft = serde_json::from_str(&json).unwrap();
        assert_eq!(&saved, store.get());
    }

    #[test]
    fn test_load_merges_defaults() {
        let mut storage = MemoryStorage::new();
        storage
            .set(DEFAULT_STORAGE_KEY, r#"{"jobType":"GALIAN","futureField":true}"#)
            .unwrap();

        let store = DraftStore::open(storage, RecordingNotifier::new());
        assert_eq!(store.get().job_type, "GALIAN");
        assert_eq!(store.get().planned, "");
        assert_eq!(store.get().materials.len(), 1);
        assert_eq!(store.notifier().count(NotifyLevel::Success), 1);
    }

    #[test]
    fn test_load_corrupted_falls_back() {
        let mut storage = MemoryStorage::new();
        storage.set(DEFAULT_STORAGE_KEY, "{ invalid json }").unwrap();

        let store = DraftStore::open(storage, RecordingNotifier::new());
        assert_eq!(store.get().job_type, "");
        assert_eq!(store.notifier().count(NotifyLevel::Error), 1);
    }

    #[test]
    fn test_save_failure_keeps_previous_value() {
        let mut store = DraftStore::open(MemoryStorage::with_quota(2048), RecordingNotifier::new());
        store.mutate(|d| d.issue = "OK".to_string());
        let before = store.storage().get(DEFAULT_STORAGE_KEY).unwrap();

        store.mutate(|d| d.before_photo = Some("x".repeat(4096)));

        assert_eq!(store.notifier().count(NotifyLevel::Error), 1);
        assert_eq!(store.storage().get(DEFAULT_STORAGE_KEY).unwrap(), before);
        // メモリ上の値はそのまま
        assert!(store.get().before_photo.is_some());
    }

    #[test]
    fn test_reset_clears_slot() {
        let mut store = open_empty();
        store.mutate(|d| d.job_type = "GALIAN".to_string());

        store.reset();

        assert_eq!(store.storage().get(DEFAULT_STORAGE_KEY).unwrap(), None);
        assert_eq!(store.get().job_type, "");
        assert_eq!(store.load().job_type, "");
    }

    #[test]
    fn test_custom_key() {
        let mut store = DraftStore::open_with_key(
            MemoryStorage::new(),
            RecordingNotifier::new(),
            "site-a",
        );
        store.mutate(|d| d.planned = "1".to_string());
        assert!(store.storage().get("site-a").unwrap().is_some());
        assert!(store.storage().get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }
}
