//! 入力操作
//!
//! 画面側はフィールドの生の値が変わったあと、派生フィールドを読む前に
//! ここの操作を呼ぶ。どの操作も最後にドラフト全体を 1 回保存する。

use crate::date::format_date_label;
use crate::deviation::{compute_deviation, DeviationClass, DeviationOutcome};
use crate::ledger::{LedgerError, MaterialLedger};
use crate::length::compute_length;
use crate::notify::{Notifier, NotifyLevel};
use crate::station::{format_station, StationFormat};
use crate::storage::Storage;
use crate::store::DraftStore;
use crate::types::{PhotoSlot, StationField};
use crate::validation::validate_for_submission;
use chrono::NaiveDate;

/// 差の算出結果（表示側が色分けや注意表示に使う）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviationReport {
    pub value: String,
    pub class: DeviationClass,
    /// 差がマイナスで問題欄が空
    pub issue_required: bool,
}

impl<S: Storage, N: Notifier> DraftStore<S, N> {
    // ---- 日付・工種 ----

    pub fn set_date(&mut self, date: NaiveDate) {
        let label = format_date_label(date);
        self.mutate(|d| d.date = label);
    }

    /// 一覧から工種を選ぶ（空なら何もしない）
    pub fn select_job_type(&mut self, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        self.mutate(|d| d.job_type = value.to_string());
        self.notify(&format!("工種を選択しました: {}", value), NotifyLevel::Success);
    }

    /// 一覧に無い工種を追加して選ぶ
    pub fn add_job_type(&mut self, name: &str) -> bool {
        let name = name.trim().to_uppercase();
        if name.is_empty() {
            self.notify("工種を入力してください", NotifyLevel::Warning);
            return false;
        }
        self.mutate(|d| d.job_type = name);
        self.notify("新しい工種を追加しました", NotifyLevel::Success);
        true
    }

    // ---- 測点・延長 ----

    /// 測点を整形して保存し、延長も算出し直す
    ///
    /// 形式に合わない入力はそのまま残す（通知しない）。
    pub fn format_station(&mut self, field: StationField, raw: &str) -> StationFormat {
        let format = format_station(raw);
        let value = format.clone().resolve(raw);

        self.mutate(|d| {
            *d.station_mut(field) = value;
            d.length = compute_length(&d.station_start, &d.station_end);
        });
        format
    }

    /// 起点・終点から延長を算出する
    pub fn calculate_length(&mut self) -> String {
        self.mutate(|d| {
            d.length = compute_length(&d.station_start, &d.station_end);
            d.length.clone()
        })
    }

    // ---- 計画・実績・差 ----

    /// 入力中の計画値を保存する（差はまだ算出しない）
    pub fn set_planned(&mut self, raw: &str) {
        self.mutate(|d| d.planned = raw.to_string());
    }

    /// 入力中の実績値を保存する（差はまだ算出しない）
    pub fn set_actual(&mut self, raw: &str) {
        self.mutate(|d| d.actual = raw.to_string());
    }

    /// 差を算出し、計画・実績を整形し直して保存する
    ///
    /// 入力確定時（フォーカスが外れた時）に呼ぶ。
    pub fn calculate_deviation(&mut self) -> DeviationReport {
        let report = self.mutate(|d| {
            let class = match compute_deviation(&d.planned, &d.actual) {
                DeviationOutcome::Cleared => {
                    d.deviation.clear();
                    DeviationClass::Neutral
                }
                DeviationOutcome::Computed(deviation) => {
                    d.planned = deviation.planned;
                    d.actual = deviation.actual;
                    d.deviation = deviation.value;
                    deviation.class
                }
            };
            DeviationReport {
                value: d.deviation.clone(),
                class,
                issue_required: class == DeviationClass::Negative && d.issue.trim().is_empty(),
            }
        });

        if report.issue_required {
            self.notify(
                "差がマイナスです。問題欄を入力してください",
                NotifyLevel::Warning,
            );
        }
        report
    }

    /// 問題欄を保存する
    ///
    /// 差がマイナスで、入力により必須条件を満たした場合に true。
    pub fn set_issue(&mut self, text: &str) -> bool {
        self.mutate(|d| {
            d.issue = text.to_string();
            d.deviation_class() == DeviationClass::Negative && !d.issue.trim().is_empty()
        })
    }

    /// 読み込み直後に派生フィールドを揃える
    pub fn recalculate(&mut self) -> DeviationReport {
        self.calculate_length();
        self.calculate_deviation()
    }

    // ---- 写真 ----

    /// 写真データ（中身は解釈しない）を保存する
    pub fn set_photo(&mut self, slot: PhotoSlot, payload: String) {
        self.mutate(|d| *d.photo_mut(slot) = Some(payload));
        self.notify(&format!("{}写真を保存しました", slot), NotifyLevel::Success);
    }

    pub fn remove_photo(&mut self, slot: PhotoSlot) {
        self.mutate(|d| *d.photo_mut(slot) = None);
        self.notify(&format!("{}写真を削除しました", slot), NotifyLevel::Info);
    }

    // ---- 資材 ----

    /// 未選択の資材行を追加し、その行番号を返す
    pub fn add_material_row(&mut self) -> usize {
        let index = self.mutate(|d| d.materials.add_row());
        self.notify("資材行を追加しました", NotifyLevel::Success);
        index
    }

    /// 資材を選ぶ（他の行で選択済みなら未選択に戻して警告）
    pub fn select_material(&mut self, index: usize, material: &str) -> bool {
        self.ledger_op(|ledger| ledger.select(index, material)).is_some()
    }

    /// 一覧に無い資材を単位付きで追加して選ぶ
    pub fn add_new_material(&mut self, index: usize, material: &str, unit: &str) -> bool {
        let added = self
            .ledger_op(|ledger| ledger.add_new_material(index, material, unit))
            .is_some();
        if added {
            self.notify("新しい資材を追加しました", NotifyLevel::Success);
        }
        added
    }

    pub fn set_material_quantity(&mut self, index: usize, quantity: &str) -> bool {
        self.ledger_op(|ledger| ledger.set_quantity(index, quantity)).is_some()
    }

    pub fn set_material_unit(&mut self, index: usize, unit: &str) -> bool {
        self.ledger_op(|ledger| ledger.set_unit(index, unit)).is_some()
    }

    /// 資材行を削除する（最後の1行は残す）
    pub fn remove_material_row(&mut self, index: usize) -> bool {
        let removed = self.ledger_op(|ledger| ledger.remove_row(index)).is_some();
        if removed {
            self.notify("資材行を削除しました", NotifyLevel::Info);
        }
        removed
    }

    /// 選択済み資材（行から都度求める）
    pub fn selected_materials(&self) -> Vec<String> {
        let mut selected: Vec<String> = self
            .get()
            .materials
            .selected()
            .into_iter()
            .map(str::to_string)
            .collect();
        selected.sort();
        selected
    }

    /// 台帳を操作して保存し、拒否された場合は警告を出す
    fn ledger_op<T>(
        &mut self,
        op: impl FnOnce(&mut MaterialLedger) -> Result<T, LedgerError>,
    ) -> Option<T> {
        match self.mutate(|d| op(&mut d.materials)) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "資材台帳の操作を拒否");
                self.notify(&e.to_string(), NotifyLevel::Warning);
                None
            }
        }
    }

    // ---- 提出 ----

    /// 提出前の検証。問題ごとに警告を出し、一覧を返す（空なら提出可）
    pub fn check_submission(&self) -> Vec<String> {
        let errors = validate_for_submission(self.get());
        for error in &errors {
            self.notify(error, NotifyLevel::Warning);
        }
        errors
    }
}
