//! 使用資材の台帳
//!
//! 編集中の行（未選択の行を含む）を保持し、資材名の重複を許さない。
//! 「選択済み資材」は行から都度射影して求め、別に状態として持たない。
//! 保存形式は資材が選択された行だけの配列。

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// 既知資材と標準単位
pub const CANONICAL_UNITS: &[(&str, &str)] = &[
    ("SEMEN", "ZAK"),
    ("PASIR", "M3"),
    ("BATU PASANG", "M3"),
    ("BATU PECAH", "M3"),
];

/// 既知資材の標準単位を引く
pub fn canonical_unit(material: &str) -> Option<&'static str> {
    CANONICAL_UNITS
        .iter()
        .find(|(name, _)| *name == material)
        .map(|(_, unit)| *unit)
}

/// 保存形式の資材エントリ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialEntry {
    pub material: String,
    #[serde(alias = "qty")]
    pub quantity: String,
    #[serde(alias = "satuan")]
    pub unit: String,
}

/// 編集中の1行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialRow {
    /// 未選択なら None
    pub material: Option<String>,
    /// 数量（自由入力、ここでは検証しない）
    pub quantity: String,
    pub unit: String,
}

/// 台帳操作の拒否理由
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("資材行 {} は存在しません", .0 + 1)]
    RowOutOfRange(usize),

    #[error("この資材は既に選択されています: {0}")]
    DuplicateMaterial(String),

    #[error("資材行は最低1行必要です")]
    LastRow,

    #[error("資材名を入力してください")]
    EmptyMaterialName,
}

/// 資材台帳（常に1行以上）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<MaterialEntry>", into = "Vec<MaterialEntry>")]
pub struct MaterialLedger {
    rows: Vec<MaterialRow>,
}

impl Default for MaterialLedger {
    fn default() -> Self {
        Self {
            rows: vec![MaterialRow::default()],
        }
    }
}

impl From<Vec<MaterialEntry>> for MaterialLedger {
    fn from(entries: Vec<MaterialEntry>) -> Self {
        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(entries.len());

        for entry in entries {
            if entry.material.is_empty() {
                continue;
            }
            if !seen.insert(entry.material.clone()) {
                tracing::warn!(material = %entry.material, "重複した資材行を読み飛ばしました");
                continue;
            }
            rows.push(MaterialRow {
                material: Some(entry.material),
                quantity: entry.quantity,
                unit: entry.unit,
            });
        }

        if rows.is_empty() {
            return Self::default();
        }
        Self { rows }
    }
}

impl From<MaterialLedger> for Vec<MaterialEntry> {
    fn from(ledger: MaterialLedger) -> Self {
        ledger.entries()
    }
}

impl MaterialLedger {
    pub fn rows(&self) -> &[MaterialRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 台帳は常に1行以上あるため false
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 保存形式（未選択行を除く）
    pub fn entries(&self) -> Vec<MaterialEntry> {
        self.rows
            .iter()
            .filter_map(|row| {
                row.material.as_ref().map(|material| MaterialEntry {
                    material: material.clone(),
                    quantity: row.quantity.clone(),
                    unit: row.unit.clone(),
                })
            })
            .collect()
    }

    /// 選択済み資材（行から毎回射影する）
    pub fn selected(&self) -> HashSet<&str> {
        selected_materials(&self.rows)
    }

    /// 未選択の行を末尾に追加し、その行番号を返す
    pub fn add_row(&mut self) -> usize {
        self.rows.push(MaterialRow::default());
        self.rows.len() - 1
    }

    /// 行に資材を選択する
    ///
    /// 他の行で選択済みなら、その行を未選択に戻して拒否する。
    /// 既知資材なら標準単位を入れ、未知なら単位を空にする。
    pub fn select(&mut self, index: usize, material: &str) -> Result<(), LedgerError> {
        let material = normalize_name(material);
        if material.is_empty() {
            return Err(LedgerError::EmptyMaterialName);
        }
        self.check_duplicate(index, &material)?;

        let row = &mut self.rows[index];
        row.unit = canonical_unit(&material).unwrap_or_default().to_string();
        row.material = Some(material);
        Ok(())
    }

    /// 一覧に無い資材を単位付きで追加して行に選択する
    ///
    /// 単位が空なら標準単位、それも無ければ行の単位をそのまま残す。
    pub fn add_new_material(
        &mut self,
        index: usize,
        material: &str,
        unit: &str,
    ) -> Result<(), LedgerError> {
        let material = normalize_name(material);
        if material.is_empty() {
            return Err(LedgerError::EmptyMaterialName);
        }
        self.check_duplicate(index, &material)?;

        let unit = normalize_name(unit);
        let row = &mut self.rows[index];
        if !unit.is_empty() {
            row.unit = unit;
        } else if let Some(canonical) = canonical_unit(&material) {
            row.unit = canonical.to_string();
        }
        row.material = Some(material);
        Ok(())
    }

    pub fn set_quantity(&mut self, index: usize, quantity: &str) -> Result<(), LedgerError> {
        self.row_mut(index)?.quantity = quantity.to_string();
        Ok(())
    }

    pub fn set_unit(&mut self, index: usize, unit: &str) -> Result<(), LedgerError> {
        self.row_mut(index)?.unit = normalize_name(unit);
        Ok(())
    }

    /// 行を削除する（最後の1行は削除できない）
    pub fn remove_row(&mut self, index: usize) -> Result<MaterialRow, LedgerError> {
        if index >= self.rows.len() {
            return Err(LedgerError::RowOutOfRange(index));
        }
        if self.rows.len() == 1 {
            return Err(LedgerError::LastRow);
        }
        Ok(self.rows.remove(index))
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut MaterialRow, LedgerError> {
        self.rows.get_mut(index).ok_or(LedgerError::RowOutOfRange(index))
    }

    /// 他の行で選択済みか確認し、重複なら対象行を未選択に戻す（単位も消す）
    fn check_duplicate(&mut self, index: usize, material: &str) -> Result<(), LedgerError> {
        if index >= self.rows.len() {
            return Err(LedgerError::RowOutOfRange(index));
        }

        let taken = self
            .rows
            .iter()
            .enumerate()
            .any(|(i, row)| i != index && row.material.as_deref() == Some(material));

        if taken {
            let row = &mut self.rows[index];
            row.material = None;
            row.unit.clear();
            return Err(LedgerError::DuplicateMaterial(material.to_string()));
        }
        Ok(())
    }
}

/// 行の並びから選択済み資材の集合を求める
pub fn selected_materials(rows: &[MaterialRow]) -> HashSet<&str> {
    rows.iter().filter_map(|row| row.material.as_deref()).collect()
}

fn normalize_name(value: &str) -> String {
    value.trim().to_uppercase()
}
