//! 日報ドラフトの型定義
//!
//! 保存キーは camelCase。旧ブラウザ版で保存されたキー名（staAwal など）も
//! エイリアスとして読み込める。欠けているキーは既定値で補う。

use crate::date::today_label;
use crate::deviation::DeviationClass;
use crate::ledger::MaterialLedger;
use serde::{Deserialize, Serialize};

/// 作業中の日報（同時に1件のみ）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Draft {
    /// 報告日ラベル（例: "SENIN, 19 OKTOBER 2026"）
    pub date: String,

    #[serde(alias = "jenisPekerjaan")]
    pub job_type: String,         // 工種（空なら未選択）

    #[serde(alias = "staAwal")]
    pub station_start: String,    // 起点測点

    #[serde(alias = "staAkhir")]
    pub station_end: String,      // 終点測点

    #[serde(alias = "panjang")]
    pub length: String,           // 延長（測点から算出）

    pub before_photo: Option<String>,
    pub after_photo: Option<String>,

    #[serde(alias = "rencana")]
    pub planned: String,          // 本日計画

    #[serde(alias = "realisasi")]
    pub actual: String,           // 本日実績

    #[serde(alias = "deviasi")]
    pub deviation: String,        // 差（計画・実績から算出）

    #[serde(alias = "masalah")]
    pub issue: String,            // 問題点（差がマイナスなら必須）

    #[serde(alias = "bahan")]
    pub materials: MaterialLedger,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            date: today_label(),
            job_type: String::new(),
            station_start: String::new(),
            station_end: String::new(),
            length: String::new(),
            before_photo: None,
            after_photo: None,
            planned: String::new(),
            actual: String::new(),
            deviation: String::new(),
            issue: String::new(),
            materials: MaterialLedger::default(),
        }
    }
}

impl Draft {
    pub fn station(&self, field: StationField) -> &str {
        match field {
            StationField::Start => &self.station_start,
            StationField::End => &self.station_end,
        }
    }

    pub fn station_mut(&mut self, field: StationField) -> &mut String {
        match field {
            StationField::Start => &mut self.station_start,
            StationField::End => &mut self.station_end,
        }
    }

    pub fn photo(&self, slot: PhotoSlot) -> Option<&str> {
        match slot {
            PhotoSlot::Before => self.before_photo.as_deref(),
            PhotoSlot::After => self.after_photo.as_deref(),
        }
    }

    pub fn photo_mut(&mut self, slot: PhotoSlot) -> &mut Option<String> {
        match slot {
            PhotoSlot::Before => &mut self.before_photo,
            PhotoSlot::After => &mut self.after_photo,
        }
    }

    /// 保存済みの差の表示から区分を判定
    pub fn deviation_class(&self) -> DeviationClass {
        DeviationClass::from_display(&self.deviation)
    }

    /// 差がマイナスで問題欄が空か
    pub fn issue_required(&self) -> bool {
        self.deviation_class() == DeviationClass::Negative && self.issue.trim().is_empty()
    }
}

/// 測点フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationField {
    Start,
    End,
}

impl std::str::FromStr for StationField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" | "awal" => Ok(StationField::Start),
            "end" | "akhir" => Ok(StationField::End),
            _ => Err(format!("Unknown station field: {}. Use start or end", s)),
        }
    }
}

impl std::fmt::Display for StationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StationField::Start => write!(f, "起点"),
            StationField::End => write!(f, "終点"),
        }
    }
}

/// 写真の枠
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSlot {
    Before,
    After,
}

impl std::str::FromStr for PhotoSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "before" | "sebelum" => Ok(PhotoSlot::Before),
            "after" | "sesudah" => Ok(PhotoSlot::After),
            _ => Err(format!("Unknown photo slot: {}. Use before or after", s)),
        }
    }
}

impl std::fmt::Display for PhotoSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhotoSlot::Before => write!(f, "施工前"),
            PhotoSlot::After => write!(f, "施工後"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_default() {
        let draft = Draft::default();
        assert!(!draft.date.is_empty());
        assert_eq!(draft.job_type, "");
        assert_eq!(draft.before_photo, None);
        assert_eq!(draft.materials.len(), 1);
    }

    #[test]
    fn test_draft_serialize_keys() {
        let draft = Draft {
            job_type: "GALIAN".to_string(),
            station_start: "0+100".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_string(&draft).expect("シリアライズ失敗");
        assert!(json.contains("\"jobType\":\"GALIAN\""));
        assert!(json.contains("\"stationStart\":\"0+100\""));
        assert!(json.contains("\"beforePhoto\":null"));
        assert!(json.contains("\"materials\":[]"));
    }

    #[test]
    fn test_draft_deserialize_partial() {
        let json = r#"{ "date": "SENIN, 19 OKTOBER 2026", "planned": "10 M3" }"#;
        let draft: Draft = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(draft.date, "SENIN, 19 OKTOBER 2026");
        assert_eq!(draft.planned, "10 M3");
        assert_eq!(draft.actual, "");
        assert_eq!(draft.materials.len(), 1);
    }

    #[test]
    fn test_draft_deserialize_legacy_keys() {
        let json = r#"{
            "jenisPekerjaan": "PASANGAN BATU",
            "staAwal": "0+100",
            "staAkhir": "0+350",
            "panjang": "250.00 METER",
            "rencana": "10.00 M3",
            "realisasi": "8.00 M3",
            "deviasi": "-2.00 M3",
            "masalah": "HUJAN",
            "bahan": [{"material": "SEMEN", "qty": "20", "satuan": "ZAK"}],
            "unknownKey": 42
        }"#;
        let draft: Draft = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(draft.job_type, "PASANGAN BATU");
        assert_eq!(draft.length, "250.00 METER");
        assert_eq!(draft.issue, "HUJAN");
        assert_eq!(draft.materials.entries()[0].quantity, "20");
        assert_eq!(draft.deviation_class(), DeviationClass::Negative);
        assert!(!draft.issue_required());
    }

    #[test]
    fn test_station_field_from_str() {
        assert_eq!("start".parse::<StationField>(), Ok(StationField::Start));
        assert_eq!("AKHIR".parse::<StationField>(), Ok(StationField::End));
        assert!("middle".parse::<StationField>().is_err());
    }

    #[test]
    fn test_photo_slot_from_str() {
        assert_eq!("before".parse::<PhotoSlot>(), Ok(PhotoSlot::Before));
        assert_eq!("Sesudah".parse::<PhotoSlot>(), Ok(PhotoSlot::After));
    }
}
