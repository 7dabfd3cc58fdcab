//! 帳票出力の共通部分
//!
//! ドラフトは読み取り専用で受け取る。

#[cfg(feature = "excel")]
pub mod report_xlsx;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;

/// 帳票の項目（キー, ラベル）
pub const REPORT_FIELDS: &[(&str, &str)] = &[
    ("date", "HARI/TANGGAL"),
    ("jobType", "JENIS PEKERJAAN"),
    ("stationStart", "STA. AWAL"),
    ("stationEnd", "STA. AKHIR"),
    ("length", "PANJANG"),
    ("planned", "RENCANA HARI INI"),
    ("actual", "REALISASI HARI INI"),
    ("deviation", "DEVIASI"),
];

pub const REPORT_TITLE: &str = "LAPORAN HARIAN PROYEK";

/// 出力ファイル名（拡張子なし）
pub fn report_file_stem(date: NaiveDate) -> String {
    format!("laporan_harian_{}", date.format("%Y-%m-%d"))
}

/// 写真データが base64 の data URL なら画像バイト列に戻す
pub fn decode_photo_payload(payload: &str) -> Option<Vec<u8>> {
    let (header, data) = payload.split_once(',')?;
    if !header.starts_with("data:") || !header.ends_with(";base64") {
        return None;
    }
    STANDARD.decode(data.trim()).ok()
}
