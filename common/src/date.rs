//! 報告日の表示ラベル（インドネシア語表記）

use chrono::{Datelike, Local, NaiveDate};

const DAY_NAMES: [&str; 7] = [
    "MINGGU", "SENIN", "SELASA", "RABU", "KAMIS", "JUMAT", "SABTU",
];

const MONTH_NAMES: [&str; 12] = [
    "JANUARI", "FEBRUARI", "MARET", "APRIL", "MEI", "JUNI", "JULI",
    "AGUSTUS", "SEPTEMBER", "OKTOBER", "NOVEMBER", "DESEMBER",
];

/// 日付を「SENIN, 19 OKTOBER 2026」形式にする
pub fn format_date_label(date: NaiveDate) -> String {
    let day = DAY_NAMES[date.weekday().num_days_from_sunday() as usize];
    let month = MONTH_NAMES[date.month0() as usize];
    format!("{}, {} {} {}", day, date.day(), month, date.year())
}

/// 今日の日付ラベル
pub fn today_label() -> String {
    format_date_label(today())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_label() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(format_date_label(date), "SENIN, 19 OKTOBER 2026");
    }

    #[test]
    fn test_format_date_label_sunday() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_date_label(date), "MINGGU, 5 JANUARI 2025");
    }
}
