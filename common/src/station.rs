//! 測点（STA）の整形
//!
//! 「1234R」のような入力を「1+234 R」（km+m 方向）の正規形に揃える。
//! 形式に合わない入力はそのまま残し、通知もしない（提出時の検証に任せる）。

use regex::Regex;

/// 測点整形の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationFormat {
    /// 空入力（何もしない）
    Empty,
    /// 形式不一致（入力をそのまま残す）
    Unmatched,
    /// 正規形
    Formatted(String),
}

impl StationFormat {
    /// フィールドに残る値を返す
    pub fn resolve(self, raw: &str) -> String {
        match self {
            StationFormat::Empty => String::new(),
            StationFormat::Unmatched => raw.to_string(),
            StationFormat::Formatted(value) => value,
        }
    }
}

/// 測点入力を正規形に整形する
///
/// - 数字を左ゼロ詰めで4桁以上にする
/// - 末尾3桁を m、残りを km として `km+mmm` にする
/// - 方向（1文字）があれば空白区切りで付ける
///
/// ```
/// use daily_report_common::station::{format_station, StationFormat};
///
/// assert_eq!(format_station("1234r"), StationFormat::Formatted("1+234 R".into()));
/// assert_eq!(format_station("123"), StationFormat::Formatted("0+123".into()));
/// ```
pub fn format_station(raw: &str) -> StationFormat {
    let value = raw.trim().to_uppercase();
    if value.is_empty() {
        return StationFormat::Empty;
    }

    lazy_static::lazy_static! {
        static ref STATION_INPUT_RE: Regex = Regex::new(r"^([0-9]+)\s*([A-Z]?)$").unwrap();
    }

    let caps = match STATION_INPUT_RE.captures(&value) {
        Some(caps) => caps,
        None => return StationFormat::Unmatched,
    };

    let padded = format!("{:0>4}", &caps[1]);
    let (km, meter) = padded.split_at(padded.len() - 3);
    let km = if km.is_empty() { "0" } else { km };

    let direction = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    if direction.is_empty() {
        StationFormat::Formatted(format!("{}+{}", km, meter))
    } else {
        StationFormat::Formatted(format!("{}+{} {}", km, meter, direction))
    }
}
