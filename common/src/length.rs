//! 施工延長の算出
//!
//! 正規形の測点 2 つ（`km+m`）から距離（m）を求める。

use crate::quantity::format_magnitude;
use regex::Regex;

/// 測点が読めない場合に延長欄へ入れる値
pub const INVALID_STATION_FORMAT: &str = "Format STA tidak valid";

/// 延長の単位表記
pub const LENGTH_UNIT: &str = "METER";

/// 正規形の測点を (km, m) に分解する
///
/// 桁数の多い km でも読めるよう f64 で持つ。
pub fn parse_station(station: &str) -> Option<(f64, f64)> {
    lazy_static::lazy_static! {
        static ref KM_M_RE: Regex = Regex::new(r"([0-9]+)\+([0-9]+)").unwrap();
    }

    let caps = KM_M_RE.captures(station)?;
    let km = caps[1].parse().ok()?;
    let meter = caps[2].parse().ok()?;
    Some((km, meter))
}

/// 起点・終点から延長文字列を求める
///
/// - どちらかが空 → 空文字
/// - どちらかが読めない → [`INVALID_STATION_FORMAT`]
/// - それ以外 → `"<m(小数2桁)> METER"`
pub fn compute_length(start: &str, end: &str) -> String {
    if start.is_empty() || end.is_empty() {
        return String::new();
    }

    let (start, end) = match (parse_station(start), parse_station(end)) {
        (Some(start), Some(end)) => (start, end),
        _ => return INVALID_STATION_FORMAT.to_string(),
    };

    let start_m = start.0 * 1000.0 + start.1;
    let end_m = end.0 * 1000.0 + end.1;

    format_magnitude((end_m - start_m).abs(), LENGTH_UNIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_station() {
        assert_eq!(parse_station("1+234 R"), Some((1.0, 234.0)));
        assert_eq!(parse_station("0+050"), Some((0.0, 50.0)));
        assert_eq!(parse_station("1234"), None);
    }

    #[test]
    fn test_compute_length() {
        assert_eq!(compute_length("0+100", "0+350"), "250.00 METER");
        assert_eq!(compute_length("1+200 R", "0+950 R"), "250.00 METER");
        assert_eq!(compute_length("12+345 L", "12+345 L"), "0.00 METER");
    }

    #[test]
    fn test_compute_length_empty() {
        assert_eq!(compute_length("", "0+350"), "");
        assert_eq!(compute_length("0+100", ""), "");
    }

    #[test]
    fn test_compute_length_invalid() {
        assert_eq!(compute_length("abc", "0+350"), INVALID_STATION_FORMAT);
        assert_eq!(compute_length("0+100", "350"), INVALID_STATION_FORMAT);
    }

    #[test]
    fn test_compute_length_long_km() {
        let start = "99999999999999999999+999";
        assert!(parse_station(start).is_some());
        assert_ne!(compute_length(start, start), INVALID_STATION_FORMAT);
        assert_eq!(compute_length(start, start), "0.00 METER");
    }

    #[test]
    fn test_compute_length_idempotent() {
        let first = compute_length("0+100", "2+005");
        let second = compute_length("0+100", "2+005");
        assert_eq!(first, second);
        assert_eq!(first, "1905.00 METER");
    }
}
