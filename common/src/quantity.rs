//! 数量（数値＋単位）のパース
//!
//! 「12.5 M3」「10cbm」のような自由入力から数値と単位を取り出す。
//! パースできない場合もエラーにはせず、`magnitude = None` を返す。

use regex::Regex;

/// 単位の表記ゆれ（大文字小文字を区別しない）→ 正規形
const UNIT_SYNONYMS: &[(&str, &str)] = &[
    ("m3", "M3"),
    ("cbm", "CBM"),
];

/// 数量のパース結果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Quantity {
    /// 数値（パース不能・空の場合は None。0 とは区別する）
    pub magnitude: Option<f64>,
    /// 単位（無ければ空文字）
    pub unit: String,
}

/// 自由入力を数値と単位に分解する
///
/// 1. 前後の空白を除去して大文字化（空なら `{None, ""}`）
/// 2. `数値 単位?` の全体パターンで照合
/// 3. 失敗したら先頭の数値と末尾の英数字を個別に抽出
pub fn parse_quantity(text: &str) -> Quantity {
    let value = text.trim().to_uppercase();
    if value.is_empty() {
        return Quantity::default();
    }

    lazy_static::lazy_static! {
        static ref FULL_RE: Regex = Regex::new(r"^([0-9.]+)\s*([A-Z0-9]+)?$").unwrap();
        static ref NUMBER_RE: Regex = Regex::new(r"^([0-9.]+)").unwrap();
        static ref UNIT_RE: Regex = Regex::new(r"([A-Z0-9]+)$").unwrap();
    }

    if let Some(caps) = FULL_RE.captures(&value) {
        return Quantity {
            magnitude: parse_float_prefix(&caps[1]),
            unit: caps.get(2).map(|m| normalize_unit(m.as_str())).unwrap_or_default(),
        };
    }

    let magnitude = NUMBER_RE
        .captures(&value)
        .and_then(|caps| parse_float_prefix(&caps[1]));
    let unit = UNIT_RE
        .captures(&value)
        .map(|caps| normalize_unit(&caps[1]))
        .unwrap_or_default();

    Quantity { magnitude, unit }
}

/// 数値を小数2桁にして単位を付ける
///
/// ちょうど中間の値は切り上げる（0.125 → 0.13）。
pub fn format_magnitude(magnitude: f64, unit: &str) -> String {
    let magnitude = round_cents(magnitude);
    if unit.is_empty() {
        format!("{:.2}", magnitude)
    } else {
        format!("{:.2} {}", magnitude, unit)
    }
}

/// 小数2桁に丸める（中間値は 0 から遠い方へ）
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 単位の表記ゆれを正規形に揃える
pub fn normalize_unit(unit: &str) -> String {
    UNIT_SYNONYMS
        .iter()
        .find(|(synonym, _)| synonym.eq_ignore_ascii_case(unit))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| unit.to_string())
}

/// 数字と小数点の並びから、先頭の有効な小数部分だけを読む（"1.2.3" → 1.2）
fn parse_float_prefix(run: &str) -> Option<f64> {
    lazy_static::lazy_static! {
        static ref FLOAT_RE: Regex = Regex::new(r"^([0-9]+(?:\.[0-9]*)?|\.[0-9]+)").unwrap();
    }

    FLOAT_RE
        .captures(run)
        .and_then(|caps| caps[1].trim_end_matches('.').parse::<f64>().ok())
}
