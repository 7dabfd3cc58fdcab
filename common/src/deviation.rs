//! 計画・実績の差（デビエーション）算出
//!
//! 計算だけを行い、結果を構造体で返す。フィールドへの書き戻しと保存、
//! 「問題欄が必要」の通知は `DraftStore` 側で行う。

use crate::quantity::{format_magnitude, parse_quantity};
use serde::{Deserialize, Serialize};

/// 差の区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviationClass {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl DeviationClass {
    /// 差の値から区分を決める
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            DeviationClass::Positive
        } else if delta < 0.0 {
            DeviationClass::Negative
        } else {
            DeviationClass::Neutral
        }
    }

    /// 保存済みの表示文字列から区分を判定する（符号で判断）
    pub fn from_display(value: &str) -> Self {
        if value.contains('+') {
            DeviationClass::Positive
        } else if value.contains('-') {
            DeviationClass::Negative
        } else {
            DeviationClass::Neutral
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            DeviationClass::Positive => "positive",
            DeviationClass::Negative => "negative",
            DeviationClass::Neutral => "neutral",
        }
    }

    /// 帳票での文字色（RGB）
    pub fn color(&self) -> u32 {
        match self {
            DeviationClass::Positive => 0x27AE60,
            DeviationClass::Negative => 0xE74C3C,
            DeviationClass::Neutral => 0x666666,
        }
    }
}

impl std::fmt::Display for DeviationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// 算出結果
#[derive(Debug, Clone, PartialEq)]
pub struct Deviation {
    /// 整形後の計画値
    pub planned: String,
    /// 整形後の実績値
    pub actual: String,
    /// 符号付きの差（例: "+2.00 M3"）
    pub value: String,
    pub class: DeviationClass,
    /// 実績 - 計画
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeviationOutcome {
    /// 入力が空または数値として読めない（差をクリアする）
    Cleared,
    Computed(Deviation),
}

/// 計画・実績の入力から差を求める
///
/// 単位は実績側を優先し、無ければ計画側を使う。
pub fn compute_deviation(planned: &str, actual: &str) -> DeviationOutcome {
    if planned.is_empty() || actual.is_empty() {
        return DeviationOutcome::Cleared;
    }

    let planned = parse_quantity(planned);
    let actual = parse_quantity(actual);

    let (planned_value, actual_value) = match (planned.magnitude, actual.magnitude) {
        (Some(p), Some(a)) => (p, a),
        _ => return DeviationOutcome::Cleared,
    };

    let delta = actual_value - planned_value;
    let unit = if !actual.unit.is_empty() {
        actual.unit.as_str()
    } else {
        planned.unit.as_str()
    };

    let class = DeviationClass::from_delta(delta);
    let magnitude = format_magnitude(delta.abs(), unit);
    let value = match class {
        DeviationClass::Positive => format!("+{}", magnitude),
        DeviationClass::Negative => format!("-{}", magnitude),
        DeviationClass::Neutral => format_magnitude(0.0, unit),
    };

    DeviationOutcome::Computed(Deviation {
        planned: format_magnitude(planned_value, &planned.unit),
        actual: format_magnitude(actual_value, &actual.unit),
        value,
        class,
        delta,
    })
}
