//! 提出前の検証

use crate::types::Draft;

/// 提出を止める問題を文言の一覧で返す（空なら提出可）
pub fn validate_for_submission(draft: &Draft) -> Vec<String> {
    let mut errors = Vec::new();

    if draft.job_type.trim().is_empty() {
        errors.push("工種を選択してください".to_string());
    }

    if draft.issue_required() {
        errors.push("差がマイナスの場合は問題欄を入力してください".to_string());
    }

    if draft.materials.selected().is_empty() {
        errors.push("資材を1つ以上選択してください".to_string());
    }

    errors
}
