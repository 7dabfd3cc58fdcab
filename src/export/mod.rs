//! 帳票ファイルの書き出し（CLI版）

use crate::error::{ReportError, Result};
use chrono::{Local, NaiveDate};
use daily_report_common::export::{report_file_stem, report_xlsx};
use daily_report_common::{validate_for_submission, Draft};
use std::path::{Path, PathBuf};

/// 出力ファイルパス（ディレクトリならファイル名を付ける）
pub fn output_path_for(output: &Path, date: NaiveDate) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.xlsx", report_file_stem(date)))
    } else {
        output.to_path_buf()
    }
}

/// 日報を Excel に書き出す
///
/// 提出条件を満たさないドラフトは書き出さない。
pub fn write_report(draft: &Draft, output: &Path, date: NaiveDate) -> Result<PathBuf> {
    let errors = validate_for_submission(draft);
    if !errors.is_empty() {
        return Err(ReportError::Validation(errors));
    }

    let output_path = output_path_for(output, date);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let generated_at = Local::now().format("%d/%m/%Y %H:%M").to_string();
    let buffer = report_xlsx::generate_report_buffer(draft, &generated_at)?;
    std::fs::write(&output_path, buffer)?;

    tracing::info!(path = %output_path.display(), "帳票を出力");
    Ok(output_path)
}
