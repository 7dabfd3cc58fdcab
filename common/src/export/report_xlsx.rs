//! 日報の Excel 出力
//!
//! 1 シートに項目表、問題点、使用資材、施工前後の写真を並べる。

use super::{decode_photo_payload, REPORT_FIELDS, REPORT_TITLE};
use crate::error::{Error, Result};
use crate::types::{Draft, PhotoSlot};
use rust_xlsxwriter::*;

const LABEL_COL_PX: u32 = 180;
const VALUE_COL_PX: u32 = 220;
const UNIT_COL_PX: u32 = 120;
const ROW_PX: u32 = 20;
const PHOTO_WIDTH_PX: f64 = 400.0;

/// 項目の値（空なら "-"）
fn field_value<'a>(draft: &'a Draft, key: &str) -> &'a str {
    let value = match key {
        "date" => &draft.date,
        "jobType" => &draft.job_type,
        "stationStart" => &draft.station_start,
        "stationEnd" => &draft.station_end,
        "length" => &draft.length,
        "planned" => &draft.planned,
        "actual" => &draft.actual,
        "deviation" => &draft.deviation,
        _ => "",
    };
    if value.is_empty() { "-" } else { value }
}

fn export_err(context: &str, e: impl std::fmt::Display) -> Error {
    Error::Export(format!("{}: {}", context, e))
}

/// 日報を Excel バッファに出力する
///
/// # Arguments
/// * `draft` - 出力するドラフト
/// * `generated_at` - 出力日時の表示文字列
pub fn generate_report_buffer(draft: &Draft, generated_at: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let title_format = Format::new()
        .set_bold()
        .set_font_size(16.0)
        .set_font_color(Color::RGB(0x007BFF))
        .set_align(FormatAlign::Center);

    let subtitle_format = Format::new()
        .set_font_size(9.0)
        .set_font_color(Color::RGB(0x666666))
        .set_align(FormatAlign::Center);

    let label_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF8F9FA))
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xDDDDDD));

    let value_format = Format::new()
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xDDDDDD));

    let deviation_format = value_format
        .clone()
        .set_bold()
        .set_font_color(Color::RGB(draft.deviation_class().color()));

    let heading_format = Format::new().set_bold().set_font_color(Color::RGB(0x28A745));

    let issue_heading_format = Format::new().set_bold().set_font_color(Color::RGB(0xDC3545));

    let issue_format = Format::new()
        .set_text_wrap()
        .set_align(FormatAlign::Top)
        .set_background_color(Color::RGB(0xFFF3CD))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xFFEAA7));

    let table_header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x28A745))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xDDDDDD));

    let table_cell_format = Format::new()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xDDDDDD));

    let footer_format = Format::new()
        .set_italic()
        .set_font_size(8.0)
        .set_font_color(Color::RGB(0x666666))
        .set_align(FormatAlign::Center);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("LAPORAN")
        .map_err(|e| export_err("シート名設定エラー", e))?;

    worksheet
        .set_column_width_pixels(0, LABEL_COL_PX)
        .map_err(|e| export_err("列幅設定エラー", e))?;
    worksheet
        .set_column_width_pixels(1, VALUE_COL_PX)
        .map_err(|e| export_err("列幅設定エラー", e))?;
    worksheet
        .set_column_width_pixels(2, UNIT_COL_PX)
        .map_err(|e| export_err("列幅設定エラー", e))?;

    // タイトル
    worksheet
        .merge_range(0, 0, 0, 2, REPORT_TITLE, &title_format)
        .map_err(|e| export_err("タイトル書き込みエラー", e))?;
    worksheet
        .merge_range(1, 0, 1, 2, &format!("Generated on {}", generated_at), &subtitle_format)
        .map_err(|e| export_err("タイトル書き込みエラー", e))?;

    // 項目表（A列:ラベル、B-C列:値）
    let mut row: u32 = 3;
    for (key, label) in REPORT_FIELDS {
        let format = if *key == "deviation" { &deviation_format } else { &value_format };
        worksheet
            .write_string_with_format(row, 0, *label, &label_format)
            .map_err(|e| export_err("ラベル書き込みエラー", e))?;
        worksheet
            .merge_range(row, 1, row, 2, field_value(draft, key), format)
            .map_err(|e| export_err("値書き込みエラー", e))?;
        row += 1;
    }
    row += 1;

    // 問題点
    if !draft.issue.trim().is_empty() {
        worksheet
            .write_string_with_format(row, 0, "MASALAH:", &issue_heading_format)
            .map_err(|e| export_err("問題点書き込みエラー", e))?;
        row += 1;

        let lines = draft.issue.lines().count().max(1) as u32;
        worksheet
            .set_row_height_pixels(row, ROW_PX * (lines + 1))
            .map_err(|e| export_err("行高さ設定エラー", e))?;
        worksheet
            .merge_range(row, 0, row, 2, &draft.issue, &issue_format)
            .map_err(|e| export_err("問題点書き込みエラー", e))?;
        row += 2;
    }

    // 使用資材
    let entries = draft.materials.entries();
    if !entries.is_empty() {
        worksheet
            .write_string_with_format(row, 0, "BAHAN YANG DIGUNAKAN:", &heading_format)
            .map_err(|e| export_err("資材書き込みエラー", e))?;
        row += 1;

        for (col, header) in ["MATERIAL", "QTY", "SATUAN"].iter().enumerate() {
            worksheet
                .write_string_with_format(row, col as u16, *header, &table_header_format)
                .map_err(|e| export_err("資材書き込みエラー", e))?;
        }
        row += 1;

        for entry in &entries {
            worksheet
                .write_string_with_format(row, 0, &entry.material, &value_format)
                .map_err(|e| export_err("資材書き込みエラー", e))?;
            worksheet
                .write_string_with_format(row, 1, &entry.quantity, &table_cell_format)
                .map_err(|e| export_err("資材書き込みエラー", e))?;
            worksheet
                .write_string_with_format(row, 2, &entry.unit, &table_cell_format)
                .map_err(|e| export_err("資材書き込みエラー", e))?;
            row += 1;
        }
        row += 1;
    }

    // 写真（data URL 以外や未対応形式は載せない）
    for (slot, label) in [(PhotoSlot::Before, "FOTO SEBELUM"), (PhotoSlot::After, "FOTO SESUDAH")] {
        let Some(bytes) = draft.photo(slot).and_then(decode_photo_payload) else {
            continue;
        };
        let image = match Image::new_from_buffer(&bytes) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(slot = %slot, error = %e, "写真を帳票に載せられません");
                continue;
            }
        };

        worksheet
            .write_string_with_format(row, 0, label, &heading_format)
            .map_err(|e| export_err("写真見出し書き込みエラー", e))?;
        row += 1;

        let scale = if image.width() > PHOTO_WIDTH_PX {
            PHOTO_WIDTH_PX / image.width()
        } else {
            1.0
        };
        let height_px = image.height() * scale;
        let image = image
            .set_scale_width(scale)
            .set_scale_height(scale)
            .set_object_movement(ObjectMovement::DontMoveOrSizeWithCells);

        worksheet
            .insert_image_with_offset(row, 0, &image, 0, 0)
            .map_err(|e| export_err("画像埋め込みエラー", e))?;
        row += (height_px / ROW_PX as f64).ceil() as u32 + 1;
    }

    row += 1;
    worksheet
        .merge_range(
            row,
            0,
            row,
            2,
            "Laporan ini digenerate secara otomatis oleh Sistem Laporan Harian Proyek",
            &footer_format,
        )
        .map_err(|e| export_err("フッター書き込みエラー", e))?;

    workbook
        .save_to_buffer()
        .map_err(|e| export_err("Excel保存エラー", e))
}
