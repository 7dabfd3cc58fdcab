use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use daily_report_common::{PhotoSlot, StationField};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "daily-report")]
#[command(about = "工事日報ドラフトの入力・帳票出力ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// ドラフトの保存キー（省略時は設定値）
    #[arg(long, global = true)]
    pub key: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ドラフトを表示
    Show {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 日付を設定（省略時は今日）
    Date {
        /// 日付 (YYYY-MM-DD)
        date: Option<NaiveDate>,
    },

    /// 工種を選択/追加
    JobType {
        /// 工種名
        #[arg(required = true)]
        name: String,

        /// 一覧に無い工種として追加
        #[arg(long)]
        new: bool,
    },

    /// 測点を入力（例: 1250 → 1+250）
    Station {
        /// 対象 (start/end)
        field: StationField,

        /// 測点（空文字でクリア）
        value: String,
    },

    /// 本日計画を入力（例: 10 M3）
    Plan {
        value: String,
    },

    /// 本日実績を入力（例: 8.5 M3）
    Actual {
        value: String,
    },

    /// 問題点を入力
    Issue {
        text: String,
    },

    /// 資材台帳
    Material {
        #[command(subcommand)]
        action: MaterialAction,
    },

    /// 施工前/施工後の写真
    Photo {
        #[command(subcommand)]
        action: PhotoAction,
    },

    /// 延長・差を算出し直す
    Recalc,

    /// 提出前チェック
    Validate,

    /// 日報をExcelに出力
    Export {
        /// 出力ファイル/ディレクトリ（省略時は設定値）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },

    /// ドラフトを破棄して初期状態に戻す
    Reset {
        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },

    /// 設定を表示/編集
    Config {
        /// ドラフト保存先を設定
        #[arg(long)]
        set_storage_dir: Option<PathBuf>,

        /// 帳票出力先を設定
        #[arg(long)]
        set_report_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 資材行の操作（行番号は 1 始まり）
#[derive(Subcommand)]
pub enum MaterialAction {
    /// 空の資材行を追加
    Add,

    /// 行の資材を選択
    Select {
        row: usize,
        material: String,
    },

    /// 一覧に無い資材を追加して選択
    New {
        row: usize,
        material: String,
        /// 単位（例: M3, ZAK）
        unit: String,
    },

    /// 数量を入力
    Qty {
        row: usize,
        quantity: String,
    },

    /// 単位を変更
    Unit {
        row: usize,
        unit: String,
    },

    /// 資材行を削除
    Remove {
        row: usize,
    },

    /// 資材行と選択済み資材を表示
    List,
}

#[derive(Subcommand)]
pub enum PhotoAction {
    /// 写真ファイルを設定
    Set {
        /// 対象 (before/after)
        slot: PhotoSlot,

        /// 写真ファイル（jpg/png）
        #[arg(required = true)]
        path: PathBuf,
    },

    /// 写真を削除
    Remove {
        /// 対象 (before/after)
        slot: PhotoSlot,

        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },
}

/// 1 始まりの行番号を添字にする（0 は None）
pub fn row_index(row: usize) -> Option<usize> {
    row.checked_sub(1)
}
