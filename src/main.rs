use anyhow::{bail, Context, Result};
use clap::Parser;
use daily_report::{cli, config, export, logging, notifier, photo, storage};
use cli::{row_index, Cli, Commands, MaterialAction, PhotoAction};
use config::Config;
use daily_report_common::date::today;
use daily_report_common::{DeviationClass, DeviationReport, DraftStore};
use dialoguer::Confirm;
use notifier::ConsoleNotifier;
use storage::FileStorage;

type Store = DraftStore<FileStorage, ConsoleNotifier>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = Config::load().context("設定の読み込みに失敗しました")?;
    let storage_dir = config.storage_dir()?;
    let key = cli.key.clone().unwrap_or_else(|| config.storage_key.clone());
    tracing::debug!(dir = %storage_dir.display(), key = %key, "ドラフト保存先");

    let quiet = matches!(cli.command, Commands::Show { json: true });
    let notifier = if quiet { ConsoleNotifier::quiet() } else { ConsoleNotifier::new() };
    let mut store = Store::open_with_key(FileStorage::new(storage_dir), notifier, key);

    match cli.command {
        Commands::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.get())?);
            } else {
                print_draft(&store);
            }
        }

        Commands::Date { date } => {
            store.set_date(date.unwrap_or_else(today));
            println!("日付: {}", store.get().date);
        }

        Commands::JobType { name, new } => {
            if new {
                store.add_job_type(&name);
            } else {
                store.select_job_type(&name);
            }
        }

        Commands::Station { field, value } => {
            store.format_station(field, &value);
            let draft = store.get();
            println!("{}: {}", field, draft.station(field));
            println!("延長: {}", or_dash(&draft.length));
        }

        Commands::Plan { value } => {
            store.set_planned(&value);
            let report = store.calculate_deviation();
            print_deviation(&store, &report);
        }

        Commands::Actual { value } => {
            store.set_actual(&value);
            let report = store.calculate_deviation();
            print_deviation(&store, &report);
        }

        Commands::Issue { text } => {
            if store.set_issue(&text) {
                println!("✔ 問題点が入力されました");
            }
        }

        Commands::Material { action } => run_material(&mut store, action)?,

        Commands::Photo { action } => match action {
            PhotoAction::Set { slot, path } => {
                let payload = photo::load_photo_payload(&path, config.max_photo_bytes)
                    .with_context(|| format!("写真を読み込めません: {}", path.display()))?;
                store.set_photo(slot, payload);
            }
            PhotoAction::Remove { slot, yes } => {
                if store.get().photo(slot).is_none() {
                    println!("{}写真は未設定です", slot);
                } else if yes || confirm(&format!("{}写真を削除しますか?", slot))? {
                    store.remove_photo(slot);
                }
            }
        },

        Commands::Recalc => {
            let report = store.recalculate();
            println!("延長: {}", or_dash(&store.get().length));
            print_deviation(&store, &report);
        }

        Commands::Validate => {
            let errors = store.check_submission();
            if errors.is_empty() {
                println!("✅ 提出できます");
            } else {
                bail!("提出できません（{}件）", errors.len());
            }
        }

        Commands::Export { output, yes } => {
            println!("📄 daily-report - 帳票出力\n");

            let errors = store.check_submission();
            if !errors.is_empty() {
                bail!("提出できません（{}件）", errors.len());
            }
            if !yes && !confirm("日報をExcelに出力しますか?")? {
                return Ok(());
            }

            let output_dir = output.unwrap_or_else(|| config.report_dir());
            println!("- Excelを生成中...");
            let path = export::write_report(&store.snapshot(), &output_dir, today())
                .context("帳票の出力に失敗しました")?;
            println!("✔ Excel出力: {}", path.display());
            println!("\n✅ 出力完了");
        }

        Commands::Reset { yes } => {
            if yes || confirm("ドラフトを破棄しますか?")? {
                store.reset();
            }
        }

        Commands::Config { set_storage_dir, set_report_dir, show } => {
            if let Some(dir) = set_storage_dir {
                config.set_storage_dir(dir)?;
                println!("✔ ドラフト保存先を設定しました");
            }

            if let Some(dir) = set_report_dir {
                config.set_report_dir(dir)?;
                println!("✔ 帳票出力先を設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  ドラフト保存先: {}", config.storage_dir()?.display());
                println!("  保存キー: {}", config.storage_key);
                println!("  写真の上限: {} bytes", config.max_photo_bytes);
                println!("  帳票出力先: {}", config.report_dir().display());
            }
        }
    }

    Ok(())
}

fn run_material(store: &mut Store, action: MaterialAction) -> Result<()> {
    match action {
        MaterialAction::Add => {
            let index = store.add_material_row();
            println!("行 {} を追加しました", index + 1);
        }
        MaterialAction::Select { row, material } => {
            store.select_material(material_row(row)?, &material);
        }
        MaterialAction::New { row, material, unit } => {
            store.add_new_material(material_row(row)?, &material, &unit);
        }
        MaterialAction::Qty { row, quantity } => {
            store.set_material_quantity(material_row(row)?, &quantity);
        }
        MaterialAction::Unit { row, unit } => {
            store.set_material_unit(material_row(row)?, &unit);
        }
        MaterialAction::Remove { row } => {
            store.remove_material_row(material_row(row)?);
        }
        MaterialAction::List => print_materials(store),
    }
    Ok(())
}

fn material_row(row: usize) -> Result<usize> {
    row_index(row).context("行番号は 1 以上で指定してください")
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("確認の入力に失敗しました")
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn print_deviation(store: &Store, report: &DeviationReport) {
    let draft = store.get();
    println!("計画: {}", or_dash(&draft.planned));
    println!("実績: {}", or_dash(&draft.actual));
    let mark = match report.class {
        DeviationClass::Positive => "▲",
        DeviationClass::Negative => "▼",
        DeviationClass::Neutral => "",
    };
    println!("差: {}{}", mark, or_dash(&report.value));
}

fn print_materials(store: &Store) {
    let draft = store.get();
    println!("資材:");
    for (i, row) in draft.materials.rows().iter().enumerate() {
        println!(
            "  {}. {} / {} {}",
            i + 1,
            row.material.as_deref().unwrap_or("（未選択）"),
            or_dash(&row.quantity),
            row.unit
        );
    }
    let selected = store.selected_materials();
    if !selected.is_empty() {
        println!("選択済み: {}", selected.join(", "));
    }
}

fn print_draft(store: &Store) {
    let draft = store.get();
    println!("📋 日報ドラフト（{}）\n", store.key());
    println!("  日付: {}", or_dash(&draft.date));
    println!("  工種: {}", or_dash(&draft.job_type));
    println!("  起点: {}", or_dash(&draft.station_start));
    println!("  終点: {}", or_dash(&draft.station_end));
    println!("  延長: {}", or_dash(&draft.length));
    println!("  計画: {}", or_dash(&draft.planned));
    println!("  実績: {}", or_dash(&draft.actual));
    println!("  差: {} ({})", or_dash(&draft.deviation), draft.deviation_class());
    println!("  問題点: {}", or_dash(&draft.issue));
    println!(
        "  写真: 施工前 {} / 施工後 {}",
        if draft.before_photo.is_some() { "あり" } else { "なし" },
        if draft.after_photo.is_some() { "あり" } else { "なし" }
    );
    if draft.issue_required() {
        println!("  ⚠ 差がマイナスです。問題欄を入力してください");
    }
    println!();
    print_materials(store);
}
