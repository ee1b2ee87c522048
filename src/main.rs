use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use label_scan::analyzer::GeminiClient;
use label_scan::cli::{Cli, Commands, HistoryAction};
use label_scan::config::Config;
use label_scan::error::LabelScanError;
use label_scan::store::FileSlot;
use label_scan::{image_file, report};
use label_scan_common::{ScanError, ScanSession};
use std::time::Duration;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn open_history() -> anyhow::Result<(FileSlot, ScanSession)> {
    let store = FileSlot::new(Config::history_path()?);
    let session = ScanSession::restore(&store);
    Ok((store, session))
}

fn history_index_error(index: usize, session: &ScanSession) -> LabelScanError {
    LabelScanError::HistoryIndex {
        index,
        len: session.history().len(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut config = Config::load().context("設定の読み込みに失敗しました")?;

    match cli.command {
        Commands::Analyze { image, json } => {
            let (store, mut session) = open_history()?;

            // 1. 画像読み込み（サイズ・形式チェック）
            let encoded = match image_file::load_image(&image) {
                Ok(encoded) => encoded,
                Err(LabelScanError::Common(e)) => bail!(ScanError::from(&e)),
                Err(e) => return Err(e.into()),
            };
            session.set_image(encoded);

            // 2. 解析
            let client = GeminiClient::new(&config)?;
            let Some(request_image) = session.begin_analysis() else {
                bail!("解析を開始できません");
            };

            let bar = spinner("解析中...");
            let outcome = client.analyze(&request_image).await;
            bar.finish_and_clear();

            if !session.finish_analysis(outcome, Utc::now()) {
                bail!(session.error().unwrap_or(ScanError::AnalysisFailed));
            }

            // 3. 履歴保存
            if let Err(e) = session.persist_history(&store) {
                log::error!("履歴の保存に失敗: {}", e);
            }

            if let Some(result) = session.current() {
                if json {
                    println!("{}", serde_json::to_string_pretty(result)?);
                } else {
                    println!("{}", report::render_result(result));
                }
            }
        }

        Commands::History { action } => {
            let (store, mut session) = open_history()?;

            match action {
                HistoryAction::List => {
                    if session.history().is_empty() {
                        println!("履歴はありません");
                    }
                    for (index, result) in session.history().entries().iter().enumerate() {
                        println!("{}", report::render_history_line(index, result));
                    }
                }

                HistoryAction::Show { index, json } => {
                    if !session.select_history(index) {
                        return Err(history_index_error(index, &session).into());
                    }
                    if let Some(result) = session.current() {
                        if json {
                            println!("{}", serde_json::to_string_pretty(result)?);
                        } else {
                            println!("{}", report::render_result(result));
                        }
                    }
                }

                HistoryAction::Remove { index } => {
                    if !session.remove_history(index) {
                        return Err(history_index_error(index, &session).into());
                    }
                    session.persist_history(&store)?;
                    println!("✔ {} 番を削除しました（残り {} 件）", index, session.history().len());
                }

                HistoryAction::Clear { yes } => {
                    if session.history().is_empty() {
                        println!("履歴はありません");
                        return Ok(());
                    }
                    let confirmed = yes
                        || Confirm::new()
                            .with_prompt(format!(
                                "履歴 {} 件をすべて削除しますか？",
                                session.history().len()
                            ))
                            .default(false)
                            .interact()?;

                    if session.clear_history(confirmed) {
                        session.persist_history(&store)?;
                        println!("✔ 履歴を削除しました");
                    } else {
                        println!("キャンセルしました");
                    }
                }
            }
        }

        Commands::Config { set_api_key, set_model, show } => {
            let mut changed = false;

            if let Some(key) = set_api_key {
                config.set_api_key(key);
                changed = true;
                println!("✔ APIキーを設定しました");
            }

            if let Some(model) = set_model {
                config.model = model;
                changed = true;
                println!("✔ モデルを設定しました");
            }

            if changed {
                config.save()?;
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  エンドポイント: {}", config.endpoint);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  APIキー: {}", if config.api_key().is_ok() { "設定済み" } else { "未設定" });
                println!("  履歴: {}", Config::history_path()?.display());
            }
        }
    }

    Ok(())
}
