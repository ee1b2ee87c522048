use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "label-scan")]
#[command(about = "食品ラベル画像のAI解析・スキャン履歴管理ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ラベル画像を解析して履歴に追加
    Analyze {
        /// 画像ファイルのパス（5MiBまで）
        #[arg(required = true)]
        image: PathBuf,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// スキャン履歴の表示・削除
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// 設定管理
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// モデル名を設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// 履歴一覧（新しい順）
    List,

    /// 履歴の1件を表示（再解析はしない）
    Show {
        index: usize,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 履歴の1件を削除
    Remove { index: usize },

    /// 履歴を全削除
    Clear {
        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },
}
