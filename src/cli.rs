use clap::{Parser, Subcommand, ValueEnum};
use faceguard_common::ModelType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "faceguard")]
#[command(about = "ディープフェイク判別・顔画像復元クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// APIサーバーのURL（環境変数 FACEGUARD_API_URL より優先）
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// タイムアウト秒数
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 顔画像がディープフェイクかどうか判別
    Detect {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 判別モデル (korean/foreign)
        #[arg(short, long, default_value = "korean")]
        model: ModelArg,

        /// PDFレポートも出力
        #[arg(long)]
        report: bool,

        /// 同意・確認をすべて承諾
        #[arg(short, long)]
        yes: bool,

        /// 出力ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 劣化した顔画像を復元
    Restore {
        #[arg(required = true)]
        image: PathBuf,

        /// 復元画像を保存
        #[arg(short, long)]
        download: bool,

        #[arg(short, long)]
        yes: bool,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 顔画像から新しい画像を生成
    Generate {
        #[arg(required = true)]
        image: PathBuf,

        /// 生成画像を保存
        #[arg(short, long)]
        download: bool,

        #[arg(short, long)]
        yes: bool,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示・変更
    Config {
        /// APIサーバーのURLを保存
        #[arg(long)]
        set_api_url: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 判別モデル
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum ModelArg {
    #[default]
    Korean,
    Foreign,
}

impl From<ModelArg> for ModelType {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Korean => ModelType::Korean,
            ModelArg::Foreign => ModelType::Foreign,
        }
    }
}
