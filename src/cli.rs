use clap::{Parser, Subcommand};
use std::path::PathBuf;
use visual_diff_common::Language;

#[derive(Parser)]
#[command(name = "visual-diff")]
#[command(about = "デザインと実装スクリーンショットの比較ビューア", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 比較モードで画面を合成して表示
    Compose {
        /// 1枚目（デザイン）の画像
        #[arg(long)]
        first: Option<PathBuf>,

        /// 2枚目（実装）の画像
        #[arg(long)]
        second: Option<PathBuf>,

        /// 比較モード (side-by-side/overlay/swipe)。不明な値は side-by-side
        #[arg(short, long)]
        mode: Option<String>,

        /// オーバーレイの不透明度 (0-100)
        #[arg(long)]
        opacity: Option<u8>,

        /// スワイプの境界線位置 (0-100)
        #[arg(long)]
        position: Option<f64>,

        /// 一括比較JSON (diffs.json)
        #[arg(short, long)]
        batch: Option<PathBuf>,

        /// 表示する画面ID（省略時は先頭）
        #[arg(short, long)]
        screen: Option<String>,

        /// ハイライトする差分の番号（0始まり）
        #[arg(short, long)]
        issue: Option<usize>,

        /// 出力形式 (text/json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// ハイライトを画像サイズに合わせて拡縮しない
        #[arg(long)]
        no_scale: bool,
    },

    /// 2枚の画像から並列表示の配置方向を判定
    Layout {
        #[arg(required = true)]
        first: PathBuf,

        #[arg(required = true)]
        second: PathBuf,
    },

    /// 境界線ドラッグをシミュレート
    Swipe {
        /// コンテナ左端のX座標
        #[arg(long, default_value = "0")]
        container_left: f64,

        /// コンテナ幅
        #[arg(long)]
        container_width: f64,

        /// ポインタX座標の列
        #[arg(required = true, allow_negative_numbers = true)]
        pointer_x: Vec<f64>,
    },

    /// 一括比較JSONを検証
    Validate {
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 差分一覧を表示
    Issues {
        #[arg(required = true)]
        input: PathBuf,

        /// 画面ID（省略時は全画面）
        #[arg(short, long)]
        screen: Option<String>,

        /// 修正案の言語 (en/ko)
        #[arg(short, long)]
        lang: Option<Language>,
    },

    /// 設定を表示/編集
    Config {
        /// 既定の比較モード
        #[arg(long)]
        set_mode: Option<String>,

        /// 既定のオーバーレイ不透明度
        #[arg(long)]
        set_opacity: Option<u8>,

        /// 修正案の言語
        #[arg(long)]
        set_language: Option<Language>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use text or json", s)),
        }
    }
}
