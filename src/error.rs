use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像サイズを取得できません: {0}")]
    ImageProbe(String),

    #[error("引数が不正です: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Common(#[from] visual_diff_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
