//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use visual_diff::compose::{compose, ComposeRequest, ImageSource};
use visual_diff::config::Config;
use visual_diff::error::ViewerError;
use visual_diff::probe;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn files(first: Option<PathBuf>, second: Option<PathBuf>) -> ComposeRequest {
    ComposeRequest {
        source: ImageSource::Files { first, second },
        mode: Some("overlay".into()),
        opacity: None,
        position: None,
        scale_highlights: None,
    }
}

fn batch(path: PathBuf) -> ComposeRequest {
    ComposeRequest {
        source: ImageSource::Batch { path, screen: None, issue: None },
        mode: None,
        opacity: None,
        position: None,
        scale_highlights: None,
    }
}

/// 存在しない画像を指定した場合
#[test]
fn test_missing_image_file() {
    let result = compose(
        &files(Some(PathBuf::from("/nonexistent/path/12345.png")), None),
        &Config::default(),
    );
    assert!(matches!(result, Err(ViewerError::FileNotFound(_))));
}

/// 画像として読めないファイルはエラーではなく読み込み失敗表示になる
#[test]
fn test_corrupt_image_renders_fallback() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("corrupt.png");
    std::fs::write(&path, b"not an image").unwrap();

    let output = compose(&files(Some(path), None), &Config::default()).expect("合成は成功する");
    let text = visual_diff::report::render_frame(&output.frame);
    assert!(text.contains("corrupt.png [Unable to load image]"));
}

/// 存在しない一括比較JSON
#[test]
fn test_missing_batch_file() {
    let result = compose(&batch(PathBuf::from("/nonexistent/diffs.json")), &Config::default());
    assert!(matches!(result, Err(ViewerError::FileNotFound(_))));
}

/// 壊れたJSON
#[test]
fn test_malformed_batch_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("diffs.json");
    std::fs::write(&path, "{ invalid json }").unwrap();

    let result = compose(&batch(path), &Config::default());
    assert!(matches!(result, Err(ViewerError::Common(_))));
}

/// 画面が1つも無いJSON
#[test]
fn test_batch_without_screens() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("diffs.json");
    std::fs::write(&path, r#"{"metadata": {"width": 390}, "screens": []}"#).unwrap();

    let err = compose(&batch(path), &Config::default()).unwrap_err();
    assert!(matches!(
        err,
        ViewerError::Common(visual_diff_common::Error::Validation(_))
    ));
}

/// 壊れた設定ファイル
#[test]
fn test_malformed_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ViewerError::JsonParse(_))));
}

/// エラーメッセージにパスが含まれる
#[test]
fn test_error_messages_include_path() {
    let err = probe::read_dimensions(Path::new("/nonexistent/shot.png")).unwrap_err();
    let message = format!("{}", err);
    assert!(message.contains("ファイルが見つかりません"));
    assert!(message.contains("/nonexistent/shot.png"));
}
