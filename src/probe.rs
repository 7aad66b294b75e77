//! ローカル画像のサイズ取得
//!
//! 画像全体はデコードせず、ヘッダから自然サイズだけを読む。

use crate::error::{Result, ViewerError};
use std::path::{Path, PathBuf};
use visual_diff_common::{Dimensions, ImageRef};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

/// 拡張子が対応画像形式か
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// 画像ヘッダから自然サイズを読む
pub fn read_dimensions(path: &Path) -> Result<Dimensions> {
    if !path.exists() {
        return Err(ViewerError::FileNotFound(path.display().to_string()));
    }
    let (width, height) = image::image_dimensions(path)
        .map_err(|e| ViewerError::ImageProbe(format!("{}: {}", path.display(), e)))?;
    Ok(Dimensions::new(width, height))
}

/// ローカル画像から比較用の参照を作る
///
/// ファイルが無い場合と画像以外の拡張子はエラー。ヘッダが読めない場合は
/// 読み込み失敗状態の参照を返し、その画像のパネルだけが代替表示になる。
pub fn load_image_ref(path: &Path) -> Result<ImageRef> {
    if !is_image_path(path) {
        return Err(ViewerError::InvalidArgument(format!(
            "画像ファイルではありません: {}",
            path.display()
        )));
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let mut image = ImageRef::new(path.display().to_string(), name);

    match read_dimensions(path) {
        Ok(dims) => image.mark_resolved(dims),
        Err(ViewerError::ImageProbe(reason)) => {
            log::warn!("{}", reason);
            image.mark_failed();
        }
        Err(e) => return Err(e),
    }
    Ok(image)
}

/// 一括比較JSON内のスクリーンショット参照を、JSONの場所基準のローカルパスとして解決する
///
/// URLやローカルに存在しないパスは None。
pub fn resolve_local_source(base_dir: &Path, source: &str) -> Option<PathBuf> {
    if source.contains("://") || source.starts_with("data:") || source.starts_with("blob:") {
        return None;
    }
    let path = Path::new(source);
    let path = if path.is_relative() {
        base_dir.join(path)
    } else {
        path.to_path_buf()
    };
    path.is_file().then_some(path)
}

/// 参照先がローカル画像ならサイズを解決する。URLのままの参照はサイズ未解決のまま
pub fn resolve_screen_image(base_dir: &Path, image: &mut ImageRef) {
    let Some(path) = resolve_local_source(base_dir, &image.source) else {
        return;
    };
    match read_dimensions(&path) {
        Ok(dims) => image.mark_resolved(dims),
        Err(e) => {
            log::warn!("{}", e);
            image.mark_failed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_image_path() {
        assert!(is_image_path(Path::new("design.png")));
        assert!(is_image_path(Path::new("shot.JPG")));
        assert!(is_image_path(Path::new("a/b/c.webp")));
        assert!(!is_image_path(Path::new("diffs.json")));
        assert!(!is_image_path(Path::new("README")));
    }

    #[test]
    fn test_read_dimensions_missing_file() {
        let result = read_dimensions(Path::new("/nonexistent/path/12345.png"));
        assert!(matches!(result, Err(ViewerError::FileNotFound(_))));
    }

    #[test]
    fn test_read_dimensions_png() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("wide.png");
        image::RgbImage::new(16, 9).save(&path).expect("PNG書き込み失敗");

        assert_eq!(read_dimensions(&path).unwrap(), Dimensions::new(16, 9));
    }

    #[test]
    fn test_load_image_ref_broken_header() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("broken.png");
        fs::write(&path, b"not a png").unwrap();

        let image = load_image_ref(&path).expect("参照は作られる");
        assert!(image.resolution.is_failed());
        assert_eq!(image.display_name, "broken.png");
    }

    #[test]
    fn test_load_image_ref_rejects_non_image() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("diffs.json");
        fs::write(&path, b"{}").unwrap();

        let result = load_image_ref(&path);
        assert!(matches!(result, Err(ViewerError::InvalidArgument(_))));
    }

    #[test]
    fn test_resolve_local_source() {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("app.png"), b"x").unwrap();

        assert_eq!(
            resolve_local_source(dir.path(), "app.png"),
            Some(dir.path().join("app.png"))
        );
        assert_eq!(resolve_local_source(dir.path(), "missing.png"), None);
        assert_eq!(resolve_local_source(dir.path(), "https://example.com/app.png"), None);
    }
}
