//! 比較画面の組み立て
//!
//! 画像2枚の直接指定、または一括比較JSONの画面から合成結果を作る。

use std::path::{Path, PathBuf};

use serde::Serialize;
use visual_diff_common::{
    parse_batch, select_view_by_name, BatchSession, Bounds, CompositorInput, ImageRef,
    OverlayOpacity, SwipePosition, ViewFrame,
};

use crate::config::Config;
use crate::error::{Result, ViewerError};
use crate::probe;

/// 合成の入力元
#[derive(Debug, Clone)]
pub enum ImageSource {
    Files {
        first: Option<PathBuf>,
        second: Option<PathBuf>,
    },
    Batch {
        path: PathBuf,
        screen: Option<String>,
        issue: Option<usize>,
    },
}

#[derive(Debug, Clone)]
pub struct ComposeRequest {
    pub source: ImageSource,
    pub mode: Option<String>,
    pub opacity: Option<u8>,
    pub position: Option<f64>,
    pub scale_highlights: Option<bool>,
}

/// JSON出力用
#[derive(Debug, Clone, Serialize)]
pub struct ComposeOutput {
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_issue: Option<usize>,
    #[serde(flatten)]
    pub frame: ViewFrame,
}

struct LoadedImages {
    first: Option<ImageRef>,
    second: Option<ImageRef>,
    screen: Option<String>,
    selected_issue: Option<usize>,
    highlight: Option<Bounds>,
    reference_width: Option<f64>,
}

fn load_files(first: Option<&Path>, second: Option<&Path>) -> Result<LoadedImages> {
    let first = first.map(probe::load_image_ref).transpose()?;
    let second = second.map(probe::load_image_ref).transpose()?;
    Ok(LoadedImages {
        first,
        second,
        screen: None,
        selected_issue: None,
        highlight: None,
        reference_width: None,
    })
}

fn load_batch(path: &Path, screen: Option<&str>, issue: Option<usize>) -> Result<LoadedImages> {
    if !path.exists() {
        return Err(ViewerError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let mut session = BatchSession::new(parse_batch(&content)?)?;

    if let Some(id) = screen {
        session.select_screen(id)?;
    }
    let selected_issue = match issue {
        Some(index) => {
            let selected = session.toggle_issue(index);
            if selected.is_none() {
                log::warn!(
                    "issue {} on screen {} has no highlight region",
                    index,
                    session.current_screen().id
                );
            }
            selected
        }
        None => None,
    };

    let base_dir = path.parent().unwrap_or(Path::new("."));
    let screen = session.current_screen();
    let (mut first, mut second) = screen.image_refs();
    probe::resolve_screen_image(base_dir, &mut first);
    probe::resolve_screen_image(base_dir, &mut second);

    Ok(LoadedImages {
        first: Some(first),
        second: Some(second),
        screen: Some(screen.id.clone()),
        selected_issue,
        highlight: session.highlight(),
        reference_width: Some(session.reference_width()),
    })
}

/// 指定された入力と設定から合成結果を作る
pub fn compose(request: &ComposeRequest, config: &Config) -> Result<ComposeOutput> {
    let loaded = match &request.source {
        ImageSource::Files { first, second } => load_files(first.as_deref(), second.as_deref())?,
        ImageSource::Batch { path, screen, issue } => load_batch(path, screen.as_deref(), *issue)?,
    };

    let compositor = match &request.mode {
        Some(name) => select_view_by_name(name),
        None => select_view_by_name(&config.default_mode),
    };
    let opacity = request
        .opacity
        .map(OverlayOpacity::new)
        .unwrap_or_else(|| config.opacity());
    let position = request
        .position
        .map(SwipePosition::new)
        .unwrap_or_default();
    let scale = request.scale_highlights.unwrap_or(config.scale_highlights);

    let input = CompositorInput::new(loaded.first.as_ref(), loaded.second.as_ref())
        .highlight(loaded.highlight)
        .overlay_opacity(opacity)
        .swipe_position(position)
        .scale_highlights(scale)
        .reference_width(loaded.reference_width);

    log::debug!("composing {} view", compositor.mode());
    Ok(ComposeOutput {
        mode: compositor.mode().as_str(),
        screen: loaded.screen,
        selected_issue: loaded.selected_issue,
        frame: compositor.compose(&input),
    })
}
