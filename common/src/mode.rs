//! 比較モードと表示コンポジタの選択

use serde::{Deserialize, Serialize};

use crate::compositor::{
    Compositor, CompositorInput, OverlayCompositor, SideBySideCompositor, SwipeCompositor,
    ViewFrame,
};

/// 画像比較モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonMode {
    /// 2枚を並べて表示（デフォルト）
    #[default]
    SideBySide,
    /// 透明度付きで重ねる
    Overlay,
    /// 境界線で左右を切り替える
    Swipe,
}

impl ComparisonMode {
    pub const ALL: [ComparisonMode; 3] = [
        ComparisonMode::SideBySide,
        ComparisonMode::Overlay,
        ComparisonMode::Swipe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonMode::SideBySide => "side-by-side",
            ComparisonMode::Overlay => "overlay",
            ComparisonMode::Swipe => "swipe",
        }
    }

    /// ツールバー表示名
    pub fn label(&self) -> &'static str {
        match self {
            ComparisonMode::SideBySide => "Side by Side",
            ComparisonMode::Overlay => "Overlay",
            ComparisonMode::Swipe => "Swipe",
        }
    }

    /// 保存値などから読み込む。不明な値は並列表示にフォールバック
    pub fn parse_lossy(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            log::warn!("unknown comparison mode {:?}, falling back to side-by-side", value);
            ComparisonMode::SideBySide
        })
    }
}

impl std::str::FromStr for ComparisonMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "side-by-side" | "sidebyside" | "side" => Ok(ComparisonMode::SideBySide),
            "overlay" => Ok(ComparisonMode::Overlay),
            "swipe" => Ok(ComparisonMode::Swipe),
            _ => Err(format!(
                "Unknown mode: {}. Use side-by-side, overlay, or swipe",
                s
            )),
        }
    }
}

impl std::fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// モードごとのコンポジタ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCompositor {
    SideBySide(SideBySideCompositor),
    Overlay(OverlayCompositor),
    Swipe(SwipeCompositor),
}

impl ViewCompositor {
    pub fn mode(&self) -> ComparisonMode {
        match self {
            ViewCompositor::SideBySide(_) => ComparisonMode::SideBySide,
            ViewCompositor::Overlay(_) => ComparisonMode::Overlay,
            ViewCompositor::Swipe(_) => ComparisonMode::Swipe,
        }
    }

    pub fn compose(&self, input: &CompositorInput<'_>) -> ViewFrame {
        match self {
            ViewCompositor::SideBySide(compositor) => compositor.compose(input),
            ViewCompositor::Overlay(compositor) => compositor.compose(input),
            ViewCompositor::Swipe(compositor) => compositor.compose(input),
        }
    }
}

/// 現在のモードに対応するコンポジタを選ぶ
pub fn select_view(mode: ComparisonMode) -> ViewCompositor {
    match mode {
        ComparisonMode::SideBySide => ViewCompositor::SideBySide(SideBySideCompositor),
        ComparisonMode::Overlay => ViewCompositor::Overlay(OverlayCompositor),
        ComparisonMode::Swipe => ViewCompositor::Swipe(SwipeCompositor),
    }
}

/// 文字列のモード名から選ぶ。不明・破損した値は並列表示
pub fn select_view_by_name(name: &str) -> ViewCompositor {
    match name.parse::<ComparisonMode>() {
        Ok(mode) => select_view(mode),
        Err(_) => {
            log::warn!("unknown comparison mode {:?}, rendering side-by-side", name);
            ViewCompositor::SideBySide(SideBySideCompositor)
        }
    }
}
