//! 比較モードごとの表示合成
//!
//! 各コンポジタは2枚の画像とハイライト領域から、ホスト非依存の描画記述
//! [`ViewFrame`] を作る。Web側はこれをDOMに、CLIはテキスト/JSONに変換する。
//!
//! - 並列表示: 2つのパネル。配置方向は画像のアスペクト比で決まる
//! - オーバーレイ: 1枚目の上に2枚目を透明度付きで重ねる
//! - スワイプ: 両方の画像が必須。2枚目を境界線の右側でクリップする

use serde::Serialize;

use crate::layout::{orientation_for, place_bounds, Orientation, Placement};
use crate::swipe::SwipePosition;
use crate::types::{Bounds, Dimensions, ImageRef};

/// 1枚だけ未読み込みのパネル
pub const NO_IMAGE_LOADED: &str = "No image loaded";
/// オーバーレイで両方とも未読み込み
pub const NO_IMAGES_LOADED: &str = "No images loaded";
/// スワイプで片方が未読み込み
pub const LOAD_BOTH_IMAGES: &str = "Please load both images to use swipe mode";
/// 画像の読み込み失敗
pub const IMAGE_LOAD_FAILED: &str = "Unable to load image";

/// オーバーレイ時の2枚目の不透明度（0-100%）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct OverlayOpacity(u8);

impl OverlayOpacity {
    pub fn new(percent: u8) -> Self {
        Self(percent.min(100))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    /// CSS opacity 値（0.0-1.0）
    pub fn alpha(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for OverlayOpacity {
    fn default() -> Self {
        Self(50)
    }
}

/// 画像の代わりに表示するメッセージ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placeholder {
    NoImageLoaded,
    NoImagesLoaded,
    LoadBothImages,
}

impl Placeholder {
    pub fn message(&self) -> &'static str {
        match self {
            Placeholder::NoImageLoaded => NO_IMAGE_LOADED,
            Placeholder::NoImagesLoaded => NO_IMAGES_LOADED,
            Placeholder::LoadBothImages => LOAD_BOTH_IMAGES,
        }
    }
}

/// clip-path: inset(...) の各辺（%）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ClipInset {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ClipInset {
    /// 右端から `percent`% を隠す
    pub fn from_right(percent: f64) -> Self {
        Self {
            right: percent.clamp(0.0, 100.0),
            ..Self::default()
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "inset({} {}% {} {})",
            css_length(self.top),
            self.right,
            css_length(self.bottom),
            css_length(self.left)
        )
    }
}

fn css_length(percent: f64) -> String {
    if percent == 0.0 {
        "0".to_string()
    } else {
        format!("{}%", percent)
    }
}

/// レイヤーの中身
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum LayerContent {
    Image { source: String, name: String },
    /// 読み込み失敗。この画像だけ代替ボックスを表示する
    LoadFailed { name: String },
}

/// 重ね合わせる画像レイヤー
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub content: LayerContent,
    pub opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<ClipInset>,
}

impl Layer {
    pub fn from_image(image: &ImageRef) -> Self {
        let content = if image.resolution.is_failed() {
            LayerContent::LoadFailed {
                name: image.display_name.clone(),
            }
        } else {
            LayerContent::Image {
                source: image.source.clone(),
                name: image.display_name.clone(),
            }
        };
        Self {
            content,
            opacity: 1.0,
            clip: None,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_clip(mut self, clip: ClipInset) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.content, LayerContent::LoadFailed { .. })
    }
}

/// 並列表示の1パネル
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Panel {
    Empty {
        placeholder: Placeholder,
    },
    Image {
        layer: Layer,
        caption: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        highlight: Option<Placement>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideBySideFrame {
    pub orientation: Orientation,
    pub panels: [Panel; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayFrame {
    /// 下から順に描画する
    pub layers: Vec<Layer>,
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Placement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeFrame {
    /// 1枚目（全面）
    pub base: Layer,
    /// 2枚目（境界線の右側をクリップ）
    pub revealed: Layer,
    /// ドラッグハンドルの左端からの位置（%）
    pub handle_left: f64,
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Placement>,
}

/// 合成結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "view", content = "frame")]
pub enum ViewFrame {
    Placeholder(Placeholder),
    SideBySide(SideBySideFrame),
    Overlay(OverlayFrame),
    Swipe(SwipeFrame),
}

impl ViewFrame {
    /// ドラッグ開始を受け付けるハンドルがあるか
    pub fn has_drag_handle(&self) -> bool {
        matches!(self, ViewFrame::Swipe(_))
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        match self {
            ViewFrame::Placeholder(placeholder) => Some(*placeholder),
            _ => None,
        }
    }
}

/// コンポジタへの入力
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositorInput<'a> {
    pub first: Option<&'a ImageRef>,
    pub second: Option<&'a ImageRef>,
    pub highlight: Option<Bounds>,
    pub overlay_opacity: OverlayOpacity,
    pub swipe_position: SwipePosition,
    /// ハイライトを画像の描画サイズに合わせて拡縮する
    pub scale_highlights: bool,
    /// ハイライト座標の基準幅。一括比較では `metadata.width`
    pub reference_width: Option<f64>,
}

impl<'a> CompositorInput<'a> {
    pub fn new(first: Option<&'a ImageRef>, second: Option<&'a ImageRef>) -> Self {
        Self {
            first,
            second,
            scale_highlights: true,
            ..Self::default()
        }
    }

    pub fn highlight(mut self, highlight: Option<Bounds>) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn overlay_opacity(mut self, opacity: OverlayOpacity) -> Self {
        self.overlay_opacity = opacity;
        self
    }

    pub fn swipe_position(mut self, position: SwipePosition) -> Self {
        self.swipe_position = position;
        self
    }

    pub fn scale_highlights(mut self, scale: bool) -> Self {
        self.scale_highlights = scale;
        self
    }

    pub fn reference_width(mut self, width: Option<f64>) -> Self {
        self.reference_width = width;
        self
    }

    /// ハイライトの基準になる画像サイズ（1枚目優先）
    fn anchor_dimensions(&self) -> Option<Dimensions> {
        self.first
            .and_then(ImageRef::dimensions)
            .or_else(|| self.second.and_then(ImageRef::dimensions))
    }

    fn placement(&self) -> Option<Placement> {
        self.highlight
            .map(|bounds| {
                place_bounds(
                    bounds,
                    self.anchor_dimensions(),
                    self.reference_width,
                    self.scale_highlights,
                )
            })
    }
}

/// 比較モード1つ分の描画処理
pub trait Compositor {
    fn compose(&self, input: &CompositorInput<'_>) -> ViewFrame;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideBySideCompositor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayCompositor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwipeCompositor;

impl Compositor for SideBySideCompositor {
    fn compose(&self, input: &CompositorInput<'_>) -> ViewFrame {
        // 同じ領域を両方のパネルに描く
        let highlight = input.placement();
        let panel = |image: Option<&ImageRef>| match image {
            Some(image) => Panel::Image {
                layer: Layer::from_image(image),
                caption: image.display_name.clone(),
                highlight,
            },
            None => Panel::Empty {
                placeholder: Placeholder::NoImageLoaded,
            },
        };

        ViewFrame::SideBySide(SideBySideFrame {
            orientation: orientation_for(input.first, input.second),
            panels: [panel(input.first), panel(input.second)],
        })
    }
}

impl Compositor for OverlayCompositor {
    fn compose(&self, input: &CompositorInput<'_>) -> ViewFrame {
        if input.first.is_none() && input.second.is_none() {
            return ViewFrame::Placeholder(Placeholder::NoImagesLoaded);
        }

        let mut layers = Vec::with_capacity(2);
        if let Some(first) = input.first {
            layers.push(Layer::from_image(first));
        }
        if let Some(second) = input.second {
            layers.push(Layer::from_image(second).with_opacity(input.overlay_opacity.alpha()));
        }

        let caption = [input.first, input.second]
            .into_iter()
            .flatten()
            .map(|image| image.display_name.as_str())
            .collect::<Vec<_>>()
            .join(" / ");

        ViewFrame::Overlay(OverlayFrame {
            layers,
            caption,
            highlight: input.placement(),
        })
    }
}

impl Compositor for SwipeCompositor {
    fn compose(&self, input: &CompositorInput<'_>) -> ViewFrame {
        let (Some(first), Some(second)) = (input.first, input.second) else {
            return ViewFrame::Placeholder(Placeholder::LoadBothImages);
        };

        let position = input.swipe_position;
        ViewFrame::Swipe(SwipeFrame {
            base: Layer::from_image(first),
            revealed: Layer::from_image(second)
                .with_clip(ClipInset::from_right(position.hidden_right())),
            handle_left: position.percent(),
            caption: format!("{} | {}", first.display_name, second.display_name),
            highlight: input.placement(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn design() -> ImageRef {
        ImageRef::new("blob:design", "design.png").with_dimensions(Dimensions::new(400, 200))
    }

    fn app() -> ImageRef {
        ImageRef::new("blob:app", "app.png").with_dimensions(Dimensions::new(800, 400))
    }

    #[test]
    fn test_side_by_side_placeholders() {
        let first = design();
        let frame = SideBySideCompositor.compose(&CompositorInput::new(Some(&first), None));
        let ViewFrame::SideBySide(frame) = frame else {
            panic!("並列表示になるはず");
        };
        assert!(matches!(frame.panels[0], Panel::Image { .. }));
        assert_eq!(
            frame.panels[1],
            Panel::Empty { placeholder: Placeholder::NoImageLoaded }
        );
        assert_eq!(frame.orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_side_by_side_stacks_landscape_pair() {
        let (first, second) = (design(), app());
        let frame = SideBySideCompositor.compose(&CompositorInput::new(Some(&first), Some(&second)));
        let ViewFrame::SideBySide(frame) = frame else {
            panic!("並列表示になるはず");
        };
        assert_eq!(frame.orientation, Orientation::Vertical);
    }

    #[test]
    fn test_side_by_side_highlight_in_both_panels() {
        let (first, second) = (design(), app());
        let input = CompositorInput::new(Some(&first), Some(&second))
            .highlight(Some(Bounds::new(100.0, 50.0, 40.0, 20.0)));
        let ViewFrame::SideBySide(frame) = SideBySideCompositor.compose(&input) else {
            panic!("並列表示になるはず");
        };

        let highlights: Vec<_> = frame
            .panels
            .iter()
            .map(|panel| match panel {
                Panel::Image { highlight, .. } => *highlight,
                Panel::Empty { .. } => None,
            })
            .collect();
        let expected = Placement::Percent { left: 25.0, top: 25.0, width: 10.0, height: 10.0 };
        assert_eq!(highlights, vec![Some(expected), Some(expected)]);
    }

    #[test]
    fn test_frame_unchanged_when_portrait_dimensions_resolve() {
        let pending = (ImageRef::new("a", "a.png"), ImageRef::new("b", "b.png"));
        let resolved = (
            pending.0.clone().with_dimensions(Dimensions::new(390, 844)),
            pending.1.clone().with_dimensions(Dimensions::new(390, 844)),
        );
        for compositor in [
            &SideBySideCompositor as &dyn Compositor,
            &OverlayCompositor,
            &SwipeCompositor,
        ] {
            let before = compositor.compose(&CompositorInput::new(Some(&pending.0), Some(&pending.1)));
            let after = compositor.compose(&CompositorInput::new(Some(&resolved.0), Some(&resolved.1)));
            assert_eq!(before, after);
        }
    }

    #[test]
    fn test_overlay_no_images() {
        let frame = OverlayCompositor.compose(&CompositorInput::new(None, None));
        assert_eq!(frame, ViewFrame::Placeholder(Placeholder::NoImagesLoaded));
        assert_eq!(frame.placeholder().map(|p| p.message()), Some(NO_IMAGES_LOADED));
    }

    #[test]
    fn test_overlay_opacity_applied_to_second() {
        let (first, second) = (design(), app());
        for (percent, alpha) in [(0, 0.0), (35, 0.35), (100, 1.0)] {
            let input = CompositorInput::new(Some(&first), Some(&second))
                .overlay_opacity(OverlayOpacity::new(percent));
            let ViewFrame::Overlay(frame) = OverlayCompositor.compose(&input) else {
                panic!("オーバーレイになるはず");
            };
            assert_eq!(frame.layers.len(), 2);
            assert_eq!(frame.layers[0].opacity, 1.0);
            assert_eq!(frame.layers[1].opacity, alpha);
            assert_eq!(frame.caption, "design.png / app.png");
        }
    }

    #[test]
    fn test_overlay_single_image() {
        let second = app();
        let ViewFrame::Overlay(frame) = OverlayCompositor.compose(&CompositorInput::new(None, Some(&second)))
        else {
            panic!("オーバーレイになるはず");
        };
        assert_eq!(frame.layers.len(), 1);
        assert_eq!(frame.caption, "app.png");
    }

    #[test]
    fn test_overlay_highlight_drawn_once() {
        let (first, second) = (design(), app());
        let input = CompositorInput::new(Some(&first), Some(&second))
            .highlight(Some(Bounds::new(0.0, 0.0, 200.0, 100.0)));
        let ViewFrame::Overlay(frame) = OverlayCompositor.compose(&input) else {
            panic!("オーバーレイになるはず");
        };
        assert_eq!(
            frame.highlight,
            Some(Placement::Percent { left: 0.0, top: 0.0, width: 50.0, height: 50.0 })
        );
    }

    #[test]
    fn test_swipe_requires_both_images() {
        let first = design();
        let frame = SwipeCompositor.compose(&CompositorInput::new(Some(&first), None));
        assert_eq!(frame, ViewFrame::Placeholder(Placeholder::LoadBothImages));
        assert!(!frame.has_drag_handle());

        let frame = SwipeCompositor.compose(&CompositorInput::new(None, None));
        assert!(!frame.has_drag_handle());
    }

    #[test]
    fn test_swipe_clip_follows_position() {
        let (first, second) = (design(), app());
        let input = CompositorInput::new(Some(&first), Some(&second))
            .swipe_position(SwipePosition::new(30.0));
        let frame = SwipeCompositor.compose(&input);
        assert!(frame.has_drag_handle());
        let ViewFrame::Swipe(frame) = frame else {
            panic!("スワイプになるはず");
        };

        assert_eq!(frame.handle_left, 30.0);
        assert_eq!(frame.base.clip, None);
        let clip = frame.revealed.clip.expect("2枚目はクリップされる");
        assert_eq!(clip.right, 70.0);
        assert_eq!(clip.to_css(), "inset(0 70% 0 0)");
        assert_eq!(frame.caption, "design.png | app.png");
    }

    #[test]
    fn test_failed_image_is_scoped() {
        let mut first = design();
        first.mark_failed();
        let second = app();
        let ViewFrame::Overlay(frame) =
            OverlayCompositor.compose(&CompositorInput::new(Some(&first), Some(&second)))
        else {
            panic!("オーバーレイになるはず");
        };
        assert!(frame.layers[0].is_failed());
        assert!(!frame.layers[1].is_failed());
    }

    #[test]
    fn test_highlight_uses_reference_width() {
        let first = ImageRef::new("figma", "figma.png").with_dimensions(Dimensions::new(780, 1688));
        let second = ImageRef::new("app", "app.png").with_dimensions(Dimensions::new(780, 1688));
        let input = CompositorInput::new(Some(&first), Some(&second))
            .highlight(Some(Bounds::new(24.0, 480.0, 342.0, 48.0)))
            .reference_width(Some(390.0));
        let ViewFrame::Overlay(frame) = OverlayCompositor.compose(&input) else {
            panic!("オーバーレイになるはず");
        };
        let Some(Placement::Percent { left, width, .. }) = frame.highlight else {
            panic!("割合で配置されるはず");
        };
        assert!((left - 6.1538).abs() < 1e-3);
        assert!((width - 87.6923).abs() < 1e-3);
    }

    #[test]
    fn test_highlight_pixels_when_scaling_disabled() {
        let first = design();
        let input = CompositorInput::new(Some(&first), None)
            .highlight(Some(Bounds::new(10.0, 20.0, 5.0, 5.0)))
            .scale_highlights(false);
        let ViewFrame::Overlay(frame) = OverlayCompositor.compose(&input) else {
            panic!("オーバーレイになるはず");
        };
        assert_eq!(
            frame.highlight,
            Some(Placement::Pixels { left: 10.0, top: 20.0, width: 5.0, height: 5.0 })
        );
    }

    #[test]
    fn test_frame_serializes_with_view_tag() {
        let frame = ViewFrame::Placeholder(Placeholder::LoadBothImages);
        let json = serde_json::to_string(&frame).unwrap();
        assert_eq!(json, r#"{"view":"placeholder","frame":"load-both-images"}"#);
    }

    #[test]
    fn test_opacity_clamped() {
        assert_eq!(OverlayOpacity::new(250).percent(), 100);
        assert_eq!(OverlayOpacity::default().alpha(), 0.5);
    }
}
