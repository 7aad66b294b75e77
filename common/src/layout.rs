//! レイアウト判定
//!
//! - 並列表示モードの配置方向（横並び / 縦積み）
//! - 差分領域を表示中の画像に合わせて配置する座標変換

use serde::Serialize;

use crate::types::{Bounds, Dimensions, ImageRef};

/// 両方の画像が存在し、どちらも横長なら縦積みにする
///
/// サイズ未解決の画像は `None` として渡す。結果は false になる。
pub fn is_stacked_layout(first: Option<Dimensions>, second: Option<Dimensions>) -> bool {
    match (first, second) {
        (Some(first), Some(second)) => first.is_landscape() && second.is_landscape(),
        _ => false,
    }
}

/// 並列表示の配置方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// 左右に並べる
    #[default]
    Horizontal,
    /// 上下に積む（横長画像同士）
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// 2枚の画像から並列表示の方向を決める
pub fn orientation_for(first: Option<&ImageRef>, second: Option<&ImageRef>) -> Orientation {
    let first = first.and_then(ImageRef::dimensions);
    let second = second.and_then(ImageRef::dimensions);
    if is_stacked_layout(first, second) {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    }
}

/// ハイライト矩形の配置
///
/// `Percent` は画像の描画サイズに追従する。`Pixels` は自然サイズが未解決のときの
/// フォールバックで、描画サイズとの差は補正されない。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "unit")]
pub enum Placement {
    Percent {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    Pixels {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
}

impl Placement {
    /// インラインCSS
    pub fn to_css(&self) -> String {
        match self {
            Placement::Percent { left, top, width, height } => format!(
                "left: {}%; top: {}%; width: {}%; height: {}%;",
                left, top, width, height
            ),
            Placement::Pixels { left, top, width, height } => format!(
                "left: {}px; top: {}px; width: {}px; height: {}px;",
                left, top, width, height
            ),
        }
    }
}

/// 画像座標系の領域を、表示中の画像に対する配置へ変換
///
/// `reference_width` があれば、領域はその幅で画像を表示したときのピクセル値として
/// 扱う（一括比較の `metadata.width`）。高さは自然サイズの縦横比から求める。
/// なければ自然サイズそのものが座標系になる。
pub fn place_bounds(
    bounds: Bounds,
    natural: Option<Dimensions>,
    reference_width: Option<f64>,
    scale: bool,
) -> Placement {
    let natural = natural.filter(|d| d.width > 0 && d.height > 0);
    match natural {
        Some(dims) if scale => {
            let natural_width = f64::from(dims.width);
            let w = reference_width
                .filter(|w| w.is_finite() && *w > 0.0)
                .unwrap_or(natural_width);
            let h = f64::from(dims.height) * w / natural_width;
            Placement::Percent {
                left: bounds.x / w * 100.0,
                top: bounds.y / h * 100.0,
                width: bounds.width / w * 100.0,
                height: bounds.height / h * 100.0,
            }
        }
        _ => Placement::Pixels {
            left: bounds.x,
            top: bounds.y,
            width: bounds.width,
            height: bounds.height,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stacked_when_both_landscape() {
        assert!(is_stacked_layout(
            Some(Dimensions::new(1920, 1080)),
            Some(Dimensions::new(1600, 900))
        ));
    }

    #[test]
    fn test_not_stacked_when_one_portrait() {
        assert!(!is_stacked_layout(
            Some(Dimensions::new(1080, 1920)),
            Some(Dimensions::new(1600, 900))
        ));
    }

    #[test]
    fn test_not_stacked_when_missing() {
        assert!(!is_stacked_layout(None, Some(Dimensions::new(1600, 900))));
        assert!(!is_stacked_layout(Some(Dimensions::new(1600, 900)), None));
        assert!(!is_stacked_layout(None, None));
    }

    #[test]
    fn test_not_stacked_when_square() {
        assert!(!is_stacked_layout(
            Some(Dimensions::new(800, 800)),
            Some(Dimensions::new(1600, 900))
        ));
    }

    #[test]
    fn test_orientation_pending_is_horizontal() {
        // サイズ未解決の間は横並び
        let first = ImageRef::new("a", "a.png");
        let second = ImageRef::new("b", "b.png").with_dimensions(Dimensions::new(1600, 900));
        assert_eq!(orientation_for(Some(&first), Some(&second)), Orientation::Horizontal);

        let first = first.with_dimensions(Dimensions::new(1920, 1080));
        assert_eq!(orientation_for(Some(&first), Some(&second)), Orientation::Vertical);
    }

    #[test]
    fn test_place_bounds_scaled() {
        let placement = place_bounds(
            Bounds::new(100.0, 50.0, 200.0, 25.0),
            Some(Dimensions::new(400, 200)),
            None,
            true,
        );
        assert_eq!(
            placement,
            Placement::Percent { left: 25.0, top: 25.0, width: 50.0, height: 12.5 }
        );
    }

    #[test]
    fn test_place_bounds_in_reference_width() {
        // 2倍解像度のスクリーンショット。領域は390px幅での座標
        let placement = place_bounds(
            Bounds::new(24.0, 422.0, 342.0, 84.4),
            Some(Dimensions::new(780, 1688)),
            Some(390.0),
            true,
        );
        let Placement::Percent { left, top, width, height } = placement else {
            panic!("割合で配置されるはず");
        };
        assert!((left - 6.1538).abs() < 1e-3);
        assert!((width - 87.6923).abs() < 1e-3);
        assert!((top - 50.0).abs() < 1e-9);
        assert!((height - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_place_bounds_ignores_invalid_reference_width() {
        let bounds = Bounds::new(100.0, 50.0, 200.0, 25.0);
        let natural = Some(Dimensions::new(400, 200));
        assert_eq!(
            place_bounds(bounds, natural, Some(0.0), true),
            place_bounds(bounds, natural, None, true)
        );
    }

    #[test]
    fn test_place_bounds_unresolved_uses_pixels() {
        let bounds = Bounds::new(10.0, 20.0, 5.0, 5.0);
        assert_eq!(
            place_bounds(bounds, None, None, true),
            Placement::Pixels { left: 10.0, top: 20.0, width: 5.0, height: 5.0 }
        );
        assert_eq!(
            place_bounds(bounds, Some(Dimensions::new(0, 0)), Some(390.0), true),
            Placement::Pixels { left: 10.0, top: 20.0, width: 5.0, height: 5.0 }
        );
    }

    #[test]
    fn test_place_bounds_scaling_disabled() {
        let bounds = Bounds::new(10.0, 20.0, 5.0, 5.0);
        let placement = place_bounds(bounds, Some(Dimensions::new(100, 100)), Some(50.0), false);
        assert!(matches!(placement, Placement::Pixels { .. }));
    }

    #[test]
    fn test_placement_css() {
        let css = Placement::Pixels { left: 10.0, top: 20.0, width: 5.0, height: 5.5 }.to_css();
        assert_eq!(css, "left: 10px; top: 20px; width: 5px; height: 5.5px;");

        let css = Placement::Percent { left: 25.0, top: 0.0, width: 50.0, height: 12.5 }.to_css();
        assert_eq!(css, "left: 25%; top: 0%; width: 50%; height: 12.5%;");
    }
}
